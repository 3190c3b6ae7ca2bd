//! Registration, login and per-user reporting

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use tracing::{error, info, warn};
use tracking::{DurationRow, build_chart};

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::{LoginCredentials, LoginResponse, NewUser, RegisterResponse, UserSummary},
    repositories::verify_password,
    state::AppState,
    validation::{validate_email, validate_password, validate_username},
};

/// Register a new user and sign them in
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> ApiResult<impl IntoResponse> {
    validate_username(&payload.username).map_err(ApiError::Validation)?;
    validate_email(&payload.email).map_err(ApiError::Validation)?;
    validate_password(&payload.password).map_err(ApiError::Validation)?;

    info!("Registration attempt for: {}", payload.email);

    let existing = state
        .user_repository
        .find_by_email(&payload.email)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            ApiError::InternalServerError
        })?;

    if existing.is_some() {
        return Err(ApiError::DuplicateEmail);
    }

    let user = state
        .user_repository
        .create(&payload)
        .await
        .map_err(|e| {
            error!("Failed to create user: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::DuplicateEmail)?;

    let token = state.jwt_service.generate_token(&user).map_err(|e| {
        error!("Failed to generate token: {}", e);
        ApiError::InternalServerError
    })?;

    let response = RegisterResponse {
        message: "User registered successfully!",
        token,
        user,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Exchange email and password for a session token
///
/// No format checks run here: an unknown email is `EmailNotFound` and any
/// password that does not verify is `InvalidPassword`.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginCredentials>,
) -> ApiResult<impl IntoResponse> {
    info!("Login attempt for: {}", payload.email);

    let user = state
        .user_repository
        .find_by_email(&payload.email)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::EmailNotFound)?;

    let matches = verify_password(&user.password_hash, &payload.password).map_err(|e| {
        error!("Failed to verify password: {}", e);
        ApiError::InternalServerError
    })?;

    if !matches {
        warn!("Invalid password for: {}", payload.email);
        return Err(ApiError::InvalidPassword);
    }

    let token = state.jwt_service.generate_token(&user).map_err(|e| {
        error!("Failed to generate token: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(LoginResponse {
        token,
        user: UserSummary {
            id: user.id,
            email: user.email,
        },
    }))
}

/// Per-date, per-project minutes for the caller
pub async fn get_user_work_sessions(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(user_id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    let rows = visualization_rows(&state, &auth, user_id).await?;

    Ok(Json(json!({
        "status": "success",
        "work_sessions": rows
    })))
}

/// Chart-ready roll-up of the caller's tracked time
pub async fn get_user_chart(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(user_id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    let rows = visualization_rows(&state, &auth, user_id).await?;
    let rows: Vec<DurationRow> = rows.iter().map(DurationRow::from).collect();

    Ok(Json(json!({
        "status": "success",
        "chart": build_chart(&rows)
    })))
}

async fn visualization_rows(
    state: &AppState,
    auth: &AuthUser,
    user_id: i32,
) -> ApiResult<Vec<crate::models::VisualizationRow>> {
    const NOT_FOUND: ApiError = ApiError::NotFound("No work sessions found for the user");

    if user_id != auth.id {
        return Err(NOT_FOUND);
    }

    let rows = state
        .work_session_repository
        .totals_by_date_and_project(auth.id)
        .await
        .map_err(|e| {
            error!("Failed to aggregate work sessions: {}", e);
            ApiError::InternalServerError
        })?;

    if rows.is_empty() {
        return Err(NOT_FOUND);
    }

    Ok(rows)
}
