//! Project endpoints, scoped to the authenticated user

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{error, info};

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::{DataResponse, MessageResponse, NewProject, UpdateProject},
    state::AppState,
    validation::validate_project_name,
};

const PROJECT_NOT_FOUND: &str = "Project not found";

/// List the caller's projects
pub async fn list_projects(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let projects = state
        .project_repository
        .list_for_user(auth.id)
        .await
        .map_err(|e| {
            error!("Failed to list projects: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(projects))
}

/// Create a project owned by the caller
pub async fn create_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<NewProject>,
) -> ApiResult<impl IntoResponse> {
    validate_project_name(&payload.name).map_err(ApiError::Validation)?;

    info!("Project '{}' requested by {}", payload.name, auth.email);

    let project = state
        .project_repository
        .create(auth.id, &payload)
        .await
        .map_err(|e| {
            error!("Failed to create project: {}", e);
            ApiError::InternalServerError
        })?;

    Ok((StatusCode::CREATED, Json(DataResponse::success(project))))
}

/// Get one of the caller's projects
pub async fn get_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(project_id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    let project = state
        .project_repository
        .find_for_user(project_id, auth.id)
        .await
        .map_err(|e| {
            error!("Failed to get project: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound(PROJECT_NOT_FOUND))?;

    Ok(Json(project))
}

/// Update name, description or status of one of the caller's projects
pub async fn update_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(project_id): Path<i32>,
    Json(payload): Json<UpdateProject>,
) -> ApiResult<impl IntoResponse> {
    if let Some(name) = &payload.name {
        validate_project_name(name).map_err(ApiError::Validation)?;
    }

    let project = state
        .project_repository
        .update(project_id, auth.id, &payload)
        .await
        .map_err(|e| {
            error!("Failed to update project: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound(PROJECT_NOT_FOUND))?;

    Ok(Json(project))
}

/// Delete one of the caller's projects and its work sessions
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(project_id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    let deleted = state
        .project_repository
        .delete(project_id, auth.id)
        .await
        .map_err(|e| {
            error!("Failed to delete project: {}", e);
            ApiError::InternalServerError
        })?;

    if !deleted {
        return Err(ApiError::NotFound(PROJECT_NOT_FOUND));
    }

    Ok(Json(MessageResponse {
        message: "Project deleted successfully",
    }))
}
