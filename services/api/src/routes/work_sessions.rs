//! Work session endpoints nested under a project

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde_json::json;
use tracing::error;
use tracking::SessionRecord;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::{DataResponse, MessageResponse, UpdateWorkSession, WorkSessionList},
    state::AppState,
    validation::validate_duration,
};

const SESSION_NOT_FOUND: &str = "Work session not found";

/// List a project's sessions with the project's total duration
///
/// A project without sessions answers 404 rather than an empty list.
pub async fn list_work_sessions(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(project_id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    let work_sessions = state
        .work_session_repository
        .list_for_project(project_id, auth.id)
        .await
        .map_err(|e| {
            error!("Failed to list work sessions: {}", e);
            ApiError::InternalServerError
        })?;

    let total_duration = work_sessions
        .first()
        .map(|session| session.total_duration)
        .ok_or(ApiError::NotFound("No work sessions found"))?;

    Ok(Json(WorkSessionList {
        status: "success",
        work_sessions,
        total_duration,
    }))
}

/// Get one session of a project
pub async fn get_work_session(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((project_id, session_id)): Path<(i32, i32)>,
) -> ApiResult<impl IntoResponse> {
    let session = state
        .work_session_repository
        .find(project_id, session_id, auth.id)
        .await
        .map_err(|e| {
            error!("Failed to get work session: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound(SESSION_NOT_FOUND))?;

    Ok(Json(session))
}

/// Record a finished session against one of the caller's projects
///
/// The session is filed under today's server date.
pub async fn create_work_session(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(project_id): Path<i32>,
    Json(payload): Json<SessionRecord>,
) -> ApiResult<impl IntoResponse> {
    validate_duration(payload.duration).map_err(ApiError::Validation)?;

    let session = state
        .work_session_repository
        .create(auth.id, project_id, &payload, Utc::now().date_naive())
        .await
        .map_err(|e| {
            error!("Failed to create work session: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound("Project not found"))?;

    Ok((StatusCode::CREATED, Json(DataResponse::success(session))))
}

/// Overwrite a session of one of the caller's projects
pub async fn update_work_session(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((project_id, session_id)): Path<(i32, i32)>,
    Json(payload): Json<UpdateWorkSession>,
) -> ApiResult<impl IntoResponse> {
    validate_duration(payload.duration).map_err(ApiError::Validation)?;

    let session = state
        .work_session_repository
        .update(project_id, session_id, auth.id, &payload)
        .await
        .map_err(|e| {
            error!("Failed to update work session: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound(SESSION_NOT_FOUND))?;

    Ok(Json(json!({
        "message": "Work session updated successfully",
        "work_session": session
    })))
}

/// Delete a session of one of the caller's projects
pub async fn delete_work_session(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((project_id, session_id)): Path<(i32, i32)>,
) -> ApiResult<impl IntoResponse> {
    let deleted = state
        .work_session_repository
        .delete(project_id, session_id, auth.id)
        .await
        .map_err(|e| {
            error!("Failed to delete work session: {}", e);
            ApiError::InternalServerError
        })?;

    if !deleted {
        return Err(ApiError::NotFound(SESSION_NOT_FOUND));
    }

    Ok(Json(MessageResponse {
        message: "Work session deleted",
    }))
}
