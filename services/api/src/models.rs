//! API models for request and response payloads

use serde::Serialize;

pub mod project;
pub mod user;
pub mod work_session;

pub use project::{NewProject, Project, ProjectSummary, UpdateProject};
pub use user::{LoginCredentials, LoginResponse, NewUser, RegisterResponse, User, UserSummary};
pub use work_session::{
    UpdateWorkSession, VisualizationRow, WorkSession, WorkSessionEntry, WorkSessionList,
};

/// `{status, data}` envelope used for created resources
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub status: &'static str,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success",
            data,
        }
    }
}

/// `{message}` body for acknowledgements
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
