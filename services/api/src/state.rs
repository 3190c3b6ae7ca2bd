//! Application state shared across handlers

use sqlx::PgPool;

use crate::{
    jwt::JwtService,
    repositories::{ProjectRepository, UserRepository, WorkSessionRepository},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_service: JwtService,
    pub user_repository: UserRepository,
    pub project_repository: ProjectRepository,
    pub work_session_repository: WorkSessionRepository,
}

impl AppState {
    /// Build the state around one connection pool
    pub fn new(db_pool: PgPool, jwt_service: JwtService) -> Self {
        Self {
            user_repository: UserRepository::new(db_pool.clone()),
            project_repository: ProjectRepository::new(db_pool.clone()),
            work_session_repository: WorkSessionRepository::new(db_pool.clone()),
            jwt_service,
            db_pool,
        }
    }
}
