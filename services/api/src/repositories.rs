//! Repositories for database operations

pub mod project;
pub mod user;
pub mod work_session;

pub use project::ProjectRepository;
pub use user::{UserRepository, verify_password};
pub use work_session::WorkSessionRepository;
