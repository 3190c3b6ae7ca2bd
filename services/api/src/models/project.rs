//! Project models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Project entity
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Project {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Entry of the project list
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProjectSummary {
    pub id: i32,
    pub name: String,
}

/// Project creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewProject {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Project update payload; absent fields are left unchanged
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}
