//! Work session models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use tracking::DurationRow;

/// Work session entity
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct WorkSession {
    pub id: i32,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    /// Minutes
    pub duration: i32,
    pub notes: Option<String>,
    pub user_id: i32,
    pub project_id: i32,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Session row of a project listing, annotated with the project-wide total
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct WorkSessionEntry {
    pub id: i32,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration: i32,
    pub notes: Option<String>,
    pub date: NaiveDate,
    pub total_duration: i64,
}

/// Response for a project's work sessions
#[derive(Debug, Serialize)]
pub struct WorkSessionList {
    pub status: &'static str,
    pub work_sessions: Vec<WorkSessionEntry>,
    pub total_duration: i64,
}

/// Work session update payload
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateWorkSession {
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    pub duration: i32,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(deserialize_with = "calendar_date")]
    pub date: NaiveDate,
}

/// Minutes tracked by a user on one project on one date
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VisualizationRow {
    pub date: NaiveDate,
    pub project_id: i32,
    pub project_name: String,
    pub total_duration: i64,
}

impl From<&VisualizationRow> for DurationRow {
    fn from(row: &VisualizationRow) -> Self {
        DurationRow {
            date: row.date,
            project_name: row.project_name.clone(),
            total_duration: row.total_duration,
        }
    }
}

/// Accept `YYYY-MM-DD` or a full timestamp, keeping only the date part
fn calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let day = raw.split('T').next().unwrap_or(&raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(serde::de::Error::custom)
}
