//! Work session repository for database operations
//!
//! Sessions carry a denormalized `user_id`; it is copied from the owning
//! project on insert, so filtering on it scopes every query to the caller.

use anyhow::Result;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::info;
use tracking::SessionRecord;

use crate::models::{UpdateWorkSession, VisualizationRow, WorkSession, WorkSessionEntry};

const SESSION_COLUMNS: &str =
    "id, start_time, end_time, duration, notes, user_id, project_id, date, created_at";

/// Work session repository
#[derive(Clone)]
pub struct WorkSessionRepository {
    pool: PgPool,
}

impl WorkSessionRepository {
    /// Create a new work session repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List a project's sessions, newest date first
    ///
    /// Each row carries the total duration of the whole project.
    pub async fn list_for_project(
        &self,
        project_id: i32,
        user_id: i32,
    ) -> Result<Vec<WorkSessionEntry>> {
        let sessions = sqlx::query_as::<_, WorkSessionEntry>(
            r#"
            SELECT id, start_time, end_time, duration, notes, date,
                   SUM(duration) OVER () AS total_duration
            FROM work_sessions
            WHERE project_id = $1 AND user_id = $2
            ORDER BY date DESC, id DESC
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sessions)
    }

    /// Find one session of a project
    pub async fn find(
        &self,
        project_id: i32,
        session_id: i32,
        user_id: i32,
    ) -> Result<Option<WorkSession>> {
        let query = format!(
            "SELECT {} FROM work_sessions WHERE project_id = $1 AND id = $2 AND user_id = $3",
            SESSION_COLUMNS
        );

        let session = sqlx::query_as::<_, WorkSession>(&query)
            .bind(project_id)
            .bind(session_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(session)
    }

    /// Record a session against a project owned by `user_id`
    ///
    /// Returns `None` when the project does not exist or belongs to another
    /// user; nothing is inserted in that case.
    pub async fn create(
        &self,
        user_id: i32,
        project_id: i32,
        record: &SessionRecord,
        date: NaiveDate,
    ) -> Result<Option<WorkSession>> {
        info!(
            "Recording {} minute session on project {} for user {}",
            record.duration, project_id, user_id
        );

        let query = format!(
            r#"
            INSERT INTO work_sessions (start_time, end_time, duration, notes, user_id, project_id, date)
            SELECT $1, $2, $3, $4, p.user_id, p.id, $5
            FROM projects p
            WHERE p.id = $6 AND p.user_id = $7
            RETURNING {}
            "#,
            SESSION_COLUMNS
        );

        let session = sqlx::query_as::<_, WorkSession>(&query)
            .bind(record.start_time)
            .bind(record.end_time)
            .bind(record.duration)
            .bind(&record.notes)
            .bind(date)
            .bind(project_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(session)
    }

    /// Overwrite a session of a project
    pub async fn update(
        &self,
        project_id: i32,
        session_id: i32,
        user_id: i32,
        changes: &UpdateWorkSession,
    ) -> Result<Option<WorkSession>> {
        info!("Updating work session {} on project {}", session_id, project_id);

        let query = format!(
            r#"
            UPDATE work_sessions
            SET start_time = $1, end_time = $2, duration = $3, notes = $4, date = $5
            WHERE project_id = $6 AND id = $7 AND user_id = $8
            RETURNING {}
            "#,
            SESSION_COLUMNS
        );

        let session = sqlx::query_as::<_, WorkSession>(&query)
            .bind(changes.start_time)
            .bind(changes.end_time)
            .bind(changes.duration)
            .bind(&changes.notes)
            .bind(changes.date)
            .bind(project_id)
            .bind(session_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(session)
    }

    /// Delete a session of a project
    pub async fn delete(&self, project_id: i32, session_id: i32, user_id: i32) -> Result<bool> {
        info!("Deleting work session {} on project {}", session_id, project_id);

        let result = sqlx::query(
            "DELETE FROM work_sessions WHERE project_id = $1 AND id = $2 AND user_id = $3",
        )
        .bind(project_id)
        .bind(session_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Minutes per (date, project) for every session of a user
    ///
    /// Sparse: only pairs with at least one session are returned.
    pub async fn totals_by_date_and_project(&self, user_id: i32) -> Result<Vec<VisualizationRow>> {
        let rows = sqlx::query_as::<_, VisualizationRow>(
            r#"
            SELECT ws.date,
                   ws.project_id,
                   p.name AS project_name,
                   SUM(ws.duration) AS total_duration
            FROM work_sessions ws
            JOIN projects p ON ws.project_id = p.id
            WHERE ws.user_id = $1
            GROUP BY ws.date, ws.project_id, p.name
            ORDER BY ws.date ASC, ws.project_id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
