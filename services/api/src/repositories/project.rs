//! Project repository for database operations
//!
//! Every query is scoped by the owning user: a project that belongs to
//! someone else behaves exactly like a project that does not exist.

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::models::{NewProject, Project, ProjectSummary, UpdateProject};

/// Project repository
#[derive(Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    /// Create a new project repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List the projects owned by a user, in creation order
    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<ProjectSummary>> {
        let projects = sqlx::query_as::<_, ProjectSummary>(
            r#"
            SELECT id, name
            FROM projects
            WHERE user_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    /// Create a project owned by a user
    pub async fn create(&self, user_id: i32, new_project: &NewProject) -> Result<Project> {
        info!("Creating project '{}' for user {}", new_project.name, user_id);

        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (name, description, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, status, user_id, created_at
            "#,
        )
        .bind(&new_project.name)
        .bind(&new_project.description)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(project)
    }

    /// Find a project owned by a user
    pub async fn find_for_user(&self, id: i32, user_id: i32) -> Result<Option<Project>> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, status, user_id, created_at
            FROM projects
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    /// Update the given fields of a project owned by a user
    pub async fn update(
        &self,
        id: i32,
        user_id: i32,
        changes: &UpdateProject,
    ) -> Result<Option<Project>> {
        info!("Updating project {} for user {}", id, user_id);

        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                status = COALESCE($3, status)
            WHERE id = $4 AND user_id = $5
            RETURNING id, name, description, status, user_id, created_at
            "#,
        )
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(&changes.status)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    /// Delete a project owned by a user, cascading to its work sessions
    pub async fn delete(&self, id: i32, user_id: i32) -> Result<bool> {
        info!("Deleting project {} for user {}", id, user_id);

        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    fn new_project(name: &str) -> NewProject {
        NewProject {
            name: name.to_string(),
            description: Some(format!("{} description", name)),
        }
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance (DATABASE_URL)"]
    async fn test_create_sets_default_status() {
        let pool = test_support::pool().await;
        let owner = test_support::create_user(&pool, "owner").await;
        let projects = ProjectRepository::new(pool.clone());

        let project = projects.create(owner.id, &new_project("P1")).await.unwrap();

        assert_eq!(project.name, "P1");
        assert_eq!(project.status, "active");
        assert_eq!(project.user_id, owner.id);

        test_support::delete_user(&pool, owner.id).await;
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance (DATABASE_URL)"]
    async fn test_projects_are_scoped_to_their_owner() {
        let pool = test_support::pool().await;
        let alice = test_support::create_user(&pool, "alice").await;
        let bob = test_support::create_user(&pool, "bob").await;
        let projects = ProjectRepository::new(pool.clone());

        let first = projects.create(alice.id, &new_project("First")).await.unwrap();
        let second = projects.create(alice.id, &new_project("Second")).await.unwrap();

        let listed: Vec<i32> = projects
            .list_for_user(alice.id)
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(listed, vec![first.id, second.id]);
        assert!(projects.list_for_user(bob.id).await.unwrap().is_empty());

        assert!(projects.find_for_user(first.id, bob.id).await.unwrap().is_none());

        let hijack = UpdateProject {
            name: Some("Mine now".to_string()),
            ..Default::default()
        };
        assert!(projects.update(first.id, bob.id, &hijack).await.unwrap().is_none());
        assert!(!projects.delete(first.id, bob.id).await.unwrap());

        let unchanged = projects.find_for_user(first.id, alice.id).await.unwrap().unwrap();
        assert_eq!(unchanged.name, "First");

        test_support::delete_user(&pool, alice.id).await;
        test_support::delete_user(&pool, bob.id).await;
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance (DATABASE_URL)"]
    async fn test_update_changes_only_given_fields() {
        let pool = test_support::pool().await;
        let owner = test_support::create_user(&pool, "owner").await;
        let projects = ProjectRepository::new(pool.clone());
        let project = projects.create(owner.id, &new_project("Draft")).await.unwrap();

        let changes = UpdateProject {
            status: Some("archived".to_string()),
            ..Default::default()
        };
        let updated = projects
            .update(project.id, owner.id, &changes)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Draft");
        assert_eq!(updated.description, project.description);
        assert_eq!(updated.status, "archived");

        assert!(projects.delete(project.id, owner.id).await.unwrap());
        assert!(!projects.delete(project.id, owner.id).await.unwrap());

        test_support::delete_user(&pool, owner.id).await;
    }
}
