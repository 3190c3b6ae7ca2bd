//! Helpers for tests that run against a live PostgreSQL instance

use common::database::{DatabaseConfig, init_pool, run_migrations};
use sqlx::PgPool;

use crate::{
    models::{NewUser, User},
    repositories::UserRepository,
};

/// Connect to `DATABASE_URL` and bring the schema up to date
pub async fn pool() -> PgPool {
    let config = DatabaseConfig::from_env().expect("DATABASE_URL must be set");
    let pool = init_pool(&config).await.expect("database must be reachable");
    run_migrations(&pool).await.expect("migrations must apply");
    pool
}

/// An email address no other test run has used
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{:016x}@test.smore", prefix, rand::random::<u64>())
}

/// Register a throwaway user
pub async fn create_user(pool: &PgPool, prefix: &str) -> User {
    let new_user = NewUser {
        username: prefix.to_string(),
        email: unique_email(prefix),
        password: "password123".to_string(),
    };

    UserRepository::new(pool.clone())
        .create(&new_user)
        .await
        .expect("insert user")
        .expect("fresh email")
}

/// Remove a user and everything they own
pub async fn delete_user(pool: &PgPool, id: i32) {
    UserRepository::new(pool.clone())
        .delete(id)
        .await
        .expect("delete user");
}
