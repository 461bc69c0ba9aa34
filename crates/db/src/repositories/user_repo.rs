//! Repository for the `users` table.

use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

const COLUMNS: &str = "id, name, email, role, is_active, created_at, updated_at";

pub struct UserRepo;

impl UserRepo {
    /// Insert a new user. Email is stored trimmed and lowercased, role lowercased.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, role)
             VALUES (TRIM($1), LOWER(TRIM($2)), LOWER(TRIM($3)))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }
}
