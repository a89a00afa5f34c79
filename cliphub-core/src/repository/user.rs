use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};

use crate::{
    models::{User, UserId},
    Result,
};

/// Persistence interface for user records.
///
/// Users are looked up by username (the session identity key); records are
/// never updated or deleted.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User>;
    async fn get_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn username_exists(&self, username: &str) -> Result<bool>;
}

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow) -> Result<User> {
        Ok(User {
            id: UserId::from_string(row.try_get("id")?),
            username: row.try_get("username")?,
            password: row.try_get("password")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> Result<User> {
        let row = sqlx::query(
            r"
            INSERT INTO users (id, username, password, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, password, created_at
            ",
        )
        .bind(user.id.as_str())
        .bind(&user.username)
        .bind(&user.password)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await?;

        Self::row_to_user(&row)
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r"
            SELECT id, username, password, created_at
            FROM users
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn username_exists(&self, username: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            r"
            SELECT COUNT(*) as count
            FROM users
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {

    #[tokio::test]
    #[ignore = "Requires database"]
    async fn test_create_user() {
        // Integration test placeholder
    }
}
