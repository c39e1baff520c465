use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{NewUserRow, StoredUser};
use crate::utils::AppError;

/// Row-level access to the `users` table
#[async_trait]
pub trait UserTable: Send + Sync {
    async fn insert(&self, row: NewUserRow) -> Result<(), AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<StoredUser>, AppError>;

    /// Cheap round trip used by the health check
    async fn ping(&self) -> Result<(), AppError>;
}

pub struct PgUserTable {
    pool: PgPool,
}

impl PgUserTable {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserTable for PgUserTable {
    async fn insert(&self, row: NewUserRow) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO users (username, password, email, firstname, lastname, created_on)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&row.username)
        .bind(&row.password_hash)
        .bind(&row.email)
        .bind(&row.first_name)
        .bind(&row.last_name)
        .bind(row.created_on)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<StoredUser>, AppError> {
        let user = sqlx::query_as::<_, StoredUser>(
            r#"
            SELECT user_id, username, password, email, firstname, lastname, created_on, fav_jokes
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
