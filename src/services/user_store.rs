use std::sync::Arc;

use chrono::Utc;

use crate::{
    database::UserTable,
    models::{Credentials, NewUser, NewUserRow, User},
    utils::{crypto, AppError},
};

/// Registration and login on top of a `UserTable`
pub struct UserStore {
    table: Arc<dyn UserTable>,
    password_cost: u32,
}

impl UserStore {
    pub fn new(table: Arc<dyn UserTable>, password_cost: u32) -> Self {
        Self {
            table,
            password_cost,
        }
    }

    /// Hashes the password and writes the new row
    pub async fn insert_user(&self, user: &NewUser) -> Result<(), AppError> {
        let password_hash =
            crypto::hash_password_blocking(user.password.clone(), self.password_cost).await?;

        let row = NewUserRow {
            username: user.username.clone(),
            password_hash,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            created_on: Utc::now(),
        };

        self.table.insert(row).await?;

        log::info!("✅ User registered: {}", user.username);
        Ok(())
    }

    /// Looks the user up by email and checks the password.
    ///
    /// `NotFound` when no row has that email, `Authentication` on a
    /// password mismatch, `DatabaseError` when the table is unreachable.
    pub async fn user_login(&self, credentials: &Credentials) -> Result<User, AppError> {
        let stored = self
            .table
            .find_by_email(&credentials.email)
            .await?
            .ok_or_else(|| AppError::NotFound("no user with that email".to_string()))?;

        let valid = crypto::verify_password_blocking(
            credentials.password.clone(),
            stored.password.clone(),
        )
        .await?;

        if !valid {
            return Err(AppError::Authentication(format!(
                "password mismatch for user {}",
                stored.user_id
            )));
        }

        Ok(User::from(stored))
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.table.ping().await
    }
}
