// Test double for the users table. Mirrors the unique constraints of the
// real schema so duplicate registrations fail the same way.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::database::UserTable;
use crate::models::{NewUserRow, StoredUser};
use crate::utils::AppError;

#[derive(Default)]
pub struct MemoryUserTable {
    rows: Mutex<Vec<StoredUser>>,
}

impl MemoryUserTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a row as-is, bypassing hashing (mock rows)
    pub fn with_row(self, row: StoredUser) -> Self {
        self.rows.lock().unwrap().push(row);
        self
    }

    pub fn rows(&self) -> Vec<StoredUser> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserTable for MemoryUserTable {
    async fn insert(&self, row: NewUserRow) -> Result<(), AppError> {
        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|r| r.email == row.email || r.username == row.username)
        {
            return Err(AppError::DatabaseError(
                "an account with that email or username already exists".to_string(),
            ));
        }

        let user_id = rows.len() as i32 + 1;
        rows.push(StoredUser {
            user_id,
            username: row.username,
            password: row.password_hash,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            created_on: row.created_on,
            fav_jokes: Vec::new(),
        });
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<StoredUser>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|r| r.email == email).cloned())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Table whose connection is always down
pub struct BrokenUserTable;

#[async_trait]
impl UserTable for BrokenUserTable {
    async fn insert(&self, _row: NewUserRow) -> Result<(), AppError> {
        Err(AppError::DatabaseError("connection refused".to_string()))
    }

    async fn find_by_email(&self, _email: &str) -> Result<Option<StoredUser>, AppError> {
        Err(AppError::DatabaseError("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(AppError::DatabaseError("connection refused".to_string()))
    }
}
