use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::{crypto::MAX_PASSWORD_BYTES, AppError};

/// Profile handed to templates and callers. Carries no password.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    pub user_id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_on: DateTime<Utc>,
    pub fav_jokes: Vec<i32>,
}

/// A full `users` row; `password` is the bcrypt hash
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoredUser {
    pub user_id: i32,
    pub username: String,
    pub password: String,
    pub email: String,
    #[sqlx(rename = "firstname")]
    pub first_name: String,
    #[sqlx(rename = "lastname")]
    pub last_name: String,
    pub created_on: DateTime<Utc>,
    pub fav_jokes: Vec<i32>,
}

impl From<StoredUser> for User {
    fn from(row: StoredUser) -> Self {
        Self {
            user_id: row.user_id,
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            created_on: row.created_on,
            fav_jokes: row.fav_jokes,
        }
    }
}

/// Row about to be inserted; `password_hash` is already hashed
#[derive(Debug, Clone)]
pub struct NewUserRow {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_on: DateTime<Utc>,
}

/// Registration form (POST /signupact)
#[derive(Debug, Deserialize, Clone, Default)]
pub struct NewUser {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, rename = "firstname")]
    pub first_name: String,
    #[serde(default, rename = "lastname")]
    pub last_name: String,
    #[serde(default)]
    pub password: String,
}

impl NewUser {
    /// Trims every field and rejects blank ones
    pub fn validated(self) -> Result<Self, AppError> {
        let user = Self {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            password: self.password,
        };

        let missing: Vec<&str> = [
            ("username", user.username.is_empty()),
            ("email", user.email.is_empty()),
            ("first name", user.first_name.is_empty()),
            ("last name", user.last_name.is_empty()),
            ("password", user.password.trim().is_empty()),
        ]
        .iter()
        .filter(|(_, blank)| *blank)
        .map(|(field, _)| *field)
        .collect();

        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Please fill in: {}.",
                missing.join(", ")
            )));
        }

        if user.password.len() > MAX_PASSWORD_BYTES {
            return Err(AppError::Validation(format!(
                "Password must be at most {} bytes long.",
                MAX_PASSWORD_BYTES
            )));
        }

        Ok(user)
    }
}

/// Login form (POST /home)
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default, rename = "pass")]
    pub password: String,
}

impl Credentials {
    pub fn validated(self) -> Result<Self, AppError> {
        let email = self.email.trim().to_string();
        if email.is_empty() || self.password.is_empty() {
            return Err(AppError::Validation(
                "Email and password are both required.".to_string(),
            ));
        }
        Ok(Self {
            email,
            password: self.password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_validation_lists_blank_fields() {
        let form = NewUser {
            username: "ann".into(),
            email: "  ".into(),
            first_name: "Ann".into(),
            last_name: String::new(),
            password: "pw".into(),
        };

        match form.validated() {
            Err(AppError::Validation(msg)) => {
                assert!(msg.contains("email"));
                assert!(msg.contains("last name"));
                assert!(!msg.contains("username"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_new_user_validation_trims() {
        let form = NewUser {
            username: " ann ".into(),
            email: "ann@example.com ".into(),
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            password: " keep spaces ".into(),
        };
        let user = form.validated().unwrap();
        assert_eq!(user.username, "ann");
        assert_eq!(user.email, "ann@example.com");
        assert_eq!(user.password, " keep spaces ");
    }

    #[test]
    fn test_credentials_require_both_fields() {
        let creds = Credentials {
            email: "a@b.c".into(),
            password: String::new(),
        };
        assert!(matches!(creds.validated(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_stored_user_conversion_drops_password() {
        let row = StoredUser {
            user_id: 7,
            username: "tUser".into(),
            password: "$2b$04$hash".into(),
            email: "tEmail".into(),
            first_name: "tFirst".into(),
            last_name: "tLast".into(),
            created_on: Utc::now(),
            fav_jokes: vec![1, 2],
        };
        let user = User::from(row);
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(user.fav_jokes, vec![1, 2]);
    }

    #[test]
    fn test_new_user_rejects_password_past_bcrypt_limit() {
        let form = |password: String| NewUser {
            username: "ann".into(),
            email: "ann@example.com".into(),
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            password,
        };

        assert!(form("a".repeat(MAX_PASSWORD_BYTES)).validated().is_ok());

        match form("a".repeat(MAX_PASSWORD_BYTES + 1)).validated() {
            Err(AppError::Validation(msg)) => assert!(msg.contains("72")),
            other => panic!("expected validation error, got {:?}", other),
        }

        // multi-byte characters count by bytes, not chars
        assert!(form("é".repeat(40)).validated().is_err());
    }
}
