use crate::utils::error::AppError;

/// Cost used when nothing else is configured
pub const DEFAULT_PASSWORD_COST: u32 = 14;

/// Range bcrypt accepts
pub const MIN_PASSWORD_COST: u32 = 4;
pub const MAX_PASSWORD_COST: u32 = 31;

/// bcrypt ignores everything past this many bytes
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hashes a password with bcrypt (salted, adaptive)
pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    bcrypt::hash(password, cost)
        .map_err(|e| AppError::DatabaseError(format!("Failed to hash password: {}", e)))
}

/// Checks a password against a stored bcrypt hash.
///
/// A stored value that is not a bcrypt hash never matches. There is no
/// fallback to comparing the raw strings.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match bcrypt::verify(password, hash) {
        Ok(valid) => valid,
        Err(e) => {
            log::warn!("⚠️  Stored password is not a valid bcrypt hash: {}", e);
            false
        }
    }
}

/// `hash_password` on the blocking pool
pub async fn hash_password_blocking(password: String, cost: u32) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| AppError::DatabaseError(format!("Hashing task failed: {}", e)))?
}

/// `verify_password` on the blocking pool
pub async fn verify_password_blocking(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::DatabaseError(format!("Verification task failed: {}", e)))
}
