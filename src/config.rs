use std::collections::HashMap;
use std::env;
use std::time::Duration;

use crate::utils::{crypto::{DEFAULT_PASSWORD_COST, MAX_PASSWORD_COST, MIN_PASSWORD_COST}, AppError};

pub const DEFAULT_JOKE_API_URL: &str = "http://api.icndb.com/jokes/random";

/// Upper bound for every `*_SECS` setting (one year)
pub const MAX_DURATION_SECS: u64 = 365 * 24 * 60 * 60;

/// Postgres connection settings, read from `host, port, user, password, dbname`
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub db_name: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub db: DbConfig,
    pub joke_api_url: String,
    /// None means the joke API call may wait forever
    pub joke_api_timeout: Option<Duration>,
    pub session_ttl: Duration,
    pub session_sweep_interval: Duration,
    pub password_cost: u32,
    pub template_dir: String,
    pub static_dir: String,
}

impl AppConfig {
    /// Reads the process environment (call `dotenv().ok()` first)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, AppError> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            get(key).ok_or_else(|| AppError::Config(format!("{} must be set", key)))
        };

        let db = DbConfig {
            host: required("host")?,
            port: parse_or("port", get("port"), 5432u16)?,
            user: required("user")?,
            password: lookup("password").unwrap_or_default(),
            db_name: required("dbname")?,
        };

        let password_cost = parse_or("BCRYPT_COST", get("BCRYPT_COST"), DEFAULT_PASSWORD_COST)?;
        if !(MIN_PASSWORD_COST..=MAX_PASSWORD_COST).contains(&password_cost) {
            return Err(AppError::Config(format!(
                "BCRYPT_COST must be between {} and {}, got {}",
                MIN_PASSWORD_COST,
                MAX_PASSWORD_COST,
                password_cost
            )));
        }

        let joke_api_timeout = match get("JOKE_API_TIMEOUT_SECS") {
            Some(raw) => Some(secs_in_range("JOKE_API_TIMEOUT_SECS", Some(raw), 0, MAX_DURATION_SECS)?),
            None => None,
        };

        Ok(Self {
            server_host: get("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: parse_or("SERVER_PORT", get("SERVER_PORT"), 3000u16)?,
            db,
            joke_api_url: get("JOKE_API_URL").unwrap_or_else(|| DEFAULT_JOKE_API_URL.to_string()),
            joke_api_timeout,
            session_ttl: secs_in_range(
                "SESSION_TTL_SECS",
                get("SESSION_TTL_SECS"),
                24 * 60 * 60,
                MAX_DURATION_SECS,
            )?,
            session_sweep_interval: secs_in_range(
                "SESSION_SWEEP_INTERVAL_SECS",
                get("SESSION_SWEEP_INTERVAL_SECS"),
                300,
                MAX_DURATION_SECS,
            )?,
            password_cost,
            template_dir: get("TEMPLATE_DIR").unwrap_or_else(|| "./web/templates".to_string()),
            static_dir: get("STATIC_DIR").unwrap_or_else(|| "./web/static".to_string()),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{} has an invalid value '{}': {}", key, value, e))),
        None => Ok(default),
    }
}

/// Seconds setting that must be non-zero and at most `max`
fn secs_in_range(key: &str, raw: Option<String>, default: u64, max: u64) -> Result<Duration, AppError> {
    let secs = parse_or(key, raw, default)?;
    if secs == 0 || secs > max {
        return Err(AppError::Config(format!(
            "{} must be between 1 and {} seconds, got {}",
            key, max, secs
        )));
    }
    Ok(Duration::from_secs(secs))
}
