use std::env;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub log_level: String,
    pub event_buffer_size: usize,
    pub seed_account: SeedAccount,
}

/// The well-known account inserted at first boot. Created administratively;
/// drivers never self-register.
#[derive(Debug, Clone)]
pub struct SeedAccount {
    pub email: String,
    pub password: String,
    pub driver_name: String,
    pub phone_number: String,
}

impl Default for SeedAccount {
    fn default() -> Self {
        Self {
            email: "bezorger@lettertoletter.nl".to_string(),
            password: "test123".to_string(),
            driver_name: "Test Bezorger".to_string(),
            phone_number: "+31 6 12345678".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        let defaults = SeedAccount::default();
        let seed_account = SeedAccount {
            email: env::var("SEED_DRIVER_EMAIL").unwrap_or(defaults.email),
            password: env::var("SEED_DRIVER_PASSWORD").unwrap_or(defaults.password),
            driver_name: env::var("SEED_DRIVER_NAME").unwrap_or(defaults.driver_name),
            phone_number: env::var("SEED_DRIVER_PHONE").unwrap_or(defaults.phone_number),
        };

        Ok(Self {
            http_port: parse_or_default("HTTP_PORT", 3000)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            event_buffer_size: parse_or_default("EVENT_BUFFER_SIZE", 1024)?,
            seed_account,
        })
    }
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| AppError::Internal(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}
