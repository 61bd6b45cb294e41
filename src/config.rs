use std::env;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub log_level: String,
    pub event_buffer_size: usize,
    pub admin_password: String,
    pub customer_id_seed: u32,
    pub driver_id_seed: u32,
    pub seed_demo_data: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            http_port: parse_or_default("HTTP_PORT", 3000)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            event_buffer_size: parse_or_default("EVENT_BUFFER_SIZE", 1024)?,
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "zulu".to_string()),
            customer_id_seed: parse_or_default("CUSTOMER_ID_SEED", 1)?,
            driver_id_seed: parse_or_default("DRIVER_ID_SEED", 1)?,
            seed_demo_data: parse_or_default("SEED_DEMO_DATA", true)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 3000,
            log_level: "info".to_string(),
            event_buffer_size: 1024,
            admin_password: "zulu".to_string(),
            customer_id_seed: 1,
            driver_id_seed: 1,
            seed_demo_data: false,
        }
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
