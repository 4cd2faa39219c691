use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::Validate;

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Config {
    #[validate(nested)]
    pub app: AppConfig,
    #[validate(nested)]
    pub cors: CorsConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    pub env: String,
    #[validate(length(min = 1))]
    pub host: String,
    #[validate(range(min = 1, max = 65535))]
    pub port: u16,
    /// Number of worker threads (0 = actix default)
    pub workers: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CorsConfig {
    /// Comma-separated origins, `*` allows any
    #[validate(length(min = 1))]
    pub allowed_origins: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Insert the sample video at startup
    pub seed_sample_video: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let config = Config {
            app: AppConfig {
                env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                host: std::env::var("APP_HOST").unwrap_or_else(|_| default_host()),
                port: parse_var("APP_PORT", default_port())?,
                workers: parse_var("APP_WORKERS", 0)?,
            },
            cors: CorsConfig {
                allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "*".to_string()),
            },
            store: StoreConfig {
                seed_sample_video: parse_bool_var("SEED_SAMPLE_VIDEO", true)?,
            },
        };

        config
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))?;
        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }

    /// Configured origins, trimmed, empty entries dropped
    pub fn cors_origins(&self) -> Vec<String> {
        self.cors
            .allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{name}: invalid value '{raw}'"))),
        Err(_) => Ok(default),
    }
}

fn parse_bool_var(name: &str, default: bool) -> Result<bool, AppError> {
    match std::env::var(name) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(AppError::Config(format!("{name}: invalid boolean '{raw}'"))),
        },
        Err(_) => Ok(default),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 6] = [
        "APP_ENV",
        "APP_HOST",
        "APP_PORT",
        "APP_WORKERS",
        "CORS_ALLOWED_ORIGINS",
        "SEED_SAMPLE_VIDEO",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = Config::from_env().unwrap();

        assert_eq!(config.app.env, "development");
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
        assert_eq!(config.cors_origins(), vec!["*"]);
        assert!(config.store.seed_sample_video);
    }

    #[test]
    #[serial]
    fn test_overrides() {
        clear_env();
        std::env::set_var("APP_PORT", "9090");
        std::env::set_var("CORS_ALLOWED_ORIGINS", "http://a.test, http://b.test,");
        std::env::set_var("SEED_SAMPLE_VIDEO", "false");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.app.port, 9090);
        assert_eq!(config.cors_origins(), vec!["http://a.test", "http://b.test"]);
        assert!(!config.store.seed_sample_video);
    }

    #[test]
    #[serial]
    fn test_invalid_values_rejected() {
        clear_env();
        std::env::set_var("APP_PORT", "not-a-port");
        assert!(matches!(Config::from_env(), Err(AppError::Config(_))));

        std::env::set_var("APP_PORT", "0");
        assert!(matches!(Config::from_env(), Err(AppError::Config(_))));

        std::env::set_var("APP_PORT", "8000");
        std::env::set_var("SEED_SAMPLE_VIDEO", "maybe");
        assert!(matches!(Config::from_env(), Err(AppError::Config(_))));
        clear_env();
    }
}
