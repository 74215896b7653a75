use std::{env, fmt::Display, str::FromStr};

use larder_core::MAX_FILE_SIZE;
use thiserror::Error;
use tracing::info;

/// Process-wide settings, loaded once at startup and shared through `AppState`.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    /// Default page size for paginated lists.
    pub page_size: i64,
    /// Upper bound for the `limit` query parameter.
    pub max_page_size: i64,
    /// Recipes shown per followed author when `recipes_limit` is absent.
    pub recipes_limit_default: i64,
    /// Request body cap. Must fit a base64-encoded maximum-size image plus
    /// the surrounding JSON.
    pub max_body_bytes: usize,
}

/// A maximum-size image after base64 encoding, plus 1 MiB for the rest of
/// the recipe body.
pub const DEFAULT_MAX_BODY_BYTES: usize = MAX_FILE_SIZE.div_ceil(3) * 4 + 1024 * 1024;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
            bind_addr: try_load("BIND_ADDR", "0.0.0.0:3000")?,
            page_size: try_load("PAGE_SIZE", "6")?,
            max_page_size: try_load("MAX_PAGE_SIZE", "100")?,
            recipes_limit_default: try_load("RECIPES_LIMIT_DEFAULT", "3")?,
            max_body_bytes: try_load("MAX_BODY_BYTES", &DEFAULT_MAX_BODY_BYTES.to_string())?,
        };

        if config.page_size < 1 || config.max_page_size < config.page_size {
            return Err(ConfigError::Invalid {
                key: "PAGE_SIZE",
                value: config.page_size.to_string(),
                reason: format!("must be between 1 and MAX_PAGE_SIZE ({})", config.max_page_size),
            });
        }
        if config.recipes_limit_default < 0 {
            return Err(ConfigError::Invalid {
                key: "RECIPES_LIMIT_DEFAULT",
                value: config.recipes_limit_default.to_string(),
                reason: "must not be negative".to_string(),
            });
        }

        Ok(config)
    }

    /// Settings for tests and tools that supply their own database URL.
    pub fn with_database_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            bind_addr: "127.0.0.1:0".to_string(),
            page_size: 6,
            max_page_size: 100,
            recipes_limit_default: 3,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
        value,
    })
}
