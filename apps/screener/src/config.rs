use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::screening::duplicates::DEFAULT_DUPLICATE_THRESHOLD;

pub const DEFAULT_MAX_FILE_SIZE_BYTES: usize = 2 * 1024 * 1024;
pub const DEFAULT_MAX_BATCH_SIZE: usize = 10;
pub const WARN_ONLY_BATCH_FACTOR: usize = 4;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub feedback_store_path: PathBuf,
    pub max_file_size_bytes: usize,
    pub max_batch_size: usize,
    /// When false, an oversized batch is still ranked and the report carries a warning.
    pub enforce_batch_limit: bool,
    pub duplicate_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            feedback_store_path: PathBuf::from("feedback.json"),
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            enforce_batch_limit: true,
            duplicate_threshold: DEFAULT_DUPLICATE_THRESHOLD,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            feedback_store_path: std::env::var("FEEDBACK_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.feedback_store_path),
            max_file_size_bytes: parse_env("MAX_FILE_SIZE_BYTES", defaults.max_file_size_bytes)?,
            max_batch_size: parse_env("MAX_BATCH_SIZE", defaults.max_batch_size)?,
            enforce_batch_limit: parse_env("ENFORCE_BATCH_LIMIT", defaults.enforce_batch_limit)?,
            duplicate_threshold: parse_env("DUPLICATE_THRESHOLD", defaults.duplicate_threshold)?,
        })
    }

    /// Upper bound for a whole multipart request: every file at the size cap
    /// plus headroom for the text fields. In warn-only mode the batch may run
    /// past `max_batch_size`, so room is left for `WARN_ONLY_BATCH_FACTOR`
    /// times as many files.
    pub fn request_body_limit(&self) -> usize {
        let batch = self.max_batch_size.max(1);
        let files = if self.enforce_batch_limit {
            batch + 1
        } else {
            batch.saturating_mul(WARN_ONLY_BATCH_FACTOR)
        };
        self.max_file_size_bytes
            .saturating_mul(files)
            .saturating_add(1024 * 1024)
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.max_file_size_bytes, 2 * 1024 * 1024);
        assert_eq!(config.max_batch_size, 10);
        assert!(config.enforce_batch_limit);
        assert_eq!(config.duplicate_threshold, 0.90);
    }

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: usize = parse_env("SCREENER_TEST_UNSET_VARIABLE", 7).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("SCREENER_TEST_BAD_PORT", "eighty");
        let err = parse_env::<u16>("SCREENER_TEST_BAD_PORT", 8080).unwrap_err();
        assert!(err.to_string().contains("SCREENER_TEST_BAD_PORT"));
        std::env::remove_var("SCREENER_TEST_BAD_PORT");
    }

    #[test]
    fn test_body_limit_leaves_room_for_full_batch() {
        let config = Config::default();
        assert!(config.request_body_limit() > config.max_file_size_bytes * config.max_batch_size);
    }

    #[test]
    fn test_warn_only_body_limit_admits_oversized_batches() {
        let config = Config {
            enforce_batch_limit: false,
            ..Config::default()
        };
        let over_batch = config.max_file_size_bytes * (config.max_batch_size * 3);
        assert!(config.request_body_limit() > over_batch);
        assert!(config.request_body_limit() > Config::default().request_body_limit());
    }
}
