//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `DATA_FILE` - JSON data file; unset keeps everything in memory
//! - `DEFAULT_DOMAIN` - Domain used in short URLs until changed in settings
//!   (default: `localhost:3000`)
//! - `PUBLIC_SCHEME` - Scheme of generated short URLs: `http` or `https`
//!   (default: `https`)
//! - `CLICK_QUEUE_CAPACITY` - Click event buffer size (default: 10000, min: 100)
//! - `CLICK_RETRY_ATTEMPTS` - Tries per click write (default: 3, 1-10)
//!
//! ```bash
//! export DATA_FILE="./data/links.json"
//! export DEFAULT_DOMAIN="s.example.com"
//! ```

use anyhow::Result;
use std::env;
use std::path::PathBuf;

use crate::domain::entities::Settings;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub data_file: Option<PathBuf>,
    pub default_domain: String,
    pub public_scheme: String,
    pub click_queue_capacity: usize,
    pub click_retry_attempts: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            data_file: None,
            default_domain: "localhost:3000".to_string(),
            public_scheme: "https".to_string(),
            click_queue_capacity: 10_000,
            click_retry_attempts: 3,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Unset variables fall back to [`Config::default`]. Numeric variables
    /// that fail to parse fall back as well.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let listen_addr = env::var("LISTEN").unwrap_or(defaults.listen_addr);
        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        let data_file = env::var("DATA_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let default_domain = env::var("DEFAULT_DOMAIN").unwrap_or(defaults.default_domain);
        let public_scheme = env::var("PUBLIC_SCHEME").unwrap_or(defaults.public_scheme);

        let click_queue_capacity = env::var("CLICK_QUEUE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.click_queue_capacity);

        let click_retry_attempts = env::var("CLICK_RETRY_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.click_retry_attempts);

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            data_file,
            default_domain,
            public_scheme,
            click_queue_capacity,
            click_retry_attempts,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `click_queue_capacity` is outside 100..=1000000
    /// - `click_retry_attempts` is outside 1..=10
    /// - `log_format` is not `text` or `json`
    /// - `public_scheme` is not `http` or `https`
    /// - `listen_addr` is invalid
    /// - `default_domain` is empty
    pub fn validate(&self) -> Result<()> {
        if self.click_queue_capacity < 100 {
            anyhow::bail!(
                "CLICK_QUEUE_CAPACITY must be at least 100, got {}",
                self.click_queue_capacity
            );
        }

        if self.click_queue_capacity > 1_000_000 {
            anyhow::bail!(
                "CLICK_QUEUE_CAPACITY is too large (max: 1000000), got {}",
                self.click_queue_capacity
            );
        }

        if !(1..=10).contains(&self.click_retry_attempts) {
            anyhow::bail!(
                "CLICK_RETRY_ATTEMPTS must be between 1 and 10, got {}",
                self.click_retry_attempts
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.public_scheme != "http" && self.public_scheme != "https" {
            anyhow::bail!(
                "PUBLIC_SCHEME must be 'http' or 'https', got '{}'",
                self.public_scheme
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.default_domain.trim().is_empty() {
            anyhow::bail!("DEFAULT_DOMAIN must not be empty");
        }

        Ok(())
    }

    /// Settings used for a fresh store and after a reset.
    pub fn default_settings(&self) -> Settings {
        Settings::new(self.default_domain.clone())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);

        match &self.data_file {
            Some(path) => tracing::info!("  Data file: {}", path.display()),
            None => tracing::info!("  Data file: none (in-memory)"),
        }

        tracing::info!("  Default domain: {}", self.default_domain);
        tracing::info!("  Public scheme: {}", self.public_scheme);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Click queue capacity: {}", self.click_queue_capacity);
        tracing::info!("  Click retry attempts: {}", self.click_retry_attempts);
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
