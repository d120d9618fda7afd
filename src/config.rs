//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//! A variable that is set but cannot be parsed is an error, never a silent default.
//!
//! ```bash
//! export PORT="8080"
//! export PACK_SIZES="250,500,1000,2000,5000"
//! export MAX_ITEMS="1000000"
//! ```
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:$PORT`); takes priority over `PORT`
//! - `PORT` - Port used when `LISTEN` is not set (default: `8080`)
//! - `PACK_SIZES` - Comma-separated default pack sizes (default: `250,500,1000,2000,5000`)
//! - `MAX_ITEMS` - Largest accepted order quantity (default: 1000000, max: 100000000)
//! - `MAX_PACK_SIZE` - Largest accepted pack size (default: 1000000, max: 100000000)
//! - `MAX_PACK_SIZE_COUNT` - Most pack sizes accepted per request (default: 64)
//! - `RATE_LIMIT_ENABLED` - Per-IP rate limiting on `/calculate` (default: `true`)
//! - `RATE_LIMIT_REPLENISH_MS` - Milliseconds to replenish one request token (default: 100)
//! - `RATE_LIMIT_BURST` - Token bucket size (default: 50)
//! - `REQUEST_TIMEOUT` - Seconds before a request is aborted (default: 10)
//! - `STATIC_DIR` - Directory served for the UI (default: `static`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::fmt::Display;
use std::num::ParseIntError;
use std::str::FromStr;
use std::time::Duration;

use crate::application::services::pack_service::PackLimits;
use crate::domain::entities::PackSizes;

/// Pack sizes used when neither `PACK_SIZES` nor the request provides any.
pub const DEFAULT_PACK_SIZES: [i64; 5] = [250, 500, 1000, 2000, 5000];

/// Hard ceiling for `MAX_ITEMS`.
pub const MAX_ITEMS_CEILING: i64 = 100_000_000;

/// Hard ceiling for `MAX_PACK_SIZE`.
///
/// Together with [`MAX_ITEMS_CEILING`] this keeps `items + largest_pack`
/// within [`crate::domain::solver::MAX_SEARCH_CEILING`].
pub const MAX_PACK_SIZE_CEILING: i64 = 100_000_000;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Sizes used when a request omits `pack_sizes` or sends an empty list.
    pub default_pack_sizes: Vec<i64>,
    pub max_items: i64,
    pub max_pack_size: i64,
    pub max_pack_size_count: usize,
    pub rate_limit_enabled: bool,
    /// Milliseconds after which one rate limit token is replenished.
    pub rate_limit_replenish_ms: u64,
    pub rate_limit_burst: u32,
    /// Seconds a request may take before it is answered with `408`.
    pub request_timeout_secs: u64,
    pub static_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        let limits = PackLimits::default();

        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            default_pack_sizes: DEFAULT_PACK_SIZES.to_vec(),
            max_items: limits.max_items,
            max_pack_size: limits.max_pack_size,
            max_pack_size_count: limits.max_pack_size_count,
            rate_limit_enabled: true,
            rate_limit_replenish_ms: 100,
            rate_limit_burst: 50,
            request_timeout_secs: 10,
            static_dir: "static".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `PACK_SIZES` or a numeric variable is set but
    /// cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let listen_addr = Self::load_listen_addr();
        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        let default_pack_sizes = Self::load_pack_sizes().context("Failed to load PACK_SIZES")?;

        let max_items = parse_var("MAX_ITEMS", defaults.max_items)?;
        let max_pack_size = parse_var("MAX_PACK_SIZE", defaults.max_pack_size)?;
        let max_pack_size_count =
            parse_var("MAX_PACK_SIZE_COUNT", defaults.max_pack_size_count)?;

        let rate_limit_enabled = env::var("RATE_LIMIT_ENABLED")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(defaults.rate_limit_enabled);

        let rate_limit_replenish_ms =
            parse_var("RATE_LIMIT_REPLENISH_MS", defaults.rate_limit_replenish_ms)?;
        let rate_limit_burst = parse_var("RATE_LIMIT_BURST", defaults.rate_limit_burst)?;
        let request_timeout_secs = parse_var("REQUEST_TIMEOUT", defaults.request_timeout_secs)?;

        let static_dir = env::var("STATIC_DIR").unwrap_or(defaults.static_dir);

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            default_pack_sizes,
            max_items,
            max_pack_size,
            max_pack_size_count,
            rate_limit_enabled,
            rate_limit_replenish_ms,
            rate_limit_burst,
            request_timeout_secs,
            static_dir,
        })
    }

    /// Loads the bind address.
    ///
    /// Priority:
    /// 1. `LISTEN` environment variable
    /// 2. `0.0.0.0:` followed by `PORT` (default `8080`)
    fn load_listen_addr() -> String {
        if let Ok(listen) = env::var("LISTEN") {
            return listen;
        }

        let port = env::var("PORT")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| "8080".to_string());

        format!("0.0.0.0:{}", port.trim())
    }

    /// Loads default pack sizes from `PACK_SIZES`.
    ///
    /// Falls back to [`DEFAULT_PACK_SIZES`] when the variable is unset or
    /// holds no values.
    ///
    /// # Errors
    ///
    /// Returns an error if any entry is not an integer.
    pub fn load_pack_sizes() -> Result<Vec<i64>> {
        let Ok(raw) = env::var("PACK_SIZES") else {
            return Ok(DEFAULT_PACK_SIZES.to_vec());
        };

        let sizes = parse_pack_sizes(&raw)
            .with_context(|| format!("PACK_SIZES must be comma-separated integers, got '{raw}'"))?;

        if sizes.is_empty() {
            return Ok(DEFAULT_PACK_SIZES.to_vec());
        }

        Ok(sizes)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - default pack sizes are invalid or exceed `max_pack_size`
    /// - a limit, rate or timeout is zero or out of range
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.max_items <= 0 {
            anyhow::bail!("MAX_ITEMS must be greater than 0, got {}", self.max_items);
        }

        if self.max_items > MAX_ITEMS_CEILING {
            anyhow::bail!(
                "MAX_ITEMS is too large (max: {}), got {}",
                MAX_ITEMS_CEILING,
                self.max_items
            );
        }

        if self.max_pack_size <= 0 {
            anyhow::bail!(
                "MAX_PACK_SIZE must be greater than 0, got {}",
                self.max_pack_size
            );
        }

        if self.max_pack_size > MAX_PACK_SIZE_CEILING {
            anyhow::bail!(
                "MAX_PACK_SIZE is too large (max: {}), got {}",
                MAX_PACK_SIZE_CEILING,
                self.max_pack_size
            );
        }

        if self.max_pack_size_count == 0 {
            anyhow::bail!("MAX_PACK_SIZE_COUNT must be at least 1");
        }

        let sizes = PackSizes::new(&self.default_pack_sizes)
            .map_err(|e| anyhow::anyhow!("PACK_SIZES is invalid: {e}"))?;

        if sizes.largest() > self.max_pack_size.unsigned_abs() {
            anyhow::bail!(
                "PACK_SIZES must not exceed MAX_PACK_SIZE ({}), got {}",
                self.max_pack_size,
                sizes.largest()
            );
        }

        if sizes.len() > self.max_pack_size_count {
            anyhow::bail!(
                "PACK_SIZES holds {} distinct sizes, MAX_PACK_SIZE_COUNT is {}",
                sizes.len(),
                self.max_pack_size_count
            );
        }

        if self.rate_limit_enabled
            && (self.rate_limit_replenish_ms == 0 || self.rate_limit_burst == 0)
        {
            anyhow::bail!("RATE_LIMIT_REPLENISH_MS and RATE_LIMIT_BURST must be greater than 0");
        }

        if self.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT must be greater than 0");
        }

        Ok(())
    }

    /// Request guardrails for [`crate::application::services::PackService`].
    pub fn limits(&self) -> PackLimits {
        PackLimits {
            max_items: self.max_items,
            max_pack_size: self.max_pack_size,
            max_pack_size_count: self.max_pack_size_count,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Default pack sizes: {:?}", self.default_pack_sizes);
        tracing::info!("  Max items: {}", self.max_items);
        tracing::info!(
            "  Max pack size: {} (at most {} sizes)",
            self.max_pack_size,
            self.max_pack_size_count
        );

        if self.rate_limit_enabled {
            tracing::info!(
                "  Rate limit: one request per {}ms, burst {}",
                self.rate_limit_replenish_ms,
                self.rate_limit_burst
            );
        } else {
            tracing::info!("  Rate limit: disabled");
        }

        tracing::info!("  Request timeout: {}s", self.request_timeout_secs);
        tracing::info!("  Static dir: {}", self.static_dir);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Parses a comma-separated list of integers, skipping blank entries.
///
/// ```ignore
/// assert_eq!(parse_pack_sizes(" 250, 500,,1000 ").unwrap(), vec![250, 500, 1000]);
/// ```
pub fn parse_pack_sizes(raw: &str) -> Result<Vec<i64>, ParseIntError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::parse)
        .collect()
}

/// Reads a numeric variable, using `default` when it is unset or blank.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{name} must be a number, got '{raw}': {e}")),
        _ => Ok(default),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
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
