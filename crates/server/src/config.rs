//! Bridge configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PRINTIFY_API_KEY` - Printify personal access token
//! - `PRINTIFY_SHOP_ID` - Printify shop ID orders are created in
//! - `BIGCARTEL_API_TOKEN` - BigCartel API token used for inventory updates
//! - `BIGCARTEL_STORE_ID` - BigCartel store ID
//! - `BIGCARTEL_WEBHOOK_SECRET` - Shared secret expected in `?token=` on webhooks
//!   (min 16 chars, high entropy)
//!
//! ## Optional
//! - `HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 3000)
//! - `PRINTIFY_API_URL` - Printify API base URL (default: <https://api.printify.com>)
//! - `BIGCARTEL_API_URL` - BigCartel API base URL (default: <https://api.bigcartel.com>)
//! - `HTTP_TIMEOUT_SECS` - Timeout for every outbound call (default: 10)
//! - `INVENTORY_SYNC_INTERVAL_MINUTES` - Inventory push period (default: 30)
//! - `SKU_REFRESH_TIME` - Daily SKU cache refresh, UTC `HH:MM` (default: 03:00)
//! - `IN_STOCK_QUANTITY` - Quantity pushed for enabled variants (default: 999)
//! - `LOG_FORMAT` - `json` for structured logs, anything else for text
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use chrono::NaiveTime;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

const MIN_WEBHOOK_SECRET_LENGTH: usize = 16;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.0;

const DEFAULT_PRINTIFY_API_URL: &str = "https://api.printify.com";
const DEFAULT_BIGCARTEL_API_URL: &str = "https://api.bigcartel.com";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "password",
    "xxx",
    "todo",
    "fixme",
    "put-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Bridge application configuration.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Printify (fulfillment) API configuration
    pub printify: PrintifyConfig,
    /// BigCartel (storefront) API configuration
    pub bigcartel: BigCartelConfig,
    /// Background job schedule
    pub sync: SyncConfig,
    /// Timeout applied to every outbound HTTP call
    pub http_timeout: Duration,
    /// Emit JSON logs instead of text
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. production, staging)
    pub sentry_environment: Option<String>,
    /// Sentry error event sample rate
    pub sentry_sample_rate: f32,
    /// Sentry performance trace sample rate
    pub sentry_traces_sample_rate: f32,
}

/// Printify API configuration.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct PrintifyConfig {
    /// API base URL (scheme and host, no path)
    pub api_url: Url,
    /// Personal access token
    pub api_key: SecretString,
    /// Shop that orders are created in and the catalog is read from
    pub shop_id: String,
}

impl std::fmt::Debug for PrintifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrintifyConfig")
            .field("api_url", &self.api_url.as_str())
            .field("api_key", &"[REDACTED]")
            .field("shop_id", &self.shop_id)
            .finish()
    }
}

/// BigCartel API and webhook configuration.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct BigCartelConfig {
    /// API base URL (scheme and host, no path)
    pub api_url: Url,
    /// API token for inventory updates
    pub api_token: SecretString,
    /// Store whose products are updated
    pub store_id: String,
    /// Shared secret required on webhook calls
    pub webhook_secret: SecretString,
}

impl std::fmt::Debug for BigCartelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BigCartelConfig")
            .field("api_url", &self.api_url.as_str())
            .field("api_token", &"[REDACTED]")
            .field("store_id", &self.store_id)
            .field("webhook_secret", &"[REDACTED]")
            .finish()
    }
}

/// Background job schedule.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Period between inventory pushes
    pub inventory_interval: Duration,
    /// UTC time of day the SKU cache is rebuilt
    pub sku_refresh_at: NaiveTime,
    /// Quantity reported to BigCartel for enabled variants
    pub in_stock_quantity: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            inventory_interval: Duration::from_secs(30 * 60),
            sku_refresh_at: NaiveTime::from_hms_opt(3, 0, 0).unwrap_or(NaiveTime::MIN),
            in_stock_quantity: 999,
        }
    }
}

impl BridgeConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the webhook secret fails validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key/value source.
    ///
    /// # Errors
    ///
    /// Same as [`BridgeConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let vars = Vars(&lookup);

        let host = vars.parsed_or("HOST", "0.0.0.0")?;
        let port = vars.parsed_or("PORT", "3000")?;
        let printify = PrintifyConfig::from_vars(&vars)?;
        let bigcartel = BigCartelConfig::from_vars(&vars)?;
        let sync = SyncConfig::from_vars(&vars)?;
        let http_timeout = Duration::from_secs(vars.positive_or("HTTP_TIMEOUT_SECS", "10")?);
        let log_json = vars
            .optional("LOG_FORMAT")
            .is_some_and(|f| f.eq_ignore_ascii_case("json"));
        let sentry_dsn = vars.optional("SENTRY_DSN");
        let sentry_environment = vars.optional("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = vars
            .optional("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = vars
            .optional("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.0);

        Ok(Self {
            host,
            port,
            printify,
            bigcartel,
            sync,
            http_timeout,
            log_json,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl PrintifyConfig {
    fn from_vars(vars: &Vars<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: vars.url_or("PRINTIFY_API_URL", DEFAULT_PRINTIFY_API_URL)?,
            api_key: vars.secret("PRINTIFY_API_KEY")?,
            shop_id: vars.required("PRINTIFY_SHOP_ID")?,
        })
    }
}

impl BigCartelConfig {
    fn from_vars(vars: &Vars<'_>) -> Result<Self, ConfigError> {
        let webhook_secret = vars.secret("BIGCARTEL_WEBHOOK_SECRET")?;
        validate_webhook_secret(&webhook_secret, "BIGCARTEL_WEBHOOK_SECRET")?;

        Ok(Self {
            api_url: vars.url_or("BIGCARTEL_API_URL", DEFAULT_BIGCARTEL_API_URL)?,
            api_token: vars.secret("BIGCARTEL_API_TOKEN")?,
            store_id: vars.required("BIGCARTEL_STORE_ID")?,
            webhook_secret,
        })
    }
}

impl SyncConfig {
    fn from_vars(vars: &Vars<'_>) -> Result<Self, ConfigError> {
        let minutes = vars.positive_or("INVENTORY_SYNC_INTERVAL_MINUTES", "30")?;
        let interval_secs = minutes.checked_mul(60).ok_or_else(|| {
            ConfigError::InvalidEnvVar(
                "INVENTORY_SYNC_INTERVAL_MINUTES".to_string(),
                "interval is too large".to_string(),
            )
        })?;

        let refresh_at = vars.or_default("SKU_REFRESH_TIME", "03:00");
        let sku_refresh_at = NaiveTime::parse_from_str(&refresh_at, "%H:%M").map_err(|e| {
            ConfigError::InvalidEnvVar("SKU_REFRESH_TIME".to_string(), e.to_string())
        })?;

        Ok(Self {
            inventory_interval: Duration::from_secs(interval_secs),
            sku_refresh_at,
            in_stock_quantity: vars.parsed_or("IN_STOCK_QUANTITY", "999")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable source shared by the `from_vars` constructors.
struct Vars<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Vars<'_> {
    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        (self.0)(key)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get a required variable as a secret.
    fn secret(&self, key: &str) -> Result<SecretString, ConfigError> {
        self.required(key).map(SecretString::from)
    }

    /// Get an optional variable.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        (self.0)(key).unwrap_or_else(|| default.to_string())
    }

    /// Get a variable with a default value and parse it.
    fn parsed_or<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.or_default(key, default)
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }

    /// Get a non-zero integer with a default value.
    fn positive_or(&self, key: &str, default: &str) -> Result<u64, ConfigError> {
        match self.parsed_or(key, default)? {
            0 => Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                "must be greater than zero".to_string(),
            )),
            n => Ok(n),
        }
    }

    /// Get a base URL with a default value.
    fn url_or(&self, key: &str, default: &str) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.or_default(key, default))
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                "must be an absolute http(s) URL".to_string(),
            ));
        }

        Ok(url)
    }
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate the webhook secret: length, placeholder blocklist, and entropy.
fn validate_webhook_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();

    if value.len() < MIN_WEBHOOK_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {MIN_WEBHOOK_SECRET_LENGTH} characters (got {})",
                value.len()
            ),
        ));
    }

    let lower = value.to_lowercase();
    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("appears to be a placeholder (contains '{pattern}')"),
        ));
    }

    let entropy = shannon_entropy(value);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}
