//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `SHOP_DATA_DIR` - Directory for persisted cart and session (default: .shopfront)
//! - `SHOP_AUTH_LATENCY_MS` - Simulated sign-in latency in milliseconds (default: 1000)
//! - `SHOP_DEMO_EMAIL` - Email accepted by login (default: user@example.com)
//! - `SHOP_DEMO_PASSWORD` - Password accepted by login (default: password)
//! - `SHOP_TAX_RATE` - Flat tax rate applied at checkout, 0 to 1 (default: 0.10)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use secrecy::SecretString;
use thiserror::Error;

use crate::services::auth::{AuthSettings, DEFAULT_DEMO_EMAIL, DEFAULT_DEMO_PASSWORD};

const DEFAULT_DATA_DIR: &str = ".shopfront";
const DEFAULT_LATENCY_MS: &str = "1000";
const DEFAULT_TAX_RATE: &str = "0.10";

/// Configuration errors that can occur during loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
///
/// Implements `Debug` manually to redact the demo password.
#[derive(Clone)]
pub struct ShopConfig {
    /// Directory holding the persisted cart and session
    pub data_dir: PathBuf,
    /// Delay applied to login and signup
    pub auth_latency: Duration,
    /// Email accepted by login
    pub demo_email: String,
    /// Password accepted by login
    pub demo_password: SecretString,
    /// Flat tax rate applied to the checkout summary
    pub tax_rate: Decimal,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl std::fmt::Debug for ShopConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopConfig")
            .field("data_dir", &self.data_dir)
            .field("auth_latency", &self.auth_latency)
            .field("demo_email", &self.demo_email)
            .field("demo_password", &"[REDACTED]")
            .field("tax_rate", &self.tax_rate)
            .field("sentry_dsn", &self.sentry_dsn.as_ref().map(|_| "[SET]"))
            .finish()
    }
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            auth_latency: Duration::from_millis(1000),
            demo_email: DEFAULT_DEMO_EMAIL.to_string(),
            demo_password: SecretString::from(DEFAULT_DEMO_PASSWORD),
            tax_rate: Decimal::new(10, 2),
            sentry_dsn: None,
        }
    }
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = PathBuf::from(get_env_or_default(&lookup, "SHOP_DATA_DIR", DEFAULT_DATA_DIR));

        let latency_ms = get_env_or_default(&lookup, "SHOP_AUTH_LATENCY_MS", DEFAULT_LATENCY_MS)
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SHOP_AUTH_LATENCY_MS".to_string(), e.to_string())
            })?;

        let demo_email = get_env_or_default(&lookup, "SHOP_DEMO_EMAIL", DEFAULT_DEMO_EMAIL);
        if demo_email.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "SHOP_DEMO_EMAIL".to_string(),
                "cannot be empty".to_string(),
            ));
        }
        let demo_password = SecretString::from(get_env_or_default(
            &lookup,
            "SHOP_DEMO_PASSWORD",
            DEFAULT_DEMO_PASSWORD,
        ));

        let tax_rate = parse_tax_rate(&get_env_or_default(
            &lookup,
            "SHOP_TAX_RATE",
            DEFAULT_TAX_RATE,
        ))?;

        let sentry_dsn = get_optional_env(&lookup, "SENTRY_DSN");

        Ok(Self {
            data_dir,
            auth_latency: Duration::from_millis(latency_ms),
            demo_email,
            demo_password,
            tax_rate,
            sentry_dsn,
        })
    }

    /// Settings for the session store.
    #[must_use]
    pub fn auth_settings(&self) -> AuthSettings {
        AuthSettings {
            demo_email: self.demo_email.clone(),
            demo_password: self.demo_password.clone(),
            latency: self.auth_latency,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional variable, treating an empty value as unset.
fn get_optional_env(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|v| !v.is_empty())
}

/// Get a variable with a default value.
fn get_env_or_default(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> String {
    get_optional_env(lookup, key).unwrap_or_else(|| default.to_string())
}

fn parse_tax_rate(value: &str) -> Result<Decimal, ConfigError> {
    let rate = Decimal::from_str(value.trim())
        .map_err(|e| ConfigError::InvalidEnvVar("SHOP_TAX_RATE".to_string(), e.to_string()))?;
    if rate.is_sign_negative() || rate > Decimal::ONE {
        return Err(ConfigError::InvalidEnvVar(
            "SHOP_TAX_RATE".to_string(),
            format!("must be between 0 and 1 (got {rate})"),
        ));
    }
    Ok(rate)
}
