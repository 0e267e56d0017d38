//! # Stripe Configuration
//!
//! Configuration management for the Stripe integration.
//! Secrets are loaded from environment variables; non-secret settings may
//! also come from the `[stripe]` table of the relay config file.

use pay_core::{CredentialSelector, PaymentError};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::time::Duration;

/// Production Stripe API host
pub const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";

/// Charges API endpoint path
pub const CHARGES_PATH: &str = "/v1/charges";

/// Outbound request timeout when none is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Non-secret Stripe settings read from the config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StripeSettings {
    pub api_base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Stripe API configuration
#[derive(Clone)]
pub struct StripeConfig {
    /// Secret used when `stripe_key` is `"test"`
    test_secret_key: String,

    /// Secret used when `stripe_key` is `"live"`
    live_secret_key: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// Timeout applied to the outbound charge call
    pub timeout: Duration,
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `STRIPE_API_KEY_SECRET_TEST`
    /// - `STRIPE_API_KEY_SECRET_LIVE`
    ///
    /// Optional:
    /// - `STRIPE_API_BASE_URL`
    /// - `STRIPE_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, PaymentError> {
        Self::from_env_with(&StripeSettings::default())
    }

    /// Load from environment variables, falling back to file `settings`
    /// for the optional values.
    pub fn from_env_with(settings: &StripeSettings) -> Result<Self, PaymentError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let test_secret_key = env::var("STRIPE_API_KEY_SECRET_TEST").map_err(|_| {
            PaymentError::Configuration("STRIPE_API_KEY_SECRET_TEST not set".to_string())
        })?;

        let live_secret_key = env::var("STRIPE_API_KEY_SECRET_LIVE").map_err(|_| {
            PaymentError::Configuration("STRIPE_API_KEY_SECRET_LIVE not set".to_string())
        })?;

        // Validate key formats
        check_key_prefix(
            "STRIPE_API_KEY_SECRET_TEST",
            &test_secret_key,
            &["sk_test_", "rk_test_"],
        )?;
        check_key_prefix(
            "STRIPE_API_KEY_SECRET_LIVE",
            &live_secret_key,
            &["sk_live_", "rk_live_"],
        )?;

        let api_base_url = env::var("STRIPE_API_BASE_URL")
            .ok()
            .or_else(|| settings.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let timeout_secs = match env::var("STRIPE_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| {
                PaymentError::Configuration(format!(
                    "STRIPE_TIMEOUT_SECS must be a whole number of seconds, got {:?}",
                    raw
                ))
            })?,
            Err(_) => settings.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            test_secret_key,
            live_secret_key,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(test_secret_key: impl Into<String>, live_secret_key: impl Into<String>) -> Self {
        Self {
            test_secret_key: test_secret_key.into(),
            live_secret_key: live_secret_key.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Secret for the selected credential
    pub fn secret_for(&self, selector: CredentialSelector) -> &str {
        match selector {
            CredentialSelector::Test => &self.test_secret_key,
            CredentialSelector::Live => &self.live_secret_key,
        }
    }

    /// Get authorization header value for the selected credential
    pub fn auth_header(&self, selector: CredentialSelector) -> String {
        format!("Bearer {}", self.secret_for(selector))
    }

    /// Full URL of the charges endpoint
    pub fn charges_url(&self) -> String {
        format!("{}{}", self.api_base_url, CHARGES_PATH)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder: set outbound timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripeConfig")
            .field("test_secret_key", &"<redacted>")
            .field("live_secret_key", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn check_key_prefix(name: &str, value: &str, prefixes: &[&str]) -> Result<(), PaymentError> {
    if prefixes.iter().any(|p| value.starts_with(p)) {
        Ok(())
    } else {
        Err(PaymentError::Configuration(format!(
            "{} must start with {}",
            name,
            prefixes.join(" or ")
        )))
    }
}
