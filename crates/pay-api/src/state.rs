//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the charge forwarder and server configuration.

use pay_core::BoxedChargeForwarder;
use pay_stripe::{StripeChargeForwarder, StripeConfig, StripeSettings};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;

/// Optional config file, searched relative to the working directory
const SETTINGS_PATHS: [&str; 3] = [
    "config/relay.toml",
    "../config/relay.toml",
    "../../config/relay.toml",
];

/// Contents of `config/relay.toml`
///
/// ```toml
/// [server]
/// host = "0.0.0.0"
/// port = 8787
/// cors_enabled = true
///
/// [stripe]
/// api_base_url = "https://api.stripe.com"
/// timeout_secs = 30
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RelaySettings {
    pub server: ServerSettings,
    pub stripe: StripeSettings,
}

/// `[server]` table of the config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub environment: Option<String>,
    pub cors_enabled: Option<bool>,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Attach `Access-Control-Allow-Origin: *` to responses
    pub cors_enabled: bool,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        Self::from_env_with(&ServerSettings::default())
    }

    /// Load from environment variables, falling back to file `settings`
    pub fn from_env_with(settings: &ServerSettings) -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST")
                .ok()
                .or_else(|| settings.host.clone())
                .unwrap_or_else(|| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .or(settings.port)
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT")
                .ok()
                .or_else(|| settings.environment.clone())
                .unwrap_or_else(|| "development".to_string()),
            cors_enabled: std::env::var("CORS_ENABLED")
                .ok()
                .map(|v| v == "true" || v == "1")
                .or(settings.cors_enabled)
                .unwrap_or(true),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Charge forwarder (Stripe in production)
    pub forwarder: BoxedChargeForwarder,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState with the Stripe forwarder
    pub fn new() -> anyhow::Result<Self> {
        let settings = load_relay_settings()?;
        let config = AppConfig::from_env_with(&settings.server);

        let stripe_config = StripeConfig::from_env_with(&settings.stripe)
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;
        let forwarder = StripeChargeForwarder::new(stripe_config)
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        Ok(Self::with_forwarder(config, Arc::new(forwarder)))
    }

    /// Create state around an explicit forwarder
    pub fn with_forwarder(config: AppConfig, forwarder: BoxedChargeForwarder) -> Self {
        Self { forwarder, config }
    }
}

/// Load `config/relay.toml` if present
fn load_relay_settings() -> anyhow::Result<RelaySettings> {
    for path in SETTINGS_PATHS {
        if let Ok(content) = std::fs::read_to_string(path) {
            let settings = parse_relay_settings(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!("Loaded relay settings from {}", path);
            return Ok(settings);
        }
    }

    tracing::debug!("No relay settings file found, using environment only");
    Ok(RelaySettings::default())
}

fn parse_relay_settings(content: &str) -> Result<RelaySettings, toml::de::Error> {
    toml::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_defaults() {
        // Clear env vars for test
        std::env::remove_var("HOST");
        std::env::remove_var("PORT");
        std::env::remove_var("CORS_ENABLED");

        let config = AppConfig::from_env();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(config.cors_enabled);
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "test".to_string(),
            cors_enabled: true,
        };

        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_invalid_socket_addr() {
        let config = AppConfig {
            host: "not a host".to_string(),
            port: 3000,
            environment: "test".to_string(),
            cors_enabled: true,
        };

        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn test_parse_relay_settings() {
        let settings = parse_relay_settings(
            r#"
            [server]
            port = 8787
            cors_enabled = false

            [stripe]
            api_base_url = "http://localhost:12111"
            timeout_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(settings.server.port, Some(8787));
        assert_eq!(settings.server.cors_enabled, Some(false));
        assert!(settings.server.host.is_none());
        assert_eq!(
            settings.stripe.api_base_url.as_deref(),
            Some("http://localhost:12111")
        );
        assert_eq!(settings.stripe.timeout_secs, Some(5));
    }

    #[test]
    fn test_parse_empty_relay_settings() {
        let settings = parse_relay_settings("").unwrap();
        assert!(settings.server.port.is_none());
        assert!(settings.stripe.api_base_url.is_none());
    }
}
