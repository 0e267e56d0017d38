//! # Stripe Charges
//!
//! Forwards payment requests to the Stripe Charges API
//! (`POST /v1/charges`) as form-encoded parameters.

use crate::config::StripeConfig;
use async_trait::async_trait;
use pay_core::{ChargeEnvelope, ChargeForwarder, PaymentError, PaymentInfo, PaymentResult};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

/// Stripe Charges API forwarder
///
/// Holds both secrets and picks one per request from the `stripe_key`
/// field. Each request is a single round trip; nothing is retried.
pub struct StripeChargeForwarder {
    config: StripeConfig,
    client: Client,
}

impl StripeChargeForwarder {
    /// Create a new forwarder
    pub fn new(config: StripeConfig) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                PaymentError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        let config = StripeConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }
}

#[async_trait]
impl ChargeForwarder for StripeChargeForwarder {
    #[instrument(skip(self, payment_info), fields(param_count = payment_info.len()))]
    async fn forward(&self, mut payment_info: PaymentInfo) -> PaymentResult<ChargeEnvelope> {
        let selector = payment_info.take_credential().map_err(|e| {
            warn!("Rejecting charge: {}", e);
            e
        })?;

        let form_params = payment_info.to_form_params();
        let url = self.config.charges_url();

        debug!(
            "Forwarding charge to Stripe: mode={}, {} params",
            selector,
            form_params.len()
        );

        // `.form()` sets Content-Type: application/x-www-form-urlencoded
        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, self.config.auth_header(selector))
            .header(ACCEPT, "application/json")
            .form(&form_params)
            .send()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        let status = response.status();

        if status == StatusCode::OK {
            let body = response
                .text()
                .await
                .map_err(|e| PaymentError::Network(e.to_string()))?;

            info!("Stripe charge accepted: mode={}", selector);
            return Ok(ChargeEnvelope::success(body));
        }

        // Body is only read for logging; the caller gets the status code
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<StripeErrorResponse>(&body) {
            Ok(error_response) => warn!(
                "Stripe charge rejected: status={}, type={:?}, code={:?}, message={}",
                status,
                error_response.error.error_type,
                error_response.error.code,
                error_response.error.message.as_deref().unwrap_or("")
            ),
            Err(_) => warn!("Stripe charge rejected: status={}", status),
        }

        Ok(ChargeEnvelope::stripe_error(status.as_u16()))
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "type")]
    error_type: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn payment_info(selector: &str) -> PaymentInfo {
        serde_json::from_value(json!({
            "stripe_key": selector,
            "amount": 2000,
            "currency": "usd",
            "source": "tok_visa",
            "description": "Order #1234",
            "receipt_email": "jenny@example.com"
        }))
        .unwrap()
    }

    fn forwarder_for(server: &MockServer) -> StripeChargeForwarder {
        let config = StripeConfig::new("sk_test_abc123", "sk_live_xyz789")
            .with_api_base_url(server.uri());
        StripeChargeForwarder::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_success_embeds_response_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/charges"))
            .and(header("authorization", "Bearer sk_test_abc123"))
            .and(header("accept", "application/json"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":"ch_1"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let forwarder = forwarder_for(&server);
        let body = forwarder.forward_json(payment_info("test")).await.unwrap();

        assert_eq!(
            body,
            r#"{"status":"success","stripe_response_body":"{\"id\":\"ch_1\"}"}"#
        );
    }

    #[tokio::test]
    async fn test_form_body_excludes_stripe_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/charges"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .mount(&server)
            .await;

        let forwarder = forwarder_for(&server);
        forwarder.forward(payment_info("test")).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);

        let body = String::from_utf8(requests[0].body.clone()).unwrap();
        assert!(!body.contains("stripe_key"));
        assert_eq!(
            body,
            "amount=2000&currency=usd&source=tok_visa&description=Order+%231234&receipt_email=jenny%40example.com"
        );
        assert!(body.contains("amount=2000"));
        assert!(body.contains("currency=usd"));
        assert!(body.contains("source=tok_visa"));
        assert!(body.contains("description=Order+%231234"));
        assert!(body.contains("receipt_email=jenny%40example.com"));
    }

    #[tokio::test]
    async fn test_live_selector_uses_live_secret() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/charges"))
            .and(header("authorization", "Bearer sk_live_xyz789"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let forwarder = forwarder_for(&server);
        let envelope = forwarder.forward(payment_info("live")).await.unwrap();
        assert!(envelope.is_success());
    }

    #[tokio::test]
    async fn test_non_200_returns_status_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/charges"))
            .respond_with(ResponseTemplate::new(402).set_body_json(json!({
                "error": {
                    "type": "card_error",
                    "code": "card_declined",
                    "message": "Your card was declined."
                }
            })))
            .mount(&server)
            .await;

        let forwarder = forwarder_for(&server);
        let body = forwarder.forward_json(payment_info("test")).await.unwrap();

        assert_eq!(body, r#"{"status":"stripe_error","stripe_response_code":402}"#);
    }

    #[tokio::test]
    async fn test_other_2xx_is_not_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_string("{}"))
            .mount(&server)
            .await;

        let forwarder = forwarder_for(&server);
        let envelope = forwarder.forward(payment_info("test")).await.unwrap();
        assert_eq!(envelope, ChargeEnvelope::stripe_error(201));
    }

    #[tokio::test]
    async fn test_unknown_selector_never_calls_stripe() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let forwarder = forwarder_for(&server);
        let result = forwarder.forward(payment_info("staging")).await;

        match result {
            Err(PaymentError::Credential { selector }) => assert_eq!(selector, "staging"),
            other => panic!("expected credential error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_network_error() {
        let config =
            StripeConfig::new("sk_test_a", "sk_live_b").with_api_base_url("http://127.0.0.1:1");
        let forwarder = StripeChargeForwarder::new(config).unwrap();

        let result = forwarder.forward(payment_info("test")).await;
        assert!(matches!(result, Err(PaymentError::Network(_))));
    }

    #[test]
    fn test_provider_name() {
        let forwarder =
            StripeChargeForwarder::new(StripeConfig::new("sk_test_a", "sk_live_b")).unwrap();
        assert_eq!(forwarder.provider_name(), "stripe");
    }
}
