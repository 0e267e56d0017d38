//! # Charge Forwarder Trait
//!
//! Seam between the HTTP dispatcher and the payment provider.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  ChargeForwarder (trait)                    │
//! │  ├── forward()                                              │
//! │  ├── forward_json()                                         │
//! │  └── provider_name()                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                  ┌─────────┴─────────┐
//!                  │                   │
//!          ┌───────┴───────┐   ┌───────┴───────┐
//!          │ StripeCharge  │   │  test doubles │
//!          │   Forwarder   │   │               │
//!          └───────────────┘   └───────────────┘
//! ```

use crate::envelope::ChargeEnvelope;
use crate::error::PaymentResult;
use crate::payload::PaymentInfo;
use async_trait::async_trait;
use std::sync::Arc;

/// Forwards validated charge parameters to a payment provider.
#[async_trait]
pub trait ChargeForwarder: Send + Sync {
    /// Submit one charge request and normalize the provider's answer.
    ///
    /// # Arguments
    /// * `payment_info` - Validated fields, still carrying `stripe_key`
    ///
    /// # Returns
    /// A `ChargeEnvelope`. Provider-side rejections are envelopes, not
    /// errors; `Err` means the request could not be made at all.
    async fn forward(&self, payment_info: PaymentInfo) -> PaymentResult<ChargeEnvelope>;

    /// Same as `forward`, serialized to the response body string.
    async fn forward_json(&self, payment_info: PaymentInfo) -> PaymentResult<String> {
        self.forward(payment_info).await?.to_json()
    }

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared forwarder (dynamic dispatch)
pub type BoxedChargeForwarder = Arc<dyn ChargeForwarder>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PaymentError;
    use serde_json::json;

    struct FixedForwarder(u16);

    #[async_trait]
    impl ChargeForwarder for FixedForwarder {
        async fn forward(&self, mut payment_info: PaymentInfo) -> PaymentResult<ChargeEnvelope> {
            payment_info.take_credential()?;
            Ok(match self.0 {
                200 => ChargeEnvelope::success(r#"{"id":"ch_1"}"#),
                code => ChargeEnvelope::stripe_error(code),
            })
        }

        fn provider_name(&self) -> &'static str {
            "fixed"
        }
    }

    fn info(selector: &str) -> PaymentInfo {
        serde_json::from_value(json!({ "stripe_key": selector, "amount": 100 })).unwrap()
    }

    #[tokio::test]
    async fn test_forward_json_serializes_envelope() {
        let forwarder: BoxedChargeForwarder = Arc::new(FixedForwarder(402));
        let body = forwarder.forward_json(info("live")).await.unwrap();
        assert_eq!(body, r#"{"status":"stripe_error","stripe_response_code":402}"#);
    }

    #[tokio::test]
    async fn test_forward_json_propagates_errors() {
        let forwarder = FixedForwarder(200);
        let result = forwarder.forward_json(info("prod")).await;
        assert!(matches!(result, Err(PaymentError::Credential { .. })));
    }
}
