//! # Response Envelopes
//!
//! Normalized JSON bodies returned to the caller. The relay always answers
//! with HTTP 200; the envelope tells the caller what Stripe said.

use crate::error::PaymentResult;
use serde::{Deserialize, Serialize};

/// Outcome of a forwarded charge request
///
/// Serializes as either
/// `{"status":"success","stripe_response_body":"..."}` or
/// `{"status":"stripe_error","stripe_response_code":402}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChargeEnvelope {
    /// Stripe answered 200; carries the raw response body text
    Success { stripe_response_body: String },
    /// Stripe answered with any other status code
    StripeError { stripe_response_code: u16 },
}

impl ChargeEnvelope {
    pub fn success(body: impl Into<String>) -> Self {
        ChargeEnvelope::Success {
            stripe_response_body: body.into(),
        }
    }

    pub fn stripe_error(status: u16) -> Self {
        ChargeEnvelope::StripeError {
            stripe_response_code: status,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ChargeEnvelope::Success { .. })
    }

    /// Serialize to the JSON string returned as the response body
    pub fn to_json(&self) -> PaymentResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// `{"error": "..."}` body for requests that never reached Stripe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    pub fn to_json(&self) -> PaymentResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_json() {
        let envelope = ChargeEnvelope::success(r#"{"id":"ch_1"}"#);
        assert_eq!(
            envelope.to_json().unwrap(),
            r#"{"status":"success","stripe_response_body":"{\"id\":\"ch_1\"}"}"#
        );
        assert!(envelope.is_success());
    }

    #[test]
    fn test_stripe_error_envelope_json() {
        let envelope = ChargeEnvelope::stripe_error(402);
        assert_eq!(
            envelope.to_json().unwrap(),
            r#"{"status":"stripe_error","stripe_response_code":402}"#
        );
        assert!(!envelope.is_success());
    }

    #[test]
    fn test_envelope_parses_back() {
        let parsed: ChargeEnvelope =
            serde_json::from_str(r#"{"status":"stripe_error","stripe_response_code":500}"#)
                .unwrap();
        assert_eq!(parsed, ChargeEnvelope::stripe_error(500));
    }

    #[test]
    fn test_error_envelope_json() {
        let envelope = ErrorEnvelope::new("Unsupported request method: DELETE");
        assert_eq!(
            envelope.to_json().unwrap(),
            r#"{"error":"Unsupported request method: DELETE"}"#
        );
    }
}
