//! # Payment Error Types
//!
//! Typed error handling for the charge relay.
//! All fallible operations return `Result<T, PaymentError>`.
//!
//! Note that a non-200 answer from Stripe is *not* an error here: it is
//! reported to the caller as a `stripe_error` envelope.

use thiserror::Error;

/// Core error type for all relay operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing secrets, invalid key formats)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Request body is not valid JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// Required `payment_info` fields are missing
    #[error("Input data failed validation")]
    Validation,

    /// `stripe_key` does not name a known credential
    #[error("Unknown stripe_key credential selector: {selector}")]
    Credential { selector: String },

    /// Network/HTTP error communicating with Stripe
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP method outside of POST/OPTIONS
    #[error("Unsupported request method: {method}")]
    UnsupportedMethod { method: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PaymentError {
    /// Short, stable name of the error kind (for log fields)
    pub fn kind(&self) -> &'static str {
        match self {
            PaymentError::Configuration(_) => "configuration",
            PaymentError::Parse(_) => "parse",
            PaymentError::Validation => "validation",
            PaymentError::Credential { .. } => "credential",
            PaymentError::Network(_) => "network",
            PaymentError::UnsupportedMethod { .. } => "unsupported_method",
            PaymentError::Serialization(_) => "serialization",
        }
    }
}

impl From<serde_json::Error> for PaymentError {
    fn from(err: serde_json::Error) -> Self {
        PaymentError::Serialization(err.to_string())
    }
}

/// Result type alias for relay operations
pub type PaymentResult<T> = Result<T, PaymentError>;
