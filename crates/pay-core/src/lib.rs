//! # pay-core
//!
//! Core types and traits for the charge relay.
//!
//! This crate provides:
//! - `validate` and `IncomingPayload` for checking inbound request bodies
//! - `PaymentInfo` for the charge parameters forwarded to the provider
//! - `CredentialSelector` for the `stripe_key` routing field
//! - `ChargeEnvelope` / `ErrorEnvelope` for normalized responses
//! - `ChargeForwarder` trait for payment providers
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{ChargeForwarder, IncomingPayload};
//!
//! let payload = IncomingPayload::parse(&body)?;
//! let payment_info = payload.into_payment_info()?;
//!
//! // Forward using any provider implementation
//! let response_body = forwarder.forward_json(payment_info).await?;
//! ```

pub mod credential;
pub mod envelope;
pub mod error;
pub mod forwarder;
pub mod payload;

// Re-exports for convenience
pub use credential::CredentialSelector;
pub use envelope::{ChargeEnvelope, ErrorEnvelope};
pub use error::{PaymentError, PaymentResult};
pub use forwarder::{BoxedChargeForwarder, ChargeForwarder};
pub use payload::{
    form_value, validate, IncomingPayload, PaymentInfo, CREDENTIAL_FIELD, PAYMENT_INFO_KEY,
    REQUIRED_FIELDS,
};
