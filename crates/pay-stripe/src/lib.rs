//! # pay-stripe
//!
//! Stripe Charges API forwarder for charge-relay.
//!
//! `StripeChargeForwarder` takes validated `payment_info` fields, picks the
//! test or live secret from the `stripe_key` field, drops that field, and
//! posts everything else to `https://api.stripe.com/v1/charges` as a form.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_stripe::StripeChargeForwarder;
//! use pay_core::{ChargeForwarder, IncomingPayload};
//!
//! // Create forwarder from environment
//! let forwarder = StripeChargeForwarder::from_env()?;
//!
//! let payment_info = IncomingPayload::parse(&body)?.into_payment_info()?;
//! let envelope = forwarder.forward(payment_info).await?;
//!
//! // {"status":"success","stripe_response_body":"..."}
//! // or {"status":"stripe_error","stripe_response_code":402}
//! println!("{}", envelope.to_json()?);
//! ```

pub mod charge;
pub mod config;

// Re-exports
pub use charge::StripeChargeForwarder;
pub use config::{StripeConfig, StripeSettings};
