//! # Credential Selection
//!
//! The `stripe_key` field of a payment request does not carry a secret.
//! It names which of the two provisioned Stripe secrets to charge with.

use crate::error::PaymentError;
use std::fmt;
use std::str::FromStr;

/// Which Stripe secret a request is charged with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialSelector {
    /// Test-mode secret (`sk_test_...`)
    Test,
    /// Live-mode secret (`sk_live_...`)
    Live,
}

impl CredentialSelector {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialSelector::Test => "test",
            CredentialSelector::Live => "live",
        }
    }
}

impl FromStr for CredentialSelector {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "test" => Ok(CredentialSelector::Test),
            "live" => Ok(CredentialSelector::Live),
            other => Err(PaymentError::Credential {
                selector: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for CredentialSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
