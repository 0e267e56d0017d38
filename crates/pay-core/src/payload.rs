//! # Payment Payload
//!
//! Inbound request body types and the shape validator.
//!
//! A request body looks like:
//!
//! ```json
//! {
//!   "payment_info": {
//!     "stripe_key": "test",
//!     "amount": 2000,
//!     "currency": "usd",
//!     "source": "tok_visa",
//!     "description": "Order #1234",
//!     "receipt_email": "jenny@example.com"
//!   }
//! }
//! ```
//!
//! Everything under `payment_info` except `stripe_key` is forwarded to
//! Stripe as-is, so callers may add any other Charges API parameter.

use crate::credential::CredentialSelector;
use crate::error::{PaymentError, PaymentResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level key holding the charge parameters
pub const PAYMENT_INFO_KEY: &str = "payment_info";

/// Routing field selecting the Stripe secret; never forwarded
pub const CREDENTIAL_FIELD: &str = "stripe_key";

/// Fields every `payment_info` object must carry
pub const REQUIRED_FIELDS: [&str; 6] = [
    CREDENTIAL_FIELD,
    "amount",
    "currency",
    "source",
    "description",
    "receipt_email",
];

/// Check that a parsed body carries a `payment_info` object with every
/// required field.
///
/// The entry count is checked first; the per-field scan only runs when
/// there are at least as many entries as required fields, and stops at the
/// first missing one.
pub fn validate(json: &Value) -> bool {
    let Some(payment_info) = json.get(PAYMENT_INFO_KEY) else {
        return false;
    };

    let entries = payment_info.as_object().map_or(0, Map::len);
    if entries < REQUIRED_FIELDS.len() {
        return false;
    }

    match payment_info.as_object() {
        Some(fields) => REQUIRED_FIELDS.iter().all(|f| fields.contains_key(*f)),
        None => false,
    }
}

/// A parsed request body, before validation
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingPayload(Value);

impl IncomingPayload {
    /// Parse a request body
    pub fn parse(body: &str) -> PaymentResult<Self> {
        serde_json::from_str(body)
            .map(Self)
            .map_err(|e| PaymentError::Parse(e.to_string()))
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }

    pub fn is_valid(&self) -> bool {
        validate(&self.0)
    }

    /// Validate and extract the `payment_info` object
    pub fn into_payment_info(self) -> PaymentResult<PaymentInfo> {
        if !self.is_valid() {
            return Err(PaymentError::Validation);
        }

        match self.0 {
            Value::Object(mut root) => match root.remove(PAYMENT_INFO_KEY) {
                Some(Value::Object(fields)) => Ok(PaymentInfo::new(fields)),
                _ => Err(PaymentError::Validation),
            },
            _ => Err(PaymentError::Validation),
        }
    }
}

impl From<Value> for IncomingPayload {
    fn from(json: Value) -> Self {
        Self(json)
    }
}

/// Charge parameters taken from `payment_info`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentInfo {
    fields: Map<String, Value>,
}

impl PaymentInfo {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Remove `stripe_key` and resolve it to a credential.
    ///
    /// The field is removed even when it does not name a known credential.
    /// The remaining fields keep their original order.
    pub fn take_credential(&mut self) -> PaymentResult<CredentialSelector> {
        let selector = match self.fields.shift_remove(CREDENTIAL_FIELD) {
            Some(Value::String(s)) => s,
            Some(other) => form_value(&other),
            None => String::new(),
        };
        selector.parse()
    }

    /// Build `application/x-www-form-urlencoded` pairs from every field,
    /// in the order the caller sent them
    pub fn to_form_params(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.clone(), form_value(value)))
            .collect()
    }
}

impl From<Map<String, Value>> for PaymentInfo {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

/// Coerce a JSON value to its form-field text
pub fn form_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // Outside the scalar contract; sent as compact JSON
        other => other.to_string(),
    }
}
