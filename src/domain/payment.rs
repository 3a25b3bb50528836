use crate::domain::transaction::PaymentStatus;
use crate::error::PaymentError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A positive monetary amount.
///
/// Wrapper around `rust_decimal::Decimal` that rejects zero and negative
/// values at construction, including when deserialized from a request body.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, PaymentError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PaymentError::Validation(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PaymentError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// A caller-supplied charge request. The source is an opaque
/// payment-instrument token; the currency is an ISO-4217-style code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub amount: Amount,
    pub currency: String,
    pub source: String,
}

/// Returned to the caller when a processor accepted the charge.
///
/// On total failure the orchestrator returns an error instead of this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub success: bool,
    pub transaction_id: Uuid,
    /// Name of the first processor in attempt order that succeeded.
    pub processor: String,
    pub amount: Amount,
    pub currency: String,
    pub status: PaymentStatus,
    pub timestamp: DateTime<Utc>,
}
