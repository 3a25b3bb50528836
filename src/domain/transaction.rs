use crate::domain::payment::{Amount, PaymentRequest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

/// Outcome of a processor attempt, and of a whole transaction.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Completed,
    Failed,
}

/// One try of a payment request against one processor.
///
/// Attempts are append-only: once pushed onto a transaction's history they
/// are never mutated.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct ProcessorAttempt {
    pub processor: String,
    pub status: PaymentStatus,
    pub timestamp: DateTime<Utc>,
    /// Raw processor response payload, opaque to the core.
    pub response: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProcessorAttempt {
    pub fn completed(processor: impl Into<String>, response: serde_json::Value) -> Self {
        Self {
            processor: processor.into(),
            status: PaymentStatus::Completed,
            timestamp: Utc::now(),
            response,
            error: None,
        }
    }

    pub fn failed(processor: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            processor: processor.into(),
            status: PaymentStatus::Failed,
            timestamp: Utc::now(),
            response: json!({ "success": false }),
            error: Some(error.into()),
        }
    }
}

/// The audit record for one logical payment operation.
///
/// Attempt insertion order is the attempt order and is semantically
/// meaningful. The `transaction_id` is the ledger's idempotency key for the
/// whole record.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_id: Uuid,
    pub tenant_id: String,
    pub amount: Amount,
    pub currency: String,
    pub source: String,
    #[serde(rename = "processorAttempts")]
    pub attempts: Vec<ProcessorAttempt>,
    pub final_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Builds the terminal record for one orchestration run.
    pub fn record(
        transaction_id: Uuid,
        tenant_id: &str,
        request: &PaymentRequest,
        attempts: Vec<ProcessorAttempt>,
        final_status: PaymentStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            transaction_id,
            tenant_id: tenant_id.to_string(),
            amount: request.amount,
            currency: request.currency.clone(),
            source: request.source.clone(),
            attempts,
            final_status,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request() -> PaymentRequest {
        PaymentRequest {
            amount: Amount::new(dec!(10.0)).unwrap(),
            currency: "USD".to_string(),
            source: "tok_test".to_string(),
        }
    }

    #[test]
    fn test_failed_attempt_payload() {
        let attempt = ProcessorAttempt::failed("paypal", "connection reset");
        assert_eq!(attempt.status, PaymentStatus::Failed);
        assert_eq!(attempt.response, json!({ "success": false }));
        assert_eq!(attempt.error.as_deref(), Some("connection reset"));
    }

    #[test]
    fn test_completed_attempt_has_no_error() {
        let attempt = ProcessorAttempt::completed("stripe", json!({ "success": true }));
        assert_eq!(attempt.status, PaymentStatus::Completed);
        assert!(attempt.error.is_none());
    }

    #[test]
    fn test_transaction_wire_format() {
        let tx = Transaction::record(
            Uuid::new_v4(),
            "tenant-1",
            &request(),
            vec![ProcessorAttempt::failed("paypal", "declined")],
            PaymentStatus::Failed,
        );
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["tenantId"], "tenant-1");
        assert_eq!(json["finalStatus"], "failed");
        assert_eq!(json["processorAttempts"][0]["processor"], "paypal");
        assert_eq!(json["processorAttempts"][0]["status"], "failed");
        assert_eq!(json["processorAttempts"][0]["error"], "declined");
        assert!(json["createdAt"].is_string());
    }

    #[test]
    fn test_transaction_roundtrip() {
        let tx = Transaction::record(
            Uuid::new_v4(),
            "tenant-1",
            &request(),
            vec![
                ProcessorAttempt::failed("paypal", "declined"),
                ProcessorAttempt::completed("stripe", json!({ "success": true })),
            ],
            PaymentStatus::Completed,
        );
        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tx);
    }
}
