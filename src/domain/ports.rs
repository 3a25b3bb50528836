use crate::domain::payment::PaymentRequest;
use crate::domain::secret::Secret;
use crate::domain::tenant::TenantConfig;
use crate::domain::transaction::Transaction;
use crate::error::Result;
use async_trait::async_trait;

/// Default number of records returned by `list_by_tenant`.
pub const DEFAULT_TRANSACTION_LIMIT: usize = 100;

/// Read-only source of tenant configuration. The orchestrator fetches fresh
/// on every call; processor activation can change between calls.
#[async_trait]
pub trait TenantDirectory: Send + Sync {
    async fn tenant(&self, tenant_id: &str) -> Result<Option<TenantConfig>>;
}

/// One payment attempt against one named processor.
///
/// `Ok` carries the processor's opaque response payload; `Err` the failure
/// the audit trail records. Implementations own their latency bounding, rate
/// limiting and per-processor retry policy, and must report unresponsive
/// processors as failures rather than hanging.
#[async_trait]
pub trait ProcessorGateway: Send + Sync {
    async fn attempt(
        &self,
        processor: &str,
        api_key: &Secret,
        api_secret: &Secret,
        request: &PaymentRequest,
    ) -> Result<serde_json::Value>;
}

/// Durable store of transaction records, keyed by transaction id.
#[async_trait]
pub trait TransactionLedger: Send + Sync {
    /// Insert-or-replace keyed on the transaction id. Replacement swaps the
    /// full content (attempt history, final status, `updated_at`) while
    /// preserving the stored `created_at`; calling twice with the same id
    /// never duplicates attempt history.
    async fn upsert(&self, transaction: Transaction) -> Result<()>;

    /// The most recent `limit` transactions for a tenant, newest first.
    /// Never returns another tenant's records.
    async fn list_by_tenant(&self, tenant_id: &str, limit: usize) -> Result<Vec<Transaction>>;
}

pub type TenantDirectoryBox = Box<dyn TenantDirectory>;
pub type ProcessorGatewayBox = Box<dyn ProcessorGateway>;
pub type TransactionLedgerBox = Box<dyn TransactionLedger>;
