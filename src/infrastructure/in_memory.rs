use crate::domain::ports::{TenantDirectory, TransactionLedger};
use crate::domain::tenant::TenantConfig;
use crate::domain::transaction::Transaction;
use crate::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A thread-safe in-memory tenant directory.
///
/// Uses `Arc<RwLock<HashMap<..>>>` for shared concurrent access. `Clone`
/// shares the underlying map, so a seeded copy can be handed to the
/// orchestrator while the seeder keeps writing.
#[derive(Default, Clone)]
pub struct InMemoryTenantDirectory {
    tenants: Arc<RwLock<HashMap<String, TenantConfig>>>,
}

impl InMemoryTenantDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, tenant: TenantConfig) {
        let mut tenants = self.tenants.write().await;
        tenants.insert(tenant.tenant_id.clone(), tenant);
    }
}

#[async_trait]
impl TenantDirectory for InMemoryTenantDirectory {
    async fn tenant(&self, tenant_id: &str) -> Result<Option<TenantConfig>> {
        let tenants = self.tenants.read().await;
        Ok(tenants.get(tenant_id).cloned())
    }
}

/// A thread-safe in-memory transaction ledger.
///
/// The single mutation point is `upsert`, which holds the write lock for the
/// whole read-modify-write, so replacement is atomic per transaction id.
#[derive(Default, Clone)]
pub struct InMemoryLedger {
    transactions: Arc<RwLock<HashMap<Uuid, Transaction>>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionLedger for InMemoryLedger {
    async fn upsert(&self, mut transaction: Transaction) -> Result<()> {
        let mut transactions = self.transactions.write().await;
        if let Some(existing) = transactions.get(&transaction.transaction_id) {
            transaction.created_at = existing.created_at;
            transaction.updated_at = Utc::now();
        }
        transactions.insert(transaction.transaction_id, transaction);
        Ok(())
    }

    async fn list_by_tenant(&self, tenant_id: &str, limit: usize) -> Result<Vec<Transaction>> {
        let transactions = self.transactions.read().await;
        let mut matching: Vec<Transaction> = transactions
            .values()
            .filter(|t| t.tenant_id == tenant_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching.truncate(limit);
        Ok(matching)
    }
}
