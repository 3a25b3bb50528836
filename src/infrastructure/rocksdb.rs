use crate::domain::ports::TransactionLedger;
use crate::domain::transaction::Transaction;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use chrono::Utc;
use rocksdb::{ColumnFamilyDescriptor, DB, IteratorMode, Options};
use std::path::Path;
use std::sync::Arc;

/// Column family holding the transaction audit records.
pub const CF_TRANSACTIONS: &str = "transactions";

/// A persistent ledger backed by RocksDB.
///
/// Records are keyed by the transaction id string and stored as JSON, so
/// the upsert is a single-document replace.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDbLedger {
    db: Arc<DB>,
}

impl RocksDbLedger {
    /// Opens or creates a RocksDB instance at the specified path, ensuring
    /// the transactions column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_transactions = ColumnFamilyDescriptor::new(CF_TRANSACTIONS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_transactions])
            .map_err(|e| PaymentError::Persistence(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self) -> Result<&rocksdb::ColumnFamily> {
        self.db.cf_handle(CF_TRANSACTIONS).ok_or_else(|| {
            PaymentError::Persistence("transactions column family not found".to_string())
        })
    }
}

#[async_trait]
impl TransactionLedger for RocksDbLedger {
    async fn upsert(&self, mut transaction: Transaction) -> Result<()> {
        let cf = self.cf()?;
        let key = transaction.transaction_id.to_string();

        if let Some(bytes) = self
            .db
            .get_cf(cf, key.as_bytes())
            .map_err(|e| PaymentError::Persistence(e.to_string()))?
        {
            let existing: Transaction = serde_json::from_slice(&bytes).map_err(|e| {
                PaymentError::Persistence(format!("failed to deserialize transaction: {e}"))
            })?;
            transaction.created_at = existing.created_at;
            transaction.updated_at = Utc::now();
        }

        let value = serde_json::to_vec(&transaction)
            .map_err(|e| PaymentError::Persistence(format!("serialization error: {e}")))?;
        self.db
            .put_cf(cf, key.as_bytes(), value)
            .map_err(|e| PaymentError::Persistence(e.to_string()))?;

        Ok(())
    }

    async fn list_by_tenant(&self, tenant_id: &str, limit: usize) -> Result<Vec<Transaction>> {
        let cf = self.cf()?;

        let mut matching = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) =
                item.map_err(|e| PaymentError::Persistence(format!("iteration error: {e}")))?;
            let transaction: Transaction = serde_json::from_slice(&value).map_err(|e| {
                PaymentError::Persistence(format!("failed to deserialize transaction: {e}"))
            })?;
            if transaction.tenant_id == tenant_id {
                matching.push(transaction);
            }
        }

        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching.truncate(limit);
        Ok(matching)
    }
}
