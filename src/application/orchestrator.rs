use crate::domain::payment::{PaymentRequest, PaymentResponse};
use crate::domain::ports::{
    DEFAULT_TRANSACTION_LIMIT, ProcessorGatewayBox, TenantDirectoryBox, TransactionLedgerBox,
};
use crate::domain::tenant::ProcessorConfig;
use crate::domain::transaction::{PaymentStatus, ProcessorAttempt, Transaction};
use crate::error::{PaymentError, Result};
use crate::infrastructure::vault::CredentialVault;
use chrono::Utc;
use log::{debug, warn};
use uuid::Uuid;

/// The main entry point for routing payments.
///
/// `PaymentOrchestrator` drives sequential attempts through the processor
/// gateway, buffering the attempt history in memory, and flushes exactly one
/// ledger upsert per call once a terminal state is known. Collaborators are
/// injected at construction so fakes can be substituted in tests.
pub struct PaymentOrchestrator {
    tenants: TenantDirectoryBox,
    gateway: ProcessorGatewayBox,
    ledger: TransactionLedgerBox,
    vault: CredentialVault,
}

impl PaymentOrchestrator {
    pub fn new(
        tenants: TenantDirectoryBox,
        gateway: ProcessorGatewayBox,
        ledger: TransactionLedgerBox,
        vault: CredentialVault,
    ) -> Self {
        Self {
            tenants,
            gateway,
            ledger,
            vault,
        }
    }

    /// Routes one payment request through the tenant's processors.
    ///
    /// Attempts are strictly sequential: the first success short-circuits
    /// all later processors, so no charge is ever in flight on two
    /// processors at once. Every call is a new logical payment with a fresh
    /// transaction id, even for an identical request body.
    pub async fn process_payment(
        &self,
        tenant_id: &str,
        request: PaymentRequest,
    ) -> Result<PaymentResponse> {
        let tenant = self
            .tenants
            .tenant(tenant_id)
            .await?
            .ok_or_else(|| PaymentError::TenantNotFound(tenant_id.to_string()))?;

        let transaction_id = Uuid::new_v4();
        let order = tenant.attempt_order();
        let mut attempts: Vec<ProcessorAttempt> = Vec::with_capacity(order.len());
        let mut last_error: Option<String> = None;

        for processor in order {
            match self.try_processor(processor, &request).await {
                Ok(response) => {
                    attempts.push(ProcessorAttempt::completed(&processor.name, response));
                    let attempt_count = attempts.len();
                    let record = Transaction::record(
                        transaction_id,
                        tenant_id,
                        &request,
                        attempts,
                        PaymentStatus::Completed,
                    );
                    self.ledger.upsert(record).await?;
                    debug!(
                        "payment [{transaction_id}] completed via {} after {attempt_count} attempt(s)",
                        processor.name
                    );
                    return Ok(PaymentResponse {
                        success: true,
                        transaction_id,
                        processor: processor.name.clone(),
                        amount: request.amount,
                        currency: request.currency.clone(),
                        status: PaymentStatus::Completed,
                        timestamp: Utc::now(),
                    });
                }
                Err(e) => {
                    warn!(
                        "processor {} failed for payment [{transaction_id}]: {e}",
                        processor.name
                    );
                    attempts.push(ProcessorAttempt::failed(&processor.name, e.to_string()));
                    last_error = Some(e.to_string());
                }
            }
        }

        // Empty order or exhausted processors: persist the full history
        // before surfacing the failure.
        let record = Transaction::record(
            transaction_id,
            tenant_id,
            &request,
            attempts,
            PaymentStatus::Failed,
        );
        self.ledger.upsert(record).await?;
        let last_error =
            last_error.unwrap_or_else(|| "no active payment processors configured".to_string());
        debug!("payment [{transaction_id}] failed: {last_error}");
        Err(PaymentError::AllProcessorsFailed { last_error })
    }

    /// A tenant's recent transaction history, newest first, for the
    /// read-only reporting collaborator.
    pub async fn tenant_transactions(&self, tenant_id: &str) -> Result<Vec<Transaction>> {
        self.ledger
            .list_by_tenant(tenant_id, DEFAULT_TRANSACTION_LIMIT)
            .await
    }

    /// A decryption failure counts as that processor's failure; the gateway
    /// only ever sees plaintext secrets.
    async fn try_processor(
        &self,
        processor: &ProcessorConfig,
        request: &PaymentRequest,
    ) -> Result<serde_json::Value> {
        let api_key = self.vault.decrypt(&processor.api_key)?;
        let api_secret = self.vault.decrypt(&processor.api_secret)?;
        self.gateway
            .attempt(&processor.name, &api_key, &api_secret, request)
            .await
    }
}
