use async_trait::async_trait;
use payment_cascade::application::orchestrator::PaymentOrchestrator;
use payment_cascade::domain::payment::{Amount, PaymentRequest};
use payment_cascade::domain::ports::ProcessorGateway;
use payment_cascade::domain::secret::Secret;
use payment_cascade::domain::tenant::{ProcessorConfig, TenantConfig};
use payment_cascade::error::Result;
use payment_cascade::infrastructure::in_memory::{InMemoryLedger, InMemoryTenantDirectory};
use payment_cascade::infrastructure::simulator::SimulatedGateway;
use payment_cascade::infrastructure::vault::CredentialVault;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tokio::sync::Mutex;

pub fn test_vault() -> CredentialVault {
    CredentialVault::from_passphrase("test-passphrase")
}

pub fn payment_request() -> PaymentRequest {
    PaymentRequest {
        amount: Amount::new(dec!(42.50)).unwrap(),
        currency: "USD".to_string(),
        source: "tok_visa".to_string(),
    }
}

pub fn processor(vault: &CredentialVault, name: &str, active: bool) -> ProcessorConfig {
    ProcessorConfig {
        name: name.to_string(),
        api_key: vault.encrypt(&format!("{name}-key")).unwrap(),
        api_secret: vault.encrypt(&format!("{name}-secret")).unwrap(),
        active,
    }
}

pub fn tenant(
    vault: &CredentialVault,
    tenant_id: &str,
    preferred: &str,
    processors: &[(&str, bool)],
) -> TenantConfig {
    TenantConfig {
        tenant_id: tenant_id.to_string(),
        preferred_processor: preferred.to_string(),
        processors: processors
            .iter()
            .map(|(name, active)| processor(vault, name, *active))
            .collect(),
    }
}

/// Gateway wrapper that records, in order, each processor called together
/// with the plaintext API key it was handed.
pub struct RecordingGateway {
    inner: SimulatedGateway,
    pub calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingGateway {
    pub fn new(inner: SimulatedGateway) -> Self {
        Self {
            inner,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl ProcessorGateway for RecordingGateway {
    async fn attempt(
        &self,
        processor: &str,
        api_key: &Secret,
        api_secret: &Secret,
        request: &PaymentRequest,
    ) -> Result<serde_json::Value> {
        self.calls
            .lock()
            .await
            .push((processor.to_string(), api_key.reveal().to_string()));
        self.inner
            .attempt(processor, api_key, api_secret, request)
            .await
    }
}

pub struct Harness {
    pub orchestrator: PaymentOrchestrator,
    pub ledger: InMemoryLedger,
    pub calls: Arc<Mutex<Vec<(String, String)>>>,
}

/// Wires an orchestrator against in-memory fakes, keeping handles to the
/// ledger and the recorded gateway calls for assertions.
pub async fn harness(
    vault: CredentialVault,
    tenants: Vec<TenantConfig>,
    gateway: SimulatedGateway,
) -> Harness {
    let directory = InMemoryTenantDirectory::new();
    for t in tenants {
        directory.insert(t).await;
    }
    let ledger = InMemoryLedger::new();
    let recording = RecordingGateway::new(gateway);
    let calls = recording.calls.clone();
    let orchestrator = PaymentOrchestrator::new(
        Box::new(directory),
        Box::new(recording),
        Box::new(ledger.clone()),
        vault,
    );
    Harness {
        orchestrator,
        ledger,
        calls,
    }
}
