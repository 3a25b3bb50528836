use clap::Parser;
use miette::{IntoDiagnostic, Result};
use payment_cascade::application::orchestrator::PaymentOrchestrator;
use payment_cascade::domain::payment::PaymentRequest;
use payment_cascade::domain::ports::{ProcessorGatewayBox, TransactionLedgerBox};
use payment_cascade::domain::tenant::{ProcessorConfig, TenantConfig};
use payment_cascade::infrastructure::in_memory::{InMemoryLedger, InMemoryTenantDirectory};
use payment_cascade::infrastructure::simulator::SimulatedGateway;
use payment_cascade::infrastructure::vault::CredentialVault;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Tenant seed file (JSON, with plaintext processor credentials)
    tenants: PathBuf,

    /// Payment request JSON file
    request: PathBuf,

    /// Tenant to charge
    #[arg(long)]
    tenant: String,

    /// Passphrase the vault key is derived from
    #[arg(long, default_value = "dev-vault-passphrase")]
    vault_passphrase: String,

    /// Probability that an unscripted processor rejects the charge
    #[arg(long, default_value_t = 0.5)]
    failure_rate: f64,

    /// Path to persistent ledger (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

/// Seed-file shape: credentials arrive in plaintext and are encrypted
/// through the vault before they reach the tenant directory.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProcessorSeed {
    name: String,
    api_key: String,
    api_secret: String,
    #[serde(default = "enabled")]
    is_active: bool,
}

fn enabled() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TenantSeed {
    tenant_id: String,
    preferred_processor: String,
    processors: Vec<ProcessorSeed>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let vault = CredentialVault::from_passphrase(&cli.vault_passphrase);
    let ledger = open_ledger(cli.db_path)?;

    let tenants = InMemoryTenantDirectory::new();
    let seed_file = std::fs::read_to_string(&cli.tenants).into_diagnostic()?;
    let seeds: Vec<TenantSeed> = serde_json::from_str(&seed_file).into_diagnostic()?;
    for seed in seeds {
        tenants.insert(seed_tenant(&vault, seed).into_diagnostic()?).await;
    }

    let request_file = std::fs::read_to_string(&cli.request).into_diagnostic()?;
    let request: PaymentRequest = serde_json::from_str(&request_file).into_diagnostic()?;

    let gateway: ProcessorGatewayBox = Box::new(SimulatedGateway::new(cli.failure_rate));
    let orchestrator = PaymentOrchestrator::new(Box::new(tenants), gateway, ledger, vault);

    match orchestrator.process_payment(&cli.tenant, request).await {
        Ok(response) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&response).into_diagnostic()?
            );
        }
        Err(e) => eprintln!("payment failed: {e}"),
    }

    let history = orchestrator
        .tenant_transactions(&cli.tenant)
        .await
        .into_diagnostic()?;
    println!(
        "{}",
        serde_json::to_string_pretty(&history).into_diagnostic()?
    );

    Ok(())
}

fn seed_tenant(
    vault: &CredentialVault,
    seed: TenantSeed,
) -> payment_cascade::error::Result<TenantConfig> {
    let mut processors = Vec::with_capacity(seed.processors.len());
    for p in seed.processors {
        processors.push(ProcessorConfig {
            name: p.name,
            api_key: vault.encrypt(&p.api_key)?,
            api_secret: vault.encrypt(&p.api_secret)?,
            active: p.is_active,
        });
    }
    Ok(TenantConfig {
        tenant_id: seed.tenant_id,
        preferred_processor: seed.preferred_processor,
        processors,
    })
}

fn open_ledger(db_path: Option<PathBuf>) -> Result<TransactionLedgerBox> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            let ledger =
                payment_cascade::infrastructure::rocksdb::RocksDbLedger::open(path)
                    .into_diagnostic()?;
            Ok(Box::new(ledger))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            eprintln!(
                "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
            );
            Ok(Box::new(InMemoryLedger::new()))
        }
        None => Ok(Box::new(InMemoryLedger::new())),
    }
}
