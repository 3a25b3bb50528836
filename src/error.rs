use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaymentError>;

/// Error taxonomy for the payment core.
///
/// Only `TenantNotFound`, `AllProcessorsFailed` and `Persistence` escape a
/// `process_payment` call; `Gateway` and `Decryption` failures are absorbed
/// into the transaction's attempt history.
#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("tenant configuration not found: {0}")]
    TenantNotFound(String),
    #[error("all payment processors failed. Last error: {last_error}")]
    AllProcessorsFailed { last_error: String },
    #[error("credential decryption failed: {0}")]
    Decryption(String),
    #[error("{message}")]
    Gateway { processor: String, message: String },
    #[error("ledger write failed: {0}")]
    Persistence(String),
    #[error("validation error: {0}")]
    Validation(String),
}
