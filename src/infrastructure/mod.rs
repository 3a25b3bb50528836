//! Infrastructure adapters behind the domain ports, plus the credential
//! vault leaf.

pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
pub mod simulator;
pub mod vault;
