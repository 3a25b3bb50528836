//! Domain layer: value objects, the transaction audit record, and the ports
//! the orchestrator depends on.

pub mod payment;
pub mod ports;
pub mod secret;
pub mod tenant;
pub mod transaction;
