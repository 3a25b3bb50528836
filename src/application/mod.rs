//! Application layer containing the core failover logic.
//!
//! This module defines the `PaymentOrchestrator`, which routes one payment
//! request through a tenant's ordered processor list and commits a single
//! audit record once a terminal state is reached.

pub mod orchestrator;
