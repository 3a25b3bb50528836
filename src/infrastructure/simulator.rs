use crate::domain::payment::PaymentRequest;
use crate::domain::ports::ProcessorGateway;
use crate::domain::secret::Secret;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use rand::Rng;
use serde_json::json;
use std::collections::HashMap;

#[derive(Clone, Copy)]
enum Outcome {
    Succeed,
    Fail,
}

/// A configurable success/failure gateway.
///
/// Processors can be scripted with `succeeds`/`fails`; unscripted processors
/// succeed or fail at random with `failure_rate`. This stands in for real
/// processor integrations in the demo binary and in tests; the orchestrator
/// only sees the `ProcessorGateway` trait.
pub struct SimulatedGateway {
    outcomes: HashMap<String, Outcome>,
    failure_rate: f64,
}

impl SimulatedGateway {
    pub fn new(failure_rate: f64) -> Self {
        Self {
            outcomes: HashMap::new(),
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }

    /// A fully deterministic gateway: every processor fails unless scripted
    /// to succeed.
    pub fn scripted() -> Self {
        Self::new(1.0)
    }

    pub fn succeeds(mut self, processor: &str) -> Self {
        self.outcomes.insert(processor.to_string(), Outcome::Succeed);
        self
    }

    pub fn fails(mut self, processor: &str) -> Self {
        self.outcomes.insert(processor.to_string(), Outcome::Fail);
        self
    }
}

impl Default for SimulatedGateway {
    /// The historical mock behavior: unscripted processors fail half the
    /// time.
    fn default() -> Self {
        Self::new(0.5)
    }
}

#[async_trait]
impl ProcessorGateway for SimulatedGateway {
    async fn attempt(
        &self,
        processor: &str,
        _api_key: &Secret,
        _api_secret: &Secret,
        request: &PaymentRequest,
    ) -> Result<serde_json::Value> {
        let fail = match self.outcomes.get(processor) {
            Some(Outcome::Succeed) => false,
            Some(Outcome::Fail) => true,
            None => rand::thread_rng().gen_bool(self.failure_rate),
        };

        if fail {
            return Err(PaymentError::Gateway {
                processor: processor.to_string(),
                message: format!(
                    "payment processor {processor} failed to process the transaction"
                ),
            });
        }

        Ok(json!({
            "success": true,
            "processor": processor,
            "amount": request.amount,
            "currency": request.currency,
            "status": "completed",
        }))
    }
}
