use crate::domain::secret::EncryptedSecret;
use serde::{Deserialize, Serialize};

/// One processor entry in a tenant's configuration. Credentials are stored
/// encrypted; only the vault can recover the plaintext.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessorConfig {
    pub name: String,
    pub api_key: EncryptedSecret,
    pub api_secret: EncryptedSecret,
    #[serde(rename = "isActive", default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// A tenant's processor configuration. Read-only to the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantConfig {
    pub tenant_id: String,
    pub preferred_processor: String,
    pub processors: Vec<ProcessorConfig>,
}

impl TenantConfig {
    /// The order in which processors are attempted: the preferred processor
    /// first, if it is configured and active, then the remaining active
    /// processors in configured order. The preferred processor never appears
    /// twice; an inactive or unknown preferred processor is skipped.
    pub fn attempt_order(&self) -> Vec<&ProcessorConfig> {
        let mut order = Vec::with_capacity(self.processors.len());
        if let Some(preferred) = self
            .processors
            .iter()
            .find(|p| p.name == self.preferred_processor && p.active)
        {
            order.push(preferred);
        }
        order.extend(
            self.processors
                .iter()
                .filter(|p| p.active && p.name != self.preferred_processor),
        );
        order
    }
}
