//! Process configuration from the environment.

use barkeep_core::TenantId;
use uuid::Uuid;

/// Everything the server needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Socket address to bind.
    pub addr: String,
    /// Shared-secret PIN for write-protected endpoints.
    pub admin_pin: String,
    /// Anthropic API key; when empty, AI endpoints answer with a generic
    /// failure instead of reaching upstream.
    pub anthropic_api_key: String,
    /// Completion model identifier.
    pub model: String,
    /// Tenant served by this deployment.
    pub tenant_id: TenantId,
}

impl Config {
    /// Read configuration from the environment, warning on insecure defaults.
    pub fn from_env() -> Self {
        let admin_pin = std::env::var("BARKEEP_ADMIN_PIN").unwrap_or_else(|_| {
            tracing::warn!("BARKEEP_ADMIN_PIN not set; using insecure dev default");
            "1234".to_string()
        });

        let anthropic_api_key = std::env::var("ANTHROPIC_API_KEY").unwrap_or_else(|_| {
            tracing::warn!("ANTHROPIC_API_KEY not set; chat and enrichment will be unavailable");
            String::new()
        });

        let model =
            std::env::var("BARKEEP_MODEL").unwrap_or_else(|_| barkeep_ai::DEFAULT_MODEL.to_string());

        let addr = std::env::var("BARKEEP_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        // Single-tenant deployments leave this unset and land on the nil id.
        let tenant_id = std::env::var("BARKEEP_TENANT_ID")
            .ok()
            .and_then(|raw| raw.parse::<Uuid>().ok())
            .map(TenantId::from_uuid)
            .unwrap_or_else(|| TenantId::from_uuid(Uuid::nil()));

        Self {
            addr,
            admin_pin,
            anthropic_api_key,
            model,
            tenant_id,
        }
    }
}
