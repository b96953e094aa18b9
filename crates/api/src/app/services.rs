//! Repository and AI wiring shared by handlers.

use std::sync::Arc;

use barkeep_ai::{AnthropicClient, ChatService, CompletionClient, FlavorNoteEnricher};
use barkeep_core::TenantId;
use barkeep_infra::{InMemoryKvStore, InventoryRepository, KvStore, MenuRepository};

use crate::config::Config;

/// Shared handler state: one tenant, one store, one completion backend.
pub struct AppServices {
    tenant_id: TenantId,
    admin_pin: String,
    inventory: InventoryRepository<Arc<dyn KvStore>>,
    menu: MenuRepository<Arc<dyn KvStore>>,
    chat: ChatService<Arc<dyn CompletionClient>>,
    enricher: FlavorNoteEnricher<Arc<dyn CompletionClient>>,
}

impl AppServices {
    /// Production wiring from configuration.
    pub fn from_config(config: &Config) -> Self {
        let store: Arc<dyn KvStore> = InMemoryKvStore::arc();
        let client: Arc<dyn CompletionClient> = Arc::new(AnthropicClient::new(
            config.anthropic_api_key.clone(),
            config.model.clone(),
        ));
        Self::new(config.tenant_id, config.admin_pin.clone(), store, client)
    }

    /// Explicit wiring; tests inject scripted clients and stores here.
    pub fn new(
        tenant_id: TenantId,
        admin_pin: String,
        store: Arc<dyn KvStore>,
        client: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            tenant_id,
            admin_pin,
            inventory: InventoryRepository::new(store.clone()),
            menu: MenuRepository::new(store),
            chat: ChatService::new(client.clone()),
            enricher: FlavorNoteEnricher::new(client),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    pub fn admin_pin(&self) -> &str {
        &self.admin_pin
    }

    pub fn inventory(&self) -> &InventoryRepository<Arc<dyn KvStore>> {
        &self.inventory
    }

    pub fn menu(&self) -> &MenuRepository<Arc<dyn KvStore>> {
        &self.menu
    }

    pub fn chat(&self) -> &ChatService<Arc<dyn CompletionClient>> {
        &self.chat
    }

    pub fn enricher(&self) -> &FlavorNoteEnricher<Arc<dyn CompletionClient>> {
        &self.enricher
    }
}
