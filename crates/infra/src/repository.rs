//! Typed repositories over the key-value store.
//!
//! One key per tenant per concern. Reads of a never-written key produce the
//! empty starting state rather than an error, so a fresh deployment works
//! without seeding.

use barkeep_core::TenantId;
use barkeep_inventory::InventoryItem;
use barkeep_menu::Menu;
use tracing::debug;

use crate::kv::{KvError, KvStore};

/// Inventory records, stored whole under `inventory:{tenant}`.
pub struct InventoryRepository<S> {
    store: S,
}

impl<S: KvStore> InventoryRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn key(tenant_id: TenantId) -> String {
        format!("inventory:{tenant_id}")
    }

    pub async fn load(&self, tenant_id: TenantId) -> Result<Vec<InventoryItem>, KvError> {
        let key = Self::key(tenant_id);
        match self.store.get(&key).await? {
            Some(value) => {
                serde_json::from_value(value).map_err(|source| KvError::Decode { key, source })
            }
            None => Ok(Vec::new()),
        }
    }

    pub async fn save(
        &self,
        tenant_id: TenantId,
        inventory: &[InventoryItem],
    ) -> Result<(), KvError> {
        let key = Self::key(tenant_id);
        let value = serde_json::to_value(inventory).map_err(|source| KvError::Encode {
            key: key.clone(),
            source,
        })?;
        self.store.put(&key, value).await?;
        debug!(%key, items = inventory.len(), "inventory saved");
        Ok(())
    }
}

/// Menu lifecycle state, stored whole under `menu:{tenant}`.
pub struct MenuRepository<S> {
    store: S,
}

impl<S: KvStore> MenuRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn key(tenant_id: TenantId) -> String {
        format!("menu:{tenant_id}")
    }

    pub async fn load(&self, tenant_id: TenantId) -> Result<Menu, KvError> {
        let key = Self::key(tenant_id);
        match self.store.get(&key).await? {
            Some(value) => {
                serde_json::from_value(value).map_err(|source| KvError::Decode { key, source })
            }
            None => Ok(Menu::new()),
        }
    }

    pub async fn save(&self, tenant_id: TenantId, menu: &Menu) -> Result<(), KvError> {
        let key = Self::key(tenant_id);
        let value = serde_json::to_value(menu).map_err(|source| KvError::Encode {
            key: key.clone(),
            source,
        })?;
        self.store.put(&key, value).await?;
        debug!(%key, live_version = menu.live_version(), "menu saved");
        Ok(())
    }
}
