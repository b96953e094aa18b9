use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use barkeep_ai::ChatTurn;
use barkeep_inventory::InventoryItem;
use barkeep_menu::{MenuItem, Snapshot};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct InventoryUpload {
    pub inventory: Vec<InventoryItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
    #[serde(default)]
    pub chat_history: Vec<ChatTurn>,
}

#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Deserialize)]
pub struct PublishRequest {
    pub items: Vec<MenuItem>,
    /// Live version the editor believes is current.
    pub version: u64,
}

// -------------------------
// Response DTOs
// -------------------------

/// Snapshot listing entry; item contents stay server-side.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotSummary {
    pub version: u64,
    pub updated_at: DateTime<Utc>,
}

impl From<&Snapshot> for SnapshotSummary {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            version: snapshot.version,
            updated_at: snapshot.updated_at,
        }
    }
}
