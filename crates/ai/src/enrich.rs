//! Flavor-note enrichment for inventory records.

use barkeep_inventory::InventoryItem;
use futures_util::future::join_all;
use tracing::warn;

use crate::client::{ChatTurn, CompletionClient, CompletionRequest};
use crate::error::AiResult;

/// Most items enriched per call; the admin screen invokes this repeatedly to
/// work through a large inventory.
pub const ENRICH_BATCH_LIMIT: usize = 5;

const ENRICH_MAX_TOKENS: u32 = 200;

/// Fills empty `flavorNotes` fields from the completion backend.
pub struct FlavorNoteEnricher<C> {
    client: C,
}

impl<C: CompletionClient> FlavorNoteEnricher<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Describe up to [`ENRICH_BATCH_LIMIT`] items whose notes are empty.
    ///
    /// Lookups run concurrently. A failed lookup leaves that item untouched
    /// and never aborts the rest of the batch. Nothing is persisted here; the
    /// full list comes back for the caller to save.
    pub async fn enrich(&self, mut inventory: Vec<InventoryItem>) -> Vec<InventoryItem> {
        let targets: Vec<usize> = inventory
            .iter()
            .enumerate()
            .filter(|(_, item)| item.flavor_notes.trim().is_empty())
            .map(|(index, _)| index)
            .take(ENRICH_BATCH_LIMIT)
            .collect();

        let described: Vec<(usize, AiResult<String>)> = join_all(targets.iter().map(|&index| {
            let item = &inventory[index];
            async move { (index, self.describe(item).await) }
        }))
        .await;

        for (index, notes) in described {
            match notes {
                Ok(notes) => inventory[index].flavor_notes = notes,
                Err(error) => warn!(
                    item = %inventory[index].name,
                    %error,
                    "flavor note lookup failed; leaving item untouched"
                ),
            }
        }
        inventory
    }

    async fn describe(&self, item: &InventoryItem) -> AiResult<String> {
        let ask = format!(
            "Describe the flavor profile of {name} ({kind}) in one short phrase \
suitable for a cocktail menu. Reply with the phrase only.",
            name = item.name,
            kind = item.kind,
        );
        let request = CompletionRequest::new(vec![ChatTurn::user(ask)])
            .with_system("You are a beverage writer. Answer in a single concise phrase.")
            .with_max_tokens(ENRICH_MAX_TOKENS);

        let text = self.client.complete(request).await?;
        Ok(text.trim().to_string())
    }
}
