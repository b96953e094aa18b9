//! Guest chat: one completion per message, reconciled before the reply goes
//! back out.

use barkeep_inventory::{InventoryItem, reconcile};
use tracing::debug;

use crate::client::{ChatTurn, CompletionClient, CompletionRequest};
use crate::error::AiResult;
use crate::prompt::{bounded_history, system_prompt};

const CHAT_MAX_TOKENS: u32 = 1024;

/// What a chat exchange hands back to the HTTP layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatOutcome {
    pub response_text: String,
    /// Present only when the reply carried a directive that changed amounts.
    /// The caller is responsible for persisting it.
    pub updated_inventory: Option<Vec<InventoryItem>>,
}

/// Drives chat exchanges against a completion backend.
pub struct ChatService<C> {
    client: C,
}

impl<C: CompletionClient> ChatService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Send `message` upstream with the bounded history and current stock as
    /// context, then reconcile the reply against the inventory.
    ///
    /// Nothing is mutated on the failure path; the error carries upstream
    /// detail for the server log only.
    pub async fn chat(
        &self,
        message: &str,
        inventory: &[InventoryItem],
        history: &[ChatTurn],
    ) -> AiResult<ChatOutcome> {
        let mut messages = bounded_history(history).to_vec();
        messages.push(ChatTurn::user(message));

        let request = CompletionRequest::new(messages)
            .with_system(system_prompt(inventory))
            .with_max_tokens(CHAT_MAX_TOKENS);

        let reply = self.client.complete(request).await?;
        let reconciled = reconcile(&reply, inventory);
        debug!(
            deducted = reconciled.updated_inventory.is_some(),
            "chat reply reconciled against inventory"
        );

        Ok(ChatOutcome {
            response_text: reconciled.visible_text,
            updated_inventory: reconciled.updated_inventory,
        })
    }
}
