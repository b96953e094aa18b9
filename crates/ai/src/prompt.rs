//! Bartender prompt assembly.

use barkeep_inventory::{InventoryItem, UPDATE_MARKER};

use crate::client::ChatTurn;

/// Turns of prior conversation kept when building a request.
pub const HISTORY_TURNS: usize = 6;

/// System prompt: persona, the current stock, and the update protocol.
pub fn system_prompt(inventory: &[InventoryItem]) -> String {
    format!(
        "You are an experienced bartender at a private home bar. You help guests pick \
drinks, walk them through recipes, and keep an eye on the stock listed below.\n\
\n\
CURRENT INVENTORY:\n\
{listing}\n\
\n\
HOUSE RULES:\n\
- Only suggest drinks you can actually make. Cross-reference the remaining amounts \
above before recommending anything.\n\
- After proposing a recipe, ask the guest to confirm before you make it.\n\
- When a guest confirms a drink, end your reply with the marker {marker} followed \
immediately by a JSON object of the form \
{{\"updates\":[{{\"name\":\"<ingredient name>\",\"subtract\":<milliliters used>}}]}} \
listing every ingredient consumed. Emit the marker only on confirmed consumption, \
never while still discussing options.\n\
- For batch or pitcher requests, scale every ingredient amount proportionally and \
reflect the scaled totals in the update object.\n\
- Keep replies warm and concise.",
        listing = inventory_listing(inventory),
        marker = UPDATE_MARKER,
    )
}

/// Render the stock for the prompt, one line per item.
pub fn inventory_listing(inventory: &[InventoryItem]) -> String {
    if inventory.is_empty() {
        return "No items in inventory.".to_string();
    }
    inventory
        .iter()
        .map(|item| {
            format!(
                "- {kind}: {name} | proof: {proof} | bottle: {bottle} ml | remaining: {remaining} ml | notes: {notes}",
                kind = item.kind,
                name = item.name,
                proof = item.proof,
                bottle = item.bottle_size_ml,
                remaining = item.amount_remaining,
                notes = item.flavor_notes,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The most recent [`HISTORY_TURNS`] turns, oldest first.
pub fn bounded_history(history: &[ChatTurn]) -> &[ChatTurn] {
    let start = history.len().saturating_sub(HISTORY_TURNS);
    &history[start..]
}
