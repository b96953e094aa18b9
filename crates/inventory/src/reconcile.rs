//! Reconciliation of assistant replies against the bottle inventory.
//!
//! The assistant flags confirmed consumption by embedding a directive in its
//! reply: the reserved marker token followed by a JSON object listing
//! deductions. Reconciliation strips the directive from the visible text and
//! applies the deductions to the matching bottles. Every failure mode is
//! recovered by returning the reply text verbatim and leaving the inventory
//! untouched; a broken directive must never block the reply.

use serde::Deserialize;
use tracing::warn;

use crate::item::{InventoryItem, format_amount};

/// Reserved token the assistant emits ahead of a structured update.
pub const UPDATE_MARKER: &str = "[INVENTORY_UPDATE]";

/// One deduction inside a directive.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InventoryUpdate {
    pub name: String,
    pub subtract: f64,
}

#[derive(Debug, Deserialize)]
struct UpdateDirective {
    updates: Vec<InventoryUpdate>,
}

/// Outcome of reconciling one assistant reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// Reply text with the directive stripped, or the original text verbatim
    /// when there was no (usable) directive.
    pub visible_text: String,
    /// Inventory with deductions applied. `None` means no stored amount
    /// changed and nothing needs to be persisted.
    pub updated_inventory: Option<Vec<InventoryItem>>,
}

impl Reconciliation {
    fn unchanged(text: &str) -> Self {
        Self {
            visible_text: text.to_string(),
            updated_inventory: None,
        }
    }
}

/// Apply the update directive embedded in `response_text` (if any) to
/// `inventory`.
///
/// Everything from the marker through the end of the directive object is
/// removed from the visible text; the surrounding text is kept byte for byte.
pub fn reconcile(response_text: &str, inventory: &[InventoryItem]) -> Reconciliation {
    let Some(marker_at) = response_text.find(UPDATE_MARKER) else {
        return Reconciliation::unchanged(response_text);
    };

    let scan_from = marker_at + UPDATE_MARKER.len();
    let Some(object) = json_object_span(response_text, scan_from) else {
        warn!("update marker present but no balanced directive object follows");
        return Reconciliation::unchanged(response_text);
    };

    let directive: UpdateDirective = match serde_json::from_str(&response_text[object.clone()]) {
        Ok(directive) => directive,
        Err(error) => {
            warn!(%error, "discarding malformed inventory update directive");
            return Reconciliation::unchanged(response_text);
        }
    };

    let visible_text = format!(
        "{}{}",
        &response_text[..marker_at],
        &response_text[object.end..]
    );

    let (updated_inventory, changed) = apply_updates(inventory, &directive.updates);

    Reconciliation {
        visible_text,
        updated_inventory: changed.then_some(updated_inventory),
    }
}

/// Byte range of the JSON object starting at the first `{` at or after
/// `from`.
///
/// Tracks brace depth together with JSON string and escape state, so braces
/// inside string values do not close the object early. Returns `None` when no
/// `{` follows or the object never balances.
fn json_object_span(text: &str, from: usize) -> Option<std::ops::Range<usize>> {
    let start = from + text[from..].find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(start..start + offset + ch.len_utf8());
                }
            }
            _ => {}
        }
    }
    None
}

fn apply_updates(
    inventory: &[InventoryItem],
    updates: &[InventoryUpdate],
) -> (Vec<InventoryItem>, bool) {
    let mut changed = false;
    let updated = inventory
        .iter()
        .map(|item| {
            let Some(update) = first_match(&item.name, updates) else {
                return item.clone();
            };
            if update.subtract <= 0.0 {
                return item.clone();
            }
            let Some(current) = item.amount() else {
                warn!(
                    item = %item.name,
                    raw = %item.amount_remaining,
                    "skipping deduction for unparsable amount"
                );
                return item.clone();
            };
            let next = format_amount((current - update.subtract).max(0.0));
            if next == item.amount_remaining {
                return item.clone();
            }
            changed = true;
            let mut deducted = item.clone();
            deducted.amount_remaining = next;
            deducted
        })
        .collect();
    (updated, changed)
}

/// First update whose name fuzzily matches the item, in directive order.
///
/// Matching is case-insensitive substring containment in either direction, so
/// a directive naming "Whiskey" reaches the "Bourbon Whiskey" bottle and one
/// naming "Bourbon Whiskey 750ml" still reaches "Bourbon Whiskey". Blank
/// names never match.
fn first_match<'a>(item_name: &str, updates: &'a [InventoryUpdate]) -> Option<&'a InventoryUpdate> {
    let item = item_name.trim().to_lowercase();
    if item.is_empty() {
        return None;
    }
    updates.iter().find(|update| {
        let name = update.name.trim().to_lowercase();
        !name.is_empty() && (item.contains(&name) || name.contains(&item))
    })
}
