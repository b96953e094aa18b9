use serde::{Deserialize, Serialize};

/// One stock line behind the bar (usually a bottle).
///
/// Every field is a string on the wire: the records originate from a
/// spreadsheet export and round-trip through the UI untyped. `amount_remaining`
/// holds a numeric string and is the only field reconciliation rewrites; it
/// never goes negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub proof: String,
    #[serde(default)]
    pub bottle_size_ml: String,
    pub amount_remaining: String,
    #[serde(default)]
    pub flavor_notes: String,
}

impl InventoryItem {
    /// Remaining amount as a number, or `None` when the stored string does
    /// not parse.
    pub fn amount(&self) -> Option<f64> {
        parse_amount(&self.amount_remaining)
    }
}

/// Parse a stored amount string.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Format a quantity back into the stored string shape.
///
/// Integral values drop the decimal point ("690", not "690.0") so stored
/// strings keep the shape the spreadsheet import produced.
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// True when `ingredient` is stocked: some inventory item's name contains the
/// ingredient (case-insensitive) and that item has a positive amount left.
pub fn ingredient_in_stock(ingredient: &str, inventory: &[InventoryItem]) -> bool {
    let needle = ingredient.trim().to_lowercase();
    if needle.is_empty() {
        return false;
    }
    inventory.iter().any(|item| {
        item.name.to_lowercase().contains(&needle)
            && item.amount().is_some_and(|amount| amount > 0.0)
    })
}

/// True when every ingredient of a recipe is stocked.
pub fn all_ingredients_in_stock(ingredients: &[String], inventory: &[InventoryItem]) -> bool {
    ingredients
        .iter()
        .all(|ingredient| ingredient_in_stock(ingredient, inventory))
}
