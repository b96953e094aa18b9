//! Bottle inventory rules: the stock record itself, the reply reconciler
//! that applies confirmed pours, and the availability checks the menu uses.
//! Everything is a pure function over owned data; no IO happens here.

pub mod item;
pub mod reconcile;

pub use item::{InventoryItem, all_ingredients_in_stock, ingredient_in_stock};
pub use reconcile::{InventoryUpdate, Reconciliation, UPDATE_MARKER, reconcile};
