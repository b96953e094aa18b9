//! Menu domain module.
//!
//! Cocktail menu items plus the draft/live/snapshot lifecycle that governs
//! what guests see. Pure domain logic; persistence lives in `barkeep-infra`.

pub mod item;
pub mod state;

pub use item::{MenuItem, MenuItemStatus, PrimarySpirit, sort_menu};
pub use state::{AddRecipeOutcome, Menu, MenuSource, Recipe, Snapshot};
