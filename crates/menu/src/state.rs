use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use barkeep_core::{DomainError, DomainResult};

use crate::item::{MenuItem, MenuItemStatus, PrimarySpirit, sort_menu};

/// Immutable record of one published menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub version: u64,
    pub items: Vec<MenuItem>,
    pub updated_at: DateTime<Utc>,
}

/// Where an admin read was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuSource {
    Draft,
    Live,
}

/// A favorite recipe being promoted onto the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub favorite_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub primary_spirit: PrimarySpirit,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

/// Result of trying to add a recipe to the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddRecipeOutcome {
    /// The item went onto the draft (creating the draft if needed).
    Added(MenuItem),
    /// An item with the same id is already on the target list; nothing
    /// changed.
    AlreadyOnMenu,
}

/// Tenant-scoped menu state: the live menu, the optional working draft, and
/// the append-only snapshot log.
///
/// Snapshots are stored arena-style: `snapshots[i]` holds version `i + 1`, so
/// version monotonicity is a property of the layout rather than a runtime
/// check, and `live_version` always equals `snapshots.len()`. "No draft" and
/// "empty draft" are different states: the latter publishes an empty menu.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Menu {
    live: Vec<MenuItem>,
    live_version: u64,
    draft: Option<Vec<MenuItem>>,
    snapshots: Vec<Snapshot>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    /// The published menu guests see.
    pub fn live(&self) -> &[MenuItem] {
        &self.live
    }

    pub fn live_version(&self) -> u64 {
        self.live_version
    }

    pub fn draft(&self) -> Option<&[MenuItem]> {
        self.draft.as_deref()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Snapshots, most recent first.
    pub fn snapshots_desc(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter().rev()
    }

    /// Admin read: the draft when one exists, the live menu otherwise.
    pub fn admin_view(&self) -> (MenuSource, &[MenuItem]) {
        match &self.draft {
            Some(items) => (MenuSource::Draft, items),
            None => (MenuSource::Live, &self.live),
        }
    }

    /// Replace (or create) the working draft. The live menu is untouched.
    /// An empty list is a valid draft, distinct from having no draft at all.
    pub fn save_draft(&mut self, mut items: Vec<MenuItem>) {
        sort_menu(&mut items);
        self.draft = Some(items);
    }

    /// Drop the working draft. No-op when there is none.
    pub fn discard_draft(&mut self) {
        self.draft = None;
    }

    /// Publish a new live menu.
    ///
    /// `expected_live_version` is the optimistic concurrency check: the
    /// caller names the live version its edits were based on, and a mismatch
    /// leaves the whole state untouched.
    pub fn publish(
        &mut self,
        items: Vec<MenuItem>,
        expected_live_version: u64,
        now: DateTime<Utc>,
    ) -> DomainResult<u64> {
        if expected_live_version != self.live_version {
            return Err(DomainError::conflict(format!(
                "live menu is at version {}, publish expected {expected_live_version}",
                self.live_version
            )));
        }
        let mut items = items;
        sort_menu(&mut items);
        self.live_version += 1;
        self.live = items;
        self.draft = None;
        self.snapshots.push(Snapshot {
            version: self.live_version,
            items: self.live.clone(),
            updated_at: now,
        });
        Ok(self.live_version)
    }

    /// Restore a previously published menu.
    ///
    /// The restored items are copied from the snapshot verbatim and
    /// republished under a new version; history is append-only and never
    /// rewound.
    pub fn rollback(&mut self, target_version: u64, now: DateTime<Utc>) -> DomainResult<u64> {
        let restored = self
            .snapshot_at(target_version)
            .ok_or(DomainError::NotFound)?
            .items
            .clone();
        self.live_version += 1;
        self.live = restored;
        self.draft = None;
        self.snapshots.push(Snapshot {
            version: self.live_version,
            items: self.live.clone(),
            updated_at: now,
        });
        Ok(self.live_version)
    }

    /// Add a recipe to the working list.
    ///
    /// The target is the draft when one exists, otherwise the live menu
    /// promoted to a new draft. A duplicate id leaves the state untouched; in
    /// particular a failed add never creates a draft as a side effect.
    pub fn add_recipe(&mut self, recipe: Recipe, status: MenuItemStatus) -> AddRecipeOutcome {
        let id = MenuItem::derive_id(&recipe.favorite_id);
        let target = self.draft.as_deref().unwrap_or(&self.live);
        if target.iter().any(|item| item.id == id) {
            return AddRecipeOutcome::AlreadyOnMenu;
        }

        let item = MenuItem {
            id,
            favorite_id: recipe.favorite_id,
            name: recipe.name,
            description: recipe.description,
            primary_spirit: recipe.primary_spirit,
            tags: recipe.tags,
            status,
            version: 1,
        };

        let mut items = self.draft.take().unwrap_or_else(|| self.live.clone());
        items.push(item.clone());
        sort_menu(&mut items);
        self.draft = Some(items);

        AddRecipeOutcome::Added(item)
    }

    /// Snapshot lookup via the arena layout: version `v` lives at index
    /// `v - 1`. The stored version is cross-checked so a corrupted document
    /// reads as "not found" rather than restoring the wrong menu.
    fn snapshot_at(&self, version: u64) -> Option<&Snapshot> {
        if version == 0 {
            return None;
        }
        let index = usize::try_from(version - 1).ok()?;
        self.snapshots.get(index).filter(|s| s.version == version)
    }
}
