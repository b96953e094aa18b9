use serde::{Deserialize, Deserializer, Serialize};

/// Spirit families, declared in the order they appear on the printed menu.
///
/// `sort_index` leans on that declaration order, so reordering variants
/// reorders every menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimarySpirit {
    Vodka,
    Gin,
    Rum,
    Tequila,
    Whiskey,
    Brandy,
    Liqueur,
    Wine,
    Beer,
    Mixer,
    Other,
}

impl PrimarySpirit {
    /// Parse a wire value. Anything unrecognized lands in `Other`, so menus
    /// saved by older UI builds still load and sort.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "vodka" => Self::Vodka,
            "gin" => Self::Gin,
            "rum" => Self::Rum,
            "tequila" => Self::Tequila,
            "whiskey" => Self::Whiskey,
            "brandy" => Self::Brandy,
            "liqueur" => Self::Liqueur,
            "wine" => Self::Wine,
            "beer" => Self::Beer,
            "mixer" => Self::Mixer,
            _ => Self::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vodka => "vodka",
            Self::Gin => "gin",
            Self::Rum => "rum",
            Self::Tequila => "tequila",
            Self::Whiskey => "whiskey",
            Self::Brandy => "brandy",
            Self::Liqueur => "liqueur",
            Self::Wine => "wine",
            Self::Beer => "beer",
            Self::Mixer => "mixer",
            Self::Other => "other",
        }
    }

    /// Position in the canonical menu ordering.
    pub fn sort_index(self) -> usize {
        self as usize
    }
}

impl<'de> Deserialize<'de> for PrimarySpirit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Whether guests can currently order an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuItemStatus {
    Active,
    TemporarilyUnavailable,
    Retired,
}

/// One cocktail on the menu.
///
/// `id` is derived from the favorite the item was added from and is unique
/// within a menu. `version` is carried as provided; newly added recipes start
/// at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub favorite_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub primary_spirit: PrimarySpirit,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: MenuItemStatus,
    pub version: u64,
}

impl MenuItem {
    /// Menu ids are derived from the favorite they were added from.
    pub fn derive_id(favorite_id: &str) -> String {
        format!("menu-{favorite_id}")
    }
}

/// Sort items into the canonical menu order: spirit family first, then name
/// (case-insensitive). The sort is stable, so ties keep their existing
/// relative order.
pub fn sort_menu(items: &mut [MenuItem]) {
    items.sort_by(|a, b| {
        a.primary_spirit
            .sort_index()
            .cmp(&b.primary_spirit.sort_index())
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
}
