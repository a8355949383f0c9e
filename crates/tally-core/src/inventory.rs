use std::fmt;

use serde::{Deserialize, Serialize};

/// Broad category of an inventory item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Something you hit with.
    Weapon,
    /// Something you wear.
    Armor,
    /// A magic trinket.
    Magic,
    /// Used up when applied.
    Consumable,
    /// Crafting stock.
    Material,
    /// Anything else.
    Gear,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Weapon => "weapon",
            Self::Armor => "armor",
            Self::Magic => "magic",
            Self::Consumable => "consumable",
            Self::Material => "material",
            Self::Gear => "gear",
        };
        write!(f, "{s}")
    }
}

/// An item carried by the character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stable identifier within the inventory.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Item category.
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Damage formula for weapons, e.g. `"d10+3"`. Free text; may not parse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<String>,
    /// Armor granted while equipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub armor: Option<i32>,
    /// Whether the item is currently equipped.
    #[serde(default)]
    pub equipped: bool,
    /// Stack size for countable items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    /// Flavor text.
    #[serde(default)]
    pub description: String,
    /// Item tags such as `"messy"` or `"forceful"`.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Item {
    /// Create an unequipped item with no stats.
    pub fn new(id: u32, name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            damage: None,
            armor: None,
            equipped: false,
            quantity: None,
            description: String::new(),
            tags: Vec::new(),
        }
    }

    /// Set the damage formula.
    pub fn with_damage(mut self, formula: impl Into<String>) -> Self {
        self.damage = Some(formula.into());
        self
    }

    /// Set the armor value.
    pub fn with_armor(mut self, armor: i32) -> Self {
        self.armor = Some(armor);
        self
    }

    /// Set the stack size.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Mark the item as equipped.
    pub fn equipped(mut self) -> Self {
        self.equipped = true;
        self
    }
}
