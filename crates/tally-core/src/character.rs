use serde::{Deserialize, Serialize};

use crate::inventory::{Item, ItemKind};
use crate::stats::{Stat, Stats};
use crate::status::{Debility, StatusEffect};

/// Maximum number of Chrono-Retcon charges the ring holds.
pub const CHRONO_USES_MAX: u32 = 2;

/// Consumable resources and per-session counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resources {
    /// Chrono-Retcon charges (0 to [`CHRONO_USES_MAX`]).
    pub chrono_uses: u32,
    /// Paradox points (0-3; 3 means reality is unstable).
    pub paradox_points: u32,
    /// Bandages; each heals 4 HP slowly.
    pub bandages: u32,
    /// Rations.
    pub rations: u32,
    /// Adventuring gear uses.
    #[serde(rename = "advGear")]
    pub adventuring_gear: u32,
}

impl Default for Resources {
    fn default() -> Self {
        Self {
            chrono_uses: CHRONO_USES_MAX,
            paradox_points: 0,
            bandages: 3,
            rations: 5,
            adventuring_gear: 5,
        }
    }
}

/// A relationship with another character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bond {
    /// The other character's name.
    pub name: String,
    /// What the bond says.
    pub relationship: String,
    /// Resolved bonds no longer count toward Aid/Interfere.
    #[serde(default)]
    pub resolved: bool,
}

impl Bond {
    /// Create an unresolved bond.
    pub fn new(name: impl Into<String>, relationship: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            relationship: relationship.into(),
            resolved: false,
        }
    }
}

/// The full character record.
///
/// This is a value type: every collection is owned, so `clone()` produces a
/// copy that shares nothing with the original.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    /// Character name.
    pub name: String,
    /// Current level.
    pub level: u32,
    /// Current hit points.
    pub hp: i32,
    /// Maximum hit points.
    pub max_hp: i32,
    /// Experience points toward the next level.
    pub xp: u32,
    /// Base armor, before equipped armor items.
    pub armor: i32,
    /// Ability scores.
    pub stats: Stats,
    /// Counters and consumables.
    pub resources: Resources,
    /// Bonds with other characters.
    pub bonds: Vec<Bond>,
    /// Active status effects.
    pub status_effects: Vec<StatusEffect>,
    /// Active debilities.
    pub debilities: Vec<Debility>,
    /// Carried items.
    pub inventory: Vec<Item>,
    /// Set when a Last Breath roll ends the character's journey.
    #[serde(default)]
    pub deceased: bool,
}

impl Character {
    /// Create a level 1 character with average stats.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: 1,
            hp: 10,
            max_hp: 10,
            xp: 0,
            armor: 0,
            stats: Stats::default(),
            resources: Resources::default(),
            bonds: Vec::new(),
            status_effects: Vec::new(),
            debilities: Vec::new(),
            inventory: Vec::new(),
            deceased: false,
        }
    }

    /// XP required to advance from the current level.
    pub fn xp_needed(&self) -> u32 {
        self.level + 7
    }

    /// Whether enough XP has been banked to level up.
    pub fn can_level_up(&self) -> bool {
        self.xp >= self.xp_needed()
    }

    /// The modifier for a stat.
    pub fn stat_modifier(&self, stat: Stat) -> i32 {
        self.stats.modifier(stat)
    }

    /// Base armor plus every equipped armor item.
    pub fn total_armor(&self) -> i32 {
        let worn: i32 = self
            .inventory
            .iter()
            .filter(|item| item.equipped && item.kind == ItemKind::Armor)
            .filter_map(|item| item.armor)
            .sum();
        self.armor.saturating_add(worn)
    }

    /// Adjust HP by a delta, clamping to `0..=max_hp`. Returns the new value.
    pub fn adjust_hp(&mut self, delta: i32) -> i32 {
        self.hp = self.hp.saturating_add(delta).clamp(0, self.max_hp.max(0));
        self.hp
    }

    /// Apply incoming damage after armor. Returns the damage actually taken.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let taken = amount.saturating_sub(self.total_armor()).max(0);
        let before = self.hp;
        self.adjust_hp(-taken);
        before.saturating_sub(self.hp)
    }

    /// Heal up to max HP. Returns the HP actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.adjust_hp(amount.max(0));
        self.hp.saturating_sub(before)
    }

    /// Raise max HP and current HP by the same amount.
    pub fn raise_max_hp(&mut self, amount: i32) {
        self.max_hp = self.max_hp.saturating_add(amount);
        self.hp = self.hp.saturating_add(amount);
    }

    /// Bank experience.
    pub fn gain_xp(&mut self, amount: u32) {
        self.xp = self.xp.saturating_add(amount);
    }

    /// Whether a status effect is active.
    pub fn has_status(&self, effect: StatusEffect) -> bool {
        self.status_effects.contains(&effect)
    }

    /// Toggle a status effect. Returns true if it is now active.
    pub fn toggle_status(&mut self, effect: StatusEffect) -> bool {
        if let Some(pos) = self.status_effects.iter().position(|e| *e == effect) {
            self.status_effects.remove(pos);
            false
        } else {
            self.status_effects.push(effect);
            true
        }
    }

    /// Whether a debility is active.
    pub fn has_debility(&self, debility: Debility) -> bool {
        self.debilities.contains(&debility)
    }

    /// Toggle a debility. Returns true if it is now active.
    pub fn toggle_debility(&mut self, debility: Debility) -> bool {
        if let Some(pos) = self.debilities.iter().position(|d| *d == debility) {
            self.debilities.remove(pos);
            false
        } else {
            self.debilities.push(debility);
            true
        }
    }

    /// Number of unresolved bonds naming `other` (case-insensitive).
    pub fn bond_count(&self, other: &str) -> usize {
        self.bonds
            .iter()
            .filter(|b| !b.resolved && b.name.eq_ignore_ascii_case(other.trim()))
            .count()
    }

    /// The first equipped weapon, if any.
    pub fn equipped_weapon(&self) -> Option<&Item> {
        self.inventory
            .iter()
            .find(|item| item.equipped && item.kind == ItemKind::Weapon)
    }
}

impl Default for Character {
    fn default() -> Self {
        Self::new("Unnamed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fighter() -> Character {
        let mut c = Character::new("Grug");
        c.max_hp = 25;
        c.hp = 15;
        c.stats = Stats::from_scores([18, 15, 16, 9, 13, 8]);
        c.bonds.push(Bond::new("Sar", "I will teach Sar about the future"));
        c.inventory.push(
            Item::new(1, "Warhammer", ItemKind::Weapon)
                .with_damage("d10+3")
                .equipped(),
        );
        c
    }

    #[test]
    fn adjust_hp_clamps() {
        let mut c = fighter();
        assert_eq!(c.adjust_hp(100), 25);
        assert_eq!(c.adjust_hp(-100), 0);
    }

    #[test]
    fn damage_respects_armor() {
        let mut c = fighter();
        c.inventory
            .push(Item::new(2, "Vest", ItemKind::Armor).with_armor(1).equipped());
        c.armor = 1;
        assert_eq!(c.total_armor(), 2);
        assert_eq!(c.take_damage(5), 3);
        assert_eq!(c.hp, 12);
        assert_eq!(c.take_damage(1), 0);
        assert_eq!(c.hp, 12);
    }

    #[test]
    fn unequipped_armor_does_not_count() {
        let mut c = fighter();
        c.inventory
            .push(Item::new(2, "Vest", ItemKind::Armor).with_armor(1));
        assert_eq!(c.total_armor(), 0);
    }

    #[test]
    fn heal_caps_at_max() {
        let mut c = fighter();
        assert_eq!(c.heal(20), 10);
        assert_eq!(c.hp, 25);
    }

    #[test]
    fn extreme_amounts_saturate() {
        let mut c = Character::new("Grug");
        c.hp = 5;
        assert_eq!(c.heal(i32::MAX), 5);
        assert_eq!(c.hp, 10);
        assert_eq!(c.adjust_hp(i32::MIN), 0);
        c.hp = 5;
        assert_eq!(c.take_damage(i32::MIN), 0);
        assert_eq!(c.take_damage(i32::MAX), 5);
        assert_eq!(c.hp, 0);

        let mut armored = fighter();
        armored.armor = 2;
        assert_eq!(armored.take_damage(i32::MIN), 0);
        assert_eq!(armored.hp, 15);
        assert_eq!(armored.adjust_hp(i32::MAX), 25);
    }

    #[test]
    fn toggle_status_round_trip() {
        let mut c = fighter();
        assert!(c.toggle_status(StatusEffect::Poisoned));
        assert!(c.has_status(StatusEffect::Poisoned));
        assert!(!c.toggle_status(StatusEffect::Poisoned));
        assert!(!c.has_status(StatusEffect::Poisoned));
    }

    #[test]
    fn bond_count_ignores_resolved() {
        let mut c = fighter();
        c.bonds.push(Bond::new("sar", "Sar owes me"));
        assert_eq!(c.bond_count("Sar"), 2);
        c.bonds[0].resolved = true;
        assert_eq!(c.bond_count("SAR"), 1);
        assert_eq!(c.bond_count("Kael"), 0);
    }

    #[test]
    fn equipped_weapon() {
        let c = fighter();
        assert_eq!(c.equipped_weapon().unwrap().name, "Warhammer");
        assert!(Character::new("Empty").equipped_weapon().is_none());
    }

    #[test]
    fn clone_shares_nothing() {
        let original = fighter();
        let mut copy = original.clone();
        copy.bonds[0].resolved = true;
        copy.inventory[0].tags.push("messy".into());
        copy.status_effects.push(StatusEffect::Burning);
        assert!(!original.bonds[0].resolved);
        assert!(original.inventory[0].tags.is_empty());
        assert!(original.status_effects.is_empty());
    }

    #[test]
    fn serde_round_trip_is_lossless() {
        let c = fighter();
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"maxHp\":25"));
        let back: Character = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
