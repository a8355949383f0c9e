//! Situational modifiers from status effects and debilities.

use tally_core::{Character, Debility, Stat, StatusEffect};

/// What a roll is for, which decides the conditions that apply to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollKind {
    /// A roll tied to no stat, e.g. a freeform roll.
    General,
    /// A roll made with a stat.
    Stat(Stat),
    /// A damage roll.
    Damage,
}

impl RollKind {
    /// Guess the roll kind from a free-text label such as "STR Check" or
    /// "Hack and Slash". Unrecognized labels are general rolls.
    pub fn infer(label: &str) -> Self {
        let lower = label.to_lowercase();
        if lower.contains("str") || lower.contains("hack") {
            Self::Stat(Stat::Str)
        } else if lower.contains("dex") {
            Self::Stat(Stat::Dex)
        } else if lower.contains("con") {
            Self::Stat(Stat::Con)
        } else if lower.contains("int") {
            Self::Stat(Stat::Int)
        } else if lower.contains("wis") {
            Self::Stat(Stat::Wis)
        } else if lower.contains("cha") {
            Self::Stat(Stat::Cha)
        } else if lower.contains("damage") || lower.contains("upper hand") {
            Self::Damage
        } else {
            Self::General
        }
    }

    fn is_stat(self, stat: Stat) -> bool {
        self == Self::Stat(stat)
    }
}

/// The combined adjustment from a character's conditions for one roll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Situational {
    /// Net modifier.
    pub modifier: i32,
    /// One note per contributing condition, e.g. `"Poisoned (-1)"`.
    pub notes: Vec<String>,
}

impl Situational {
    /// Collect every condition on `character` that affects a roll of `kind`.
    pub fn for_roll(character: &Character, kind: RollKind) -> Self {
        let mut out = Self::default();

        if character.has_status(StatusEffect::Poisoned) {
            out.add(-1, "Poisoned (-1)");
        }
        if character.has_status(StatusEffect::Shocked) && kind.is_stat(Stat::Dex) {
            out.add(-2, "Shocked (-2 DEX)");
        }
        if character.has_status(StatusEffect::Weakened) && kind == RollKind::Damage {
            out.add(-1, "Weakened (-1 damage)");
        }
        if character.has_status(StatusEffect::Frozen)
            && (kind.is_stat(Stat::Str) || kind.is_stat(Stat::Dex))
        {
            out.add(-1, "Frozen (-1 physical)");
        }
        if character.has_status(StatusEffect::Blessed) {
            out.add(1, "Blessed (+1)");
        }

        for debility in Debility::ALL {
            if character.has_debility(debility) && kind.is_stat(debility.stat()) {
                out.add(-1, &format!("{} (-1)", debility.name()));
            }
        }

        out
    }

    /// Whether no condition applies.
    pub fn is_empty(&self) -> bool {
        self.modifier == 0 && self.notes.is_empty()
    }

    fn add(&mut self, delta: i32, note: &str) {
        self.modifier += delta;
        self.notes.push(note.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infer_from_labels() {
        assert_eq!(RollKind::infer("STR Check"), RollKind::Stat(Stat::Str));
        assert_eq!(RollKind::infer("Hack and Slash"), RollKind::Stat(Stat::Str));
        assert_eq!(RollKind::infer("Defy Danger (DEX)"), RollKind::Stat(Stat::Dex));
        assert_eq!(RollKind::infer("Weapon damage"), RollKind::Damage);
        assert_eq!(RollKind::infer(""), RollKind::General);
    }

    #[test]
    fn clean_character_has_no_modifiers() {
        let c = Character::new("Grug");
        assert!(Situational::for_roll(&c, RollKind::Stat(Stat::Str)).is_empty());
    }

    #[test]
    fn poisoned_applies_everywhere() {
        let mut c = Character::new("Grug");
        c.toggle_status(StatusEffect::Poisoned);
        for kind in [RollKind::General, RollKind::Damage, RollKind::Stat(Stat::Wis)] {
            let s = Situational::for_roll(&c, kind);
            assert_eq!(s.modifier, -1);
            assert_eq!(s.notes, vec!["Poisoned (-1)".to_string()]);
        }
    }

    #[test]
    fn shocked_only_hits_dex() {
        let mut c = Character::new("Grug");
        c.toggle_status(StatusEffect::Shocked);
        assert_eq!(Situational::for_roll(&c, RollKind::Stat(Stat::Dex)).modifier, -2);
        assert_eq!(Situational::for_roll(&c, RollKind::Stat(Stat::Str)).modifier, 0);
    }

    #[test]
    fn frozen_hits_physical_stats() {
        let mut c = Character::new("Grug");
        c.toggle_status(StatusEffect::Frozen);
        assert_eq!(Situational::for_roll(&c, RollKind::Stat(Stat::Str)).modifier, -1);
        assert_eq!(Situational::for_roll(&c, RollKind::Stat(Stat::Dex)).modifier, -1);
        assert_eq!(Situational::for_roll(&c, RollKind::Stat(Stat::Int)).modifier, 0);
    }

    #[test]
    fn weakened_hits_damage() {
        let mut c = Character::new("Grug");
        c.toggle_status(StatusEffect::Weakened);
        assert_eq!(Situational::for_roll(&c, RollKind::Damage).modifier, -1);
        assert_eq!(Situational::for_roll(&c, RollKind::General).modifier, 0);
    }

    #[test]
    fn debility_matches_its_stat() {
        let mut c = Character::new("Grug");
        c.toggle_debility(Debility::Scarred);
        let s = Situational::for_roll(&c, RollKind::Stat(Stat::Cha));
        assert_eq!(s.modifier, -1);
        assert_eq!(s.notes, vec!["Scarred (-1)".to_string()]);
        assert!(Situational::for_roll(&c, RollKind::Stat(Stat::Str)).is_empty());
    }

    #[test]
    fn blessing_offsets_poison() {
        let mut c = Character::new("Grug");
        c.toggle_status(StatusEffect::Poisoned);
        c.toggle_status(StatusEffect::Blessed);
        let s = Situational::for_roll(&c, RollKind::General);
        assert_eq!(s.modifier, 0);
        assert_eq!(s.notes.len(), 2);
        assert!(!s.is_empty());
    }
}
