//! HP gained on level up: d10 + CON, never less than 1.

use tally_core::Character;

use crate::dice::{DiceExpression, DieSource, RollResult};

/// The HP a level-up roll grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HpGain {
    /// The bare d10 roll.
    pub roll: RollResult,
    /// CON modifier added to the roll.
    pub con_modifier: i32,
    /// HP to add to both max and current HP. Always at least 1.
    pub increase: i32,
}

impl HpGain {
    /// Display line, e.g. `"HP Roll: d10(7) + CON(2) = +9 HP"`.
    pub fn summary(&self) -> String {
        format!(
            "HP Roll: d10({}) + CON({}) = +{} HP",
            self.roll.dice_sum(),
            self.con_modifier,
            self.increase
        )
    }

    /// Raise the character's max and current HP.
    pub fn apply(&self, character: &mut Character) {
        character.raise_max_hp(self.increase);
    }
}

/// Roll HP for a level up. Does not touch the character.
pub fn roll_hp_gain<S: DieSource + ?Sized>(con_modifier: i32, source: &mut S) -> HpGain {
    let roll = DiceExpression::D10.roll(source).with_label("HP Roll");
    let raw = roll.total() + i64::from(con_modifier);
    let increase = i32::try_from(raw.max(1)).unwrap_or(i32::MAX);
    HpGain {
        roll,
        con_modifier,
        increase,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::Scripted;

    #[test]
    fn adds_con() {
        let gain = roll_hp_gain(2, &mut Scripted::faces(10, &[7]));
        assert_eq!(gain.increase, 9);
        assert_eq!(gain.summary(), "HP Roll: d10(7) + CON(2) = +9 HP");
    }

    #[test]
    fn floor_of_one() {
        let gain = roll_hp_gain(-3, &mut Scripted::faces(10, &[1]));
        assert_eq!(gain.increase, 1);
        let gain = roll_hp_gain(-3, &mut Scripted::faces(10, &[4]));
        assert_eq!(gain.increase, 1);
        let gain = roll_hp_gain(-3, &mut Scripted::faces(10, &[5]));
        assert_eq!(gain.increase, 2);
    }

    #[test]
    fn roll_is_plain_d10() {
        let gain = roll_hp_gain(2, &mut Scripted::faces(10, &[10]));
        assert_eq!(gain.roll.formula(), "d10");
        assert_eq!(gain.roll.total(), 10);
    }

    #[test]
    fn apply_raises_both() {
        let mut c = Character::new("Grug");
        c.hp = 4;
        let gain = roll_hp_gain(0, &mut Scripted::faces(10, &[6]));
        gain.apply(&mut c);
        assert_eq!(c.max_hp, 16);
        assert_eq!(c.hp, 10);
    }
}
