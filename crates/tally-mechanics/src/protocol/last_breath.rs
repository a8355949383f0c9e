//! Last Breath: 2d6 when a character is at death's door.

use std::fmt;

use serde::{Deserialize, Serialize};
use tally_core::Character;

use crate::dice::{DiceExpression, DieSource, RollResult};

/// What Death decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LastBreathOutcome {
    /// 10+: the character survives, clean.
    Evade,
    /// 7-9: the character survives, at a price.
    Bargain,
    /// 6-: the character dies.
    JourneyEnds,
}

impl LastBreathOutcome {
    /// Outcome for a total.
    pub fn of(total: i64) -> Self {
        match total {
            10.. => Self::Evade,
            7..=9 => Self::Bargain,
            _ => Self::JourneyEnds,
        }
    }

    /// Narrative line shown to the player.
    pub fn message(self) -> &'static str {
        match self {
            Self::Evade => "You evade Death... for now.",
            Self::Bargain => "Death offers you a bargain.",
            Self::JourneyEnds => "Your journey ends here.",
        }
    }
}

impl fmt::Display for LastBreathOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// A Last Breath roll and its reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastBreath {
    /// The 2d6 roll.
    pub roll: RollResult,
    /// What it means.
    pub outcome: LastBreathOutcome,
}

impl LastBreath {
    /// Mark the character dead when the journey ends. Returns true if the
    /// character changed.
    pub fn apply(&self, character: &mut Character) -> bool {
        if self.outcome == LastBreathOutcome::JourneyEnds && !character.deceased {
            character.deceased = true;
            return true;
        }
        false
    }
}

/// Roll Last Breath.
pub fn roll_last_breath<S: DieSource + ?Sized>(source: &mut S) -> LastBreath {
    let roll = DiceExpression::TWO_D6.roll(source).with_label("Last Breath");
    let outcome = LastBreathOutcome::of(roll.total());
    LastBreath { roll, outcome }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::Scripted;

    #[test]
    fn four_and_five_is_a_bargain() {
        let lb = roll_last_breath(&mut Scripted::faces(6, &[4, 5]));
        assert_eq!(lb.roll.total(), 9);
        assert_eq!(lb.outcome, LastBreathOutcome::Bargain);
    }

    #[test]
    fn tiers_do_not_overlap() {
        for total in 2..=12 {
            let expected = if total >= 10 {
                LastBreathOutcome::Evade
            } else if total >= 7 {
                LastBreathOutcome::Bargain
            } else {
                LastBreathOutcome::JourneyEnds
            };
            assert_eq!(LastBreathOutcome::of(total), expected, "total {total}");
        }
    }

    #[test]
    fn journey_ends_marks_deceased() {
        let lb = roll_last_breath(&mut Scripted::faces(6, &[1, 2]));
        assert_eq!(lb.outcome, LastBreathOutcome::JourneyEnds);
        let mut c = Character::new("Grug");
        assert!(lb.apply(&mut c));
        assert!(c.deceased);
        assert!(!lb.apply(&mut c));
    }

    #[test]
    fn survival_changes_nothing() {
        let lb = roll_last_breath(&mut Scripted::faces(6, &[6, 6]));
        assert_eq!(lb.outcome, LastBreathOutcome::Evade);
        let mut c = Character::new("Grug");
        assert!(!lb.apply(&mut c));
        assert_eq!(lb.outcome.to_string(), "You evade Death... for now.");
    }
}
