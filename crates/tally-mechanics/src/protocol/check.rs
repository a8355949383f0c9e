//! Stat checks: 2d6 plus a stat modifier.
//!
//! A check moves through its states by value:
//! [`StatCheck`] (formula built) → [`RolledCheck`] (rolled exactly once) →
//! either [`CheckOutcome`] via `finish` (to be recorded) or a bare
//! [`RollResult`] via `discard` (a preview that is never recorded).

use tally_core::{Character, Stat};

use super::assist::AssistOutcome;
use crate::dice::{DiceExpression, DieSource, RollResult};
use crate::modifiers::{RollKind, Situational};
use crate::resolution::CheckBand;

/// A stat check whose formula is built but not yet rolled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCheck {
    stat: Stat,
    expression: DiceExpression,
    situational: Situational,
}

impl StatCheck {
    /// `2d6 + stat_modifier`, with no conditions applied.
    pub fn new(stat: Stat, stat_modifier: i32) -> Self {
        Self {
            stat,
            expression: DiceExpression::TWO_D6.with_modifier(stat_modifier),
            situational: Situational::default(),
        }
    }

    /// A check using the character's modifier and current conditions.
    pub fn for_character(character: &Character, stat: Stat) -> Self {
        Self {
            situational: Situational::for_roll(character, RollKind::Stat(stat)),
            ..Self::new(stat, character.stat_modifier(stat))
        }
    }

    /// The stat being checked.
    pub fn stat(&self) -> Stat {
        self.stat
    }

    /// The formula that will be rolled.
    pub fn expression(&self) -> &DiceExpression {
        &self.expression
    }

    /// Label attached to the result, e.g. `"STR Check"`.
    pub fn label(&self) -> String {
        format!("{} Check", self.stat)
    }

    /// Roll the check. Consumes the formula: rolling again needs a new check.
    pub fn roll<S: DieSource + ?Sized>(self, source: &mut S) -> RolledCheck {
        let mut result = self.expression.roll(source).with_label(self.label());
        if !self.situational.is_empty() {
            result = result.with_adjustment(self.situational.modifier, None);
            for note in self.situational.notes {
                result = result.with_note(note);
            }
        }
        RolledCheck {
            stat: self.stat,
            result,
            assist: None,
        }
    }
}

/// A rolled check that is not yet recorded or discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolledCheck {
    stat: Stat,
    result: RollResult,
    assist: Option<AssistOutcome>,
}

impl RolledCheck {
    /// The stat being checked.
    pub fn stat(&self) -> Stat {
        self.stat
    }

    /// The roll before any assist.
    pub fn result(&self) -> &RollResult {
        &self.result
    }

    /// The pending total, including any assist.
    pub fn total(&self) -> i64 {
        self.result.total() + self.assist.as_ref().map_or(0, |a| i64::from(a.delta))
    }

    /// The band of the pending total.
    pub fn band(&self) -> CheckBand {
        CheckBand::of(self.total())
    }

    /// Apply an aid or interfere outcome, replacing any earlier one.
    pub fn assist(&mut self, outcome: AssistOutcome) {
        self.assist = Some(outcome);
    }

    /// Finalize the check for recording.
    ///
    /// A miss awards 1 XP when `auto_xp_on_miss` is set. The award is
    /// judged on the final total, after any assist.
    pub fn finish(self, auto_xp_on_miss: bool) -> CheckOutcome {
        let stat = self.stat;
        let (result, assist) = self.settle();
        let band = CheckBand::of(result.total());
        let xp_award = u32::from(auto_xp_on_miss && band == CheckBand::Miss);
        CheckOutcome {
            stat,
            result,
            band,
            assist,
            xp_award,
        }
    }

    /// Drop the check without recording it, returning the preview result.
    pub fn discard(self) -> RollResult {
        self.settle().0
    }

    fn settle(self) -> (RollResult, Option<AssistOutcome>) {
        let Some(assist) = self.assist else {
            return (self.result, None);
        };
        let mut result = self
            .result
            .with_adjustment(assist.delta, Some(assist.note()));
        if assist.consequence {
            result = result.with_note("Helper Consequences");
        }
        (result, Some(assist))
    }
}

/// A finished check, ready to be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    /// The stat that was checked.
    pub stat: Stat,
    /// The final roll, with conditions and assist folded in.
    pub result: RollResult,
    /// Band of the final total.
    pub band: CheckBand,
    /// The assist applied, if any.
    pub assist: Option<AssistOutcome>,
    /// XP the character earns from this check.
    pub xp_award: u32,
}

impl CheckOutcome {
    /// Apply the check's side effects to the character.
    pub fn apply(&self, character: &mut Character) {
        if self.xp_award > 0 {
            character.gain_xp(self.xp_award);
        }
    }

    /// The formatted roll followed by the band tag.
    pub fn summary(&self) -> String {
        format!("{} {}", self.result.format(), self.band.tag())
    }

    /// Flavor text for the result.
    pub fn context(&self) -> &'static str {
        self.band.context(Some(self.stat))
    }
}
