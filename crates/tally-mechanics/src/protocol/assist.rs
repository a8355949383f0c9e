//! Aid and Interfere.
//!
//! A helper rolls 2d6 plus their bond bonus. On 10+ the pending roll shifts;
//! on 7-9 it shifts and the helper is exposed to a consequence; on 6- it
//! does not shift and the helper still takes the consequence.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dice::{DiceExpression, DieSource, RollResult};
use crate::resolution::CheckBand;

/// Largest bond bonus a helper can add.
pub const MAX_BOND_BONUS: i32 = 3;

/// Whether the helper is helping or hindering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssistKind {
    /// Shift the pending roll up.
    Aid,
    /// Shift the pending roll down.
    Interfere,
}

impl fmt::Display for AssistKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aid => write!(f, "Aid"),
            Self::Interfere => write!(f, "Interfere"),
        }
    }
}

/// Sides on the default bonus die.
pub const BONUS_DIE_SIDES: u32 = 6;

/// How a successful helper roll translates into a shift.
///
/// Defaults to a d6 bonus die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssistRule {
    /// Aid gives +1, Interfere gives -2.
    Standard,
    /// Roll a bonus die; Aid adds its face, Interfere subtracts it.
    BonusDie {
        /// Sides on the bonus die.
        sides: u32,
    },
}

impl Default for AssistRule {
    fn default() -> Self {
        Self::BonusDie {
            sides: BONUS_DIE_SIDES,
        }
    }
}

/// A helper's nomination to aid or interfere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistRequest {
    /// Aid or interfere.
    pub kind: AssistKind,
    /// The helper's name.
    pub helper: String,
    /// Bond bonus, clamped to `0..=MAX_BOND_BONUS`.
    pub bond_bonus: i32,
}

impl AssistRequest {
    /// A request to aid.
    pub fn aid(helper: impl Into<String>, bond_bonus: i32) -> Self {
        Self::new(AssistKind::Aid, helper, bond_bonus)
    }

    /// A request to interfere.
    pub fn interfere(helper: impl Into<String>, bond_bonus: i32) -> Self {
        Self::new(AssistKind::Interfere, helper, bond_bonus)
    }

    /// A request of either kind.
    pub fn new(kind: AssistKind, helper: impl Into<String>, bond_bonus: i32) -> Self {
        Self {
            kind,
            helper: helper.into(),
            bond_bonus: bond_bonus.clamp(0, MAX_BOND_BONUS),
        }
    }
}

/// The resolved effect of an assist on a pending roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistOutcome {
    /// Aid or interfere.
    pub kind: AssistKind,
    /// The helper's name.
    pub helper: String,
    /// The helper's own 2d6 + bond roll.
    pub helper_roll: RollResult,
    /// The bonus die, when the bonus-die rule applied and the helper hit.
    pub bonus_roll: Option<RollResult>,
    /// Shift to apply to the pending total.
    pub delta: i32,
    /// Whether the helper is exposed to danger, retribution, or cost.
    pub consequence: bool,
}

impl AssistOutcome {
    /// Note describing the shift, e.g. `"Aid from Sar (+1)"`.
    pub fn note(&self) -> String {
        let from = match self.kind {
            AssistKind::Aid => "from",
            AssistKind::Interfere => "by",
        };
        format!("{} {} {} ({:+})", self.kind, from, self.helper, self.delta)
    }
}

/// Resolve an assist request. Only computes the shift; the caller owns
/// the roll it applies to.
pub fn resolve_assist<S: DieSource + ?Sized>(
    request: &AssistRequest,
    rule: AssistRule,
    source: &mut S,
) -> AssistOutcome {
    let helper_roll = DiceExpression::TWO_D6
        .with_modifier(request.bond_bonus)
        .roll(source)
        .with_label(format!("{} ({})", request.kind, request.helper));
    let band = CheckBand::of(helper_roll.total());

    let (delta, bonus_roll) = match (band.is_hit(), rule) {
        (false, _) => (0, None),
        (true, AssistRule::Standard) => match request.kind {
            AssistKind::Aid => (1, None),
            AssistKind::Interfere => (-2, None),
        },
        (true, AssistRule::BonusDie { sides }) => {
            let bonus = DiceExpression::die(sides).roll(source);
            let face = i32::try_from(bonus.total()).unwrap_or(i32::MAX);
            match request.kind {
                AssistKind::Aid => (face, Some(bonus)),
                AssistKind::Interfere => (-face, Some(bonus)),
            }
        }
    };
    let consequence = band != CheckBand::Success;

    tracing::debug!(
        helper = %request.helper,
        kind = %request.kind,
        roll = helper_roll.total(),
        delta,
        consequence,
        "assist resolved"
    );

    AssistOutcome {
        kind: request.kind,
        helper: request.helper.clone(),
        helper_roll,
        bonus_roll,
        delta,
        consequence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::Scripted;

    #[test]
    fn bond_bonus_is_clamped() {
        assert_eq!(AssistRequest::aid("Sar", 7).bond_bonus, 3);
        assert_eq!(AssistRequest::interfere("Kael", -2).bond_bonus, 0);
    }

    #[test]
    fn strong_aid_no_consequence() {
        let req = AssistRequest::aid("Sar", 1);
        let out = resolve_assist(&req, AssistRule::Standard, &mut Scripted::faces(6, &[5, 4]));
        assert_eq!(out.helper_roll.total(), 10);
        assert_eq!(out.delta, 1);
        assert!(!out.consequence);
        assert_eq!(out.note(), "Aid from Sar (+1)");
    }

    #[test]
    fn partial_interfere_with_consequence() {
        let req = AssistRequest::interfere("Kael", 0);
        let out = resolve_assist(&req, AssistRule::Standard, &mut Scripted::faces(6, &[4, 4]));
        assert_eq!(out.delta, -2);
        assert!(out.consequence);
        assert_eq!(out.note(), "Interfere by Kael (-2)");
    }

    #[test]
    fn miss_shifts_nothing_but_costs_helper() {
        let req = AssistRequest::aid("Sar", 0);
        let out = resolve_assist(&req, AssistRule::Standard, &mut Scripted::faces(6, &[1, 2]));
        assert_eq!(out.delta, 0);
        assert!(out.consequence);
    }

    #[test]
    fn default_rule_rolls_a_d6() {
        assert_eq!(AssistRule::default(), AssistRule::BonusDie { sides: BONUS_DIE_SIDES });
        let req = AssistRequest::aid("Sar", 0);
        let out = resolve_assist(&req, AssistRule::default(), &mut Scripted::faces(6, &[6, 5, 4]));
        assert_eq!(out.delta, 4);
        assert_eq!(out.note(), "Aid from Sar (+4)");
    }

    #[test]
    fn bonus_die_rule_adds_face() {
        let req = AssistRequest::aid("Sar", 3);
        let mut source = Scripted::faces(6, &[4, 4, 5]);
        let out = resolve_assist(&req, AssistRule::BonusDie { sides: 6 }, &mut source);
        assert_eq!(out.delta, 5);
        assert_eq!(out.bonus_roll.as_ref().map(RollResult::total), Some(5));
        assert_eq!(source.drawn(), 3);
    }

    #[test]
    fn bonus_die_rule_subtracts_for_interfere() {
        let req = AssistRequest::interfere("Kael", 0);
        let out = resolve_assist(
            &req,
            AssistRule::BonusDie { sides: 6 },
            &mut Scripted::faces(6, &[6, 6, 2]),
        );
        assert_eq!(out.delta, -2);
        assert!(!out.consequence);
    }

    #[test]
    fn bonus_die_not_rolled_on_miss() {
        let req = AssistRequest::aid("Sar", 0);
        let mut source = Scripted::faces(6, &[1, 1]);
        let out = resolve_assist(&req, AssistRule::BonusDie { sides: 6 }, &mut source);
        assert!(out.bonus_roll.is_none());
        assert_eq!(source.drawn(), 2);
    }
}
