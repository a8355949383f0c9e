//! Dice notation, rolling, and result formatting.
//!
//! The notation is a single die group with an optional flat modifier:
//! `[count]d<sides>[(+|-)<modifier>]`, case-insensitive on the `d` and with
//! no whitespace anywhere. `d20`, `2d6+3` and `4d6-2` are valid; `2d6+1d4`,
//! `+3` and `2 d6` are not.

pub mod roll;
pub mod source;

pub use roll::{RollResult, roll, roll_formula};
pub use source::{DieSource, Scripted};

use std::fmt;
use std::str::FromStr;

use crate::error::{MechError, MechResult};

/// Largest number of dice a single formula may roll.
pub const MAX_DICE: u32 = 1000;

/// A parsed dice formula: `count` dice of `sides` sides plus `modifier`.
///
/// Always satisfies `count >= 1` and `sides >= 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiceExpression {
    count: u32,
    sides: u32,
    modifier: i32,
}

impl DiceExpression {
    /// A single six-sided die.
    pub const D6: Self = Self::fixed(1, 6);
    /// Two six-sided dice, the basis of every move.
    pub const TWO_D6: Self = Self::fixed(2, 6);
    /// A single ten-sided die.
    pub const D10: Self = Self::fixed(1, 10);

    /// Build an expression from its parts, enforcing `count` in
    /// `1..=MAX_DICE` and `sides >= 2`.
    pub fn new(count: u32, sides: u32, modifier: i32) -> MechResult<Self> {
        let expr = Self {
            count,
            sides,
            modifier,
        };
        if count == 0 {
            return Err(expr.rejected("count must be at least 1"));
        }
        if count > MAX_DICE {
            return Err(expr.rejected("too many dice"));
        }
        if sides < 2 {
            return Err(expr.rejected("a die needs at least 2 sides"));
        }
        Ok(expr)
    }

    /// A single die of the given size. Sizes below 2 are raised to 2.
    pub fn die(sides: u32) -> Self {
        Self::fixed(1, sides.max(2))
    }

    const fn fixed(count: u32, sides: u32) -> Self {
        Self {
            count,
            sides,
            modifier: 0,
        }
    }

    /// Replace the flat modifier.
    pub fn with_modifier(mut self, modifier: i32) -> Self {
        self.modifier = modifier;
        self
    }

    /// Number of dice rolled.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Sides on each die.
    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Flat modifier added to the sum of the dice.
    pub fn modifier(&self) -> i32 {
        self.modifier
    }

    /// Roll this expression. See [`roll`].
    pub fn roll<S: DieSource + ?Sized>(&self, source: &mut S) -> RollResult {
        roll::roll(self, source)
    }

    fn rejected(&self, reason: &str) -> MechError {
        MechError::InvalidFormula {
            formula: self.to_string(),
            reason: reason.to_string(),
            position: 0,
        }
    }
}

impl fmt::Display for DiceExpression {
    /// Canonical notation: the count is elided when it is 1 and a zero
    /// modifier is omitted, e.g. `d20`, `2d6+3`, `4d6-2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count != 1 {
            write!(f, "{}", self.count)?;
        }
        write!(f, "d{}", self.sides)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{m}"),
            m => write!(f, "{m}"),
        }
    }
}

impl FromStr for DiceExpression {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parse a formula string into a [`DiceExpression`].
///
/// Performs no rolling. Every rejection is [`MechError::InvalidFormula`]
/// carrying the byte offset where parsing stopped.
pub fn parse(input: &str) -> MechResult<DiceExpression> {
    let bytes = input.as_bytes();
    let invalid = |reason: &str, position: usize| MechError::InvalidFormula {
        formula: input.to_string(),
        reason: reason.to_string(),
        position,
    };

    if input.is_empty() {
        return Err(invalid("empty formula", 0));
    }

    let count_end = digits_end(bytes, 0);
    let count_digits = &input[..count_end];

    match bytes.get(count_end) {
        Some(b'd' | b'D') => {}
        Some(_) => return Err(invalid("expected 'd'", count_end)),
        None => return Err(invalid("missing 'd' and die size", count_end)),
    }

    let sides_start = count_end + 1;
    let sides_end = digits_end(bytes, sides_start);
    if sides_end == sides_start {
        return Err(invalid("expected die size after 'd'", sides_start));
    }
    let sides: u32 = input[sides_start..sides_end]
        .parse()
        .map_err(|_| invalid("die size is too large", sides_start))?;

    let modifier = match bytes.get(sides_end) {
        None => 0,
        Some(sign @ (b'+' | b'-')) => {
            let mod_start = sides_end + 1;
            let mod_end = digits_end(bytes, mod_start);
            if mod_end == mod_start {
                return Err(invalid("expected a number after the sign", mod_start));
            }
            if mod_end != bytes.len() {
                return Err(invalid("unexpected character", mod_end));
            }
            let magnitude: i32 = input[mod_start..mod_end]
                .parse()
                .map_err(|_| invalid("modifier is too large", mod_start))?;
            if *sign == b'-' { -magnitude } else { magnitude }
        }
        Some(_) => return Err(invalid("unexpected character", sides_end)),
    };

    let count: u32 = if count_digits.is_empty() {
        1
    } else {
        count_digits
            .parse()
            .map_err(|_| invalid("too many dice", 0))?
    };
    if count == 0 {
        return Err(invalid("count must be at least 1", 0));
    }
    if count > MAX_DICE {
        return Err(invalid("too many dice", 0));
    }
    if sides < 2 {
        return Err(invalid("a die needs at least 2 sides", sides_start));
    }

    Ok(DiceExpression {
        count,
        sides,
        modifier,
    })
}

/// Whether `input` is a well-formed formula.
pub fn is_valid(input: &str) -> bool {
    parse(input).is_ok()
}

/// Index one past the last ASCII digit starting at `start`.
fn digits_end(bytes: &[u8], start: usize) -> usize {
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parts(s: &str) -> (u32, u32, i32) {
        let e = parse(s).unwrap();
        (e.count(), e.sides(), e.modifier())
    }

    fn position(s: &str) -> usize {
        match parse(s) {
            Err(MechError::InvalidFormula { position, .. }) => position,
            other => panic!("expected rejection for {s:?}, got {other:?}"),
        }
    }

    #[test]
    fn parse_full_form() {
        assert_eq!(parts("2d6+3"), (2, 6, 3));
    }

    #[test]
    fn parse_defaults_count_to_one() {
        assert_eq!(parts("d20"), (1, 20, 0));
    }

    #[test]
    fn parse_negative_modifier() {
        assert_eq!(parts("4d6-2"), (4, 6, -2));
    }

    #[test]
    fn parse_uppercase_d() {
        assert_eq!(parts("3D8+1"), (3, 8, 1));
    }

    #[test]
    fn parse_accepts_leading_zeros() {
        assert_eq!(parts("02d06+01"), (2, 6, 1));
    }

    #[test]
    fn rejects_malformed() {
        for bad in [
            "", "d", "+3", "2x6", "2d", "2d6+", "2d6+1d4", " 2d6", "2d6 ", "2 d6", "2d6+ 3",
            "d6++1", "2d6*2", "dd6", "-1d6",
        ] {
            assert!(parse(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn rejects_degenerate_dice() {
        assert!(parse("0d6").is_err());
        assert!(parse("d1").is_err());
        assert!(parse("d0").is_err());
        assert!(parse("1001d6").is_err());
        assert!(parse("1000d6").is_ok());
    }

    #[test]
    fn rejects_overflow() {
        assert!(parse("d99999999999").is_err());
        assert!(parse("d6+99999999999").is_err());
        assert!(parse("99999999999d6").is_err());
    }

    #[test]
    fn rejection_positions() {
        assert_eq!(position("2x6"), 1);
        assert_eq!(position("2d"), 2);
        assert_eq!(position("2d6+1d4"), 5);
        assert_eq!(position("2d6 "), 3);
        assert_eq!(position("d1"), 1);
    }

    #[test]
    fn rejection_keeps_formula() {
        let err = parse("Special").unwrap_err();
        assert!(err.to_string().contains("\"Special\""));
    }

    #[test]
    fn display_is_canonical() {
        assert_eq!(parse("1d20").unwrap().to_string(), "d20");
        assert_eq!(parse("2D6+3").unwrap().to_string(), "2d6+3");
        assert_eq!(parse("4d6-2").unwrap().to_string(), "4d6-2");
        assert_eq!(parse("d8+0").unwrap().to_string(), "d8");
    }

    #[test]
    fn with_negative_modifier_never_doubles_sign() {
        let e = DiceExpression::TWO_D6.with_modifier(-1);
        assert_eq!(e.to_string(), "2d6-1");
        assert_eq!(parse(&e.to_string()).unwrap(), e);
    }

    #[test]
    fn new_validates() {
        assert!(DiceExpression::new(2, 6, 1).is_ok());
        assert!(DiceExpression::new(0, 6, 0).is_err());
        assert!(DiceExpression::new(1, 1, 0).is_err());
        assert!(DiceExpression::new(MAX_DICE + 1, 6, 0).is_err());
    }

    #[test]
    fn die_raises_small_sizes() {
        assert_eq!(DiceExpression::die(0).sides(), 2);
        assert_eq!(DiceExpression::die(8).to_string(), "d8");
    }

    #[test]
    fn from_str_delegates() {
        let e: DiceExpression = "d10".parse().unwrap();
        assert_eq!(e, DiceExpression::D10);
    }

    proptest! {
        #[test]
        fn display_then_parse_is_identity(
            count in 1u32..=MAX_DICE,
            sides in 2u32..=1000,
            modifier in -500i32..=500,
        ) {
            let e = DiceExpression::new(count, sides, modifier).unwrap();
            prop_assert_eq!(parse(&e.to_string()).unwrap(), e);
        }

        #[test]
        fn strings_without_d_are_rejected(s in "[0-9+\\-]{0,8}") {
            prop_assert!(parse(&s).is_err());
        }
    }
}
