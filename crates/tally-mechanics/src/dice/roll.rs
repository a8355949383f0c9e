//! Roll evaluation and result formatting.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::source::DieSource;
use super::{DiceExpression, parse};
use crate::error::MechResult;

/// The outcome of rolling a [`DiceExpression`].
///
/// `total` always equals the sum of `rolls` plus `modifier`. Results are
/// built by [`roll`] and adjusted only through the consuming `with_*`
/// methods before they are recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    rolls: Vec<u32>,
    modifier: i32,
    total: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    formula: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    notes: Vec<String>,
    timestamp: DateTime<Utc>,
}

impl RollResult {
    /// Assemble a result from raw die faces. The formula is used verbatim
    /// for redisplay.
    pub fn new(rolls: Vec<u32>, modifier: i32, formula: impl Into<String>) -> Self {
        let total = face_sum(&rolls) + i64::from(modifier);
        Self {
            rolls,
            modifier,
            total,
            label: None,
            formula: formula.into(),
            notes: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    /// Attach a human-readable label such as `"STR Check"`.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Replace the formula shown on redisplay.
    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = formula.into();
        self
    }

    /// Fold an extra flat adjustment into the modifier and total, with an
    /// optional note explaining it.
    pub fn with_adjustment(mut self, delta: i32, note: Option<String>) -> Self {
        self.modifier = self.modifier.saturating_add(delta);
        self.total = self.dice_sum() + i64::from(self.modifier);
        if let Some(note) = note {
            self.notes.push(note);
        }
        self
    }

    /// Attach a note without changing the numbers.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Raw die faces in the order they were drawn.
    pub fn rolls(&self) -> &[u32] {
        &self.rolls
    }

    /// Flat modifier, including any folded adjustments.
    pub fn modifier(&self) -> i32 {
        self.modifier
    }

    /// Sum of the dice plus the modifier.
    pub fn total(&self) -> i64 {
        self.total
    }

    /// Sum of the dice alone.
    pub fn dice_sum(&self) -> i64 {
        face_sum(&self.rolls)
    }

    /// Optional label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The formula as written by whoever requested the roll.
    pub fn formula(&self) -> &str {
        &self.formula
    }

    /// Notes explaining folded adjustments.
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// When the roll was made.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Render the canonical display string.
    ///
    /// Shape: `<formula>: <die1> + <die2> ... [+|- <modifier>] = <total>`,
    /// followed by ` (<note>, <note>)` when notes are present. A zero
    /// modifier is omitted.
    pub fn format(&self) -> String {
        let dice: Vec<String> = self.rolls.iter().map(|r| r.to_string()).collect();
        let mut out = format!("{}: {}", self.formula, dice.join(" + "));
        match self.modifier {
            0 => {}
            m if m > 0 => out.push_str(&format!(" + {m}")),
            m => out.push_str(&format!(" - {}", m.unsigned_abs())),
        }
        out.push_str(&format!(" = {}", self.total));
        if !self.notes.is_empty() {
            out.push_str(&format!(" ({})", self.notes.join(", ")));
        }
        out
    }
}

impl fmt::Display for RollResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format())
    }
}

/// Roll an expression.
///
/// Draws `count` dice as `floor(unit * sides) + 1` in order. Draws outside
/// `[0, 1)` are clamped so faces always land in `1..=sides`. The result's
/// formula is the expression's canonical notation.
pub fn roll<S: DieSource + ?Sized>(expr: &DiceExpression, source: &mut S) -> RollResult {
    let sides = expr.sides();
    let rolls = (0..expr.count()).map(|_| draw(source, sides)).collect();
    let result = RollResult::new(rolls, expr.modifier(), expr.to_string());
    tracing::debug!(formula = %expr, total = result.total(), "rolled");
    result
}

/// Parse and roll in one step, keeping `input` as the displayed formula.
pub fn roll_formula<S: DieSource + ?Sized>(input: &str, source: &mut S) -> MechResult<RollResult> {
    let expr = parse(input)?;
    Ok(roll(&expr, source).with_formula(input))
}

fn face_sum(rolls: &[u32]) -> i64 {
    rolls.iter().map(|&r| i64::from(r)).sum()
}

fn draw<S: DieSource + ?Sized>(source: &mut S, sides: u32) -> u32 {
    let scaled = (source.unit() * f64::from(sides)).floor();
    if scaled.is_nan() || scaled < 0.0 {
        1
    } else if scaled >= f64::from(sides) {
        sides
    } else {
        scaled as u32 + 1
    }
}
