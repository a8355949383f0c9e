//! Fixed roll procedures for named game actions.
//!
//! Each procedure composes an expression, the evaluator, and one game rule.
//! None of them mutates a character directly; they return outcomes the
//! caller applies:
//! - **Stat check**: 2d6 + stat modifier, with XP on a miss.
//! - **HP gain**: d10 + CON, at least 1.
//! - **Last Breath**: 2d6 read as evade / bargain / journey ends.
//! - **Aid/Interfere**: a helper's roll that shifts a pending check.

pub mod assist;
pub mod check;
pub mod hp_gain;
pub mod last_breath;

pub use assist::{
    AssistKind, AssistOutcome, AssistRequest, AssistRule, BONUS_DIE_SIDES, resolve_assist,
};
pub use check::{CheckOutcome, RolledCheck, StatCheck};
pub use hp_gain::{HpGain, roll_hp_gain};
pub use last_breath::{LastBreath, LastBreathOutcome, roll_last_breath};
