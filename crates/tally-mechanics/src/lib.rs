//! Dice mechanics for Tally.
//!
//! Parses dice notation (`2d6+3`), rolls it against an injected
//! [`DieSource`], renders canonical result strings, keeps a bounded roll
//! history, and implements the fixed roll procedures the game uses: stat
//! checks, HP gain on level up, Last Breath, and Aid/Interfere.

pub mod dice;
pub mod error;
pub mod log;
pub mod modifiers;
pub mod preset;
pub mod protocol;
pub mod resolution;

pub use dice::{DiceExpression, DieSource, RollResult, Scripted, parse, roll, roll_formula};
pub use error::{MechError, MechResult};
pub use log::{BoundedLog, ROLL_HISTORY_CAPACITY, RollHistory};
pub use modifiers::{RollKind, Situational};
pub use preset::{PRESET_CAPACITY, PresetBook, PresetOutcome, RollPreset};
pub use protocol::{
    AssistKind, AssistOutcome, AssistRequest, AssistRule, CheckOutcome, HpGain, LastBreath,
    LastBreathOutcome, RolledCheck, StatCheck,
};
pub use resolution::CheckBand;
