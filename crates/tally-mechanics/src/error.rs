//! Error types for the mechanics engine.

/// Errors that can occur during mechanics operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MechError {
    /// A formula does not match `[count]d<sides>[+|-<modifier>]`.
    #[error("invalid formula \"{formula}\": {reason}")]
    InvalidFormula {
        /// The rejected input.
        formula: String,
        /// What was wrong with it.
        reason: String,
        /// Byte offset of the first offending character.
        position: usize,
    },

    /// No preset with this name exists.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
