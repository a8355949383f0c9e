//! Error types for the session layer.

use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur during a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A formula was rejected or a preset was missing.
    #[error("{0}")]
    Mechanics(#[from] tally_mechanics::MechError),

    /// Weapon damage was requested with no weapon equipped.
    #[error("no weapon equipped")]
    NoEquippedWeapon,

    /// The equipped weapon has no damage formula at all.
    #[error("{0} has no damage formula")]
    NoDamageFormula(String),

    /// The backing store could not be read or written.
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The backing store holds data that does not decode.
    #[error("malformed store data: {0}")]
    Json(#[from] serde_json::Error),
}
