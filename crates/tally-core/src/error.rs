/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when naming parts of a character record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// The name does not match any of the six stats.
    #[error("unknown stat: {0}")]
    UnknownStat(String),

    /// The name does not match any status effect.
    #[error("unknown status effect: {0}")]
    UnknownStatus(String),

    /// The name does not match any debility.
    #[error("unknown debility: {0}")]
    UnknownDebility(String),
}
