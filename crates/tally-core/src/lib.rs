//! Core types for Tally: the character record.
//!
//! A [`Character`] is a plain value. Cloning it yields a fully independent
//! copy, which is what the undo log relies on when it snapshots the record
//! before a mutation. Nothing in this crate rolls dice or keeps history.

/// The character record and its resources and bonds.
pub mod character;
/// Error types used throughout the crate.
pub mod error;
/// Inventory items.
pub mod inventory;
/// Ability scores and the six stats.
pub mod stats;
/// Status effects and debilities.
pub mod status;

/// Re-export the character record.
pub use character::{Bond, Character, Resources};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export inventory types.
pub use inventory::{Item, ItemKind};
/// Re-export stat types.
pub use stats::{AbilityScore, Stat, Stats};
/// Re-export condition types.
pub use status::{Debility, StatusEffect};
