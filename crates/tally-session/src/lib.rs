//! A character session: the aggregate that owns the live character record,
//! its roll history, its undo history, and its roll presets.
//!
//! Every mutation snapshots the character first so it can be undone. Rolls
//! go through the mechanics crate with the session's RNG and land in the
//! roll history. Transient messages go to a host-provided [`Notifier`].

pub mod config;
pub mod error;
pub mod notice;
pub mod session;
pub mod store;
pub mod undo;

pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use notice::{Notice, Notifier, Silent};
pub use session::{RollReport, Session};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
pub use undo::{ActionHistory, Snapshot};
