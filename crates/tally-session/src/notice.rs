//! Transient messages for the host to display.

use std::fmt;
use std::sync::mpsc::Sender;
use std::time::Duration;

/// Text shown when no transient message is up.
pub const IDLE_TEXT: &str = "Ready to roll!";

/// A message for the host to show, optionally reverting to [`IDLE_TEXT`]
/// after `duration`. Scheduling and cancelling the revert is the host's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// What to show.
    pub text: String,
    /// How long to show it. `None` keeps it up until replaced.
    pub duration: Option<Duration>,
}

impl Notice {
    /// A message that stays until replaced.
    pub fn sticky(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            duration: None,
        }
    }

    /// A message that reverts after `duration`.
    pub fn transient(text: impl Into<String>, duration: Duration) -> Self {
        Self {
            text: text.into(),
            duration: Some(duration),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Where the session sends its messages. Fire and forget.
pub trait Notifier {
    /// Show a message.
    fn notify(&mut self, notice: &Notice);
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Notifier for Silent {
    fn notify(&mut self, _notice: &Notice) {}
}

impl Notifier for Vec<Notice> {
    fn notify(&mut self, notice: &Notice) {
        self.push(notice.clone());
    }
}

impl Notifier for Sender<Notice> {
    fn notify(&mut self, notice: &Notice) {
        // A dropped receiver means nobody is showing messages any more.
        let _ = self.send(notice.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;

    #[test]
    fn vec_collects() {
        let mut sink: Vec<Notice> = Vec::new();
        sink.notify(&Notice::sticky("hello"));
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].to_string(), "hello");
    }

    #[test]
    fn sender_forwards_and_tolerates_hangup() {
        let (mut tx, rx) = channel();
        tx.notify(&Notice::transient("Undid: Damage", Duration::from_secs(2)));
        let got = rx.recv().unwrap();
        assert_eq!(got.duration, Some(Duration::from_secs(2)));
        drop(rx);
        tx.notify(&Notice::sticky("nobody listening"));
    }
}
