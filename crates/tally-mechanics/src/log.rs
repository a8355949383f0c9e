//! Bounded most-recent-first logs.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::dice::RollResult;

/// Default number of rolls kept in the roll history.
pub const ROLL_HISTORY_CAPACITY: usize = 10;

/// An ordered log, newest entry first, that never holds more than
/// `capacity` entries. Pushing past capacity drops the oldest entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundedLog<T> {
    capacity: usize,
    entries: VecDeque<T>,
}

impl<T> BoundedLog<T> {
    /// Create an empty log holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Prepend an entry, then truncate to capacity.
    pub fn push(&mut self, entry: T) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// Remove and return the newest entry.
    pub fn pop(&mut self) -> Option<T> {
        self.entries.pop_front()
    }

    /// The newest entry.
    pub fn latest(&self) -> Option<&T> {
        self.entries.front()
    }

    /// Entries from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the capacity, dropping the oldest entries if needed.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.entries.truncate(capacity);
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// The roll history shown to the player.
pub type RollHistory = BoundedLog<RollResult>;

impl Default for RollHistory {
    fn default() -> Self {
        Self::new(ROLL_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{Scripted, roll_formula};
    use proptest::prelude::*;

    #[test]
    fn push_prepends() {
        let mut log = BoundedLog::new(3);
        log.push(1);
        log.push(2);
        assert_eq!(log.latest(), Some(&2));
        assert_eq!(log.iter().copied().collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn push_past_capacity_drops_oldest() {
        let mut log = BoundedLog::new(3);
        for i in 1..=5 {
            log.push(i);
        }
        assert_eq!(log.iter().copied().collect::<Vec<_>>(), vec![5, 4, 3]);
    }

    #[test]
    fn pop_takes_newest() {
        let mut log = BoundedLog::new(5);
        log.push("a");
        log.push("b");
        assert_eq!(log.pop(), Some("b"));
        assert_eq!(log.len(), 1);
        assert_eq!(log.pop(), Some("a"));
        assert_eq!(log.pop(), None);
    }

    #[test]
    fn shrink_capacity_truncates() {
        let mut log = BoundedLog::new(10);
        for i in 0..10 {
            log.push(i);
        }
        log.set_capacity(4);
        assert_eq!(log.len(), 4);
        assert_eq!(log.iter().copied().collect::<Vec<_>>(), vec![9, 8, 7, 6]);
    }

    #[test]
    fn roll_history_defaults_to_ten() {
        let mut history = RollHistory::default();
        let mut source = Scripted::faces(6, &[1, 2, 3, 4, 5, 6]);
        for i in 0..12 {
            let r = roll_formula("d6", &mut source).unwrap().with_label(format!("roll {i}"));
            history.push(r);
        }
        assert_eq!(history.len(), 10);
        assert_eq!(history.latest().unwrap().label(), Some("roll 11"));
        assert_eq!(history.iter().last().unwrap().label(), Some("roll 2"));
    }

    #[test]
    fn serde_round_trip() {
        let mut log = BoundedLog::new(2);
        log.push(7);
        let json = serde_json::to_string(&log).unwrap();
        let back: BoundedLog<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, log);
        assert_eq!(back.capacity(), 2);
    }

    proptest! {
        #[test]
        fn never_exceeds_capacity(capacity in 1usize..=20, pushes in 0usize..=60) {
            let mut log = BoundedLog::new(capacity);
            for i in 0..pushes {
                log.push(i);
            }
            prop_assert_eq!(log.len(), pushes.min(capacity));
            let expected: Vec<usize> = (0..pushes).rev().take(capacity).collect();
            prop_assert_eq!(log.iter().copied().collect::<Vec<_>>(), expected);
        }
    }
}
