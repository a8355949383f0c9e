//! Configuration for a character session.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tally_mechanics::{AssistRule, PRESET_CAPACITY, ROLL_HISTORY_CAPACITY};

use crate::undo::ACTION_HISTORY_CAPACITY;

/// Configuration for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    /// Award 1 XP whenever a stat check misses.
    pub auto_xp_on_miss: bool,
    /// RNG seed for reproducible rolls. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// How a successful Aid/Interfere shifts the pending roll.
    pub assist_rule: AssistRule,
    /// Rolls kept in the roll history.
    pub roll_history_capacity: usize,
    /// Snapshots kept for undo.
    pub action_history_capacity: usize,
    /// Presets kept in the preset book.
    pub preset_capacity: usize,
    /// Delay before a roll is revealed, in milliseconds.
    pub reveal_delay_ms: u64,
    /// How long transient messages stay up, in milliseconds.
    pub notice_ms: u64,
    /// How long the Chrono-Retcon message stays up, in milliseconds.
    pub retcon_notice_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auto_xp_on_miss: true,
            seed: None,
            assist_rule: AssistRule::default(),
            roll_history_capacity: ROLL_HISTORY_CAPACITY,
            action_history_capacity: ACTION_HISTORY_CAPACITY,
            preset_capacity: PRESET_CAPACITY,
            reveal_delay_ms: 350,
            notice_ms: 2000,
            retcon_notice_ms: 3000,
        }
    }
}

impl SessionConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Turn XP-on-miss on or off.
    pub fn with_auto_xp_on_miss(mut self, enabled: bool) -> Self {
        self.auto_xp_on_miss = enabled;
        self
    }

    /// Set the Aid/Interfere rule.
    pub fn with_assist_rule(mut self, rule: AssistRule) -> Self {
        self.assist_rule = rule;
        self
    }

    /// Set the number of undo snapshots kept (at least 1).
    pub fn with_action_history_capacity(mut self, capacity: usize) -> Self {
        self.action_history_capacity = capacity.max(1);
        self
    }

    /// Delay before a roll is revealed.
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    /// How long transient messages stay up.
    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_ms)
    }

    /// How long the Chrono-Retcon message stays up.
    pub fn retcon_notice_duration(&self) -> Duration {
        Duration::from_millis(self.retcon_notice_ms)
    }
}
