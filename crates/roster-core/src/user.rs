//! A single participant and their pick counters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A participant tracked across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Display name, case preserved.
    pub name: String,
    /// All-time number of picks.
    pub times_picked: u64,
    /// Picks since this process started. Older data files omit it.
    #[serde(default)]
    pub picked_this_instance: u64,
}

impl User {
    /// Create a user with both counters at zero.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            times_picked: 0,
            picked_this_instance: 0,
        }
    }

    /// Record a pick on both counters. Counters stop at `u64::MAX`.
    pub fn record_pick(&mut self) {
        self.times_picked = self.times_picked.saturating_add(1);
        self.picked_this_instance = self.picked_this_instance.saturating_add(1);
    }

    /// Zero both counters.
    pub fn reset_counters(&mut self) {
        self.times_picked = 0;
        self.picked_this_instance = 0;
    }

    /// Case-insensitive name comparison.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Picked {} times)", self.name, self.times_picked)
    }
}
