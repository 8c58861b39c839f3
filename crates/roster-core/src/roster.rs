//! The roster manager: active/inactive partition, random picks and the quit gate.

use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, warn};

use crate::config::RosterConfig;
use crate::error::{RosterError, RosterResult};
use crate::selector::Selector;
use crate::storage::{self, LoadOutcome};
use crate::user::User;

/// Result of [`Roster::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new user was appended to the active list.
    Added,
    /// An inactive user was moved back to the active list with their counters.
    Reactivated(User),
    /// A user with that name is already active. Nothing changed.
    AlreadyActive,
}

/// Operations a front end may perform on a roster.
///
/// Front ends hold a `Roster` and never touch the underlying collections
/// except through the read accessors.
pub trait Roster {
    /// Add a user by name, or reactivate an inactive user with that name.
    fn add(&mut self, name: &str) -> RosterResult<AddOutcome>;

    /// Pick an active user uniformly at random and record the pick.
    ///
    /// Returns `None` when nobody is active.
    fn pick_random(&mut self) -> Option<&User>;

    /// Move the last selected user to the inactive list.
    ///
    /// Only the last selected user may quit, matched case-insensitively.
    fn quit(&mut self, name: &str) -> RosterResult<()>;

    /// Move every active user to the inactive list. Returns the number moved.
    fn move_all_active_to_inactive(&mut self) -> usize;

    /// Zero both counters of every user. Membership is unchanged.
    fn reset_all_counters(&mut self);

    /// Active users in insertion order.
    fn active(&self) -> &[User];

    /// Inactive users in the order they left.
    fn inactive(&self) -> &[User];

    /// The user picked most recently, while still active.
    fn last_selected(&self) -> Option<&User>;

    /// Write the roster to `path`.
    fn save(&self, path: &Path) -> RosterResult<()>;

    /// Replace the roster with the contents of `path`.
    fn load(&mut self, path: &Path) -> RosterResult<LoadOutcome>;

    /// Number of active users.
    fn active_count(&self) -> usize {
        self.active().len()
    }

    /// Number of inactive users.
    fn inactive_count(&self) -> usize {
        self.inactive().len()
    }
}

/// In-memory roster backed by a pluggable [`Selector`].
pub struct RosterManager {
    active: Vec<User>,
    inactive: Vec<User>,
    // Position in `active`. Only quit and move-all remove from `active`, and
    // both clear this, so the position never goes stale.
    last_selected: Option<usize>,
    selector: Box<dyn Selector>,
}

impl RosterManager {
    /// Create an empty roster picking with an entropy-seeded RNG.
    pub fn new() -> Self {
        Self::with_selector(StdRng::from_os_rng())
    }

    /// Create an empty roster picking with the given selector.
    pub fn with_selector(selector: impl Selector + 'static) -> Self {
        Self {
            active: Vec::new(),
            inactive: Vec::new(),
            last_selected: None,
            selector: Box::new(selector),
        }
    }

    /// Create an empty roster whose RNG honours the configured seed.
    pub fn from_config(config: &RosterConfig) -> Self {
        match config.seed {
            Some(seed) => Self::with_selector(StdRng::seed_from_u64(seed)),
            None => Self::new(),
        }
    }

    /// Create a roster from the config and load its data file.
    ///
    /// A missing file means a fresh start. A broken file is logged and the
    /// roster starts empty.
    pub fn open(config: &RosterConfig) -> Self {
        let mut roster = Self::from_config(config);
        if let Err(e) = roster.load(&config.data_file) {
            warn!(error = %e, "could not load roster, starting empty");
        }
        roster
    }

    fn position_in(users: &[User], name: &str) -> Option<usize> {
        users.iter().position(|u| u.is_named(name))
    }
}

impl Default for RosterManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Roster for RosterManager {
    fn add(&mut self, name: &str) -> RosterResult<AddOutcome> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RosterError::EmptyName);
        }

        if Self::position_in(&self.active, name).is_some() {
            debug!(name, "add rejected, already active");
            return Ok(AddOutcome::AlreadyActive);
        }

        if let Some(idx) = Self::position_in(&self.inactive, name) {
            let user = self.inactive.remove(idx);
            debug!(name = %user.name, times_picked = user.times_picked, "reactivated user");
            let snapshot = user.clone();
            self.active.push(user);
            return Ok(AddOutcome::Reactivated(snapshot));
        }

        debug!(name, "added user");
        self.active.push(User::new(name));
        Ok(AddOutcome::Added)
    }

    fn pick_random(&mut self) -> Option<&User> {
        if self.active.is_empty() {
            return None;
        }
        let idx = self.selector.select_index(self.active.len());
        self.last_selected = Some(idx);
        let user = &mut self.active[idx];
        user.record_pick();
        debug!(name = %user.name, times_picked = user.times_picked, "picked user");
        Some(user)
    }

    fn quit(&mut self, name: &str) -> RosterResult<()> {
        let Some(idx) = self.last_selected else {
            return Err(RosterError::NoSelection);
        };
        let selected = &self.active[idx];
        if !selected.is_named(name.trim()) {
            return Err(RosterError::NotLastSelected {
                name: name.trim().to_string(),
                last_selected: selected.name.clone(),
            });
        }

        let user = self.active.remove(idx);
        debug!(name = %user.name, "user quit");
        self.inactive.push(user);
        self.last_selected = None;
        Ok(())
    }

    fn move_all_active_to_inactive(&mut self) -> usize {
        let count = self.active.len();
        self.inactive.append(&mut self.active);
        self.last_selected = None;
        debug!(count, "moved all active users to inactive");
        count
    }

    fn reset_all_counters(&mut self) {
        for user in self.active.iter_mut().chain(self.inactive.iter_mut()) {
            user.reset_counters();
        }
        debug!("reset all counters");
    }

    fn active(&self) -> &[User] {
        &self.active
    }

    fn inactive(&self) -> &[User] {
        &self.inactive
    }

    fn last_selected(&self) -> Option<&User> {
        self.last_selected.map(|idx| &self.active[idx])
    }

    fn save(&self, path: &Path) -> RosterResult<()> {
        storage::save(path, &self.active, &self.inactive)
    }

    fn load(&mut self, path: &Path) -> RosterResult<LoadOutcome> {
        let Some(mut doc) = storage::load(path)? else {
            return Ok(LoadOutcome::NoData);
        };

        // Session counters never survive a restart.
        for user in doc.active.iter_mut().chain(doc.inactive.iter_mut()) {
            user.picked_this_instance = 0;
        }

        self.active = doc.active;
        self.inactive = doc.inactive;
        self.last_selected = None;

        Ok(LoadOutcome::Loaded {
            active: self.active.len(),
            inactive: self.inactive.len(),
        })
    }
}
