//! Core roster model for the random user picker.
//!
//! Tracks active and inactive users, picks one uniformly at random, lets only
//! the last picked user quit, and persists everything to a JSON file. Front
//! ends drive it through the [`Roster`] trait.

pub mod config;
pub mod error;
pub mod logging;
pub mod roster;
pub mod selector;
pub mod storage;
pub mod user;

pub use config::RosterConfig;
pub use error::{RosterError, RosterResult};
pub use roster::{AddOutcome, Roster, RosterManager};
pub use selector::{ScriptedSelector, Selector};
pub use storage::LoadOutcome;
pub use user::User;
