//! Terminal UI for the random user picker.
//!
//! A ratatui front end with an action panel, the current pick, and
//! active/inactive user lists. It drives the roster only through
//! [`roster_core::Roster`].

pub mod app;
pub mod shared;
pub mod terminal;
pub mod views;
