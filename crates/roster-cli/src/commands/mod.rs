pub mod add;
pub mod list;
pub mod menu;
pub mod reset;

use roster_core::{Roster, RosterConfig, RosterManager};

/// Load the roster for a one-shot command.
///
/// Unlike the menu, a broken data file is an error here: the command would
/// otherwise save a near-empty roster over it.
fn load_roster(config: &RosterConfig) -> Result<RosterManager, String> {
    let mut roster = RosterManager::from_config(config);
    roster
        .load(&config.data_file)
        .map_err(|e| format!("failed to load roster: {e}"))?;
    Ok(roster)
}

/// Save the roster, turning failure into a command error.
fn save_roster(roster: &impl Roster, config: &RosterConfig) -> Result<(), String> {
    roster
        .save(&config.data_file)
        .map_err(|e| format!("failed to save roster: {e}"))
}
