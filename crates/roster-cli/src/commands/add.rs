use colored::Colorize;

use roster_core::{AddOutcome, Roster, RosterConfig};

pub fn run(config: &RosterConfig, name: &str) -> Result<(), String> {
    let mut roster = super::load_roster(config)?;
    let name = name.trim();

    match roster.add(name).map_err(|e| e.to_string())? {
        AddOutcome::Added => {
            println!("  {} {name}", "Added".green().bold());
        }
        AddOutcome::Reactivated(user) => {
            println!(
                "  {} {} ({} previous picks)",
                "Reactivated".green().bold(),
                user.name,
                user.times_picked
            );
        }
        AddOutcome::AlreadyActive => {
            return Err(format!("user '{name}' is already active"));
        }
    }

    super::save_roster(&roster, config)
}
