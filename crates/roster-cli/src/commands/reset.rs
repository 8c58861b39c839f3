use colored::Colorize;

use roster_core::{Roster, RosterConfig};

pub fn run(config: &RosterConfig) -> Result<(), String> {
    let mut roster = super::load_roster(config)?;
    roster.reset_all_counters();
    super::save_roster(&roster, config)?;

    let total = roster.active_count() + roster.inactive_count();
    println!(
        "  {} pick counters for {total} user{}",
        "Reset".bold(),
        if total == 1 { "" } else { "s" }
    );
    Ok(())
}
