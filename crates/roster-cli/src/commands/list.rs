use comfy_table::{ContentArrangement, Table};

use roster_core::{Roster, RosterConfig};

pub fn run(config: &RosterConfig, inactive: bool) -> Result<(), String> {
    let roster = super::load_roster(config)?;

    let (users, label) = if inactive {
        (roster.inactive(), "inactive")
    } else {
        (roster.active(), "active")
    };

    if users.is_empty() {
        println!("  No {label} users.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Name", "This session", "All time"]);

    for (i, user) in users.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            user.name.clone(),
            user.picked_this_instance.to_string(),
            user.times_picked.to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} {label} user{}",
        users.len(),
        if users.len() == 1 { "" } else { "s" }
    );

    Ok(())
}
