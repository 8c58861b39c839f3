use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use tracing::warn;

use roster_core::{AddOutcome, Roster, RosterConfig, RosterError, RosterManager};

/// Whether the menu loop keeps going after a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub fn run(config: &RosterConfig) -> Result<(), String> {
    let mut roster = RosterManager::open(config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(&mut roster, &config.data_file, stdin.lock(), stdout.lock())
}

/// Drive the menu over arbitrary input and output streams.
pub fn run_with<R, I, W>(roster: &mut R, data_file: &Path, input: I, out: W) -> Result<(), String>
where
    R: Roster,
    I: BufRead,
    W: Write,
{
    let mut menu = MenuSession {
        roster,
        data_file,
        input,
        out,
    };
    menu.run()
}

struct MenuSession<'a, R, I, W> {
    roster: &'a mut R,
    data_file: &'a Path,
    input: I,
    out: W,
}

impl<R: Roster, I: BufRead, W: Write> MenuSession<'_, R, I, W> {
    fn run(&mut self) -> Result<(), String> {
        loop {
            self.display_menu()?;
            let Some(choice) = self.prompt("Enter your choice (1-6): ")? else {
                // EOF behaves like choosing Exit.
                self.say("")?;
                self.do_exit()?;
                return Ok(());
            };

            let flow = match choice.trim() {
                "1" => self.do_add()?,
                "2" => self.do_quit()?,
                "3" => self.do_list_active()?,
                "4" => self.do_list_inactive()?,
                "5" => self.do_pick()?,
                "6" => self.do_exit()?,
                _ => {
                    self.say("Invalid choice! Please enter a number between 1 and 6.".yellow())?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                return Ok(());
            }
        }
    }

    fn display_menu(&mut self) -> Result<(), String> {
        self.say("")?;
        self.say("===== RANDOM USER PICKER =====".bold())?;
        self.say("1. Add a user")?;
        self.say("2. I quit")?;
        self.say("3. List active players")?;
        self.say("4. List inactive players")?;
        self.say("5. Pick a random user")?;
        self.say("6. Exit")?;
        self.say("============================".bold())
    }

    fn do_add(&mut self) -> Result<Flow, String> {
        let name = self.prompt("Enter user name: ")?.unwrap_or_default();
        let name = name.trim();

        match self.roster.add(name) {
            Ok(AddOutcome::Added) => {
                self.say(format!("User '{name}' added successfully!").green())?;
                self.save()?;
            }
            Ok(AddOutcome::Reactivated(user)) => {
                self.say(
                    format!(
                        "User '{name}' reactivated with {} previous picks!",
                        user.times_picked
                    )
                    .green(),
                )?;
                self.save()?;
            }
            Ok(AddOutcome::AlreadyActive) => {
                self.say(format!("User '{name}' is already active!").yellow())?;
            }
            Err(RosterError::EmptyName) => {
                self.say("Name cannot be empty!".yellow())?;
            }
            Err(e) => self.say(e.to_string().yellow())?,
        }
        Ok(Flow::Continue)
    }

    fn do_quit(&mut self) -> Result<Flow, String> {
        if self.roster.active_count() == 0 {
            self.say("No active users!".yellow())?;
            return Ok(Flow::Continue);
        }
        if self.roster.last_selected().is_none() {
            self.say(
                "No user has been selected yet! Use option 5 to pick a random user first."
                    .yellow(),
            )?;
            return Ok(Flow::Continue);
        }

        let name = self
            .prompt("Enter your name to confirm quitting: ")?
            .unwrap_or_default();
        let name = name.trim();

        match self.roster.quit(name) {
            Ok(()) => {
                self.say(format!("User '{name}' has quit after being selected!").green())?;
                self.save()?;
            }
            Err(RosterError::NotLastSelected { last_selected, .. }) => {
                self.say(
                    format!("Only the last selected user ({last_selected}) can quit!").yellow(),
                )?;
            }
            Err(e) => self.say(e.to_string().yellow())?,
        }
        Ok(Flow::Continue)
    }

    fn do_list_active(&mut self) -> Result<Flow, String> {
        let lines = numbered(self.roster.active());
        if lines.is_empty() {
            self.say("No active players!")?;
        } else {
            self.say("")?;
            self.say("Active Players:".bold())?;
            for line in lines {
                self.say(line)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn do_list_inactive(&mut self) -> Result<Flow, String> {
        let lines = numbered(self.roster.inactive());
        if lines.is_empty() {
            self.say("No inactive players!")?;
        } else {
            self.say("")?;
            self.say("Inactive Players (Previous Players):".bold())?;
            for line in lines {
                self.say(line)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn do_pick(&mut self) -> Result<Flow, String> {
        let Some(picked) = self.roster.pick_random().map(ToString::to_string) else {
            self.say("No active users to pick from!".yellow())?;
            return Ok(Flow::Continue);
        };

        self.say("")?;
        self.say(
            format!("\u{1f389} Randomly selected: {picked} \u{1f389}")
                .magenta()
                .bold(),
        )?;
        self.say("(This user can now use 'I quit' option)")?;
        self.save()?;

        if self.roster.active_count() == 1 {
            let last = self.roster.active()[0].to_string();
            self.say("")?;
            self.say(format!("Only one active user remains: {last}").cyan())?;
            self.roster.move_all_active_to_inactive();
            self.say("Moving all active players to inactive list...")?;
            self.say("Saving all user stats and exiting...")?;
            self.save()?;
            return Ok(Flow::Exit);
        }
        Ok(Flow::Continue)
    }

    fn do_exit(&mut self) -> Result<Flow, String> {
        let moved = self.roster.move_all_active_to_inactive();
        self.say(format!(
            "Moving all {moved} active players to inactive list..."
        ))?;
        self.say("Saving all user stats and exiting...")?;
        self.save()?;
        Ok(Flow::Exit)
    }

    /// Save to the data file. Failure is reported, never fatal.
    fn save(&mut self) -> Result<(), String> {
        if let Err(e) = self.roster.save(self.data_file) {
            warn!(error = %e, "save failed");
            self.say(format!("Could not save users: {e}").red())?;
        }
        Ok(())
    }

    /// Print `text` and read one line. `None` on end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>, String> {
        write!(self.out, "{text}").map_err(|e| e.to_string())?;
        self.out.flush().map_err(|e| e.to_string())?;

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(line.trim_end_matches(['\r', '\n']).to_string())),
            Err(e) => Err(e.to_string()),
        }
    }

    fn say(&mut self, line: impl Display) -> Result<(), String> {
        writeln!(self.out, "{line}").map_err(|e| e.to_string())
    }
}

/// `1. name (Picked n times)` lines.
fn numbered(users: &[roster_core::User]) -> Vec<String> {
    users
        .iter()
        .enumerate()
        .map(|(i, u)| format!("{}. {u}", i + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::ScriptedSelector;
    use tempfile::TempDir;

    fn drive(roster: &mut RosterManager, path: &Path, script: &str) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        run_with(roster, path, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn scripted(indices: &[usize]) -> RosterManager {
        RosterManager::with_selector(ScriptedSelector::new(indices.iter().copied()))
    }

    #[test]
    fn add_and_list() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        let mut roster = scripted(&[]);
        let out = drive(&mut roster, &path, "1\nAlice\n1\nalice\n3\n6\n");

        assert!(out.contains("User 'Alice' added successfully!"));
        assert!(out.contains("User 'alice' is already active!"));
        assert!(out.contains("1. Alice (Picked 0 times)"));
        assert!(out.contains("Moving all 1 active players to inactive list..."));
        assert_eq!(roster.inactive_count(), 1);
        assert!(path.exists());
    }

    #[test]
    fn empty_name_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        let mut roster = scripted(&[]);
        let out = drive(&mut roster, &path, "1\n   \n6\n");
        assert!(out.contains("Name cannot be empty!"));
        assert_eq!(roster.inactive_count(), 0);
    }

    #[test]
    fn quit_requires_selection() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        let mut roster = scripted(&[]);
        let out = drive(&mut roster, &path, "2\n1\nAlice\n2\n6\n");
        assert!(out.contains("No active users!"));
        assert!(out.contains("No user has been selected yet!"));
    }

    #[test]
    fn scenario_pick_then_quit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        let mut roster = scripted(&[0]);
        let out = drive(
            &mut roster,
            &path,
            "1\nAlice\n1\nBob\n1\nCarol\n5\n2\nBob\n2\nalice\n4\n6\n",
        );

        assert!(out.contains("Randomly selected: Alice (Picked 1 times)"));
        assert!(out.contains("Only the last selected user (Alice) can quit!"));
        assert!(out.contains("User 'alice' has quit after being selected!"));
        assert!(out.contains("Inactive Players (Previous Players):"));
        assert!(out.contains("1. Alice (Picked 1 times)"));
        assert!(out.contains("Moving all 2 active players to inactive list..."));

        let names: Vec<&str> = roster.inactive().iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn pick_with_no_users() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        let mut roster = scripted(&[]);
        let out = drive(&mut roster, &path, "5\n6\n");
        assert!(out.contains("No active users to pick from!"));
    }

    #[test]
    fn picking_the_last_user_ends_the_game() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        let mut roster = scripted(&[0]);
        // Choice 3 after the pick is never reached.
        let out = drive(&mut roster, &path, "1\nSolo\n5\n3\n");
        assert!(out.contains("Only one active user remains: Solo (Picked 1 times)"));
        assert!(!out.contains("Active Players:"));
        assert_eq!(roster.active_count(), 0);
        assert_eq!(roster.inactive()[0].times_picked, 1);
    }

    #[test]
    fn reactivation_reports_previous_picks() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        let mut roster = scripted(&[0, 0]);
        let out = drive(
            &mut roster,
            &path,
            "1\nAlice\n1\nBob\n5\n2\nAlice\n1\nALICE\n6\n",
        );
        assert!(out.contains("User 'ALICE' reactivated with 1 previous picks!"));
    }

    #[test]
    fn invalid_choice() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        let mut roster = scripted(&[]);
        let out = drive(&mut roster, &path, "9\n6\n");
        assert!(out.contains("Invalid choice! Please enter a number between 1 and 6."));
    }

    #[test]
    fn eof_saves_and_exits() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        let mut roster = scripted(&[]);
        let out = drive(&mut roster, &path, "1\nAlice\n");
        assert!(out.contains("Moving all 1 active players to inactive list..."));
        let mut reloaded = scripted(&[]);
        reloaded.load(&path).unwrap();
        assert_eq!(reloaded.inactive()[0].name, "Alice");
    }

    #[test]
    fn save_failure_is_reported_not_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("users.json");
        let mut roster = scripted(&[]);
        let out = drive(&mut roster, &path, "1\nAlice\n6\n");
        assert!(out.contains("Could not save users:"));
        assert!(out.contains("Saving all user stats and exiting..."));
    }
}
