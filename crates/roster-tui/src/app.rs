//! Application state and actions for the roster TUI.
//!
//! Every action goes through the [`Roster`] contract; this module only owns
//! presentation state (highlight, popups, status line).

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent};
use tracing::warn;

use roster_core::{AddOutcome, Roster, RosterError, User};

/// Minimum number of active users before a pick is allowed.
pub const MIN_USERS_TO_PICK: usize = 2;

/// Which user list is shown on the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListTab {
    /// Users eligible for picking.
    Active,
    /// Users who have quit.
    Inactive,
}

impl ListTab {
    /// Index in the tab strip.
    pub fn index(self) -> usize {
        match self {
            ListTab::Active => 0,
            ListTab::Inactive => 1,
        }
    }

    /// The other tab.
    pub fn toggle(self) -> ListTab {
        match self {
            ListTab::Active => ListTab::Inactive,
            ListTab::Inactive => ListTab::Active,
        }
    }
}

/// What happens once a message popup is dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterPopup {
    /// Back to the main screen.
    Resume,
    /// Leave the application.
    Exit,
}

/// A modal overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Popup {
    /// An informational message with an OK button.
    Message {
        /// Popup title.
        title: String,
        /// Message body.
        body: String,
        /// Action taken on dismissal.
        then: AfterPopup,
    },
    /// Text input for a new user name.
    AddUser {
        /// Current input text.
        input: String,
    },
}

/// Main application state.
pub struct RosterApp<R: Roster> {
    /// The roster being driven.
    pub roster: R,
    /// Data file saved to at each save point.
    pub data_file: PathBuf,
    /// Currently shown user list.
    pub tab: ListTab,
    /// Highlighted row in the shown list.
    pub highlight: usize,
    /// Open popup, if any.
    pub popup: Option<Popup>,
    /// Last status message.
    pub status: String,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl<R: Roster> RosterApp<R> {
    /// Create the app around an already loaded roster.
    pub fn new(roster: R, data_file: impl Into<PathBuf>) -> Self {
        Self {
            roster,
            data_file: data_file.into(),
            tab: ListTab::Active,
            highlight: 0,
            popup: None,
            status: "Ready".to_string(),
            should_quit: false,
        }
    }

    /// Users in the currently shown list.
    pub fn shown_users(&self) -> &[User] {
        match self.tab {
            ListTab::Active => self.roster.active(),
            ListTab::Inactive => self.roster.inactive(),
        }
    }

    /// Whether the "I quit" action is available.
    pub fn can_quit(&self) -> bool {
        self.roster.last_selected().is_some()
    }

    /// Counts line for the status bar.
    pub fn counts_line(&self) -> String {
        format!(
            "Active Users: {} | Inactive Users: {}",
            self.roster.active_count(),
            self.roster.inactive_count()
        )
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Pick a random active user.
    pub fn pick(&mut self) {
        if self.roster.active_count() < MIN_USERS_TO_PICK {
            self.show_message(
                "Not Enough Users",
                "You need at least 2 active users to pick.",
                AfterPopup::Resume,
            );
            return;
        }
        self.status = match self.roster.pick_random() {
            Some(user) => format!("Picked user: {}", user.name),
            None => "No active users to pick from".to_string(),
        };
    }

    /// Let the last selected user quit.
    pub fn quit_selected(&mut self) {
        let Some(name) = self.roster.last_selected().map(|u| u.name.clone()) else {
            self.status = "No user selected".to_string();
            return;
        };
        if let Err(e) = self.roster.quit(&name) {
            self.status = e.to_string();
            return;
        }
        self.status = format!("User {name} has quit");
        self.clamp_highlight();

        if self.roster.active_count() <= 1 {
            self.store_everyone();
            self.show_message(
                "Game Over",
                "Only one or no active users remain. All user stats have been saved.",
                AfterPopup::Exit,
            );
        }
    }

    /// Add a user by name, or reactivate an inactive one.
    pub fn add_user(&mut self, name: &str) {
        let name = name.trim();
        self.status = match self.roster.add(name) {
            Ok(AddOutcome::Added) => format!("Added new user: {name}"),
            Ok(AddOutcome::Reactivated(user)) => format!("Reactivated user: {}", user.name),
            Ok(AddOutcome::AlreadyActive) => format!("User {name} already exists"),
            Err(RosterError::EmptyName) => "Please enter a username".to_string(),
            Err(e) => e.to_string(),
        };
        self.clamp_highlight();
    }

    /// Reactivate the user highlighted in the inactive list.
    pub fn reactivate_highlighted(&mut self) {
        let name = match self.tab {
            ListTab::Inactive => self
                .roster
                .inactive()
                .get(self.highlight)
                .map(|u| u.name.clone()),
            ListTab::Active => None,
        };
        let Some(name) = name else {
            self.status = "Please select an inactive user first".to_string();
            return;
        };

        self.status = match self.roster.add(&name) {
            Ok(AddOutcome::Reactivated(_)) => format!("Reactivated user: {name}"),
            _ => format!("Failed to reactivate user: {name}"),
        };
        self.clamp_highlight();
    }

    /// Zero every counter and save.
    pub fn reset_all(&mut self) {
        self.roster.reset_all_counters();
        self.status = "Reset all users (both session and historical data)".to_string();
        self.save();
    }

    /// Move everyone to inactive, save and show the goodbye popup.
    pub fn save_and_exit(&mut self) {
        self.store_everyone();
        self.show_message("Goodbye", "All user stats have been saved.", AfterPopup::Exit);
    }

    fn store_everyone(&mut self) {
        let moved = self.roster.move_all_active_to_inactive();
        self.status = format!("Moved {moved} active users to inactive and saved data");
        self.save();
        self.clamp_highlight();
    }

    /// Switch between the active and inactive lists.
    pub fn switch_tab(&mut self) {
        self.tab = self.tab.toggle();
        self.highlight = 0;
    }

    /// Move the highlight by `delta` rows, clamped to the list.
    pub fn move_highlight(&mut self, delta: isize) {
        let len = self.shown_users().len();
        if len == 0 {
            self.highlight = 0;
            return;
        }
        self.highlight = self.highlight.saturating_add_signed(delta).min(len - 1);
    }

    fn clamp_highlight(&mut self) {
        let len = self.shown_users().len();
        self.highlight = self.highlight.min(len.saturating_sub(1));
    }

    fn save(&mut self) {
        if let Err(e) = self.roster.save(&self.data_file) {
            warn!(error = %e, "save failed");
            self.status = format!("Could not save users: {e}");
        }
    }

    fn show_message(&mut self, title: &str, body: &str, then: AfterPopup) {
        self.popup = Some(Popup::Message {
            title: title.to_string(),
            body: body.to_string(),
            then,
        });
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.popup.is_some() {
            self.handle_popup_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('p') | KeyCode::Enter => self.pick(),
            KeyCode::Char('x') => self.quit_selected(),
            KeyCode::Char('a') => {
                self.popup = Some(Popup::AddUser {
                    input: String::new(),
                });
            }
            KeyCode::Char('r') => self.reactivate_highlighted(),
            KeyCode::Char('R') => self.reset_all(),
            KeyCode::Tab | KeyCode::BackTab => self.switch_tab(),
            KeyCode::Down | KeyCode::Char('j') => self.move_highlight(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_highlight(-1),
            KeyCode::Char('s') | KeyCode::Char('q') => self.save_and_exit(),
            _ => {}
        }
    }

    fn handle_popup_key(&mut self, key: KeyEvent) {
        match self.popup.as_mut() {
            Some(Popup::Message { then, .. }) => {
                if matches!(
                    key.code,
                    KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')
                ) {
                    let then = *then;
                    self.popup = None;
                    match then {
                        AfterPopup::Resume => {}
                        AfterPopup::Exit => self.should_quit = true,
                    }
                }
            }
            Some(Popup::AddUser { input }) => match key.code {
                KeyCode::Enter => {
                    let name = std::mem::take(input);
                    self.popup = None;
                    self.add_user(&name);
                }
                KeyCode::Esc => self.popup = None,
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char(c) => input.push(c),
                _ => {}
            },
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use roster_core::{RosterManager, ScriptedSelector};
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with(names: &[&str], picks: &[usize], dir: &TempDir) -> RosterApp<RosterManager> {
        let mut roster =
            RosterManager::with_selector(ScriptedSelector::new(picks.iter().copied()));
        for name in names {
            roster.add(name).unwrap();
        }
        RosterApp::new(roster, dir.path().join("users.json"))
    }

    fn type_text(app: &mut RosterApp<RosterManager>, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn pick_needs_two_users() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&["Alice"], &[0], &dir);
        app.pick();
        assert!(matches!(
            app.popup,
            Some(Popup::Message { ref title, .. }) if title == "Not Enough Users"
        ));
        assert!(!app.can_quit());

        app.handle_key(key(KeyCode::Enter));
        assert!(app.popup.is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn pick_then_quit() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&["Alice", "Bob", "Carol"], &[1], &dir);
        app.handle_key(key(KeyCode::Char('p')));
        assert_eq!(app.status, "Picked user: Bob");
        assert!(app.can_quit());

        app.handle_key(key(KeyCode::Char('x')));
        assert_eq!(app.status, "User Bob has quit");
        assert!(app.popup.is_none());
        assert_eq!(app.roster.inactive()[0].name, "Bob");
        assert!(!app.can_quit());
    }

    #[test]
    fn quit_without_selection() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&["Alice", "Bob"], &[], &dir);
        app.quit_selected();
        assert_eq!(app.status, "No user selected");
        assert_eq!(app.roster.active_count(), 2);
    }

    #[test]
    fn game_over_saves_before_the_popup() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        let mut app = app_with(&["Alice", "Bob"], &[0], &dir);
        app.pick();
        app.quit_selected();
        assert!(matches!(
            app.popup,
            Some(Popup::Message { ref title, then: AfterPopup::Exit, .. }) if title == "Game Over"
        ));

        // Already on disk, so leaving with Ctrl+C loses nothing.
        assert_eq!(app.roster.active_count(), 0);
        let mut reloaded = RosterManager::with_selector(ScriptedSelector::default());
        reloaded.load(&path).unwrap();
        assert_eq!(reloaded.active_count(), 0);
        assert_eq!(reloaded.inactive_count(), 2);
        let alice = reloaded.inactive().iter().find(|u| u.name == "Alice").unwrap();
        assert_eq!(alice.times_picked, 1);

        app.handle_key(key(KeyCode::Enter));
        assert!(app.should_quit);
    }

    #[test]
    fn add_user_through_popup() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&[], &[], &dir);
        app.handle_key(key(KeyCode::Char('a')));
        type_text(&mut app, "Dax");
        app.handle_key(key(KeyCode::Backspace));
        type_text(&mut app, "na");
        assert_eq!(
            app.popup,
            Some(Popup::AddUser {
                input: "Dana".to_string()
            })
        );
        app.handle_key(key(KeyCode::Enter));
        assert!(app.popup.is_none());
        assert_eq!(app.status, "Added new user: Dana");
        assert_eq!(app.roster.active()[0].name, "Dana");
    }

    #[test]
    fn popup_keys_do_not_trigger_actions() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&["Alice", "Bob"], &[0], &dir);
        app.handle_key(key(KeyCode::Char('a')));
        type_text(&mut app, "pq");
        assert!(!app.can_quit());
        assert!(!app.should_quit);
        app.handle_key(key(KeyCode::Esc));
        assert!(app.popup.is_none());
        assert_eq!(app.roster.active_count(), 2);
    }

    #[test]
    fn add_messages() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&["Alice"], &[], &dir);
        app.add_user("alice");
        assert_eq!(app.status, "User alice already exists");
        app.add_user("  ");
        assert_eq!(app.status, "Please enter a username");
    }

    #[test]
    fn reactivate_from_inactive_tab() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&["Alice", "Bob", "Carol"], &[0], &dir);
        app.pick();
        app.quit_selected();

        app.reactivate_highlighted();
        assert_eq!(app.status, "Please select an inactive user first");

        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.tab, ListTab::Inactive);
        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(app.status, "Reactivated user: Alice");
        assert_eq!(app.roster.inactive_count(), 0);
        assert_eq!(app.roster.active()[2].times_picked, 1);
        assert_eq!(app.highlight, 0);
    }

    #[test]
    fn reset_all_saves() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&["Alice", "Bob"], &[0], &dir);
        app.pick();
        app.handle_key(key(KeyCode::Char('R')));
        assert!(app.roster.active().iter().all(|u| u.times_picked == 0));
        assert!(dir.path().join("users.json").exists());
        assert_eq!(
            app.status,
            "Reset all users (both session and historical data)"
        );
    }

    #[test]
    fn save_and_exit_moves_everyone() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&["Alice", "Bob"], &[], &dir);
        app.handle_key(key(KeyCode::Char('s')));
        assert_eq!(
            app.status,
            "Moved 2 active users to inactive and saved data"
        );
        assert_eq!(app.roster.inactive_count(), 2);
        app.handle_key(key(KeyCode::Char(' ')));
        assert!(app.should_quit);
    }

    #[test]
    fn save_failure_shows_in_status() {
        let dir = TempDir::new().unwrap();
        let mut roster = RosterManager::with_selector(ScriptedSelector::default());
        roster.add("Alice").unwrap();
        let mut app = RosterApp::new(roster, dir.path().join("nope").join("users.json"));
        app.reset_all();
        assert!(app.status.starts_with("Could not save users:"));
    }

    #[test]
    fn highlight_is_clamped() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&["A", "B", "C"], &[], &dir);
        app.move_highlight(5);
        assert_eq!(app.highlight, 2);
        app.move_highlight(-10);
        assert_eq!(app.highlight, 0);
        app.switch_tab();
        app.move_highlight(1);
        assert_eq!(app.highlight, 0);
    }

    #[test]
    fn counts_line() {
        let dir = TempDir::new().unwrap();
        let app = app_with(&["A", "B"], &[], &dir);
        assert_eq!(app.counts_line(), "Active Users: 2 | Inactive Users: 0");
    }
}
