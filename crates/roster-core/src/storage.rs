//! JSON persistence for the roster.
//!
//! The current document is an object with `active` and `inactive` arrays.
//! Older files hold a bare array of users, all of them active. The shape is
//! sniffed once here and both forms come out as a [`RosterDocument`].

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{RosterError, RosterResult};
use crate::user::User;

/// What a load found on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No data file exists yet.
    NoData,
    /// The file was read; counts of the users now in each list.
    Loaded {
        /// Number of active users loaded.
        active: usize,
        /// Number of inactive users loaded.
        inactive: usize,
    },
}

/// The two user lists as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterDocument {
    /// Users eligible for picking.
    #[serde(default)]
    pub active: Vec<User>,
    /// Users who have quit.
    #[serde(default)]
    pub inactive: Vec<User>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredRoster {
    Legacy(Vec<User>),
    Current(RosterDocument),
}

impl From<StoredRoster> for RosterDocument {
    fn from(stored: StoredRoster) -> Self {
        match stored {
            StoredRoster::Legacy(active) => Self {
                active,
                inactive: Vec::new(),
            },
            StoredRoster::Current(doc) => doc,
        }
    }
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    active: &'a [User],
    inactive: &'a [User],
}

/// Parse a roster document from JSON text, accepting both stored shapes.
pub fn parse_document(text: &str) -> Result<RosterDocument, serde_json::Error> {
    serde_json::from_str::<StoredRoster>(text).map(RosterDocument::from)
}

/// Render the roster as pretty JSON with four-space indentation.
pub fn render_document(active: &[User], inactive: &[User]) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    DocumentRef { active, inactive }.serialize(&mut ser)?;
    // serde_json only emits valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write the roster to `path`, replacing any existing file.
pub fn save(path: &Path, active: &[User], inactive: &[User]) -> RosterResult<()> {
    let text = render_document(active, inactive).map_err(|e| RosterError::Io {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    fs::write(path, text).map_err(|source| RosterError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        active = active.len(),
        inactive = inactive.len(),
        "saved roster"
    );
    Ok(())
}

/// Read the roster stored at `path`.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn load(path: &Path) -> RosterResult<Option<RosterDocument>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(path = %path.display(), "no roster file, starting fresh");
            return Ok(None);
        }
        Err(source) => {
            return Err(RosterError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let mut doc = parse_document(&text).map_err(|source| RosterError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    for name in drop_duplicate_names(&mut doc) {
        warn!(path = %path.display(), name = %name, "dropped duplicate user name in roster file");
    }
    info!(
        path = %path.display(),
        active = doc.active.len(),
        inactive = doc.inactive.len(),
        "loaded roster"
    );
    Ok(Some(doc))
}

/// Keep only the first record of each name, ignoring case, with active users
/// ahead of inactive ones. Returns the names of the dropped records.
fn drop_duplicate_names(doc: &mut RosterDocument) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut dropped = Vec::new();
    for list in [&mut doc.active, &mut doc.inactive] {
        list.retain(|user| {
            let first = seen.insert(user.name.to_lowercase());
            if !first {
                dropped.push(user.name.clone());
            }
            first
        });
    }
    dropped
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn user(name: &str, times: u64, session: u64) -> User {
        User {
            name: name.to_string(),
            times_picked: times,
            picked_this_instance: session,
        }
    }

    #[test]
    fn render_matches_stored_layout() {
        let text = render_document(&[user("Alice", 1, 1)], &[]).unwrap();
        insta::assert_snapshot!(text, @r#"
        {
            "active": [
                {
                    "name": "Alice",
                    "times_picked": 1,
                    "picked_this_instance": 1
                }
            ],
            "inactive": []
        }
        "#);
    }

    #[test]
    fn parse_current_shape() {
        let doc = parse_document(
            r#"{
                "active": [{"name": "A", "times_picked": 1, "picked_this_instance": 1}],
                "inactive": [{"name": "B", "times_picked": 4, "picked_this_instance": 0}]
            }"#,
        )
        .unwrap();
        assert_eq!(doc.active, vec![user("A", 1, 1)]);
        assert_eq!(doc.inactive, vec![user("B", 4, 0)]);
    }

    #[test]
    fn parse_legacy_shape() {
        let doc = parse_document(
            r#"[
                {"name": "A", "times_picked": 1},
                {"name": "B", "times_picked": 2},
                {"name": "C", "times_picked": 3}
            ]"#,
        )
        .unwrap();
        assert_eq!(doc.active.len(), 3);
        assert!(doc.inactive.is_empty());
        assert_eq!(doc.active[2], user("C", 3, 0));
    }

    #[test]
    fn parse_missing_lists_default_empty() {
        let doc = parse_document(r#"{"inactive": [{"name": "B", "times_picked": 0}]}"#).unwrap();
        assert!(doc.active.is_empty());
        assert_eq!(doc.inactive.len(), 1);
    }

    #[test]
    fn parse_rejects_other_shapes() {
        assert!(parse_document("42").is_err());
        assert!(parse_document(r#""users""#).is_err());
        assert!(parse_document(r#"[{"times_picked": 1}]"#).is_err());
        assert!(parse_document("{ not json").is_err());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        save(&path, &[user("A", 2, 2)], &[user("B", 5, 0)]).unwrap();

        let doc = load(&path).unwrap().unwrap();
        assert_eq!(doc.active, vec![user("A", 2, 2)]);
        assert_eq!(doc.inactive, vec![user("B", 5, 0)]);
    }

    #[test]
    fn save_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        save(&path, &[user("A", 0, 0), user("B", 0, 0)], &[]).unwrap();
        save(&path, &[], &[]).unwrap();
        let doc = load(&path).unwrap().unwrap();
        assert_eq!(doc, RosterDocument::default());
    }

    #[test]
    fn save_to_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope").join("users.json");
        assert!(matches!(save(&path, &[], &[]), Err(RosterError::Io { .. })));
    }

    #[test]
    fn load_missing_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(load(&dir.path().join("absent.json")).unwrap().is_none());
    }

    #[test]
    fn load_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(load(dir.path()), Err(RosterError::Io { .. })));
    }

    #[test]
    fn duplicate_names_across_lists_keep_first() {
        let mut doc = RosterDocument {
            active: vec![user("Alice", 2, 0), user("Dan", 0, 0), user("dan", 9, 0)],
            inactive: vec![user("ALICE", 1, 0), user("Bob", 0, 0)],
        };
        assert_eq!(
            drop_duplicate_names(&mut doc),
            vec!["dan".to_string(), "ALICE".to_string()]
        );
        assert_eq!(doc.active, vec![user("Alice", 2, 0), user("Dan", 0, 0)]);
        assert_eq!(doc.inactive, vec![user("Bob", 0, 0)]);
    }

    #[test]
    fn load_drops_duplicate_names() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        fs::write(
            &path,
            r#"{
                "active": [{"name": "Alice", "times_picked": 4}],
                "inactive": [{"name": "alice", "times_picked": 1}, {"name": "Bob", "times_picked": 2}]
            }"#,
        )
        .unwrap();

        let doc = load(&path).unwrap().unwrap();
        assert_eq!(doc.active, vec![user("Alice", 4, 0)]);
        assert_eq!(doc.inactive, vec![user("Bob", 2, 0)]);
    }
}
