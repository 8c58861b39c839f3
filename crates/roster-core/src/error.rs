//! Error types for roster operations.

use std::path::PathBuf;

/// Alias for `Result<T, RosterError>`.
pub type RosterResult<T> = Result<T, RosterError>;

/// Errors that can occur when manipulating or persisting a roster.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    /// A user name was empty after trimming.
    #[error("name cannot be empty")]
    EmptyName,

    /// A quit was attempted before anyone was picked.
    #[error("no user has been selected yet")]
    NoSelection,

    /// A quit was attempted by someone other than the last selected user.
    #[error("only the last selected user (\"{last_selected}\") can quit, not \"{name}\"")]
    NotLastSelected {
        /// The name that attempted to quit.
        name: String,
        /// The name of the user who is allowed to quit.
        last_selected: String,
    },

    /// Reading or writing the data file failed.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        /// The data file involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The data file is not a valid roster document.
    #[error("malformed roster file {}: {source}", path.display())]
    Parse {
        /// The data file involved.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}
