//! Configuration shared by the front ends.

use std::path::{Path, PathBuf};

/// Default data file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "users_data.json";

/// Where the roster lives and how picks are seeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterConfig {
    /// Path of the JSON data file.
    pub data_file: PathBuf,
    /// RNG seed for reproducible picks. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            seed: None,
        }
    }
}

impl RosterConfig {
    /// Set the data file path.
    pub fn with_data_file(mut self, path: impl AsRef<Path>) -> Self {
        self.data_file = path.as_ref().to_path_buf();
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
