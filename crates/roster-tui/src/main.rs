//! Standalone TUI binary for the random user picker.

use std::path::PathBuf;
use std::process;

use clap::Parser;

use roster_core::config::DEFAULT_DATA_FILE;
use roster_core::logging::{LogConfig, init_logging};
use roster_core::{RosterConfig, RosterManager};
use roster_tui::app::RosterApp;

#[derive(Parser)]
#[command(
    name = "roster-tui",
    about = "Terminal UI for picking random users",
    version
)]
struct Args {
    /// Roster data file
    #[arg(long, default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// RNG seed for reproducible picks
    #[arg(long)]
    seed: Option<u64>,

    /// Log filter (e.g. "debug", "roster_core=trace")
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Write logs to this file; without it the TUI does not log
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    // The terminal belongs to the UI, so logs only ever go to a file.
    if let Some(file) = args.log_file {
        let log = LogConfig {
            level: args.log_level,
            file: Some(file),
        };
        if let Err(e) = init_logging(&log) {
            eprintln!("warning: logging disabled: {e}");
        }
    }

    let mut config = RosterConfig::default().with_data_file(&args.data_file);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let roster = RosterManager::open(&config);
    let app = RosterApp::new(roster, args.data_file);

    if let Err(e) = roster_tui::terminal::run(app) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
