//! CLI frontend for the random user picker.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use roster_core::RosterConfig;
use roster_core::config::DEFAULT_DATA_FILE;
use roster_core::logging::{LogConfig, init_logging};

#[derive(Parser)]
#[command(
    name = "roster",
    about = "Random user picker with persistent pick counts",
    version,
    propagate_version = true
)]
struct Cli {
    /// JSON file holding the roster
    #[arg(long, global = true, default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// RNG seed for reproducible picks
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive menu (default)
    Menu,

    /// Show the stored roster
    List {
        /// Show inactive users instead of active ones
        #[arg(short, long)]
        inactive: bool,
    },

    /// Add a user, or reactivate one who quit
    Add {
        /// User name (case-insensitive for matching)
        name: String,
    },

    /// Zero every user's pick counters
    Reset,
}

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig {
        level: cli.log_level.clone(),
        file: cli.log_file.clone(),
    };
    if let Err(e) = init_logging(&log_config) {
        eprintln!("warning: {e}");
    }

    let mut config = RosterConfig::default().with_data_file(&cli.data_file);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let result = match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => commands::menu::run(&config),
        Commands::List { inactive } => commands::list::run(&config, inactive),
        Commands::Add { name } => commands::add::run(&config, &name),
        Commands::Reset => commands::reset::run(&config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
