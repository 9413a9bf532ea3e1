//! Command-line interface definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::config::DEFAULT_ENDPOINT;

#[derive(Parser)]
#[command(
    name = "phare-sync",
    version,
    about = "Reconcile phare.io uptime monitors with a local declaration file"
)]
pub struct Cli {
    /// Path to a file containing the phare.io API token
    #[arg(long, env = "PHARE_TOKEN_FILE", global = true)]
    pub token_file: Option<PathBuf>,

    /// Base URL of the phare.io API
    #[arg(long, env = "PHARE_ENDPOINT", default_value = DEFAULT_ENDPOINT, global = true)]
    pub endpoint: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create, update, resume, or pause monitors until phare.io matches the declarations
    SyncMonitors(SyncArgs),

    /// Pause every currently active monitor
    PauseAllMonitors,

    /// Resume every currently paused monitor
    ResumeAllMonitors,

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Args)]
pub struct SyncArgs {
    /// JSON file with the local monitor declarations
    #[arg(long)]
    pub monitor_file: PathBuf,
}
