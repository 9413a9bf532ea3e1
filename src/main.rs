//! Phare Sync - reconcile phare.io uptime monitors with a local declaration file

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use phare_sync::cli::{Cli, Commands};
use phare_sync::config::Config;
use phare_sync::phare::PhareClient;
use phare_sync::sync;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "phare_sync=info".to_string()))
        .init();

    let cli = Cli::parse();

    // Completion generation needs no token and no network.
    if let Commands::Completion { shell } = cli.command {
        generate(shell, &mut Cli::command(), "phare-sync", &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::load(cli.token_file.as_deref(), &cli.endpoint)?;
    let client = PhareClient::new(&config)?;

    match cli.command {
        Commands::SyncMonitors(args) => sync::sync_monitors(&client, &args.monitor_file).await,
        Commands::PauseAllMonitors => sync::pause_all_active(&client).await,
        Commands::ResumeAllMonitors => sync::resume_all_paused(&client).await,
        Commands::Completion { .. } => unreachable!(),
    }
}
