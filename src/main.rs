//! slack-roster - Main entry point

use clap::Parser;
use log::{debug, info};

use slack_roster::{report_exported, run_export_command, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    info!("Starting slack-roster v{}", env!("CARGO_PKG_VERSION"));
    debug!(
        "CLI args: outfile={:?}, format={}, batch={}",
        cli.outfile, cli.format, cli.batch
    );

    match run_export_command(&cli).await {
        Ok(count) => {
            report_exported(&cli, count);
            info!("Completed successfully");
        }
        Err(e) => {
            eprintln!("[-] Failed to export workspace users: {}", e);
            std::process::exit(1);
        }
    }
}
