//! Export command handler

use log::{debug, info};

use crate::cli::{Cli, OutputFormat};
use crate::error::Result;
use crate::output::{output_members, validate_outfile, write_members_file};
use crate::slack::{Credentials, MemberFetcher, SlackClient};
use crate::ui::{clear_spinner, create_spinner, finish_spinner};

/// Run the export: validate, fetch every member, then write or print them
///
/// Returns the number of exported members.
pub async fn run_export_command(cli: &Cli) -> Result<usize> {
    let credentials = Credentials::new(cli.token.as_str(), cli.cookie.as_str())?;
    if let Some(path) = &cli.outfile {
        validate_outfile(path)?;
    }

    let client = SlackClient::with_base_url(&credentials, &cli.api_url)?;
    debug!("Fetching members from {}", client.base_url());

    let spinner = create_spinner("Fetching workspace members...", cli.batch);
    let mut fetcher = MemberFetcher::new(client);

    let members = match fetcher.drain_until(shutdown_signal()).await {
        Ok(members) => {
            finish_spinner(
                spinner,
                &format!(
                    "Fetched {} members ({} pages)",
                    members.len(),
                    fetcher.pages()
                ),
            );
            members
        }
        Err(e) => {
            clear_spinner(spinner);
            return Err(e);
        }
    };

    match &cli.outfile {
        Some(path) => {
            write_members_file(path, &members, cli.format)?;
            info!("Saved {} members to {}", members.len(), path.display());
        }
        None => output_members(&members, cli.format)?,
    }

    Ok(members.len())
}

/// Print the final count without mixing it into a document on stdout
pub fn report_exported(cli: &Cli, count: usize) {
    let message = format!("[+] Exported {} users", count);
    match (&cli.outfile, cli.format) {
        (None, OutputFormat::Json | OutputFormat::Yaml) => eprintln!("{}", message),
        _ => println!("{}", message),
    }
}

/// Resolve on Ctrl-C; never resolves if the handler cannot be installed
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        debug!("Ctrl-C handler unavailable: {}", e);
        std::future::pending::<()>().await;
    }
}
