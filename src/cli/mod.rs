//! CLI argument parsing

mod common;

use std::path::PathBuf;

use clap::Parser;

use crate::config::{api, credentials, defaults};

pub use common::OutputFormat;

/// Slack workspace member exporter
#[derive(Parser, Debug)]
#[command(name = "slack-roster")]
#[command(version)]
#[command(
    about = "Export every member of a Slack workspace",
    long_about = "Export every member of a Slack workspace.\n\n\
                  Authenticates with a browser session (an xoxc token plus the 'd' cookie), \
                  walks users.list page by page and waits out any rate limits Slack imposes."
)]
pub struct Cli {
    /// xoxc auth token
    #[arg(short = 't', long, env = credentials::TOKEN_ENV_VAR, hide_env_values = true)]
    pub token: String,

    /// 'd' auth cookie
    #[arg(short = 'c', long, env = credentials::COOKIE_ENV_VAR, hide_env_values = true)]
    pub cookie: String,

    /// File path to save the result in (JSON unless --format yaml)
    #[arg(short = 'O', long)]
    pub outfile: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,

    /// Batch mode - no spinner
    #[arg(short, long, default_value_t = false)]
    pub batch: bool,

    /// Slack API base URL
    #[arg(long, hide = true, env = credentials::API_URL_ENV_VAR, default_value = api::BASE_URL)]
    pub api_url: String,
}
