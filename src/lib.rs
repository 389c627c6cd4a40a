//! slack-roster - Export the member list of a Slack workspace
//!
//! Authenticates with a browser session (an `xoxc` token plus the `d`
//! cookie), walks `users.list` one page at a time and honours every
//! rate-limit cooldown Slack asks for.
//!
//! # Example
//!
//! ```bash
//! # Print members as a table
//! slack-roster --token xoxc-... --cookie xoxd-...
//!
//! # Save the raw member objects as JSON
//! slack-roster --token xoxc-... --cookie xoxd-... --outfile users.json
//!
//! # Credentials from the environment, YAML on stdout
//! SLACK_TOKEN=xoxc-... SLACK_COOKIE=xoxd-... slack-roster -o yaml
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod slack;
pub mod ui;

pub use cli::{Cli, OutputFormat};
pub use error::{Result, SlackError};
pub use slack::{
    report_exported, run_export_command, Credentials, FetchAttempt, FetchState, Member,
    MemberFetcher, PageSource, SlackClient, UsersPage,
};
