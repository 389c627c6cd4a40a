//! Slack API module
//!
//! Session-bound client, the `users.list` pagination loop and the export command.

mod client;
pub mod commands;
mod credentials;
pub mod fetcher;
pub mod models;
pub mod traits;

pub use client::SlackClient;
pub use commands::{report_exported, run_export_command};
pub use credentials::Credentials;
pub use fetcher::{FetchState, MemberFetcher};
pub use models::{Member, UsersPage};
pub use traits::{FetchAttempt, PageSource};
