//! Seam between the pagination loop and the transport

use std::future::Future;
use std::time::Duration;

use crate::error::SlackError;
use crate::slack::models::UsersPage;

/// Classified outcome of a single page request
#[derive(Debug)]
pub enum FetchAttempt {
    /// Page received
    Success(UsersPage),
    /// Server asked us to wait before repeating the same request
    RetryableThrottle(Duration),
    /// Anything else; the run stops
    Fatal(SlackError),
}

/// Source of `users.list` pages
///
/// Implemented by `SlackClient` for the real API and by scripted
/// sources in tests.
pub trait PageSource {
    /// Request the page addressed by `cursor` (`None` for the first page)
    fn fetch_page(&self, cursor: Option<&str>) -> impl Future<Output = FetchAttempt>;
}
