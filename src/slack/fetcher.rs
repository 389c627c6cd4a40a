//! Sequential `users.list` pagination with server-driven rate-limit recovery
//!
//! The fetcher owns the cursor and the collected members. Each iteration
//! issues exactly one request and matches on its [`FetchAttempt`]:
//!
//! - `Success` appends the page and either advances the cursor or finishes
//! - `RetryableThrottle` sleeps for the server's wait and repeats the request
//!   with the same cursor, as many times as the server asks
//! - `Fatal` drops everything collected so far and returns the error
//!
//! Completion is only ever decided from a successful page, so a failing
//! request on what would have been the last page still surfaces its error.

use std::future::Future;
use std::time::Duration;

use log::{debug, info, warn};

use crate::error::{Result, SlackError};
use crate::slack::models::Member;
use crate::slack::traits::{FetchAttempt, PageSource};

/// Where the pagination loop currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    /// Ready to request the page at the current cursor
    Fetching,
    /// Waiting out a server-requested cooldown
    RateLimited(Duration),
    /// All pages received
    Done,
    /// Stopped on an error or cancellation
    Failed,
}

impl FetchState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FetchState::Done | FetchState::Failed)
    }
}

/// Drains every page of the member listing from a [`PageSource`]
pub struct MemberFetcher<S> {
    source: S,
    state: FetchState,
    cursor: Option<String>,
    members: Vec<Member>,
    pages: u32,
    retries: u32,
}

impl<S: PageSource> MemberFetcher<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: FetchState::Fetching,
            cursor: None,
            members: Vec::new(),
            pages: 0,
            retries: 0,
        }
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// Pages received so far
    pub fn pages(&self) -> u32 {
        self.pages
    }

    /// Throttled requests that were repeated
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Fetch all pages and return the members in arrival order
    pub async fn drain(&mut self) -> Result<Vec<Member>> {
        self.drain_until(std::future::pending::<()>()).await
    }

    /// Like [`drain`](Self::drain), but abort once `cancel` completes
    ///
    /// Cancellation can land mid-request or mid-sleep; either way the
    /// fetcher ends in `Failed` and nothing collected is returned.
    pub async fn drain_until<F>(&mut self, cancel: F) -> Result<Vec<Member>>
    where
        F: Future<Output = ()>,
    {
        if self.state.is_terminal() {
            return Err(SlackError::Config(
                "member fetch already finished; create a new fetcher".to_string(),
            ));
        }

        let outcome = tokio::select! {
            result = self.run() => result,
            _ = cancel => Err(SlackError::Cancelled),
        };

        match outcome {
            Ok(()) => {
                info!(
                    "Fetched {} members in {} page(s), {} rate-limit retries",
                    self.members.len(),
                    self.pages,
                    self.retries
                );
                Ok(std::mem::take(&mut self.members))
            }
            Err(e) => {
                debug!("Member fetch failed after {} page(s): {}", self.pages, e);
                self.state = FetchState::Failed;
                self.members.clear();
                Err(e)
            }
        }
    }

    async fn run(&mut self) -> Result<()> {
        loop {
            match self.state.clone() {
                FetchState::Fetching => self.step().await?,
                FetchState::RateLimited(wait) => {
                    tokio::time::sleep(wait).await;
                    self.retries += 1;
                    self.state = FetchState::Fetching;
                }
                FetchState::Done => return Ok(()),
                FetchState::Failed => {
                    return Err(SlackError::Config(
                        "member fetch already failed".to_string(),
                    ))
                }
            }
        }
    }

    /// Issue one request at the current cursor and apply the transition
    async fn step(&mut self) -> Result<()> {
        let attempt = self.source.fetch_page(self.cursor.as_deref()).await;
        match attempt {
            FetchAttempt::Success(page) => {
                self.pages += 1;
                debug!(
                    "Page {} returned {} members",
                    self.pages,
                    page.members.len()
                );
                self.members.extend(page.members);

                match page.next_cursor {
                    Some(next) if !next.is_empty() => {
                        self.cursor = Some(next);
                    }
                    _ => {
                        self.state = FetchState::Done;
                    }
                }
                Ok(())
            }
            FetchAttempt::RetryableThrottle(wait) => {
                warn!(
                    "Hit rate limit on page {}, waiting {:?} before retrying",
                    self.pages + 1,
                    wait
                );
                self.state = FetchState::RateLimited(wait);
                Ok(())
            }
            FetchAttempt::Fatal(e) => Err(e),
        }
    }
}
