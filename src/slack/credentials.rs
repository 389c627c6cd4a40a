//! Slack credential pair

use std::fmt;

use log::debug;

use crate::error::{Result, SlackError};

/// Bearer token plus `d` session cookie, both required for `xoxc` tokens
#[derive(Clone)]
pub struct Credentials {
    token: String,
    cookie: String,
}

impl Credentials {
    /// Build a credential pair, rejecting empty values
    ///
    /// The cookie is sent as-is, so it must already be URL-encoded: `;`, `,`
    /// and whitespace would split it into cookie attributes.
    pub fn new(token: impl Into<String>, cookie: impl Into<String>) -> Result<Self> {
        let token = token.into();
        let cookie = cookie.into();

        if token.trim().is_empty() {
            return Err(SlackError::Config(
                "auth token must be set (--token or SLACK_TOKEN)".to_string(),
            ));
        }
        if cookie.trim().is_empty() {
            return Err(SlackError::Config(
                "auth cookie must be set (--cookie or SLACK_COOKIE)".to_string(),
            ));
        }
        if let Some(c) = cookie
            .chars()
            .find(|c| *c == ';' || *c == ',' || c.is_whitespace())
        {
            return Err(SlackError::Config(format!(
                "auth cookie contains {:?}; pass the URL-encoded value of the `d` cookie",
                c
            )));
        }

        debug!(
            "Using token {} and cookie of {} chars",
            redact(&token),
            cookie.len()
        );

        Ok(Self { token, cookie })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn cookie(&self) -> &str {
        &self.cookie
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &redact(&self.token))
            .field("cookie", &"<redacted>")
            .finish()
    }
}

/// Keep the token type prefix (e.g. `xoxc-`) and hide the rest
fn redact(token: &str) -> String {
    match token.split_once('-') {
        Some((prefix, _)) if prefix.len() <= 5 => format!("{}-<redacted>", prefix),
        _ => "<redacted>".to_string(),
    }
}
