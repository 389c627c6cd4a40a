//! Slack `users.list` data models

use serde::{Deserialize, Serialize};

/// One workspace member, kept exactly as the API returned it
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct Member(serde_json::Value);

impl Member {
    pub fn new(raw: serde_json::Value) -> Self {
        Self(raw)
    }

    /// Borrow the raw JSON object
    pub fn raw(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn id(&self) -> &str {
        self.0["id"].as_str().unwrap_or("")
    }

    /// Slack handle
    pub fn name(&self) -> &str {
        self.0["name"].as_str().unwrap_or("")
    }

    /// Real name, preferring the profile value
    pub fn real_name(&self) -> &str {
        self.0["profile"]["real_name"]
            .as_str()
            .or_else(|| self.0["real_name"].as_str())
            .unwrap_or("")
    }

    pub fn email(&self) -> &str {
        self.0["profile"]["email"].as_str().unwrap_or("")
    }

    pub fn is_bot(&self) -> bool {
        self.flag("is_bot")
    }

    pub fn is_admin(&self) -> bool {
        self.flag("is_admin")
    }

    pub fn deleted(&self) -> bool {
        self.flag("deleted")
    }

    fn flag(&self, key: &str) -> bool {
        self.0[key].as_bool().unwrap_or(false)
    }
}

/// Envelope of a `users.list` response
#[derive(Deserialize, Debug)]
pub struct UsersListResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub response_metadata: Option<ResponseMetadata>,
}

/// Cursor metadata attached to paginated responses
#[derive(Deserialize, Debug, Default)]
pub struct ResponseMetadata {
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// One successfully fetched page
#[derive(Debug, Clone, PartialEq)]
pub struct UsersPage {
    pub members: Vec<Member>,
    /// Continuation cursor; `None` when this was the last page
    pub next_cursor: Option<String>,
}

impl From<UsersListResponse> for UsersPage {
    fn from(resp: UsersListResponse) -> Self {
        let next_cursor = resp
            .response_metadata
            .and_then(|m| m.next_cursor)
            .filter(|c| !c.is_empty());
        Self {
            members: resp.members,
            next_cursor,
        }
    }
}
