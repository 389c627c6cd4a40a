use std::fmt;

/// Custom error type for roster operations
#[derive(Debug)]
pub enum SlackError {
    /// HTTP request failed
    Http(reqwest::Error),
    /// API returned a non-success HTTP status
    Api { status: u16, message: String },
    /// API answered `ok: false` with an error code
    Slack(String),
    /// Rate limited without a usable retry hint
    RateLimited,
    /// JSON/YAML parsing or serialization error
    Json(String),
    /// Configuration error
    Config(String),
    /// Failed to write output
    Io(String),
    /// Interrupted before the roster was complete
    Cancelled,
}

impl fmt::Display for SlackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlackError::Http(e) => write!(f, "HTTP request failed: {}", e),
            SlackError::Api { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            SlackError::Slack(code) => write!(f, "Slack API error: {}", code),
            SlackError::RateLimited => write!(f, "Rate limited (not retryable)"),
            SlackError::Json(msg) => write!(f, "JSON error: {}", msg),
            SlackError::Config(msg) => write!(f, "Configuration error: {}", msg),
            SlackError::Io(msg) => write!(f, "Output error: {}", msg),
            SlackError::Cancelled => write!(f, "Cancelled by user"),
        }
    }
}

impl std::error::Error for SlackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SlackError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SlackError {
    fn from(err: reqwest::Error) -> Self {
        SlackError::Http(err)
    }
}

impl From<serde_json::Error> for SlackError {
    fn from(err: serde_json::Error) -> Self {
        SlackError::Json(err.to_string())
    }
}

impl From<serde_yml::Error> for SlackError {
    fn from(err: serde_yml::Error) -> Self {
        SlackError::Json(err.to_string())
    }
}

impl From<std::io::Error> for SlackError {
    fn from(err: std::io::Error) -> Self {
        SlackError::Io(err.to_string())
    }
}

/// Result type alias for roster operations
pub type Result<T> = std::result::Result<T, SlackError>;
