/// Configuration constants for the Slack Web API
pub mod api {
    /// Default API base URL
    pub const BASE_URL: &str = "https://slack.com";

    /// Workspace member listing endpoint
    pub const USERS_LIST: &str = "api/users.list";

    /// Page size requested on every `users.list` call
    pub const PAGE_SIZE: u32 = 1000;
}

/// Configuration constants for the browser session cookie
pub mod session {
    /// URL the session cookie is registered against
    pub const COOKIE_URL: &str = "https://slack.com/";

    /// Session cookie name
    pub const COOKIE_NAME: &str = "d";

    /// Domain the session cookie is scoped to (includes all subdomains)
    pub const COOKIE_DOMAIN: &str = ".slack.com";

    /// Session cookie path
    pub const COOKIE_PATH: &str = "/";
}

/// Environment variable names used as CLI fallbacks
pub mod credentials {
    /// Environment variable for the bearer token
    pub const TOKEN_ENV_VAR: &str = "SLACK_TOKEN";

    /// Environment variable for the `d` cookie
    pub const COOKIE_ENV_VAR: &str = "SLACK_COOKIE";

    /// Environment variable for the API base URL override
    pub const API_URL_ENV_VAR: &str = "SLACK_API_URL";
}

/// Default values for CLI
pub mod defaults {
    /// Default log level
    pub const LOG_LEVEL: &str = "warn";
}
