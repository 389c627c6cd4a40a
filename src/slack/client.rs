//! Slack HTTP client bound to a browser session

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use reqwest::cookie::Jar;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, StatusCode, Url};

use crate::config::{api, session};
use crate::error::{Result, SlackError};
use crate::slack::credentials::Credentials;
use crate::slack::models::{UsersListResponse, UsersPage};
use crate::slack::traits::{FetchAttempt, PageSource};

/// Slack API error code returned when a method is throttled
const RATELIMITED: &str = "ratelimited";

/// Slack Web API client
pub struct SlackClient {
    client: Client,
    token: String,
    base_url: Url,
}

impl SlackClient {
    /// Create a client against the public Slack API
    pub fn new(credentials: &Credentials) -> Result<Self> {
        Self::with_base_url(credentials, api::BASE_URL)
    }

    /// Create a client with a custom API base URL (mock servers, proxies)
    ///
    /// The session cookie is always scoped to `.slack.com`.
    pub fn with_base_url(credentials: &Credentials, base_url: &str) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;
        let jar = populate_cookie_jar(credentials.cookie())?;

        let client = Client::builder()
            .cookie_provider(Arc::new(jar))
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(60))
            .build()?;

        debug!("Slack client ready for {}", base_url);

        Ok(Self {
            client,
            token: credentials.token().to_string(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Create a GET request builder with standard headers
    fn get(&self, url: Url) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.token))
    }

    /// Build the `users.list` URL for a cursor
    pub(crate) fn users_list_url(&self, cursor: Option<&str>) -> Result<Url> {
        let mut url = self
            .base_url
            .join(api::USERS_LIST)
            .map_err(|e| SlackError::Config(format!("invalid users.list URL: {}", e)))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("limit", &api::PAGE_SIZE.to_string());
            if let Some(cursor) = cursor {
                query.append_pair("cursor", cursor);
            }
        }
        Ok(url)
    }

    /// Send one `users.list` request and classify the response
    async fn request_users_page(&self, cursor: Option<&str>) -> FetchAttempt {
        let url = match self.users_list_url(cursor) {
            Ok(url) => url,
            Err(e) => return FetchAttempt::Fatal(e),
        };

        debug!("Requesting users.list (cursor: {:?})", cursor);

        let response = match self.get(url).send().await {
            Ok(response) => response,
            Err(e) => return FetchAttempt::Fatal(e.into()),
        };

        let status = response.status();
        let retry_after = parse_retry_after(response.headers());

        if status == StatusCode::TOO_MANY_REQUESTS {
            return throttled(retry_after);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return FetchAttempt::Fatal(SlackError::Api {
                status: status.as_u16(),
                message: format!("Failed to fetch users.list: {}", body.trim()),
            });
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => return FetchAttempt::Fatal(e.into()),
        };

        classify_body(&body, retry_after)
    }
}

impl PageSource for SlackClient {
    async fn fetch_page(&self, cursor: Option<&str>) -> FetchAttempt {
        self.request_users_page(cursor).await
    }
}

/// Parse and normalize the API base URL so `join` keeps its path
fn parse_base_url(base_url: &str) -> Result<Url> {
    let normalized = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{}/", base_url)
    };
    let url = Url::parse(&normalized)
        .map_err(|e| SlackError::Config(format!("invalid API URL '{}': {}", base_url, e)))?;
    if url.cannot_be_a_base() {
        return Err(SlackError::Config(format!(
            "invalid API URL '{}': not a base URL",
            base_url
        )));
    }
    Ok(url)
}

/// Create a cookie jar holding the `d` session cookie for `.slack.com`
pub(crate) fn populate_cookie_jar(cookie: &str) -> Result<Jar> {
    let url = Url::parse(session::COOKIE_URL)
        .map_err(|e| SlackError::Config(format!("invalid cookie URL: {}", e)))?;

    let jar = Jar::default();
    jar.add_cookie_str(
        &format!(
            "{}={}; Domain={}; Path={}",
            session::COOKIE_NAME,
            cookie,
            session::COOKIE_DOMAIN,
            session::COOKIE_PATH
        ),
        &url,
    );
    Ok(jar)
}

/// Read `Retry-After` as seconds (integer or decimal)
fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<f64>().ok())
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
}

fn throttled(retry_after: Option<Duration>) -> FetchAttempt {
    match retry_after {
        Some(wait) => FetchAttempt::RetryableThrottle(wait),
        None => FetchAttempt::Fatal(SlackError::RateLimited),
    }
}

/// Classify a 2xx body: page, throttle, or API error
fn classify_body(body: &[u8], retry_after: Option<Duration>) -> FetchAttempt {
    let resp: UsersListResponse = match serde_json::from_slice(body) {
        Ok(resp) => resp,
        Err(e) => {
            return FetchAttempt::Fatal(SlackError::Json(format!(
                "invalid users.list response: {}",
                e
            )))
        }
    };

    if !resp.ok {
        let code = resp.error.unwrap_or_else(|| "unknown_error".to_string());
        if code == RATELIMITED {
            return throttled(retry_after);
        }
        return FetchAttempt::Fatal(SlackError::Slack(code));
    }

    FetchAttempt::Success(UsersPage::from(resp))
}

#[cfg(test)]
impl SlackClient {
    /// Test client with `token="test-token"`, `cookie="test-cookie"`
    pub fn test_client(base_url: &str) -> Self {
        let creds = Credentials::new("test-token", "test-cookie").unwrap();
        Self::with_base_url(&creds, base_url).unwrap()
    }
}


#[cfg(test)]
mod wire_tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn users_page(ids: &[&str], next_cursor: &str) -> serde_json::Value {
        let members: Vec<_> = ids
            .iter()
            .map(|id| serde_json::json!({"id": id, "name": format!("user-{}", id)}))
            .collect();
        serde_json::json!({
            "ok": true,
            "members": members,
            "response_metadata": {"next_cursor": next_cursor}
        })
    }

    #[tokio::test]
    async fn test_fetch_first_page() {
        let mock_server = MockServer::start().await;
        let client = SlackClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/api/users.list"))
            .and(query_param("limit", "1000"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(users_page(&["U1", "U2"], "c1")))
            .expect(1)
            .mount(&mock_server)
            .await;

        match client.fetch_page(None).await {
            FetchAttempt::Success(page) => {
                assert_eq!(page.members.len(), 2);
                assert_eq!(page.members[0].id(), "U1");
                assert_eq!(page.next_cursor.as_deref(), Some("c1"));
            }
            other => panic!("Expected Success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_sends_cursor() {
        let mock_server = MockServer::start().await;
        let client = SlackClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/api/users.list"))
            .and(query_param("cursor", "c1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(users_page(&["U3"], "")))
            .expect(1)
            .mount(&mock_server)
            .await;

        match client.fetch_page(Some("c1")).await {
            FetchAttempt::Success(page) => {
                assert_eq!(page.members.len(), 1);
                assert!(page.next_cursor.is_none());
            }
            other => panic!("Expected Success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_429_with_retry_after() {
        let mock_server = MockServer::start().await;
        let client = SlackClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/api/users.list"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
            .mount(&mock_server)
            .await;

        match client.fetch_page(None).await {
            FetchAttempt::RetryableThrottle(wait) => assert_eq!(wait, Duration::from_secs(7)),
            other => panic!("Expected RetryableThrottle, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_429_without_retry_after() {
        let mock_server = MockServer::start().await;
        let client = SlackClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/api/users.list"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&mock_server)
            .await;

        match client.fetch_page(None).await {
            FetchAttempt::Fatal(SlackError::RateLimited) => {}
            other => panic!("Expected RateLimited, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_api_error_code() {
        let mock_server = MockServer::start().await;
        let client = SlackClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/api/users.list"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"ok": false, "error": "invalid_auth"})),
            )
            .mount(&mock_server)
            .await;

        match client.fetch_page(None).await {
            FetchAttempt::Fatal(SlackError::Slack(code)) => assert_eq!(code, "invalid_auth"),
            other => panic!("Expected Slack error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_server_error() {
        let mock_server = MockServer::start().await;
        let client = SlackClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/api/users.list"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&mock_server)
            .await;

        match client.fetch_page(None).await {
            FetchAttempt::Fatal(SlackError::Api { status, message }) => {
                assert_eq!(status, 503);
                assert!(message.contains("unavailable"));
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_malformed_body() {
        let mock_server = MockServer::start().await;
        let client = SlackClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/api/users.list"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        match client.fetch_page(None).await {
            FetchAttempt::Fatal(SlackError::Json(msg)) => assert!(msg.contains("users.list")),
            other => panic!("Expected Json error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_connection_refused() {
        let client = SlackClient::test_client("http://127.0.0.1:1");

        match client.fetch_page(None).await {
            FetchAttempt::Fatal(SlackError::Http(_)) => {}
            other => panic!("Expected Http error, got {:?}", other),
        }
    }
}
