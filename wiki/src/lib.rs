//! Minimal MediaWiki Action API client.
//!
//! This crate provides a focused client for the two queries a page summary needs:
//! - Full-text page search (`list=search`)
//! - Plain-text introductory extracts (`prop=extracts`)
//!
//! Responses are requested with `formatversion=2`, so page collections arrive
//! as arrays rather than maps keyed by page id.

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const API_BASE: &str = "https://en.wikipedia.org/w/api.php";
const DEFAULT_USER_AGENT: &str = concat!("roundtable/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Errors that can occur when using the wiki client.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// MediaWiki API client.
#[derive(Clone)]
pub struct Wiki {
    client: reqwest::Client,
    base_url: String,
    user_agent: String,
}

impl Default for Wiki {
    fn default() -> Self {
        Self::new()
    }
}

impl Wiki {
    /// Create a client for English Wikipedia with the default timeout.
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a client for English Wikipedia with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .connect_timeout(timeout.min(Duration::from_secs(10)))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: API_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Point the client at a different `api.php` endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the User-Agent sent with every request.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// The endpoint this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search for pages matching `term`, best match first.
    pub async fn search(&self, term: &str) -> Result<Vec<SearchHit>, Error> {
        self.search_limited(term, DEFAULT_SEARCH_LIMIT).await
    }

    /// Return the title of the best matching page, if any.
    pub async fn first_title(&self, term: &str) -> Result<Option<String>, Error> {
        let hits = self.search_limited(term, 1).await?;
        Ok(hits.into_iter().next().map(|hit| hit.title))
    }

    /// Fetch the plain-text introductory extract for an exact page title.
    ///
    /// Returns `None` when the page does not exist. A page without an intro
    /// yields an [`Extract`] with empty text.
    pub async fn extract(&self, title: &str) -> Result<Option<Extract>, Error> {
        let response: ApiResponse<ApiExtractQuery> = self
            .get(&[
                ("action", "query"),
                ("prop", "extracts"),
                ("exintro", ""),
                ("explaintext", ""),
                ("redirects", "1"),
                ("titles", title),
            ])
            .await?;

        let query = response.into_query()?;
        Ok(query.pages.into_iter().find(|p| !p.missing).map(|page| Extract {
            title: page.title,
            text: page.extract.unwrap_or_default(),
        }))
    }

    async fn search_limited(&self, term: &str, limit: usize) -> Result<Vec<SearchHit>, Error> {
        let limit = limit.to_string();
        let response: ApiResponse<ApiSearchQuery> = self
            .get(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", term),
                ("srlimit", limit.as_str()),
            ])
            .await?;

        Ok(response
            .into_query()?
            .search
            .into_iter()
            .map(|hit| SearchHit {
                title: hit.title,
                page_id: hit.pageid,
            })
            .collect())
    }

    async fn get<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T, Error> {
        let headers = self.build_headers()?;
        tracing::debug!(endpoint = %self.base_url, ?params, "wiki request");

        let response = self
            .client
            .get(&self.base_url)
            .headers(headers)
            .query(params)
            .query(&[("format", "json"), ("formatversion", "2")])
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status,
                message: body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))
    }

    fn build_headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&self.user_agent)
                .map_err(|e| Error::Config(format!("Invalid user agent: {e}")))?,
        );
        Ok(headers)
    }
}

// ============================================================================
// Public types
// ============================================================================

/// A single search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub page_id: Option<u64>,
}

/// The introductory extract of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extract {
    /// Canonical title after redirects.
    pub title: String,
    pub text: String,
}

// ============================================================================
// Internal API types
// ============================================================================

/// MediaWiki reports request-level failures inside a 200 response.
#[derive(Debug, Deserialize)]
struct ApiResponse<Q> {
    #[serde(default)]
    query: Option<Q>,
    #[serde(default)]
    error: Option<ApiError>,
}

impl<Q: Default> ApiResponse<Q> {
    fn into_query(self) -> Result<Q, Error> {
        if let Some(error) = self.error {
            return Err(Error::Api {
                status: 200,
                message: format!("{}: {}", error.code, error.info),
            });
        }
        // A query with no matches may omit the `query` member entirely
        Ok(self.query.unwrap_or_default())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Debug, Default, Deserialize)]
struct ApiSearchQuery {
    #[serde(default)]
    search: Vec<ApiSearchHit>,
}

#[derive(Debug, Deserialize)]
struct ApiSearchHit {
    title: String,
    #[serde(default)]
    pageid: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiExtractQuery {
    #[serde(default)]
    pages: Vec<ApiPage>,
}

#[derive(Debug, Deserialize)]
struct ApiPage {
    title: String,
    #[serde(default)]
    extract: Option<String>,
    #[serde(default)]
    missing: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_defaults() {
        let client = Wiki::new();
        assert_eq!(client.base_url(), API_BASE);
        assert!(client.user_agent.starts_with("roundtable/"));
    }

    #[test]
    fn test_client_with_base_url() {
        let client = Wiki::new().with_base_url("http://localhost:8080/w/api.php");
        assert_eq!(client.base_url(), "http://localhost:8080/w/api.php");
    }

    #[test]
    fn test_invalid_user_agent_is_config_error() {
        let client = Wiki::new().with_user_agent("bad\nagent");
        assert!(matches!(client.build_headers(), Err(Error::Config(_))));
    }

    #[test]
    fn test_parse_search_hits() {
        let body = r#"{
            "batchcomplete": true,
            "query": {
                "searchinfo": {"totalhits": 2},
                "search": [
                    {"ns": 0, "title": "King Arthur", "pageid": 17100},
                    {"ns": 0, "title": "Arthurian legend", "pageid": 2183}
                ]
            }
        }"#;
        let response: ApiResponse<ApiSearchQuery> = serde_json::from_str(body).unwrap();
        let query = response.into_query().unwrap();
        assert_eq!(query.search.len(), 2);
        assert_eq!(query.search[0].title, "King Arthur");
        assert_eq!(query.search[0].pageid, Some(17100));
    }

    #[test]
    fn test_parse_empty_search() {
        let body = r#"{"batchcomplete": true, "query": {"searchinfo": {"totalhits": 0}, "search": []}}"#;
        let response: ApiResponse<ApiSearchQuery> = serde_json::from_str(body).unwrap();
        assert!(response.into_query().unwrap().search.is_empty());
    }

    #[test]
    fn test_missing_query_member_is_empty() {
        let response: ApiResponse<ApiSearchQuery> = serde_json::from_str("{}").unwrap();
        assert!(response.into_query().unwrap().search.is_empty());
    }

    #[test]
    fn test_api_error_envelope() {
        let body = r#"{"error": {"code": "nosrsearch", "info": "The \"srsearch\" parameter must be set."}}"#;
        let response: ApiResponse<ApiSearchQuery> = serde_json::from_str(body).unwrap();
        match response.into_query() {
            Err(Error::Api { status, message }) => {
                assert_eq!(status, 200);
                assert!(message.starts_with("nosrsearch"));
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_extract_pages() {
        let body = r#"{
            "batchcomplete": true,
            "query": {
                "pages": [
                    {"pageid": 17100, "ns": 0, "title": "King Arthur", "extract": "King Arthur was a legendary king."}
                ]
            }
        }"#;
        let response: ApiResponse<ApiExtractQuery> = serde_json::from_str(body).unwrap();
        let pages = response.into_query().unwrap().pages;
        assert_eq!(pages.len(), 1);
        assert_eq!(
            pages[0].extract.as_deref(),
            Some("King Arthur was a legendary king.")
        );
        assert!(!pages[0].missing);
    }

    #[test]
    fn test_parse_missing_page() {
        let body = r#"{"query": {"pages": [{"ns": 0, "title": "Sir Nobody", "missing": true}]}}"#;
        let response: ApiResponse<ApiExtractQuery> = serde_json::from_str(body).unwrap();
        let pages = response.into_query().unwrap().pages;
        assert!(pages[0].missing);
        assert!(pages[0].extract.is_none());
    }

    // ========================================================================
    // Requests against a local canned server
    // ========================================================================

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    /// Answer one connection per canned `(status, body)` pair and return the
    /// raw requests once every response has been sent.
    async fn canned_server(responses: Vec<(u16, &'static str)>) -> (String, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let mut requests = Vec::new();
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                requests.push(read_request(&mut socket).await);
                let reply = format!(
                    "HTTP/1.1 {status} Canned\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                socket.write_all(reply.as_bytes()).await.unwrap();
                socket.shutdown().await.ok();
            }
            requests
        });
        (format!("http://{addr}/w/api.php"), handle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut data = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            data.extend_from_slice(&buf[..n]);
            if data.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        String::from_utf8_lossy(&data).into_owned()
    }

    #[tokio::test]
    async fn test_first_title_request_and_result() {
        let (url, server) = canned_server(vec![(
            200,
            r#"{"query": {"search": [{"title": "Lancelot", "pageid": 18419}]}}"#,
        )])
        .await;
        let client = Wiki::new().with_base_url(url);

        let title = client.first_title("Lancelot").await.unwrap();
        assert_eq!(title.as_deref(), Some("Lancelot"));

        let requests = server.await.unwrap();
        let request_line = requests[0].lines().next().unwrap();
        assert!(request_line.starts_with("GET /w/api.php?"));
        for param in ["list=search", "srsearch=Lancelot", "srlimit=1", "format=json", "formatversion=2"] {
            assert!(request_line.contains(param), "missing {param} in {request_line}");
        }
    }

    #[tokio::test]
    async fn test_search_returns_hits_with_page_ids() {
        let (url, server) = canned_server(vec![(
            200,
            r#"{"query": {"search": [
                {"title": "Gawain", "pageid": 12768},
                {"title": "Sir Gawain and the Green Knight"}
            ]}}"#,
        )])
        .await;
        let client = Wiki::new().with_base_url(url);

        let hits = client.search("Gawain").await.unwrap();
        assert_eq!(
            hits,
            vec![
                SearchHit {
                    title: "Gawain".into(),
                    page_id: Some(12768),
                },
                SearchHit {
                    title: "Sir Gawain and the Green Knight".into(),
                    page_id: None,
                },
            ]
        );

        let requests = server.await.unwrap();
        assert!(requests[0].contains(&format!("srlimit={DEFAULT_SEARCH_LIMIT}")));
    }

    #[tokio::test]
    async fn test_extract_skips_missing_pages() {
        let (url, _server) = canned_server(vec![
            (
                200,
                r#"{"query": {"pages": [{"title": "Percival", "extract": "One of the Knights of the Round Table."}]}}"#,
            ),
            (200, r#"{"query": {"pages": [{"title": "Sir Nobody", "missing": true}]}}"#),
        ])
        .await;
        let client = Wiki::new().with_base_url(url);

        let extract = client.extract("Percival").await.unwrap().unwrap();
        assert_eq!(extract.title, "Percival");
        assert_eq!(extract.text, "One of the Knights of the Round Table.");

        assert!(client.extract("Sir Nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_http_failure_is_api_error() {
        let (url, _server) = canned_server(vec![(503, "upstream down")]).await;
        let client = Wiki::new().with_base_url(url);

        match client.first_title("Tristan").await {
            Err(Error::Api { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "upstream down");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let (url, _server) = canned_server(vec![(200, r#"{"bad""#)]).await;
        let client = Wiki::new().with_base_url(url);

        assert!(matches!(client.extract("Bedivere").await, Err(Error::Parse(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let client = Wiki::with_timeout(Duration::from_secs(2)).with_base_url("http://127.0.0.1:9/w/api.php");
        assert!(matches!(client.first_title("Kay").await, Err(Error::Network(_))));
    }
}
