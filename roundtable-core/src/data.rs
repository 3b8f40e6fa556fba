//! Data Client: the knight catalog and comment collection on the mock server.

use crate::config::ClientConfig;
use crate::error::RetrievalError;
use crate::model::{Catalog, Comment};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Read access to the knight catalog.
#[async_trait]
pub trait KnightSource: Send + Sync {
    /// Fetch the full catalog.
    async fn list_knights(&self) -> Result<Catalog, RetrievalError>;
}

/// Read/write access to the comment collection.
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Fetch every comment; filtering happens client-side.
    async fn list_comments(&self) -> Result<Vec<Comment>, RetrievalError>;

    /// Persist a new comment with a freshly generated id and return it.
    async fn create_comment(&self, category: &str, text: &str) -> Result<Comment, RetrievalError>;

    /// Remove a comment. Unknown ids are not an error.
    async fn delete_comment(&self, id: &str) -> Result<(), RetrievalError>;
}

#[async_trait]
impl<T: KnightSource + ?Sized> KnightSource for Arc<T> {
    async fn list_knights(&self) -> Result<Catalog, RetrievalError> {
        (**self).list_knights().await
    }
}

#[async_trait]
impl<T: CommentStore + ?Sized> CommentStore for Arc<T> {
    async fn list_comments(&self) -> Result<Vec<Comment>, RetrievalError> {
        (**self).list_comments().await
    }

    async fn create_comment(&self, category: &str, text: &str) -> Result<Comment, RetrievalError> {
        (**self).create_comment(category, text).await
    }

    async fn delete_comment(&self, id: &str) -> Result<(), RetrievalError> {
        (**self).delete_comment(id).await
    }
}

/// Time-derived comment ids: milliseconds since the Unix epoch, strictly
/// increasing within one generator even when called twice in the same millisecond.
#[derive(Debug, Default)]
pub struct CommentIdGenerator {
    last: AtomicI64,
}

impl CommentIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> String {
        let now = chrono::Utc::now().timestamp_millis();
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or(now);
        now.max(previous + 1).to_string()
    }
}

/// HTTP client for the json-server style data resource.
#[derive(Clone)]
pub struct DataClient {
    client: reqwest::Client,
    base_url: String,
    ids: Arc<CommentIdGenerator>,
}

impl DataClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(config.timeout)
                .build()
                .expect("Failed to build HTTP client"),
            base_url: config.data_url.trim_end_matches('/').to_string(),
            ids: Arc::new(CommentIdGenerator::new()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `comments/{id}` with the id percent-encoded as a single path segment.
    pub(crate) fn comment_url(&self, id: &str) -> Result<reqwest::Url, RetrievalError> {
        let base = self.url("comments");
        let invalid = |message: String| RetrievalError::Network {
            url: base.clone(),
            message,
        };
        let mut url = reqwest::Url::parse(&base).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("base URL cannot hold a path".to_string()))?
            .push(id);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, RetrievalError> {
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| network_error(url, e))?;
        let response = check_status(url, response)?;
        response.json().await.map_err(|e| RetrievalError::Parse {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

fn network_error(url: &str, error: reqwest::Error) -> RetrievalError {
    tracing::warn!(%url, %error, "request failed");
    RetrievalError::Network {
        url: url.to_string(),
        message: error.to_string(),
    }
}

fn check_status(url: &str, response: reqwest::Response) -> Result<reqwest::Response, RetrievalError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        let status = response.status().as_u16();
        tracing::warn!(%url, status, "unexpected status");
        Err(RetrievalError::Status {
            url: url.to_string(),
            status,
        })
    }
}

#[async_trait]
impl KnightSource for DataClient {
    async fn list_knights(&self) -> Result<Catalog, RetrievalError> {
        self.get_json(&self.url("knights")).await
    }
}

#[async_trait]
impl CommentStore for DataClient {
    async fn list_comments(&self) -> Result<Vec<Comment>, RetrievalError> {
        self.get_json(&self.url("comments")).await
    }

    async fn create_comment(&self, category: &str, text: &str) -> Result<Comment, RetrievalError> {
        let url = self.url("comments");
        let comment = Comment {
            id: self.ids.next_id(),
            category: category.to_string(),
            comment: text.to_string(),
        };

        tracing::debug!(%url, id = %comment.id, %category, "POST");
        let response = self
            .client
            .post(&url)
            .json(&comment)
            .send()
            .await
            .map_err(|e| network_error(&url, e))?;
        check_status(&url, response)?;

        Ok(comment)
    }

    async fn delete_comment(&self, id: &str) -> Result<(), RetrievalError> {
        let target = self.comment_url(id)?;
        let url = target.to_string();

        tracing::debug!(%url, "DELETE");
        let response = self
            .client
            .delete(target)
            .send()
            .await
            .map_err(|e| network_error(&url, e))?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(%url, "comment already gone");
            return Ok(());
        }
        check_status(&url, response)?;
        Ok(())
    }
}
