//! Public API Feed Proxy
//! Mission: Fetch the public API catalogue with optional category filter and limit

use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

pub const DEFAULT_FEED_URL: &str = "https://api.publicapis.org/entries";
pub const MAX_LIMIT: usize = 1000;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("upstream request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("upstream returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("failed to decode upstream body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Query accepted by the feed proxy
#[derive(Debug, Clone, Default)]
pub struct FeedQuery {
    pub category: Option<String>,
    pub limit: Option<usize>,
}

pub struct PublicFeedClient {
    client: Client,
    url: String,
}

impl PublicFeedClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("authgate/0.1")
            .build()
            .map_err(FeedError::Client)?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch entries, forwarding the category filter and truncating to `limit`
    pub async fn fetch(&self, query: &FeedQuery) -> Result<Value, FeedError> {
        let mut request = self.client.get(&self.url);
        if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
            request = request.query(&[("category", category)]);
        }

        let response = request.send().await.map_err(|e| {
            error!("Public feed request failed: {}", e);
            FeedError::Request(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("Public feed returned {}", status);
            return Err(FeedError::Status(status));
        }

        let mut body: Value = response.json().await.map_err(FeedError::Decode)?;

        if let Some(limit) = query.limit {
            apply_limit(&mut body, limit);
        }

        debug!(
            "Fetched public feed (category={:?}, limit={:?})",
            query.category, query.limit
        );

        Ok(body)
    }
}

/// Keep at most `limit` entries and report `limit` as the count
pub fn apply_limit(body: &mut Value, limit: usize) {
    if let Some(entries) = body.get_mut("entries").and_then(Value::as_array_mut) {
        entries.truncate(limit);
    }
    if let Some(obj) = body.as_object_mut() {
        obj.insert("count".to_string(), Value::from(limit));
    }
}
