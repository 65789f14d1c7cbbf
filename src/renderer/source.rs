use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;

use crate::models::ContentRecord;

/// Why a page could not be displayed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("page '{0}' does not exist")]
    NotFound(String),

    #[error("could not reach the content service: {0}")]
    Network(String),

    #[error("unexpected response from the content service: {0}")]
    Malformed(String),

    #[error("no response within {}ms", .0.as_millis())]
    Timeout(Duration),
}

/// Where the renderer gets page content from
#[async_trait]
pub trait ContentSource: Send + Sync + 'static {
    async fn fetch(&self, identifier: &str) -> Result<ContentRecord, FetchError>;
}

/// [`ContentSource`] backed by the content service's `GET /api/{identifier}`
#[derive(Clone)]
pub struct HttpContentSource {
    client: Client,
    base_url: String,
}

impl HttpContentSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Content URL for `identifier`, which always becomes exactly one escaped
    /// path segment
    pub fn url_for(&self, identifier: &str) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| FetchError::Network(format!("invalid base URL {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::Network(format!("base URL {} cannot take a path", self.base_url)))?
            .pop_if_empty()
            .push("api")
            .push(identifier);
        Ok(url)
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn fetch(&self, identifier: &str) -> Result<ContentRecord, FetchError> {
        let url = self.url_for(identifier)?;
        tracing::debug!("Fetching {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(FetchError::NotFound(identifier.to_string())),
            status if !status.is_success() => {
                return Err(FetchError::Network(format!("{} returned {}", url, status)));
            }
            _ => {}
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        serde_json::from_slice::<ContentRecord>(&bytes)
            .map_err(|e| FetchError::Malformed(e.to_string()))
    }
}
