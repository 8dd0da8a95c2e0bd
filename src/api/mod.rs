use crate::config::ApiConfig;
use crate::internal::models::{SearchResponse, Story};
use crate::utils::url::build_search_url;
use anyhow::{Context, Result};
use reqwest::Client;

/// HTTP client for the Algolia Hacker News search endpoint.
///
/// Returns `anyhow::Result` with contextualized errors; the caller decides
/// what a failure means (for the app that is a single `FetchFailure`
/// transition, regardless of whether the network, the status code, or the
/// response shape was at fault).
#[derive(Debug, Clone)]
pub struct ApiService {
    client: Client,
    endpoint: String,
}

impl ApiService {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
        }
    }

    /// The request URL for a term. The term is appended raw, unencoded;
    /// see `utils::url::build_search_url`.
    pub fn search_url(&self, term: &str) -> String {
        build_search_url(&self.endpoint, term)
    }

    /// Fetch one page of stories for an already-built request URL.
    pub async fn fetch_stories(&self, url: &str) -> Result<Vec<Story>> {
        let start = std::time::Instant::now();

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("failed to send GET request to {}", url))?;

        let response: SearchResponse = resp
            .json()
            .await
            .with_context(|| format!("failed to parse search response from {}", url))?;

        tracing::debug!(elapsed = ?start.elapsed(), hits = response.hits.len(), "api.fetch_stories");
        Ok(response.hits)
    }
}
