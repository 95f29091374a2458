use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::domain::search::{SearchHit, SearchProvider};
use crate::domain::DomainError;
use crate::infrastructure::http_client::HttpClientTrait;

pub const DEFAULT_SERPER_BASE_URL: &str = "https://google.serper.dev";

/// Google search through the Serper API
pub struct SerperSearchProvider<C: HttpClientTrait> {
    client: C,
    api_key: String,
    base_url: String,
    num_results: usize,
}

impl<C: HttpClientTrait> SerperSearchProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_SERPER_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            num_results: 5,
        }
    }

    pub fn with_num_results(mut self, num_results: usize) -> Self {
        self.num_results = num_results.max(1);
        self
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }
}

impl<C: HttpClientTrait> std::fmt::Debug for SerperSearchProvider<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerperSearchProvider")
            .field("base_url", &self.base_url)
            .field("num_results", &self.num_results)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SerperItem>,
}

#[derive(Debug, Deserialize)]
struct SerperItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

#[async_trait]
impl<C: HttpClientTrait> SearchProvider for SerperSearchProvider<C> {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, DomainError> {
        let body = json!({ "q": query, "num": self.num_results });
        let headers = vec![
            ("X-API-KEY", self.api_key.as_str()),
            ("Content-Type", "application/json"),
        ];

        let response = self
            .client
            .post_json(&self.search_url(), headers, &body)
            .await
            .map_err(|e| match e {
                DomainError::Search { .. } => e,
                other => DomainError::search(other.to_string()),
            })?;

        let parsed: SerperResponse = serde_json::from_value(response)
            .map_err(|e| DomainError::search(format!("Failed to parse Serper response: {}", e)))?;

        let hits: Vec<SearchHit> = parsed
            .organic
            .into_iter()
            .filter(|item| !item.link.is_empty())
            .take(self.num_results)
            .map(|item| SearchHit::new(item.title, item.snippet, item.link))
            .collect();

        debug!(query = %query, hits = hits.len(), "Serper search completed");

        Ok(hits)
    }

    fn provider_name(&self) -> &'static str {
        "serper"
    }
}
