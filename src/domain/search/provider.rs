//! Search provider trait and result formatting

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[cfg(test)]
use mockall::automock;

use crate::domain::DomainError;

/// Returned to the model when a search yields no usable hits
pub const NO_RESULTS_SENTINEL: &str = "No results found.";

/// Returned to the model once a step's search budget is spent
pub const SEARCH_LIMIT_SENTINEL: &str =
    "Search limit reached: no more web searches are allowed for this step.";

/// A single web search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
    pub link: String,
}

impl SearchHit {
    pub fn new(
        title: impl Into<String>,
        snippet: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
            link: link.into(),
        }
    }
}

/// Web search backend used during research
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run a query and return ranked hits, possibly empty
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, DomainError>;

    fn provider_name(&self) -> &'static str;
}

/// Render hits as the text block handed back to the model
pub fn format_hits(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return NO_RESULTS_SENTINEL.to_string();
    }

    hits.iter()
        .enumerate()
        .map(|(i, hit)| {
            format!(
                "[{}] {}\nURL: {}\n{}",
                i + 1,
                hit.title,
                hit.link,
                hit.snippet
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
