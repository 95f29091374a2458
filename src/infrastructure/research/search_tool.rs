//! Bounded web search tool exposed to the reasoning loop

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::search::{format_hits, SearchProvider, NO_RESULTS_SENTINEL, SEARCH_LIMIT_SENTINEL};
use crate::domain::{ToolCall, ToolDefinition};
use crate::infrastructure::observability::record_search_call;

pub const WEB_SEARCH_TOOL: &str = "web_search";

/// Per-step counter of remaining web searches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBudget {
    limit: usize,
    used: usize,
}

impl SearchBudget {
    pub fn new(limit: usize) -> Self {
        Self { limit, used: 0 }
    }

    /// Consume one search; false once the limit is reached
    pub fn try_consume(&mut self) -> bool {
        if self.used >= self.limit {
            return false;
        }
        self.used += 1;
        true
    }

    pub fn used(&self) -> usize {
        self.used
    }

    pub fn remaining(&self) -> usize {
        self.limit - self.used
    }
}

#[derive(Debug, Deserialize)]
struct WebSearchArgs {
    query: String,
}

/// Executes `web_search` tool calls against a search provider
pub struct WebSearchTool {
    provider: Arc<dyn SearchProvider>,
}

impl WebSearchTool {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider }
    }

    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(
            WEB_SEARCH_TOOL,
            "Search the web and return the top results with their titles, URLs and snippets.",
            json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query"
                    }
                },
                "required": ["query"],
                "additionalProperties": false
            }),
        )
    }

    /// Run one tool call and return the text handed back to the model.
    ///
    /// Never fails: exhausted budgets, empty results and provider errors all
    /// come back as sentinel text.
    pub async fn execute(&self, call: &ToolCall, budget: &mut SearchBudget) -> String {
        if call.name != WEB_SEARCH_TOOL {
            warn!(tool = %call.name, "Model requested an unknown tool");
            return format!("Unknown tool: {}", call.name);
        }

        let args: WebSearchArgs = match serde_json::from_str(&call.arguments) {
            Ok(args) => args,
            Err(e) => {
                warn!(arguments = %call.arguments, error = %e, "Invalid web_search arguments");
                return "Invalid arguments: expected {\"query\": string}.".to_string();
            }
        };

        if !budget.try_consume() {
            debug!(query = %args.query, "Search budget exhausted");
            record_search_call("rejected");
            return SEARCH_LIMIT_SENTINEL.to_string();
        }

        match self.provider.search(&args.query).await {
            Ok(hits) if hits.is_empty() => {
                debug!(query = %args.query, "Search returned no results");
                record_search_call("empty");
                NO_RESULTS_SENTINEL.to_string()
            }
            Ok(hits) => {
                record_search_call("ok");
                format_hits(&hits)
            }
            Err(e) => {
                warn!(
                    query = %args.query,
                    provider = self.provider.provider_name(),
                    error = %e,
                    "Search failed, substituting empty result"
                );
                record_search_call("error");
                NO_RESULTS_SENTINEL.to_string()
            }
        }
    }
}

impl std::fmt::Debug for WebSearchTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebSearchTool")
            .field("provider", &self.provider.provider_name())
            .finish()
    }
}
