//! Web search capability

mod provider;

pub use provider::{format_hits, SearchHit, SearchProvider, NO_RESULTS_SENTINEL, SEARCH_LIMIT_SENTINEL};

#[cfg(test)]
pub use provider::MockSearchProvider;
