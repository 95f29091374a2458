//! Web search backends

mod serper;

pub use serper::{SerperSearchProvider, DEFAULT_SERPER_BASE_URL};
