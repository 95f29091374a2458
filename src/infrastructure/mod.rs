//! Infrastructure layer - External service implementations

pub mod credentials;
pub mod http_client;
pub mod judgment;
pub mod llm;
pub mod logging;
pub mod observability;
pub mod research;
pub mod search;
pub mod verification;
