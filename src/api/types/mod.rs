//! API request, response and error types

pub mod error;
pub mod json;
pub mod verify;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use verify::{ClaimResult, UsageSummary, VerifyRequest, VerifyResponse};
