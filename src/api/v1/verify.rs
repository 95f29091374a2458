//! Claim verification endpoint

use axum::extract::State;
use tracing::debug;
use validator::Validate;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, VerifyRequest, VerifyResponse};

/// POST /v1/verify
pub async fn verify_text(
    State(state): State<AppState>,
    Json(request): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()).with_code("validation_error"))?;

    debug!(chars = request.text.chars().count(), "Verifying text");

    let output = state
        .verification
        .verify(&request.text)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(VerifyResponse::from_domain(output)))
}
