//! Versioned API routes

pub mod verify;

use axum::{routing::post, Router};

use crate::api::state::AppState;

pub fn create_v1_router() -> Router<AppState> {
    Router::new().route("/verify", post(verify::verify_text))
}
