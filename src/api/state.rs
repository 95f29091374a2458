//! Application state shared by the handlers

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{DomainError, PipelineOutput};
use crate::infrastructure::verification::VerificationPipeline;

/// Claim verification as seen by the HTTP layer
#[async_trait]
pub trait VerificationServiceTrait: Send + Sync {
    async fn verify(&self, text: &str) -> Result<PipelineOutput, DomainError>;
}

#[async_trait]
impl VerificationServiceTrait for VerificationPipeline {
    async fn verify(&self, text: &str) -> Result<PipelineOutput, DomainError> {
        self.process(text).await
    }
}

#[derive(Clone)]
pub struct AppState {
    pub verification: Arc<dyn VerificationServiceTrait>,
}

impl AppState {
    pub fn new(verification: Arc<dyn VerificationServiceTrait>) -> Self {
        Self { verification }
    }
}
