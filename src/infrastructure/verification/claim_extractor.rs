use std::sync::Arc;

use tracing::debug;

use crate::domain::judgment::{Judge, JudgmentRequest, JudgmentSchema};
use crate::domain::verification::{prompts, Claim, ClaimsList, PipelineStage, UsageCounters};
use crate::domain::DomainError;

/// Splits input text into individual claims
#[derive(Debug, Clone)]
pub struct ClaimExtractor {
    judge: Arc<dyn Judge>,
}

impl ClaimExtractor {
    pub fn new(judge: Arc<dyn Judge>) -> Self {
        Self { judge }
    }

    /// Extract claims, charging the call to `claim_extraction` even when the
    /// reply turns out to be malformed
    pub async fn extract(
        &self,
        text: &str,
        usage: &mut UsageCounters,
    ) -> Result<Vec<Claim>, DomainError> {
        let judgment = self
            .judge
            .judge(JudgmentRequest::new(
                JudgmentSchema::ClaimsList,
                prompts::EXTRACTION_INSTRUCTION,
                text,
            ))
            .await?;
        usage.add(PipelineStage::ClaimExtraction, judgment.usage);

        let claims = judgment.parse::<ClaimsList>()?.into_claims();
        debug!(claims = claims.len(), usage = judgment.usage, "Claims extracted");

        Ok(claims)
    }
}
