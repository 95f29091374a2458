use std::sync::Arc;

use tracing::debug;

use crate::domain::judgment::{Judge, JudgmentRequest, JudgmentSchema};
use crate::domain::verification::{
    prompts, Claim, PipelineStage, UsageCounters, VerifiableClaimFlag,
};
use crate::domain::DomainError;

/// Decides whether a claim can be checked against public evidence
#[derive(Debug, Clone)]
pub struct VerifiabilityChecker {
    judge: Arc<dyn Judge>,
}

impl VerifiabilityChecker {
    pub fn new(judge: Arc<dyn Judge>) -> Self {
        Self { judge }
    }

    pub async fn check(
        &self,
        claim: &Claim,
        usage: &mut UsageCounters,
    ) -> Result<bool, DomainError> {
        let judgment = self
            .judge
            .judge(JudgmentRequest::new(
                JudgmentSchema::VerifiableClaimFlag,
                prompts::VERIFIABILITY_INSTRUCTION,
                claim.text(),
            ))
            .await?;
        usage.add(PipelineStage::ClaimExtraction, judgment.usage);

        let flag = judgment.parse::<VerifiableClaimFlag>()?;
        debug!(claim = %claim.text(), verifiable = flag.is_verifiable, "Verifiability judged");

        Ok(flag.is_verifiable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::judgment::ScriptedJudge;
    use serde_json::json;

    #[tokio::test]
    async fn test_check_submits_claim_text() {
        let judge = Arc::new(
            ScriptedJudge::new()
                .with_value(JudgmentSchema::VerifiableClaimFlag, json!({"is_verifiable": false}))
                .with_usage_per_call(4),
        );

        let checker = VerifiabilityChecker::new(judge.clone());
        let mut usage = UsageCounters::new();
        let verifiable = checker
            .check(&Claim::new("Chocolate is the best flavour."), &mut usage)
            .await
            .unwrap();

        assert!(!verifiable);
        assert_eq!(judge.requests()[0].input, "Chocolate is the best flavour.");
        assert_eq!(usage.get(PipelineStage::ClaimExtraction), 4);
    }

    #[tokio::test]
    async fn test_malformed_verdict_is_still_charged() {
        let judge = Arc::new(
            ScriptedJudge::new()
                .with_value(JudgmentSchema::VerifiableClaimFlag, json!({"is_verifiable": "maybe"}))
                .with_usage_per_call(6),
        );

        let mut usage = UsageCounters::new();
        let result = VerifiabilityChecker::new(judge)
            .check(&Claim::new("Water is wet."), &mut usage)
            .await;

        assert!(matches!(result, Err(DomainError::MalformedResponse { .. })));
        assert_eq!(usage.get(PipelineStage::ClaimExtraction), 6);
    }
}
