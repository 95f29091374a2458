use std::sync::Arc;

use tracing::debug;

use crate::domain::judgment::{Judge, JudgmentRequest, JudgmentSchema};
use crate::domain::verification::{
    prompts, PipelineStage, PlanPayload, UsageCounters, VerificationPlan,
};
use crate::domain::DomainError;

/// Produces a short ordered verification plan for one claim
#[derive(Debug, Clone)]
pub struct PlanGenerator {
    judge: Arc<dyn Judge>,
    max_steps: usize,
}

impl PlanGenerator {
    pub fn new(judge: Arc<dyn Judge>, max_steps: usize) -> Self {
        Self { judge, max_steps }
    }

    pub async fn plan(
        &self,
        claim: &str,
        usage: &mut UsageCounters,
    ) -> Result<VerificationPlan, DomainError> {
        let max_steps = self.max_steps.to_string();
        let instruction = prompts::render(
            prompts::PLANNING_INSTRUCTION,
            &[("max_steps", max_steps.as_str())],
        );

        let judgment = self
            .judge
            .judge(JudgmentRequest::new(
                JudgmentSchema::VerificationPlan,
                instruction,
                claim,
            ))
            .await?;
        usage.add(PipelineStage::VerificationPlanning, judgment.usage);

        let plan = VerificationPlan::from_payload(judgment.parse::<PlanPayload>()?, self.max_steps)?;
        debug!(claim = %claim, steps = plan.len(), "Verification plan generated");

        Ok(plan)
    }
}
