use std::sync::Arc;

use tracing::debug;

use crate::domain::judgment::{Judge, JudgmentRequest, JudgmentSchema};
use crate::domain::research::{ResearchTask, Researcher};
use crate::domain::verification::{
    prompts, PipelineStage, RawVerificationResult, UsageCounters, VerificationPlan,
    VerificationResult,
};
use crate::domain::DomainError;

/// Researches each plan step, then synthesizes a scored result
#[derive(Debug, Clone)]
pub struct PlanExecutor {
    researcher: Arc<dyn Researcher>,
    judge: Arc<dyn Judge>,
    max_searches_per_step: usize,
}

impl PlanExecutor {
    pub fn new(
        researcher: Arc<dyn Researcher>,
        judge: Arc<dyn Judge>,
        max_searches_per_step: usize,
    ) -> Self {
        Self {
            researcher,
            judge,
            max_searches_per_step,
        }
    }

    /// Research every step, then synthesize the result.
    ///
    /// Research and synthesis usage is charged to `verification_execution` as
    /// each call completes, including calls made before a failure.
    pub async fn execute(
        &self,
        claim: &str,
        plan: &VerificationPlan,
        usage: &mut UsageCounters,
    ) -> Result<VerificationResult, DomainError> {
        let max_searches = self.max_searches_per_step.to_string();
        let mut research = String::new();

        for (index, step) in plan.steps().iter().enumerate() {
            let instruction = prompts::render(
                prompts::RESEARCH_INSTRUCTION,
                &[
                    ("claim", claim),
                    ("step", step.instruction()),
                    ("max_searches", max_searches.as_str()),
                ],
            );
            let task = ResearchTask::new(
                claim,
                step.instruction(),
                instruction,
                self.max_searches_per_step,
            );

            let mut spent = 0u64;
            let outcome = self.researcher.research(&task, &mut spent).await;
            usage.add(PipelineStage::VerificationExecution, spent);
            let note = outcome?;

            debug!(
                step = index + 1,
                searches = note.searches,
                usage = spent,
                "Plan step researched"
            );

            research.push_str(&note.text);
            research.push_str(prompts::RESEARCH_SEPARATOR);
        }

        let judgment = self
            .judge
            .judge(JudgmentRequest::new(
                JudgmentSchema::VerificationResult,
                prompts::SYNTHESIS_INSTRUCTION,
                prompts::synthesis_input(claim, &research),
            ))
            .await?;
        usage.add(PipelineStage::VerificationExecution, judgment.usage);

        VerificationResult::from_raw(judgment.parse::<RawVerificationResult>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::judgment::ScriptedJudge;
    use crate::domain::research::mock::MockResearcher;
    use crate::domain::verification::{PlanPayload, VerificationStep};
    use serde_json::json;

    fn plan(steps: &[&str]) -> VerificationPlan {
        let payload = PlanPayload {
            plan: steps.iter().map(|s| VerificationStep::new(*s)).collect(),
        };
        VerificationPlan::from_payload(payload, 3).unwrap()
    }

    fn synthesis_judge(score: f64) -> Arc<ScriptedJudge> {
        Arc::new(
            ScriptedJudge::new()
                .with_value(
                    JudgmentSchema::VerificationResult,
                    json!({
                        "truthfulness_score": score,
                        "sources": ["https://example.com/evidence", "not a url"],
                        "explanation": "Supported by the evidence."
                    }),
                )
                .with_usage_per_call(30),
        )
    }

    #[tokio::test]
    async fn test_execute_researches_each_step_in_order() {
        let researcher = Arc::new(MockResearcher::new().with_usage_per_call(10));
        let judge = synthesis_judge(9.0);
        let executor = PlanExecutor::new(researcher.clone(), judge.clone(), 3);

        let mut usage = UsageCounters::new();
        let result = executor
            .execute("The sky is blue.", &plan(&["first step", "second step"]), &mut usage)
            .await
            .unwrap();

        let tasks = researcher.tasks();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].step, "first step");
        assert_eq!(tasks[1].step, "second step");
        assert_eq!(tasks[0].max_searches, 3);
        assert!(tasks[0].instruction.contains("at most 3 web searches"));

        assert_eq!(result.truthfulness_score, 9);
        assert_eq!(result.sources, vec!["https://example.com/evidence"]);
        assert_eq!(usage.get(PipelineStage::VerificationExecution), 50);

        let synthesis = &judge.requests()[0];
        assert!(synthesis.input.starts_with("Claim: The sky is blue."));
        assert_eq!(synthesis.input.matches(prompts::RESEARCH_SEPARATOR).count(), 2);
    }

    #[tokio::test]
    async fn test_execute_clamps_score() {
        let researcher = Arc::new(MockResearcher::new());
        let executor = PlanExecutor::new(researcher, synthesis_judge(14.2), 3);

        let result = executor
            .execute("claim", &plan(&["step"]), &mut UsageCounters::new())
            .await
            .unwrap();
        assert_eq!(result.truthfulness_score, 10);
    }

    #[tokio::test]
    async fn test_research_failure_skips_synthesis() {
        let researcher = Arc::new(MockResearcher::new().then_error("model unavailable"));
        let judge = synthesis_judge(5.0);
        let executor = PlanExecutor::new(researcher, judge.clone(), 3);

        let mut usage = UsageCounters::new();
        assert!(executor
            .execute("claim", &plan(&["step"]), &mut usage)
            .await
            .is_err());
        assert_eq!(judge.call_count(JudgmentSchema::VerificationResult), 0);
    }

    #[tokio::test]
    async fn test_malformed_synthesis_keeps_research_usage() {
        let researcher = Arc::new(MockResearcher::new().with_usage_per_call(100));
        let judge = Arc::new(
            ScriptedJudge::new()
                .with_value(JudgmentSchema::VerificationResult, json!({"score": 1}))
                .with_usage_per_call(10),
        );
        let executor = PlanExecutor::new(researcher, judge, 3);

        let mut usage = UsageCounters::new();
        let result = executor
            .execute("claim", &plan(&["step"]), &mut usage)
            .await;

        assert!(matches!(result, Err(DomainError::MalformedResponse { .. })));
        assert_eq!(usage.get(PipelineStage::VerificationExecution), 110);
    }
}
