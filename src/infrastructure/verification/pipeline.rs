//! Verification pipeline orchestration
//!
//! One pass per input text: extract claims, then for each claim judge
//! verifiability, plan and execute. Usage is charged per stage and the
//! configured failure policy decides whether an upstream error degrades a
//! single record or aborts the call.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use super::{ClaimExtractor, PlanExecutor, PlanGenerator, VerifiabilityChecker};
use crate::domain::judgment::Judge;
use crate::domain::research::Researcher;
use crate::domain::verification::{
    Claim, ClaimReport, FailurePolicy, PipelineConfig, PipelineOutput, UsageCounters,
};
use crate::domain::DomainError;
use crate::infrastructure::observability::{record_claim, record_pipeline_run, record_stage_tokens};

/// Claim verification pipeline
#[derive(Debug, Clone)]
pub struct VerificationPipeline {
    extractor: ClaimExtractor,
    verifiability: VerifiabilityChecker,
    planner: PlanGenerator,
    executor: PlanExecutor,
    config: PipelineConfig,
}

/// Judges used by each stage; stages may run on different models
#[derive(Debug, Clone)]
pub struct StageJudges {
    /// Claim extraction and verifiability
    pub extraction: Arc<dyn Judge>,
    pub planning: Arc<dyn Judge>,
    /// Synthesis of the research notes
    pub execution: Arc<dyn Judge>,
}

impl StageJudges {
    pub fn shared(judge: Arc<dyn Judge>) -> Self {
        Self {
            extraction: judge.clone(),
            planning: judge.clone(),
            execution: judge,
        }
    }
}

impl VerificationPipeline {
    pub fn new(
        judge: Arc<dyn Judge>,
        researcher: Arc<dyn Researcher>,
        config: PipelineConfig,
    ) -> Result<Self, DomainError> {
        Self::with_stage_judges(StageJudges::shared(judge), researcher, config)
    }

    pub fn with_stage_judges(
        judges: StageJudges,
        researcher: Arc<dyn Researcher>,
        config: PipelineConfig,
    ) -> Result<Self, DomainError> {
        config.validate()?;

        Ok(Self {
            extractor: ClaimExtractor::new(judges.extraction.clone()),
            verifiability: VerifiabilityChecker::new(judges.extraction),
            planner: PlanGenerator::new(judges.planning, config.max_plan_steps),
            executor: PlanExecutor::new(researcher, judges.execution, config.max_searches_per_step),
            config,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Verify every claim in `text`
    #[instrument(skip_all, fields(chars = text.chars().count()))]
    pub async fn process(&self, text: &str) -> Result<PipelineOutput, DomainError> {
        let start = Instant::now();
        let mut usage = UsageCounters::new();

        let result = self.run(text, &mut usage).await;
        record_pipeline_run(start.elapsed(), result.is_ok());

        for (stage, units) in usage.iter() {
            record_stage_tokens(stage.as_str(), units);
        }

        let results = result?;
        for report in &results {
            record_claim(report.status.as_str());
        }

        info!(
            claims = results.len(),
            total_usage = usage.total(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Verification complete"
        );

        Ok(PipelineOutput {
            results,
            usage: usage.report(),
        })
    }

    async fn run(
        &self,
        text: &str,
        usage: &mut UsageCounters,
    ) -> Result<Vec<ClaimReport>, DomainError> {
        self.validate_input(text)?;

        let claims = match self.extractor.extract(text, usage).await {
            Ok(claims) => claims,
            Err(e) if self.degrades(&e) => {
                warn!(error = %e, "Claim extraction failed, treating text as claim-free");
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        if claims.is_empty() {
            debug!("No claims found");
            return Ok(vec![ClaimReport::no_claims()]);
        }

        info!(claims = claims.len(), "Verifying claims");

        let mut reports = Vec::with_capacity(claims.len());
        for claim in claims {
            let text = claim.text().to_string();
            match self.verify_claim(claim, usage).await {
                Ok(report) => reports.push(report),
                Err(e) if self.degrades(&e) => {
                    warn!(claim = %text, error = %e, "Claim verification failed, degrading record");
                    reports.push(ClaimReport::failed(text));
                }
                Err(e) => return Err(e),
            }
        }

        Ok(reports)
    }

    async fn verify_claim(
        &self,
        mut claim: Claim,
        usage: &mut UsageCounters,
    ) -> Result<ClaimReport, DomainError> {
        let verifiable = self.verifiability.check(&claim, usage).await?;
        claim.mark_verifiable(verifiable);

        if !verifiable {
            debug!(claim = %claim.text(), "Claim is not verifiable");
            return Ok(ClaimReport::not_verifiable(claim.into_text()));
        }

        let plan = self.planner.plan(claim.text(), usage).await?;
        let result = self.executor.execute(claim.text(), &plan, usage).await?;

        Ok(ClaimReport::verified(claim.into_text(), result))
    }

    fn validate_input(&self, text: &str) -> Result<(), DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::validation("Input text must not be empty"));
        }

        let chars = text.chars().count();
        if chars > self.config.max_input_chars {
            return Err(DomainError::validation(format!(
                "Input text is {} characters, the limit is {}",
                chars, self.config.max_input_chars
            )));
        }

        Ok(())
    }

    fn degrades(&self, error: &DomainError) -> bool {
        self.config.failure_policy == FailurePolicy::Degrade && error.is_upstream()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::judgment::{JudgmentSchema, ScriptedJudge};
    use crate::domain::llm::{LlmResponse, Message, MockLlmProvider, ToolCall, Usage};
    use crate::domain::research::mock::MockResearcher;
    use crate::domain::search::{MockSearchProvider, NO_RESULTS_SENTINEL};
    use crate::domain::verification::{
        ClaimStatus, PipelineStage, NOT_VERIFIABLE_EXPLANATION, NO_CLAIMS_EXPLANATION,
        UPSTREAM_FAILURE_EXPLANATION,
    };
    use crate::infrastructure::research::ToolCallingResearcher;
    use serde_json::{json, Value};

    fn claims(texts: &[&str]) -> Value {
        json!({ "claims": texts.iter().map(|t| json!({ "claim": t })).collect::<Vec<_>>() })
    }

    fn verdict(verifiable: bool) -> Value {
        json!({ "is_verifiable": verifiable })
    }

    fn plan(steps: &[&str]) -> Value {
        json!({ "plan": steps.iter().map(|s| json!({ "step_to_verify": s })).collect::<Vec<_>>() })
    }

    fn result(score: f64) -> Value {
        json!({
            "truthfulness_score": score,
            "sources": ["https://example.com/evidence"],
            "explanation": "Consistent with the sources."
        })
    }

    fn pipeline(judge: Arc<ScriptedJudge>, researcher: Arc<MockResearcher>) -> VerificationPipeline {
        VerificationPipeline::new(judge, researcher, PipelineConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_no_claims_yields_placeholder() {
        let judge = Arc::new(
            ScriptedJudge::new()
                .with_value(JudgmentSchema::ClaimsList, claims(&[]))
                .with_usage_per_call(8),
        );
        let researcher = Arc::new(MockResearcher::new());

        let output = pipeline(judge.clone(), researcher.clone())
            .process("What a lovely day!")
            .await
            .unwrap();

        assert_eq!(output.results.len(), 1);
        let record = &output.results[0];
        assert_eq!(record.truthfulness_score, 0);
        assert!(record.sources.is_empty());
        assert_eq!(record.explanation, NO_CLAIMS_EXPLANATION);
        assert_eq!(record.status, ClaimStatus::NoClaims);

        assert_eq!(output.usage.total, 8);
        assert_eq!(judge.call_count(JudgmentSchema::VerifiableClaimFlag), 0);
        assert_eq!(researcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_single_claim_exercises_each_stage_once() {
        let judge = Arc::new(
            ScriptedJudge::new()
                .with_value(JudgmentSchema::ClaimsList, claims(&["The sky is blue."]))
                .with_value(JudgmentSchema::VerifiableClaimFlag, verdict(true))
                .with_value(JudgmentSchema::VerificationPlan, plan(&["Search why the sky is blue"]))
                .with_value(JudgmentSchema::VerificationResult, result(9.0))
                .with_usage_per_call(10),
        );
        let researcher = Arc::new(MockResearcher::new().with_usage_per_call(25));

        let output = pipeline(judge.clone(), researcher.clone())
            .process("The sky is blue.")
            .await
            .unwrap();

        assert_eq!(judge.call_count(JudgmentSchema::VerifiableClaimFlag), 1);
        assert_eq!(judge.call_count(JudgmentSchema::VerificationPlan), 1);
        assert_eq!(judge.call_count(JudgmentSchema::VerificationResult), 1);
        assert_eq!(researcher.call_count(), 1);

        let record = &output.results[0];
        assert_eq!(record.claim, "The sky is blue.");
        assert_eq!(record.truthfulness_score, 9);
        assert_eq!(record.sources, vec!["https://example.com/evidence"]);
        assert_eq!(record.status, ClaimStatus::Verified);

        let stages = &output.usage.stages;
        assert_eq!(stages[&PipelineStage::ClaimExtraction], 20);
        assert_eq!(stages[&PipelineStage::VerificationPlanning], 10);
        assert_eq!(stages[&PipelineStage::VerificationExecution], 35);
        assert_eq!(output.usage.total, 65);
        assert_eq!(output.usage.total, stages.values().sum::<u64>());
    }

    #[tokio::test]
    async fn test_unverifiable_claim_skips_planning_and_research() {
        let judge = Arc::new(
            ScriptedJudge::new()
                .with_value(JudgmentSchema::ClaimsList, claims(&["Pineapple belongs on pizza."]))
                .with_value(JudgmentSchema::VerifiableClaimFlag, verdict(false)),
        );
        let researcher = Arc::new(MockResearcher::new());

        let output = pipeline(judge.clone(), researcher.clone())
            .process("Pineapple belongs on pizza.")
            .await
            .unwrap();

        let record = &output.results[0];
        assert_eq!(record.truthfulness_score, 0);
        assert!(record.sources.is_empty());
        assert_eq!(record.explanation, NOT_VERIFIABLE_EXPLANATION);
        assert_eq!(judge.call_count(JudgmentSchema::VerificationPlan), 0);
        assert_eq!(researcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_records_follow_claim_order() {
        let judge = Arc::new(
            ScriptedJudge::new()
                .with_value(
                    JudgmentSchema::ClaimsList,
                    claims(&["Paris is in France.", "I love Mondays.", "Paris is in France."]),
                )
                .then_value(JudgmentSchema::VerifiableClaimFlag, verdict(true))
                .then_value(JudgmentSchema::VerifiableClaimFlag, verdict(false))
                .then_value(JudgmentSchema::VerifiableClaimFlag, verdict(true))
                .with_value(JudgmentSchema::VerificationPlan, plan(&["Check a map"]))
                .then_value(JudgmentSchema::VerificationResult, result(10.0))
                .then_value(JudgmentSchema::VerificationResult, result(9.6)),
        );
        let researcher = Arc::new(MockResearcher::new());

        let output = pipeline(judge, researcher.clone())
            .process("Paris is in France. I love Mondays. Paris is in France.")
            .await
            .unwrap();

        let statuses: Vec<ClaimStatus> = output.results.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![ClaimStatus::Verified, ClaimStatus::NotVerifiable, ClaimStatus::Verified]
        );
        assert_eq!(output.results[2].truthfulness_score, 10);
        assert_eq!(researcher.call_count(), 2);
        for record in &output.results {
            assert!(record.truthfulness_score <= 10);
        }
    }

    #[tokio::test]
    async fn test_degrade_marks_failed_claim_and_continues() {
        let judge = Arc::new(
            ScriptedJudge::new()
                .with_value(JudgmentSchema::ClaimsList, claims(&["First claim.", "Second claim."]))
                .with_value(JudgmentSchema::VerifiableClaimFlag, verdict(true))
                .then_error(JudgmentSchema::VerificationPlan, "HTTP 503")
                .with_value(JudgmentSchema::VerificationPlan, plan(&["step"]))
                .with_value(JudgmentSchema::VerificationResult, result(6.0)),
        );
        let researcher = Arc::new(MockResearcher::new());

        let output = pipeline(judge, researcher).process("text").await.unwrap();

        assert_eq!(output.results[0].status, ClaimStatus::Failed);
        assert_eq!(output.results[0].explanation, UPSTREAM_FAILURE_EXPLANATION);
        assert_eq!(output.results[0].truthfulness_score, 0);
        assert_eq!(output.results[1].status, ClaimStatus::Verified);
    }

    #[tokio::test]
    async fn test_degrade_keeps_usage_spent_before_malformed_synthesis() {
        let judge = Arc::new(
            ScriptedJudge::new()
                .with_value(JudgmentSchema::ClaimsList, claims(&["The sky is blue."]))
                .with_value(JudgmentSchema::VerifiableClaimFlag, verdict(true))
                .with_value(JudgmentSchema::VerificationPlan, plan(&["step"]))
                .with_value(JudgmentSchema::VerificationResult, json!({"score": 1}))
                .with_usage_per_call(10),
        );
        let researcher = Arc::new(MockResearcher::new().with_usage_per_call(100));

        let output = pipeline(judge, researcher.clone())
            .process("The sky is blue.")
            .await
            .unwrap();

        assert_eq!(output.results[0].status, ClaimStatus::Failed);
        assert_eq!(researcher.call_count(), 1);

        let stages = &output.usage.stages;
        assert_eq!(stages[&PipelineStage::ClaimExtraction], 20);
        assert_eq!(stages[&PipelineStage::VerificationPlanning], 10);
        assert_eq!(stages[&PipelineStage::VerificationExecution], 110);
        assert_eq!(output.usage.total, 140);
    }

    #[tokio::test]
    async fn test_empty_search_results_still_yield_scored_record() {
        let judge = Arc::new(
            ScriptedJudge::new()
                .with_value(JudgmentSchema::ClaimsList, claims(&["The sky is blue."]))
                .with_value(JudgmentSchema::VerifiableClaimFlag, verdict(true))
                .with_value(JudgmentSchema::VerificationPlan, plan(&["Search why the sky is blue"]))
                .with_value(
                    JudgmentSchema::VerificationResult,
                    json!({
                        "truthfulness_score": 5,
                        "sources": [],
                        "explanation": "No evidence was found either way."
                    }),
                ),
        );

        let mut search = MockSearchProvider::new();
        search.expect_search().returning(|_| Ok(Vec::new()));
        search.expect_provider_name().return_const("mock");

        let search_call = ToolCall::new("c1", "web_search", json!({"query": "sky"}).to_string());
        let llm = Arc::new(
            MockLlmProvider::new("mock")
                .then_respond(
                    LlmResponse::new(
                        "r1".to_string(),
                        "gpt-4o".to_string(),
                        Message::assistant_with_tool_calls("", vec![search_call]),
                    )
                    .with_usage(Usage::new(10, 5)),
                )
                .then_respond(LlmResponse::new(
                    "r2".to_string(),
                    "gpt-4o".to_string(),
                    Message::assistant(""),
                )),
        );
        let researcher = Arc::new(ToolCallingResearcher::new(llm, Arc::new(search), "gpt-4o"));

        let output = VerificationPipeline::new(judge.clone(), researcher, PipelineConfig::default())
            .unwrap()
            .process("The sky is blue.")
            .await
            .unwrap();

        let record = &output.results[0];
        assert_eq!(record.status, ClaimStatus::Verified);
        assert!((1..=10).contains(&record.truthfulness_score));
        assert!(!record.explanation.is_empty());
        assert!(record.sources.is_empty());

        let synthesis = judge
            .requests()
            .into_iter()
            .find(|r| r.schema == JudgmentSchema::VerificationResult)
            .unwrap();
        assert!(synthesis.input.contains(NO_RESULTS_SENTINEL));
        assert_eq!(output.usage.stages[&PipelineStage::VerificationExecution], 15);
    }

    #[tokio::test]
    async fn test_degrade_extraction_failure_yields_placeholder() {
        let judge = Arc::new(ScriptedJudge::new().then_error(JudgmentSchema::ClaimsList, "timeout"));
        let researcher = Arc::new(MockResearcher::new());

        let output = pipeline(judge, researcher).process("text").await.unwrap();

        assert_eq!(output.results.len(), 1);
        assert_eq!(output.results[0].status, ClaimStatus::NoClaims);
        assert_eq!(output.usage.total, 0);
    }

    #[tokio::test]
    async fn test_abort_policy_propagates_error() {
        let judge = Arc::new(
            ScriptedJudge::new()
                .with_value(JudgmentSchema::ClaimsList, claims(&["A claim."]))
                .with_value(JudgmentSchema::VerifiableClaimFlag, verdict(true))
                .with_value(JudgmentSchema::VerificationPlan, plan(&["step"]))
                .with_value(JudgmentSchema::VerificationResult, json!({"score": 3})),
        );
        let researcher = Arc::new(MockResearcher::new());
        let config = PipelineConfig::default().with_failure_policy(FailurePolicy::Abort);

        let result = VerificationPipeline::new(judge, researcher, config)
            .unwrap()
            .process("text")
            .await;

        assert!(matches!(result, Err(DomainError::MalformedResponse { .. })));
    }

    #[tokio::test]
    async fn test_empty_and_oversized_input_rejected() {
        let judge = Arc::new(ScriptedJudge::new());
        let researcher = Arc::new(MockResearcher::new());
        let config = PipelineConfig::default().with_max_input_chars(10);
        let pipeline = VerificationPipeline::new(judge.clone(), researcher, config).unwrap();

        assert!(matches!(
            pipeline.process("   ").await,
            Err(DomainError::Validation { .. })
        ));
        assert!(matches!(
            pipeline.process("this text is too long").await,
            Err(DomainError::Validation { .. })
        ));
        assert!(judge.requests().is_empty());
    }

    #[tokio::test]
    async fn test_each_call_starts_with_fresh_counters() {
        let judge = Arc::new(
            ScriptedJudge::new()
                .with_value(JudgmentSchema::ClaimsList, claims(&[]))
                .with_usage_per_call(4),
        );
        let pipeline = pipeline(judge, Arc::new(MockResearcher::new()));

        let first = pipeline.process("one").await.unwrap();
        let second = pipeline.process("two").await.unwrap();

        assert_eq!(first.usage.total, 4);
        assert_eq!(second.usage.total, 4);
    }
}
