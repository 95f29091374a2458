//! Truthio
//!
//! Fact-checks free-form text: extracts factual claims, plans a short web
//! search investigation per claim, researches each step with a tool-calling
//! language model and reports a truthfulness score with cited sources.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use domain::{CredentialProvider, CredentialType, DomainError, Judge};
use infrastructure::http_client::{HttpClient, Upstream};
use infrastructure::judgment::LlmJudge;
use infrastructure::llm::LlmProviderFactory;
use infrastructure::research::ToolCallingResearcher;
use infrastructure::search::{SerperSearchProvider, DEFAULT_SERPER_BASE_URL};
use infrastructure::verification::{StageJudges, VerificationPipeline};

/// Build the verification pipeline from configuration and credentials.
///
/// Fails when a credential is missing or the pipeline limits are invalid.
pub async fn build_pipeline(
    config: &AppConfig,
    credentials: &dyn CredentialProvider,
) -> Result<VerificationPipeline, DomainError> {
    let openai = credentials.get_credential(&CredentialType::OpenAi).await?;
    let serper = credentials.get_credential(&CredentialType::Serper).await?;

    let llm = LlmProviderFactory::create(&openai, config.llm.base_url.as_deref(), config.llm.timeout())?;

    let judge = |model: &str| -> Arc<dyn Judge> {
        Arc::new(LlmJudge::new(llm.clone(), model).with_temperature(config.llm.temperature))
    };
    let judges = StageJudges {
        extraction: judge(&config.llm.extraction_model),
        planning: judge(&config.llm.planning_model),
        execution: judge(&config.llm.execution_model),
    };

    let search = SerperSearchProvider::with_base_url(
        HttpClient::with_timeout(Upstream::Search, config.search.timeout())?,
        serper.api_key(),
        config
            .search
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_SERPER_BASE_URL),
    )
    .with_num_results(config.search.num_results);

    let researcher = ToolCallingResearcher::new(llm.clone(), Arc::new(search), &config.llm.execution_model)
        .with_max_rounds(config.pipeline.max_reasoning_rounds)
        .with_temperature(config.llm.temperature);

    let pipeline =
        VerificationPipeline::with_stage_judges(judges, Arc::new(researcher), config.pipeline.clone())?;

    info!(
        extraction_model = %config.llm.extraction_model,
        planning_model = %config.llm.planning_model,
        execution_model = %config.llm.execution_model,
        failure_policy = ?config.pipeline.failure_policy,
        "Verification pipeline ready"
    );

    Ok(pipeline)
}
