//! LLM-based judge
//!
//! Sends the instruction and input to a chat model with a strict JSON schema
//! response format and parses the reply into a JSON value.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::judgment::{Judge, Judgment, JudgmentRequest};
use crate::domain::llm::{LlmProvider, LlmRequest, LlmResponseFormat};
use crate::domain::DomainError;

/// Judge that asks a chat model for schema-conforming output
#[derive(Debug)]
pub struct LlmJudge {
    provider: Arc<dyn LlmProvider>,
    model: String,
    temperature: f32,
}

impl LlmJudge {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: 0.0,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Extract the JSON object from a reply (handles code fences and chatter)
fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if start < end {
        Some(&text[start..=end])
    } else {
        None
    }
}

#[async_trait]
impl Judge for LlmJudge {
    async fn judge(&self, request: JudgmentRequest) -> Result<Judgment, DomainError> {
        let schema = request.schema;

        debug!(schema = %schema, model = %self.model, "Requesting judgment");

        let llm_request = LlmRequest::builder()
            .system(request.instruction)
            .user(request.input)
            .temperature(self.temperature)
            .response_format(LlmResponseFormat::JsonSchema {
                json_schema: schema.to_llm_schema(),
            })
            .build();

        let response = self.provider.chat(&self.model, llm_request).await?;
        let usage = response.total_tokens();

        let content = response
            .content()
            .ok_or_else(|| DomainError::malformed(schema.name(), "Empty response from model"))?;

        let json_str = extract_json(content).unwrap_or(content);
        let value = serde_json::from_str(json_str).map_err(|e| {
            warn!(schema = %schema, error = %e, "Failed to parse judgment response");
            DomainError::malformed(schema.name(), e.to_string())
        })?;

        Ok(Judgment::new(schema, value, usage))
    }
}
