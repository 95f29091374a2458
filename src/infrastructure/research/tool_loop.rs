//! Tool-calling reasoning loop
//!
//! Drives a chat model through a research step: the model may call
//! `web_search` up to the step's budget, and its final text answer becomes
//! the step's note.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::search_tool::{SearchBudget, WebSearchTool};
use crate::domain::research::{ResearchNote, ResearchTask, Researcher};
use crate::domain::search::{SearchProvider, NO_RESULTS_SENTINEL};
use crate::domain::{DomainError, LlmProvider, LlmRequest, Message};

/// Researcher backed by a tool-calling chat model
#[derive(Debug)]
pub struct ToolCallingResearcher {
    provider: Arc<dyn LlmProvider>,
    tool: WebSearchTool,
    model: String,
    max_rounds: usize,
    temperature: f32,
}

impl ToolCallingResearcher {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        search: Arc<dyn SearchProvider>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            tool: WebSearchTool::new(search),
            model: model.into(),
            max_rounds: 6,
            temperature: 0.0,
        }
    }

    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds.max(1);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

fn gathered_note(outputs: &[String]) -> String {
    if outputs.is_empty() {
        NO_RESULTS_SENTINEL.to_string()
    } else {
        outputs.join("\n\n")
    }
}

#[async_trait]
impl Researcher for ToolCallingResearcher {
    async fn research(
        &self,
        task: &ResearchTask,
        usage: &mut u64,
    ) -> Result<ResearchNote, DomainError> {
        let mut budget = SearchBudget::new(task.max_searches);
        let mut messages = vec![
            Message::system(task.instruction.clone()),
            Message::user(task.step.clone()),
        ];
        let mut outputs: Vec<String> = Vec::new();

        for round in 1..=self.max_rounds {
            let request = LlmRequest::builder()
                .messages(messages.clone())
                .temperature(self.temperature)
                .tool(WebSearchTool::definition())
                .build();

            let response = self.provider.chat(&self.model, request).await?;
            *usage = usage.saturating_add(response.total_tokens());

            if response.tool_calls().is_empty() {
                let text = match response.content() {
                    Some(text) if !text.trim().is_empty() => text.to_string(),
                    _ => gathered_note(&outputs),
                };

                debug!(
                    round,
                    searches = budget.used(),
                    "Research step finished"
                );

                return Ok(ResearchNote {
                    text,
                    searches: budget.used(),
                });
            }

            let calls = response.tool_calls().to_vec();
            messages.push(response.message.clone());

            for call in &calls {
                let output = self.tool.execute(call, &mut budget).await;
                outputs.push(output.clone());
                messages.push(Message::tool(call.id.clone(), output));
            }
        }

        warn!(
            max_rounds = self.max_rounds,
            searches = budget.used(),
            "Reasoning loop hit its round limit, using gathered search output"
        );

        Ok(ResearchNote {
            text: gathered_note(&outputs),
            searches: budget.used(),
        })
    }
}
