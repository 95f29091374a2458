//! Pipeline configuration

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// What to do when an upstream call fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Extraction failures become the no-claims placeholder and per-claim
    /// failures become `failed` records
    #[default]
    Degrade,
    /// The first failure aborts the whole call
    Abort,
}

/// Configuration for the verification pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum steps kept from a generated plan
    #[serde(default = "default_max_plan_steps")]
    pub max_plan_steps: usize,
    /// Hard cap on web searches per plan step
    #[serde(default = "default_max_searches_per_step")]
    pub max_searches_per_step: usize,
    /// Maximum model turns in one reasoning loop
    #[serde(default = "default_max_reasoning_rounds")]
    pub max_reasoning_rounds: usize,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
    /// Longest accepted input text, in characters
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,
}

fn default_max_plan_steps() -> usize {
    3
}

fn default_max_searches_per_step() -> usize {
    3
}

fn default_max_reasoning_rounds() -> usize {
    6
}

fn default_max_input_chars() -> usize {
    20_000
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_plan_steps: default_max_plan_steps(),
            max_searches_per_step: default_max_searches_per_step(),
            max_reasoning_rounds: default_max_reasoning_rounds(),
            failure_policy: FailurePolicy::default(),
            max_input_chars: default_max_input_chars(),
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_plan_steps(mut self, max: usize) -> Self {
        self.max_plan_steps = max;
        self
    }

    pub fn with_max_searches_per_step(mut self, max: usize) -> Self {
        self.max_searches_per_step = max;
        self
    }

    pub fn with_max_reasoning_rounds(mut self, max: usize) -> Self {
        self.max_reasoning_rounds = max;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_max_input_chars(mut self, max: usize) -> Self {
        self.max_input_chars = max;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_plan_steps == 0 {
            return Err(DomainError::configuration(
                "pipeline.max_plan_steps must be at least 1",
            ));
        }

        if self.max_searches_per_step == 0 {
            return Err(DomainError::configuration(
                "pipeline.max_searches_per_step must be at least 1",
            ));
        }

        // One round to search, one to answer
        if self.max_reasoning_rounds < 2 {
            return Err(DomainError::configuration(
                "pipeline.max_reasoning_rounds must be at least 2",
            ));
        }

        if self.max_input_chars == 0 {
            return Err(DomainError::configuration(
                "pipeline.max_input_chars must be at least 1",
            ));
        }

        Ok(())
    }
}
