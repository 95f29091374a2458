//! Verification plans

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::DomainError;

/// One natural-language instruction within a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationStep {
    #[serde(rename = "step_to_verify")]
    instruction: String,
}

impl VerificationStep {
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
        }
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }
}

/// Ordered, non-empty list of steps for one claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationPlan {
    steps: Vec<VerificationStep>,
}

/// Structured payload returned for the `VerificationPlan` schema
#[derive(Debug, Clone, Deserialize)]
pub struct PlanPayload {
    #[serde(default)]
    pub plan: Vec<VerificationStep>,
}

impl VerificationPlan {
    /// Validate step cardinality.
    ///
    /// Blank steps are dropped. An empty plan is a malformed response; a plan
    /// longer than `max_steps` keeps its first `max_steps` steps.
    pub fn from_payload(payload: PlanPayload, max_steps: usize) -> Result<Self, DomainError> {
        let mut steps: Vec<VerificationStep> = payload
            .plan
            .into_iter()
            .map(|s| VerificationStep::new(s.instruction.trim()))
            .filter(|s| !s.instruction.is_empty())
            .collect();

        if steps.is_empty() {
            return Err(DomainError::malformed(
                "VerificationPlan",
                "plan contains no steps",
            ));
        }

        if steps.len() > max_steps {
            warn!(
                returned = steps.len(),
                max_steps, "Verification plan exceeds step limit, truncating"
            );
            steps.truncate(max_steps);
        }

        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[VerificationStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
