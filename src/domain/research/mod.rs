//! Step research capability
//!
//! A researcher carries out one verification step with a bounded number of
//! web searches and returns free-form notes that cite their sources.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::DomainError;

/// One verification step to research
#[derive(Debug, Clone)]
pub struct ResearchTask {
    pub claim: String,
    pub step: String,
    pub instruction: String,
    pub max_searches: usize,
}

impl ResearchTask {
    pub fn new(
        claim: impl Into<String>,
        step: impl Into<String>,
        instruction: impl Into<String>,
        max_searches: usize,
    ) -> Self {
        Self {
            claim: claim.into(),
            step: step.into(),
            instruction: instruction.into(),
            max_searches,
        }
    }
}

/// Notes produced by researching a step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResearchNote {
    pub text: String,
    pub searches: usize,
}

#[async_trait]
pub trait Researcher: Send + Sync + Debug {
    /// Research one step.
    ///
    /// Usage is added to `usage` as each model call completes, so it still
    /// reflects the calls made when the research fails part way through.
    async fn research(
        &self,
        task: &ResearchTask,
        usage: &mut u64,
    ) -> Result<ResearchNote, DomainError>;
}


#[cfg(test)]
mod tests {
    use super::mock::MockResearcher;
    use super::*;

    #[tokio::test]
    async fn test_mock_researcher_echoes_step() {
        let researcher = MockResearcher::new().with_usage_per_call(7);
        let task = ResearchTask::new("claim", "look it up", "instruction", 3);

        let mut usage = 0;
        let note = researcher.research(&task, &mut usage).await.unwrap();
        assert!(note.text.contains("look it up"));
        assert_eq!(usage, 7);
        assert_eq!(researcher.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_researcher_scripted_error_still_charges() {
        let researcher = MockResearcher::new()
            .with_usage_per_call(5)
            .then_error("search backend down");
        let task = ResearchTask::new("claim", "step", "instruction", 3);

        let mut usage = 0;
        assert!(researcher.research(&task, &mut usage).await.is_err());
        assert_eq!(usage, 5);
    }
}
