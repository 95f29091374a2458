//! Per-stage token usage accounting

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Pipeline stage that usage is charged to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    ClaimExtraction,
    VerificationPlanning,
    VerificationExecution,
}

impl PipelineStage {
    pub const ALL: [PipelineStage; 3] = [
        PipelineStage::ClaimExtraction,
        PipelineStage::VerificationPlanning,
        PipelineStage::VerificationExecution,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClaimExtraction => "claim_extraction",
            Self::VerificationPlanning => "verification_planning",
            Self::VerificationExecution => "verification_execution",
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cumulative usage per stage for one `process` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageCounters {
    stages: BTreeMap<PipelineStage, u64>,
}

impl Default for UsageCounters {
    fn default() -> Self {
        Self::new()
    }
}

impl UsageCounters {
    /// All stages present, starting at zero
    pub fn new() -> Self {
        Self {
            stages: PipelineStage::ALL.iter().map(|s| (*s, 0)).collect(),
        }
    }

    pub fn add(&mut self, stage: PipelineStage, units: u64) {
        let counter = self.stages.entry(stage).or_insert(0);
        *counter = counter.saturating_add(units);
    }

    pub fn get(&self, stage: PipelineStage) -> u64 {
        self.stages.get(&stage).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.stages.values().fold(0u64, |acc, v| acc.saturating_add(*v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (PipelineStage, u64)> + '_ {
        self.stages.iter().map(|(s, v)| (*s, *v))
    }

    pub fn report(&self) -> UsageReport {
        UsageReport {
            stages: self.stages.clone(),
            total: self.total(),
        }
    }
}

/// Serialized usage summary; `total` is the sum of `stages`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageReport {
    pub stages: BTreeMap<PipelineStage, u64>,
    pub total: u64,
}
