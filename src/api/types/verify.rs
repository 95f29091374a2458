//! Request and response bodies for `POST /v1/verify`

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{ClaimReport, PipelineOutput};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyRequest {
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub results: Vec<ClaimResult>,
    pub usage: UsageSummary,
}

/// One verified, unverifiable or failed claim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimResult {
    pub claim: String,
    pub truthfulness_score: u8,
    pub sources: Vec<String>,
    pub explanation: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageSummary {
    pub stages: BTreeMap<String, u64>,
    pub total: u64,
}

impl ClaimResult {
    fn from_domain(report: ClaimReport) -> Self {
        Self {
            status: report.status.as_str().to_string(),
            claim: report.claim,
            truthfulness_score: report.truthfulness_score,
            sources: report.sources,
            explanation: report.explanation,
        }
    }
}

impl VerifyResponse {
    pub fn from_domain(output: PipelineOutput) -> Self {
        Self {
            results: output.results.into_iter().map(ClaimResult::from_domain).collect(),
            usage: UsageSummary {
                stages: output
                    .usage
                    .stages
                    .into_iter()
                    .map(|(stage, units)| (stage.as_str().to_string(), units))
                    .collect(),
                total: output.usage.total,
            },
        }
    }
}
