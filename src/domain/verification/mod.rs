//! Claim verification domain
//!
//! Types flowing through the four pipeline stages: claims, verification
//! plans, verification results and the per-stage usage counters.

mod claim;
mod config;
mod plan;
pub mod prompts;
mod result;
mod usage;

pub use claim::{Claim, ClaimItem, ClaimsList, VerifiableClaimFlag};
pub use config::{FailurePolicy, PipelineConfig};
pub use plan::{PlanPayload, VerificationPlan, VerificationStep};
pub use result::{
    ClaimReport, ClaimStatus, RawVerificationResult, VerificationResult, MAX_SCORE, MIN_SCORE,
    NOT_EVALUATED_SCORE, NOT_VERIFIABLE_EXPLANATION, NO_CLAIMS_EXPLANATION,
    UPSTREAM_FAILURE_EXPLANATION,
};
pub use usage::{PipelineStage, UsageCounters, UsageReport};

use serde::{Deserialize, Serialize};

/// Output of one `process` call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub results: Vec<ClaimReport>,
    pub usage: UsageReport,
}
