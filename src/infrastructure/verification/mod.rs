//! Verification pipeline stages and orchestration

mod claim_extractor;
mod executor;
mod pipeline;
mod planner;
mod verifiability;

pub use claim_extractor::ClaimExtractor;
pub use executor::PlanExecutor;
pub use pipeline::{StageJudges, VerificationPipeline};
pub use planner::PlanGenerator;
pub use verifiability::VerifiabilityChecker;
