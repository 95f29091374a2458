//! Domain layer - Core verification types and capability traits

pub mod credentials;
pub mod error;
pub mod judgment;
pub mod llm;
pub mod research;
pub mod search;
pub mod verification;

pub use credentials::{Credential, CredentialProvider, CredentialType};
pub use error::DomainError;
pub use judgment::{Judge, Judgment, JudgmentRequest, JudgmentSchema};
pub use llm::{
    FinishReason, LlmProvider, LlmRequest, LlmRequestBuilder, LlmResponse, Message, MessageRole,
    ToolCall, ToolDefinition, Usage,
};
pub use research::{ResearchNote, ResearchTask, Researcher};
pub use search::{SearchHit, SearchProvider};
pub use verification::{
    ClaimReport, ClaimStatus, FailurePolicy, PipelineConfig, PipelineOutput, PipelineStage,
    UsageCounters, UsageReport,
};
