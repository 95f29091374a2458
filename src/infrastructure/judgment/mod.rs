//! Judgment capability backed by a chat model

mod llm_judge;

pub use llm_judge::LlmJudge;
