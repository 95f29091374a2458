//! Judgment capability trait and request/response types

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Debug;

use super::JudgmentSchema;
use crate::domain::DomainError;

/// A request for structured judgment
#[derive(Debug, Clone)]
pub struct JudgmentRequest {
    pub schema: JudgmentSchema,
    pub instruction: String,
    pub input: String,
}

impl JudgmentRequest {
    pub fn new(
        schema: JudgmentSchema,
        instruction: impl Into<String>,
        input: impl Into<String>,
    ) -> Self {
        Self {
            schema,
            instruction: instruction.into(),
            input: input.into(),
        }
    }
}

/// A structured value plus the usage it cost (0 when unreported)
#[derive(Debug, Clone)]
pub struct Judgment {
    pub schema: JudgmentSchema,
    pub value: Value,
    pub usage: u64,
}

impl Judgment {
    pub fn new(schema: JudgmentSchema, value: Value, usage: u64) -> Self {
        Self {
            schema,
            value,
            usage,
        }
    }

    /// Deserialize the value into its typed payload
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, DomainError> {
        serde_json::from_value(self.value.clone())
            .map_err(|e| DomainError::malformed(self.schema.name(), e.to_string()))
    }
}

/// Language-model-backed oracle returning schema-conforming output
#[async_trait]
pub trait Judge: Send + Sync + Debug {
    async fn judge(&self, request: JudgmentRequest) -> Result<Judgment, DomainError>;
}
