use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Type of credential (which external service it belongs to)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialType {
    /// OpenAI-compatible chat completions endpoint (judgment and reasoning)
    OpenAi,
    /// Serper web search API
    Serper,
}

/// Credential entity containing an API key and optional extra parameters
#[derive(Clone)]
pub struct Credential {
    credential_type: CredentialType,
    api_key: String,
    additional_params: HashMap<String, String>,
}

impl Credential {
    pub fn new(credential_type: CredentialType, api_key: String) -> Self {
        Self {
            credential_type,
            api_key,
            additional_params: HashMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_params.insert(key.into(), value.into());
        self
    }

    pub fn credential_type(&self) -> &CredentialType {
        &self.credential_type
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn get_param(&self, key: &str) -> Option<&String> {
        self.additional_params.get(key)
    }
}

// The API key never reaches log output
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("credential_type", &self.credential_type)
            .field("api_key", &"[REDACTED]")
            .field("additional_params", &self.additional_params)
            .finish()
    }
}

impl std::fmt::Display for CredentialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialType::OpenAi => write!(f, "openai"),
            CredentialType::Serper => write!(f, "serper"),
        }
    }
}
