use std::sync::Arc;
use std::time::Duration;

use super::openai::{OpenAiProvider, DEFAULT_OPENAI_BASE_URL};
use crate::domain::{Credential, CredentialType, DomainError, LlmProvider};
use crate::infrastructure::http_client::{HttpClient, Upstream};

/// Factory for creating LLM providers
#[derive(Debug)]
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    /// Create the OpenAI-compatible provider from a credential.
    ///
    /// The base URL is taken from `base_url`, then from the credential's
    /// `base_url` parameter, then the public OpenAI endpoint.
    pub fn create(
        credential: &Credential,
        base_url: Option<&str>,
        timeout: Duration,
    ) -> Result<Arc<dyn LlmProvider>, DomainError> {
        Self::validate_credential_type(credential, &CredentialType::OpenAi)?;

        let base_url = base_url
            .or_else(|| credential.get_param("base_url").map(String::as_str))
            .unwrap_or(DEFAULT_OPENAI_BASE_URL);

        let http_client = HttpClient::with_timeout(Upstream::Llm("openai"), timeout)?;
        Ok(Arc::new(OpenAiProvider::with_base_url(
            http_client,
            credential.api_key(),
            base_url,
        )))
    }

    fn validate_credential_type(
        credential: &Credential,
        expected: &CredentialType,
    ) -> Result<(), DomainError> {
        if credential.credential_type() != expected {
            return Err(DomainError::configuration(format!(
                "Credential type mismatch: expected {}, got {}",
                expected,
                credential.credential_type()
            )));
        }
        Ok(())
    }
}
