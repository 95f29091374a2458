use async_trait::async_trait;
use std::fmt::Debug;

use super::{Credential, CredentialType};
use crate::domain::DomainError;

/// Trait for credential providers
#[async_trait]
pub trait CredentialProvider: Send + Sync + Debug {
    /// Get a credential by its type
    async fn get_credential(&self, credential_type: &CredentialType) -> Result<Credential, DomainError>;

    /// Check if this provider can supply the given credential type
    async fn supports(&self, credential_type: &CredentialType) -> bool;

    /// Get provider name for logging/debugging
    fn provider_name(&self) -> &'static str;
}
