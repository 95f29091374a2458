//! Claims extracted from input text

use serde::{Deserialize, Serialize};

/// A single factual assertion taken from the input text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    verifiable: Option<bool>,
}

impl Claim {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            verifiable: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Verifiability annotation, `None` until judged
    pub fn verifiable(&self) -> Option<bool> {
        self.verifiable
    }

    pub fn mark_verifiable(&mut self, verifiable: bool) {
        self.verifiable = Some(verifiable);
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Structured payload returned for the `ClaimsList` schema
#[derive(Debug, Clone, Deserialize)]
pub struct ClaimsList {
    #[serde(default)]
    pub claims: Vec<ClaimItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClaimItem {
    pub claim: String,
}

impl ClaimsList {
    /// Trimmed claims with blank entries dropped
    pub fn into_claims(self) -> Vec<Claim> {
        self.claims
            .into_iter()
            .map(|item| item.claim.trim().to_string())
            .filter(|text| !text.is_empty())
            .map(Claim::new)
            .collect()
    }
}

/// Structured payload returned for the `VerifiableClaimFlag` schema
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct VerifiableClaimFlag {
    pub is_verifiable: bool,
}
