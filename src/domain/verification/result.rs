//! Verification results and the per-claim output record

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::DomainError;

/// Explanation used for the placeholder record when no claims were found
pub const NO_CLAIMS_EXPLANATION: &str = "No verifiable claims were found in the provided text.";

/// Explanation used for claims judged not verifiable
pub const NOT_VERIFIABLE_EXPLANATION: &str = "The claim is not verifiable.";

/// Explanation used when an upstream service failed for a claim
pub const UPSTREAM_FAILURE_EXPLANATION: &str =
    "The claim could not be verified because an upstream service failed.";

/// Lowest score of an evaluated claim
pub const MIN_SCORE: u8 = 1;

/// Highest score of an evaluated claim
pub const MAX_SCORE: u8 = 10;

/// Score reserved for records that were not evaluated
pub const NOT_EVALUATED_SCORE: u8 = 0;

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://\S+$").expect("valid url pattern"));

/// Terminal record of a verified claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationResult {
    pub truthfulness_score: u8,
    pub sources: Vec<String>,
    pub explanation: String,
}

/// Structured payload returned for the `VerificationResult` schema
#[derive(Debug, Clone, Deserialize)]
pub struct RawVerificationResult {
    pub truthfulness_score: f64,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub explanation: String,
}

impl VerificationResult {
    /// Validate a synthesized result.
    ///
    /// The score is rounded and clamped into `MIN_SCORE..=MAX_SCORE`; a
    /// non-finite score is a malformed response. Sources that are not
    /// http(s) URLs are dropped.
    pub fn from_raw(raw: RawVerificationResult) -> Result<Self, DomainError> {
        if !raw.truthfulness_score.is_finite() {
            return Err(DomainError::malformed(
                "VerificationResult",
                format!("truthfulness score {} is not a number", raw.truthfulness_score),
            ));
        }

        let rounded = raw.truthfulness_score.round();
        let clamped = rounded.clamp(f64::from(MIN_SCORE), f64::from(MAX_SCORE));

        if clamped != rounded {
            warn!(
                score = raw.truthfulness_score,
                clamped, "Truthfulness score out of range, clamping"
            );
        }

        let sources = raw
            .sources
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| {
                let keep = URL_PATTERN.is_match(s);
                if !keep && !s.is_empty() {
                    debug!(source = %s, "Dropping non-URL source");
                }
                keep
            })
            .collect();

        let explanation = raw.explanation.trim().to_string();

        Ok(Self {
            truthfulness_score: clamped as u8,
            sources,
            explanation,
        })
    }
}

/// How a record was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    Verified,
    NotVerifiable,
    NoClaims,
    Failed,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::NotVerifiable => "not_verifiable",
            Self::NoClaims => "no_claims",
            Self::Failed => "failed",
        }
    }
}

/// One output record of the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimReport {
    pub claim: String,
    pub truthfulness_score: u8,
    pub sources: Vec<String>,
    pub explanation: String,
    pub status: ClaimStatus,
}

impl ClaimReport {
    pub fn verified(claim: impl Into<String>, result: VerificationResult) -> Self {
        Self {
            claim: claim.into(),
            truthfulness_score: result.truthfulness_score,
            sources: result.sources,
            explanation: result.explanation,
            status: ClaimStatus::Verified,
        }
    }

    pub fn not_verifiable(claim: impl Into<String>) -> Self {
        Self::unevaluated(claim, NOT_VERIFIABLE_EXPLANATION, ClaimStatus::NotVerifiable)
    }

    /// The single record returned when the text holds no claims
    pub fn no_claims() -> Self {
        Self::unevaluated("", NO_CLAIMS_EXPLANATION, ClaimStatus::NoClaims)
    }

    pub fn failed(claim: impl Into<String>) -> Self {
        Self::unevaluated(claim, UPSTREAM_FAILURE_EXPLANATION, ClaimStatus::Failed)
    }

    fn unevaluated(claim: impl Into<String>, explanation: &str, status: ClaimStatus) -> Self {
        Self {
            claim: claim.into(),
            truthfulness_score: NOT_EVALUATED_SCORE,
            sources: Vec::new(),
            explanation: explanation.to_string(),
            status,
        }
    }

    pub fn is_evaluated(&self) -> bool {
        self.truthfulness_score != NOT_EVALUATED_SCORE
    }
}
