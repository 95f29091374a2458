//! Output schemas the judgment capability can be asked for

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::llm::LlmJsonSchema;

/// Structured output requested from the judgment capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JudgmentSchema {
    ClaimsList,
    VerifiableClaimFlag,
    VerificationPlan,
    VerificationResult,
}

impl JudgmentSchema {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ClaimsList => "ClaimsList",
            Self::VerifiableClaimFlag => "VerifiableClaimFlag",
            Self::VerificationPlan => "VerificationPlan",
            Self::VerificationResult => "VerificationResult",
        }
    }

    /// JSON schema in the strict structured-output dialect
    pub fn json_schema(&self) -> Value {
        match self {
            Self::ClaimsList => json!({
                "type": "object",
                "properties": {
                    "claims": {
                        "type": "array",
                        "description": "The claims extracted from the text",
                        "items": {
                            "type": "object",
                            "properties": {
                                "claim": {
                                    "type": "string",
                                    "description": "The claim to be verified"
                                }
                            },
                            "required": ["claim"],
                            "additionalProperties": false
                        }
                    }
                },
                "required": ["claims"],
                "additionalProperties": false
            }),
            Self::VerifiableClaimFlag => json!({
                "type": "object",
                "properties": {
                    "is_verifiable": {
                        "type": "boolean",
                        "description": "Whether the claim can be checked against public evidence"
                    }
                },
                "required": ["is_verifiable"],
                "additionalProperties": false
            }),
            Self::VerificationPlan => json!({
                "type": "object",
                "properties": {
                    "plan": {
                        "type": "array",
                        "description": "Ordered steps to verify the claim",
                        "items": {
                            "type": "object",
                            "properties": {
                                "step_to_verify": {
                                    "type": "string",
                                    "description": "One search task that helps verify the claim"
                                }
                            },
                            "required": ["step_to_verify"],
                            "additionalProperties": false
                        }
                    }
                },
                "required": ["plan"],
                "additionalProperties": false
            }),
            Self::VerificationResult => json!({
                "type": "object",
                "properties": {
                    "truthfulness_score": {
                        "type": "number",
                        "description": "Truthfulness of the claim from 1 (false) to 10 (true)"
                    },
                    "sources": {
                        "type": "array",
                        "description": "URLs of the sources supporting the score",
                        "items": { "type": "string" }
                    },
                    "explanation": {
                        "type": "string",
                        "description": "Short explanation of the score"
                    }
                },
                "required": ["truthfulness_score", "sources", "explanation"],
                "additionalProperties": false
            }),
        }
    }

    pub fn to_llm_schema(&self) -> LlmJsonSchema {
        LlmJsonSchema {
            name: self.name().to_string(),
            schema: self.json_schema(),
            strict: true,
        }
    }
}

impl std::fmt::Display for JudgmentSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
