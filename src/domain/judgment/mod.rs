//! Claim judgment capability
//!
//! An external oracle that answers an instruction about some input text with
//! a value conforming to one of the pipeline's schemas.

mod judge;
mod schema;

pub use judge::{Judge, Judgment, JudgmentRequest};
pub use schema::JudgmentSchema;

#[cfg(test)]
pub use judge::mock::ScriptedJudge;
