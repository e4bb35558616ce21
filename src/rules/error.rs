//! Error types for rule evaluation

use thiserror::Error;

/// Errors raised while turning rules into names
#[derive(Debug, Error)]
pub enum RuleError {
    /// A regex rule does not compile
    #[error("Invalid regex pattern '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Evaluator-specific failure
    #[error("Rule evaluation failed: {0}")]
    Evaluation(String),
}
