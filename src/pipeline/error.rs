//! Error types for batch apply

use thiserror::Error;

use crate::rules::RuleError;

/// Reasons a batch apply stops before writing anything
#[derive(Debug, Error)]
pub enum ApplyError {
    /// No rule set, or an empty one
    #[error("No rules configured. Add rename rules before applying.")]
    NoRulesConfigured,

    /// Nothing is checked in the collection
    #[error("Please select at least one file before applying rules")]
    NoFilesSelected,

    /// The evaluator broke its one-name-per-file contract
    #[error("Evaluator returned {actual} names for {expected} files")]
    EvaluatorContract { expected: usize, actual: usize },

    /// The evaluator itself failed
    #[error("Rule evaluation failed: {0}")]
    Evaluator(#[from] RuleError),

    /// Another apply on this pipeline has not finished yet
    #[error("A batch apply is already in progress")]
    Busy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_message() {
        let error = ApplyError::EvaluatorContract {
            expected: 3,
            actual: 2,
        };
        assert_eq!(error.to_string(), "Evaluator returned 2 names for 3 files");
    }

    #[test]
    fn test_rule_error_converts() {
        let error: ApplyError = RuleError::Evaluation("boom".into()).into();
        assert!(matches!(error, ApplyError::Evaluator(_)));
        assert_eq!(error.to_string(), "Rule evaluation failed: Rule evaluation failed: boom");
    }
}
