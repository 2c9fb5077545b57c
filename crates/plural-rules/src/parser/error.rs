//! Parse error types for plural-rule relations.

use thiserror::Error;

/// Relation text that does not follow the CLDR plural-rule grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed plural rule at column {column}: {message} in \"{relation}\"")]
pub struct MalformedRuleError {
    /// The complete relation text, samples included.
    pub relation: String,
    /// 1-based character column of the offending token.
    pub column: usize,
    pub message: String,
}

impl MalformedRuleError {
    pub fn new(relation: &str, column: usize, message: impl Into<String>) -> Self {
        MalformedRuleError {
            relation: relation.to_string(),
            column,
            message: message.into(),
        }
    }
}
