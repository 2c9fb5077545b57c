//! Error types for loading and compiling plural rules.

use std::io;
use std::path::PathBuf;

use plural_runtime::{PluralCategory, RuleType};
use strsim::levenshtein;
use thiserror::Error;

use crate::parser::MalformedRuleError;

/// Errors that occur while compiling one locale's rules.
///
/// Each error aborts only the locale it names.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A relation does not follow the rule grammar.
    #[error("{locale} {rule_type} '{category}': {source}")]
    MalformedRule {
        locale: String,
        rule_type: RuleType,
        category: PluralCategory,
        #[source]
        source: MalformedRuleError,
    },

    /// The rule set has no `other` entry.
    #[error("{locale} {rule_type} rules have no 'other' category")]
    MissingDefaultCategory { locale: String, rule_type: RuleType },

    /// A rule key is not `pluralRule-count-<category>`.
    #[error("{locale} {rule_type} rules: unknown key '{key}'{}", suggestion_hint(suggestions))]
    UnknownCategory {
        locale: String,
        rule_type: RuleType,
        key: String,
        suggestions: Vec<String>,
    },
}

impl CompileError {
    /// The locale whose compilation failed.
    pub fn locale(&self) -> &str {
        match self {
            CompileError::MalformedRule { locale, .. }
            | CompileError::MissingDefaultCategory { locale, .. }
            | CompileError::UnknownCategory { locale, .. } => locale,
        }
    }
}

/// Errors that occur while reading CLDR documents.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading a document.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document is not valid JSON, or its rule tables are not maps of
    /// strings.
    #[error("{origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON without a `supplemental` block.
    #[error("{origin} is not a CLDR supplemental document")]
    NotCldr { origin: String },

    /// A requested locale has no cardinal rules.
    #[error("unknown locale '{locale}'{}", suggestion_hint(suggestions))]
    UnknownLocale {
        locale: String,
        suggestions: Vec<String>,
    },
}

fn suggestion_hint(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean: {}?", suggestions.join(", "))
    }
}

/// Compute typo suggestions using Levenshtein distance.
///
/// - distance <= 1 for names of at most 3 characters
/// - distance <= 2 for longer names
/// - at most 3 suggestions, closest first
///
/// # Example
///
/// ```
/// use plural_rules::compute_suggestions;
///
/// let available = ["en".to_string(), "es".to_string(), "ru".to_string()];
/// assert_eq!(compute_suggestions("rux", &available), ["ru"]);
/// ```
pub fn compute_suggestions(name: &str, available: &[String]) -> Vec<String> {
    let max_distance = if name.len() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, &String)> = available
        .iter()
        .filter_map(|candidate| {
            let distance = levenshtein(name, candidate);
            (distance > 0 && distance <= max_distance).then_some((distance, candidate))
        })
        .collect();

    suggestions.sort_by_key(|(distance, _)| *distance);
    suggestions
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.clone())
        .collect()
}
