//! Miette diagnostics for rule compilation errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use miette::{miette, Diagnostic, NamedSource, Report, SourceSpan};
use plural_rules::{CompileError, MalformedRuleError};
use thiserror::Error;

/// A miette-compatible diagnostic for a malformed relation.
///
/// The relation text is the source; the label points at the failing column.
#[derive(Debug, Error, Diagnostic)]
#[error("malformed rule in {context}: {message}")]
#[diagnostic(code(plurals::malformed_rule))]
pub struct RuleDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    context: String,

    message: String,
}

impl RuleDiagnostic {
    /// `context` names the rule, e.g. `ru cardinal 'few'`.
    pub fn from_malformed_rule(context: String, err: &MalformedRuleError) -> Self {
        let relation = &err.relation;
        // Columns count characters; spans count bytes.
        let offset = relation
            .char_indices()
            .nth(err.column.saturating_sub(1))
            .map_or(relation.len(), |(offset, _)| offset);
        let length = usize::from(offset < relation.len());

        RuleDiagnostic {
            src: NamedSource::new(context.clone(), relation.clone()),
            span: (offset, length).into(),
            context,
            message: err.message.clone(),
        }
    }
}

/// Convert a compile error into a report, with source context for
/// malformed rules.
pub fn compile_error_report(err: &CompileError) -> Report {
    match err {
        CompileError::MalformedRule {
            locale,
            rule_type,
            category,
            source,
        } => RuleDiagnostic::from_malformed_rule(
            format!("{locale} {rule_type} '{category}'"),
            source,
        )
        .into(),
        CompileError::MissingDefaultCategory { .. } | CompileError::UnknownCategory { .. } => {
            miette!("{err}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_points_at_failing_column() {
        let err = MalformedRuleError::new("n is 1", 3, "unknown word 'is'");
        let diagnostic = RuleDiagnostic::from_malformed_rule("xx cardinal 'one'".into(), &err);
        assert_eq!(diagnostic.span.offset(), 2);
        assert_eq!(diagnostic.span.len(), 1);
        assert_eq!(
            diagnostic.to_string(),
            "malformed rule in xx cardinal 'one': unknown word 'is'"
        );
    }

    #[test]
    fn span_past_end_is_empty() {
        let err = MalformedRuleError::new("i = 1 and", 10, "unexpected end of condition");
        let diagnostic = RuleDiagnostic::from_malformed_rule("xx cardinal 'one'".into(), &err);
        assert_eq!(diagnostic.span.offset(), 9);
        assert_eq!(diagnostic.span.len(), 0);
    }

    #[test]
    fn span_counts_characters() {
        let err = MalformedRuleError::new(
            "n = 1 @integer 1, … @float",
            21,
            "expected '@integer' or '@decimal'",
        );
        let diagnostic = RuleDiagnostic::from_malformed_rule("xx cardinal 'one'".into(), &err);
        assert_eq!(diagnostic.span.offset(), "n = 1 @integer 1, … ".len());
    }
}
