//! Sample annex extraction.
//!
//! Turns the `@integer …` / `@decimal …` suffix of a relation into literal
//! test values. A `~` range contributes only its two endpoints.

use std::fmt;

use plural_runtime::{Operands, PluralCategory, RuleType};
use tracing::trace;
use winnow::combinator::{preceded, repeat};
use winnow::prelude::*;
use winnow::token::{take_till, take_while};

use super::error::MalformedRuleError;
use super::relation::split_relation;

/// A literal sample value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleValue {
    Integer(u64),
    /// Decimal text as written, trailing zeros included.
    Decimal(String),
}

impl fmt::Display for SampleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleValue::Integer(value) => write!(f, "{value}"),
            SampleValue::Decimal(text) => f.write_str(text),
        }
    }
}

/// One expected classification: `category_for(value, rule_type) == category`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleCase {
    pub category: PluralCategory,
    pub rule_type: RuleType,
    pub value: SampleValue,
}

impl SampleCase {
    pub fn is_ordinal(&self) -> bool {
        self.rule_type.is_ordinal()
    }
}

/// Extract the sample cases of one relation.
///
/// # Example
///
/// ```
/// use plural_rules::parser::{SampleValue, extract_samples};
/// use plural_rules::{PluralCategory, RuleType};
///
/// let samples = extract_samples(
///     "i = 1 and v = 0 @integer 1, 21 @decimal 0.1~0.9",
///     PluralCategory::One,
///     RuleType::Cardinal,
/// )
/// .unwrap();
/// let values: Vec<String> = samples.iter().map(|s| s.value.to_string()).collect();
/// assert_eq!(values, ["1", "21", "0.1", "0.9"]);
/// assert_eq!(samples[2].value, SampleValue::Decimal("0.1".to_string()));
/// ```
pub fn extract_samples(
    relation: &str,
    category: PluralCategory,
    rule_type: RuleType,
) -> Result<Vec<SampleCase>, MalformedRuleError> {
    let (condition, annex) = split_relation(relation);
    let mut samples = Vec::new();
    // Column of the current '@', for errors.
    let mut column = condition.chars().count() + 1;

    for segment in annex.split('@').skip(1) {
        let (decimal, body) = if let Some(body) = segment.strip_prefix("integer") {
            (false, body)
        } else if let Some(body) = segment.strip_prefix("decimal") {
            (true, body)
        } else {
            return Err(MalformedRuleError::new(
                relation,
                column,
                "expected '@integer' or '@decimal'",
            ));
        };

        for token in sample_tokens(body) {
            if token.contains(['c', 'e']) {
                trace!(sample = token, "skipping compact-notation sample");
                continue;
            }
            let value = if decimal {
                Operands::from_decimal_str(token).map_err(|err| {
                    MalformedRuleError::new(relation, column, err.to_string())
                })?;
                SampleValue::Decimal(token.to_string())
            } else {
                let value = token.parse::<u64>().map_err(|_| {
                    MalformedRuleError::new(
                        relation,
                        column,
                        format!("'{token}' is not an integer sample"),
                    )
                })?;
                SampleValue::Integer(value)
            };
            samples.push(SampleCase {
                category,
                rule_type,
                value,
            });
        }

        column += segment.chars().count() + 1;
    }

    Ok(samples)
}

/// Numeric tokens of an annex body. Anything that is not part of a number
/// (space, comma, `~`, `…`) separates tokens.
fn sample_tokens(body: &str) -> Vec<&str> {
    let mut input = body;
    let tokens: ModalResult<Vec<&str>> = repeat(
        0..,
        preceded(
            take_till(0.., is_sample_char),
            take_while(1.., is_sample_char),
        ),
    )
    .parse_next(&mut input);
    tokens.unwrap_or_default()
}

/// Digits, the decimal point, and the compact-notation markers `c`/`e`.
fn is_sample_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | 'c' | 'e')
}
