//! Sample verification.

use std::fmt;

use plural_runtime::{OperandError, PluralCategory};

use crate::compiler::CompiledLocale;
use crate::parser::{SampleCase, SampleValue};

/// A sample the compiled guards do not classify as documented.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleMismatch {
    pub case: SampleCase,
    pub actual: Result<PluralCategory, OperandError>,
}

impl CompiledLocale {
    /// Classify every sample case and return the ones that disagree with
    /// their documented category.
    pub fn verify_samples(&self) -> Vec<SampleMismatch> {
        self.samples
            .iter()
            .filter_map(|case| {
                let actual = match &case.value {
                    SampleValue::Integer(value) => self.category_for(*value, case.rule_type),
                    SampleValue::Decimal(text) => self.category_for(text.as_str(), case.rule_type),
                };
                (actual != Ok(case.category)).then(|| SampleMismatch {
                    case: case.clone(),
                    actual,
                })
            })
            .collect()
    }
}

impl fmt::Display for SampleMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let case = &self.case;
        write!(
            f,
            "{} sample {} documented as '{}'",
            case.rule_type, case.value, case.category
        )?;
        match &self.actual {
            Ok(actual) => write!(f, " but classified as '{actual}'"),
            Err(err) => write!(f, " but failed: {err}"),
        }
    }
}
