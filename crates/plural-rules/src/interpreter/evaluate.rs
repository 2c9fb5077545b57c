//! Direct evaluation of compiled guards.

use plural_runtime::{IntoOperands, OperandError, Operands, PluralCategory, RuleType};

use crate::compiler::{CompiledLocale, Condition, Extraction};
use crate::parser::{OperandExpr, OperandSymbol};

/// The value of one operand expression.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
    Integer(u64),
    Decimal(f64),
}

/// Operand values available to guards, as produced by the declaration
/// block of a generated function.
#[derive(Debug, Clone, Copy)]
enum Environment {
    Empty,
    Integer(u64),
    Full(Operands),
}

impl Environment {
    fn extract(extraction: &Extraction, value: impl IntoOperands) -> Result<Self, OperandError> {
        Ok(match extraction {
            Extraction::None => Environment::Empty,
            Extraction::IntegerOnly => Environment::Integer(value.integer_digits()?),
            Extraction::Full(_) => Environment::Full(value.into_operands()?),
        })
    }

    fn lookup(&self, expr: OperandExpr) -> Number {
        let base = match (self, expr.symbol) {
            (Environment::Integer(i), _) | (Environment::Full(Operands { i, .. }), OperandSymbol::I) => {
                Number::Integer(*i)
            }
            (Environment::Full(ops), OperandSymbol::N) => Number::Decimal(ops.n),
            (Environment::Full(ops), OperandSymbol::V) => Number::Integer(ops.v as u64),
            (Environment::Full(ops), OperandSymbol::W) => Number::Integer(ops.w as u64),
            (Environment::Full(ops), OperandSymbol::F) => Number::Integer(ops.f),
            (Environment::Full(ops), OperandSymbol::T) => Number::Integer(ops.t),
            // Compact operands never survive lowering; they are zero anyway.
            (Environment::Full(_), OperandSymbol::C | OperandSymbol::E) | (Environment::Empty, _) => {
                Number::Integer(0)
            }
        };
        match (base, expr.modulus) {
            (Number::Integer(value), Some(modulus)) => Number::Integer(value % modulus),
            (Number::Decimal(value), Some(modulus)) => Number::Decimal(value % modulus as f64),
            (number, None) => number,
        }
    }

    fn holds(&self, condition: &Condition) -> bool {
        match condition {
            Condition::Compare { operand, op, value } => match self.lookup(*operand) {
                Number::Integer(actual) => op.test(actual, *value),
                Number::Decimal(actual) => op.test(actual, *value as f64),
            },
            Condition::Integral { operand, negated } => match self.lookup(*operand) {
                Number::Integer(_) => !negated,
                Number::Decimal(actual) => (actual.fract() == 0.0) != *negated,
            },
            Condition::All(children) => children.iter().all(|child| self.holds(child)),
            Condition::Any(children) => children.iter().any(|child| self.holds(child)),
            Condition::Constant(value) => *value,
        }
    }
}

impl CompiledLocale {
    /// Classify `value` exactly as the generated function for this locale
    /// would.
    ///
    /// Returns `other` when no guard matches, or when the locale has no
    /// rules of `rule_type`. Fails only when the operands a guard needs
    /// cannot be extracted.
    ///
    /// # Example
    ///
    /// ```
    /// use plural_rules::{CompileOptions, PluralCategory, RuleSet, RuleType, compile_locale};
    ///
    /// let cardinal = RuleSet::from_cldr(
    ///     "en",
    ///     RuleType::Cardinal,
    ///     [("pluralRule-count-one", "i = 1 and v = 0"), ("pluralRule-count-other", "")],
    /// )
    /// .unwrap();
    /// let en = compile_locale("en", &cardinal, None, &CompileOptions::default()).unwrap();
    /// assert_eq!(en.category_for(1, RuleType::Cardinal), Ok(PluralCategory::One));
    /// assert_eq!(en.category_for("1.0", RuleType::Cardinal), Ok(PluralCategory::Other));
    /// assert_eq!(en.category_for(1, RuleType::Ordinal), Ok(PluralCategory::Other));
    /// ```
    pub fn category_for(
        &self,
        value: impl IntoOperands,
        rule_type: RuleType,
    ) -> Result<PluralCategory, OperandError> {
        let environment = Environment::extract(&self.extraction, value)?;
        let Some(rules) = self.rules(rule_type) else {
            return Ok(PluralCategory::Other);
        };
        let category = rules
            .arms
            .iter()
            .find(|arm| arm.guards.iter().any(|guard| environment.holds(guard)))
            .map_or(PluralCategory::Other, |arm| arm.category);
        Ok(category)
    }
}
