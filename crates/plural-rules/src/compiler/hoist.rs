//! Operand hoisting.
//!
//! Decides which operands a locale's classification function must compute
//! and renders the declaration block that computes each of them once.

use std::collections::BTreeSet;
use std::fmt;

use crate::compiler::options::Specialization;
use crate::parser::{OperandExpr, OperandSymbol};

/// Name of the classified value in generated code.
pub const INPUT_NAME: &str = "value";

/// Panic message of the generated extraction call. Generated functions
/// must only ever receive finite numbers.
pub const EXTRACTION_EXPECT: &str = "plural classification requires a finite number";

/// How a classification function obtains its operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// No operand is read: the locale always answers `other`.
    None,
    /// Only the integer digits are read, obtained by truncation.
    IntegerOnly,
    /// Full decomposition, binding the listed symbols.
    Full(BTreeSet<OperandSymbol>),
}

impl Extraction {
    /// The extraction statement, if any.
    pub fn declaration(&self) -> Option<String> {
        match self {
            Extraction::None => None,
            Extraction::IntegerOnly => Some(format!(
                "let i = {INPUT_NAME}.integer_digits().expect(\"{EXTRACTION_EXPECT}\");"
            )),
            Extraction::Full(symbols) => {
                let fields: Vec<String> = symbols.iter().map(ToString::to_string).collect();
                let rest = if symbols.len() < 6 { ", .." } else { "" };
                Some(format!(
                    "let Operands {{ {}{rest} }} = {INPUT_NAME}.into_operands().expect(\"{EXTRACTION_EXPECT}\");",
                    fields.join(", ")
                ))
            }
        }
    }

    pub fn uses_operands_struct(&self) -> bool {
        matches!(self, Extraction::Full(_))
    }
}

/// A hoisted modulo computation, e.g. `let i10 = i % 10;`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub expr: OperandExpr,
}

impl Binding {
    pub fn name(&self) -> String {
        self.expr.name()
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.expr.symbol;
        let modulus = self.expr.modulus.unwrap_or(1);
        if self.expr.is_decimal() {
            write!(f, "let {} = {symbol} % {modulus}.0;", self.name())
        } else {
            write!(f, "let {} = {symbol} % {modulus};", self.name())
        }
    }
}

/// The hoisting decision for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Hoisting {
    pub extraction: Extraction,
    /// Whether `n % k` must be rewritten to `i % k`.
    pub rewrite_n_modulo: bool,
}

/// Decide the extraction for the operand expressions a locale's guards
/// read.
pub(crate) fn decide(referenced: &[OperandExpr], specialization: Specialization) -> Hoisting {
    let symbols: BTreeSet<OperandSymbol> = referenced.iter().map(|expr| expr.symbol).collect();

    if symbols.is_empty() {
        return Hoisting {
            extraction: Extraction::None,
            rewrite_n_modulo: false,
        };
    }
    if symbols.iter().all(|symbol| *symbol == OperandSymbol::I) {
        return Hoisting {
            extraction: Extraction::IntegerOnly,
            rewrite_n_modulo: false,
        };
    }

    let n_only_as_modulo_base = referenced
        .iter()
        .all(|expr| expr.symbol != OperandSymbol::N || expr.modulus.is_some());
    let integer_symbols_only = symbols
        .iter()
        .all(|symbol| matches!(symbol, OperandSymbol::I | OperandSymbol::N));
    if specialization == Specialization::AssumeIntegral
        && n_only_as_modulo_base
        && integer_symbols_only
    {
        return Hoisting {
            extraction: Extraction::IntegerOnly,
            rewrite_n_modulo: true,
        };
    }

    Hoisting {
        extraction: Extraction::Full(symbols),
        rewrite_n_modulo: false,
    }
}

/// `n % k` as `i % k`; everything else unchanged.
pub(crate) fn integral_modulo(expr: OperandExpr) -> OperandExpr {
    match expr {
        OperandExpr {
            symbol: OperandSymbol::N,
            modulus: Some(modulus),
        } => OperandExpr::modulo(OperandSymbol::I, modulus),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr(symbol: OperandSymbol, modulus: Option<u64>) -> OperandExpr {
        OperandExpr { symbol, modulus }
    }

    #[test]
    fn nothing_referenced_needs_no_extraction() {
        let hoisting = decide(&[], Specialization::Strict);
        assert_eq!(hoisting.extraction, Extraction::None);
        assert_eq!(hoisting.extraction.declaration(), None);
    }

    #[test]
    fn integer_only_when_i_is_sole_symbol() {
        let hoisting = decide(
            &[
                expr(OperandSymbol::I, None),
                expr(OperandSymbol::I, Some(10)),
            ],
            Specialization::Strict,
        );
        assert_eq!(hoisting.extraction, Extraction::IntegerOnly);
        assert_eq!(
            hoisting.extraction.declaration().unwrap(),
            "let i = value.integer_digits().expect(\"plural classification requires a finite number\");"
        );
    }

    #[test]
    fn strict_keeps_full_extraction_for_n_modulo() {
        let referenced = [expr(OperandSymbol::N, Some(10)), expr(OperandSymbol::N, Some(100))];
        let strict = decide(&referenced, Specialization::Strict);
        assert_eq!(
            strict.extraction,
            Extraction::Full(BTreeSet::from([OperandSymbol::N]))
        );
        assert!(!strict.rewrite_n_modulo);

        let assumed = decide(&referenced, Specialization::AssumeIntegral);
        assert_eq!(assumed.extraction, Extraction::IntegerOnly);
        assert!(assumed.rewrite_n_modulo);
    }

    #[test]
    fn bare_n_or_fraction_operands_block_specialization() {
        let bare_n = [expr(OperandSymbol::N, None), expr(OperandSymbol::N, Some(10))];
        assert!(matches!(
            decide(&bare_n, Specialization::AssumeIntegral).extraction,
            Extraction::Full(_)
        ));

        let with_v = [expr(OperandSymbol::I, Some(10)), expr(OperandSymbol::V, None)];
        assert!(matches!(
            decide(&with_v, Specialization::AssumeIntegral).extraction,
            Extraction::Full(_)
        ));
    }

    #[test]
    fn full_declaration_lists_symbols_in_canonical_order() {
        let extraction = Extraction::Full(BTreeSet::from([
            OperandSymbol::V,
            OperandSymbol::I,
            OperandSymbol::N,
        ]));
        assert_eq!(
            extraction.declaration().unwrap(),
            "let Operands { n, i, v, .. } = value.into_operands().expect(\"plural classification requires a finite number\");"
        );
    }

    #[test]
    fn bindings_render_typed_modulus() {
        let integer = Binding {
            expr: expr(OperandSymbol::I, Some(100)),
        };
        let decimal = Binding {
            expr: expr(OperandSymbol::N, Some(10)),
        };
        assert_eq!(integer.to_string(), "let i100 = i % 100;");
        assert_eq!(decimal.to_string(), "let n10 = n % 10.0;");
    }
}
