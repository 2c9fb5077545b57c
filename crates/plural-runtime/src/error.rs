//! Error types for operand extraction.

use thiserror::Error;

/// A number that cannot be decomposed into plural operands.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OperandError {
    /// NaN or an infinity was supplied.
    #[error("cannot derive plural operands from non-finite number {value}")]
    NonFinite { value: f64 },

    /// The decimal text does not match `[+-]digits[.digits]`.
    #[error("'{text}' is not a plain decimal number")]
    Syntax { text: String },

    /// The integer or fractional digits overflow 64-bit operands.
    #[error("'{text}' does not fit in 64-bit plural operands")]
    Unrepresentable { text: String },
}

/// A category name outside `zero, one, two, few, many, other`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown plural category '{name}'")]
pub struct UnknownCategory {
    pub name: String,
}
