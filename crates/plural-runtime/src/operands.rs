//! CLDR plural operand extraction.
//!
//! Plural rules are expressed over six quantities derived from the
//! absolute value of a number:
//!
//! | Symbol | Value |
//! |--------|-------|
//! | `n` | absolute value of the number (integer and decimals) |
//! | `i` | integer digits of `n` |
//! | `v` | number of visible fraction digits, with trailing zeros |
//! | `w` | number of visible fraction digits, without trailing zeros |
//! | `f` | visible fraction digits, with trailing zeros |
//! | `t` | visible fraction digits, without trailing zeros |
//!
//! Visible digits only exist in text, so every input is decomposed from a
//! decimal string. Strings are taken as written (`"1.00"` has `v = 2`);
//! floats are first rendered to their canonical decimal text.

use std::fmt;

use crate::error::OperandError;

/// Significant digits kept when rendering an `f64` to decimal text.
const F64_SIGNIFICANT_DIGITS: usize = f64::DIGITS as usize;

/// Significant digits kept when rendering an `f32` to decimal text.
const F32_SIGNIFICANT_DIGITS: usize = f32::DIGITS as usize;

/// The six CLDR plural operands of one number.
///
/// # Example
///
/// ```
/// use plural_runtime::Operands;
///
/// let ops = Operands::from_decimal_str("10.20").unwrap();
/// assert_eq!((ops.i, ops.v, ops.w, ops.f, ops.t), (10, 2, 1, 20, 2));
/// assert_eq!(ops.n, 10.2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Operands {
    pub n: f64,
    pub i: u64,
    pub v: usize,
    pub w: usize,
    pub f: u64,
    pub t: u64,
}

impl Operands {
    /// Operands of an integer magnitude: no visible fraction digits.
    pub fn from_integer(magnitude: u64) -> Self {
        Operands {
            n: magnitude as f64,
            i: magnitude,
            ..Operands::default()
        }
    }

    /// Decompose decimal text of the form `[+-]digits[.digits]`.
    ///
    /// The sign is ignored; trailing fraction zeros are significant.
    pub fn from_decimal_str(text: &str) -> Result<Self, OperandError> {
        let unsigned = text
            .strip_prefix(|c: char| c == '-' || c == '+')
            .unwrap_or(text);
        let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        if integer.is_empty() || !all_digits(integer) || !all_digits(fraction) {
            return Err(OperandError::Syntax {
                text: text.to_string(),
            });
        }

        let i = integer.parse::<u64>().map_err(|_| unrepresentable(text))?;
        let f = parse_digits(fraction).ok_or_else(|| unrepresentable(text))?;
        let significant = fraction.trim_end_matches('0');
        let t = parse_digits(significant).ok_or_else(|| unrepresentable(text))?;

        let magnitude = if fraction.is_empty() { integer } else { unsigned };
        let n = magnitude
            .parse::<f64>()
            .map_err(|_| unrepresentable(text))?;

        Ok(Operands {
            n,
            i,
            v: fraction.len(),
            w: significant.len(),
            f,
            t,
        })
    }

    /// Decompose a float through its canonical decimal text.
    ///
    /// The text is the shortest round-trip rendering after rounding to
    /// `f64::DIGITS` significant digits, so `0.7 + 0.1` yields the
    /// operands of `0.8` rather than `0.7999999999999999`.
    pub fn from_f64(value: f64) -> Result<Self, OperandError> {
        if !value.is_finite() {
            return Err(OperandError::NonFinite { value });
        }
        let rounded: f64 = format!("{:.*e}", F64_SIGNIFICANT_DIGITS - 1, value)
            .parse()
            .unwrap_or(value);
        Self::from_decimal_str(&rounded.to_string())
    }

    /// Decompose an `f32` using its own precision rather than widening it.
    pub fn from_f32(value: f32) -> Result<Self, OperandError> {
        if !value.is_finite() {
            return Err(OperandError::NonFinite {
                value: f64::from(value),
            });
        }
        let rounded: f32 = format!("{:.*e}", F32_SIGNIFICANT_DIGITS - 1, value)
            .parse()
            .unwrap_or(value);
        Self::from_decimal_str(&rounded.to_string())
    }
}

/// Canonical decimal text: `i`, then `f` padded to `v` digits.
impl fmt::Display for Operands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.v == 0 {
            write!(f, "{}", self.i)
        } else {
            write!(f, "{}.{:0width$}", self.i, self.f, width = self.v)
        }
    }
}

fn all_digits(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a digit run, treating the empty run as zero.
fn parse_digits(digits: &str) -> Option<u64> {
    if digits.is_empty() {
        Some(0)
    } else {
        digits.parse().ok()
    }
}

fn unrepresentable(text: &str) -> OperandError {
    OperandError::Unrepresentable {
        text: text.to_string(),
    }
}

/// Values accepted by generated plural category functions.
///
/// Strings keep their trailing fraction zeros; numbers are decomposed from
/// their canonical text.
pub trait IntoOperands: Sized {
    fn into_operands(self) -> Result<Operands, OperandError>;

    /// Only the integer digits `i`, skipping fractional decomposition where
    /// the input type allows it.
    fn integer_digits(self) -> Result<u64, OperandError> {
        self.into_operands().map(|ops| ops.i)
    }
}

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {
        $(
            impl IntoOperands for $ty {
                fn into_operands(self) -> Result<Operands, OperandError> {
                    Ok(Operands::from_integer(self as u64))
                }

                fn integer_digits(self) -> Result<u64, OperandError> {
                    Ok(self as u64)
                }
            }
        )*
    };
}

macro_rules! impl_signed {
    ($($ty:ty),*) => {
        $(
            impl IntoOperands for $ty {
                fn into_operands(self) -> Result<Operands, OperandError> {
                    Ok(Operands::from_integer(self.unsigned_abs() as u64))
                }

                fn integer_digits(self) -> Result<u64, OperandError> {
                    Ok(self.unsigned_abs() as u64)
                }
            }
        )*
    };
}

impl_unsigned!(u8, u16, u32, u64, usize);
impl_signed!(i8, i16, i32, i64, isize);

impl IntoOperands for f64 {
    fn into_operands(self) -> Result<Operands, OperandError> {
        Operands::from_f64(self)
    }

    fn integer_digits(self) -> Result<u64, OperandError> {
        if !self.is_finite() {
            return Err(OperandError::NonFinite { value: self });
        }
        let truncated = self.abs().trunc();
        if truncated >= u64::MAX as f64 {
            return Err(unrepresentable(&self.to_string()));
        }
        Ok(truncated as u64)
    }
}

impl IntoOperands for f32 {
    fn into_operands(self) -> Result<Operands, OperandError> {
        Operands::from_f32(self)
    }

    fn integer_digits(self) -> Result<u64, OperandError> {
        f64::from(self).integer_digits()
    }
}

impl IntoOperands for &str {
    fn into_operands(self) -> Result<Operands, OperandError> {
        Operands::from_decimal_str(self)
    }
}

impl IntoOperands for &String {
    fn into_operands(self) -> Result<Operands, OperandError> {
        Operands::from_decimal_str(self)
    }
}

impl IntoOperands for String {
    fn into_operands(self) -> Result<Operands, OperandError> {
        Operands::from_decimal_str(&self)
    }
}

impl IntoOperands for Operands {
    fn into_operands(self) -> Result<Operands, OperandError> {
        Ok(self)
    }
}
