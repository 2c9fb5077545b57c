//! Run-time support shared by generated plural category functions and the
//! rule compiler.
//!
//! Generated code only needs three things from this crate: the [`Operands`]
//! decomposition of a number, the [`IntoOperands`] conversion trait, and the
//! [`PluralCategory`] result type. The compiler's reference interpreter uses
//! the same items so that both always agree on what a number's operands are.

mod category;
mod error;
mod operands;

pub use category::{PluralCategory, RuleType};
pub use error::{OperandError, UnknownCategory};
pub use operands::{IntoOperands, Operands};
