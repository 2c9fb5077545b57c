//! Compiler for CLDR plural rules.
//!
//! Parses the plural-rule relations of CLDR supplemental data, lowers them
//! into boolean guards over hoisted operand variables, and extracts the
//! documented samples of every category. The output drives code
//! generation, and [`CompiledLocale::category_for`] evaluates it directly.
//!
//! # Example
//!
//! ```
//! use plural_rules::{CompileOptions, RuleSet, RuleType, compile_locale};
//!
//! let cardinal = RuleSet::from_cldr(
//!     "ru",
//!     RuleType::Cardinal,
//!     [
//!         ("pluralRule-count-one", "v = 0 and i % 10 = 1 and i % 100 != 11 @integer 1, 21, 31"),
//!         ("pluralRule-count-few", "v = 0 and i % 10 = 2..4 and i % 100 != 12..14 @integer 2~4, 22~24"),
//!         ("pluralRule-count-many", "v = 0 and i % 10 = 0 or v = 0 and i % 10 = 5..9 or v = 0 and i % 100 = 11..14 @integer 0, 5~19"),
//!         ("pluralRule-count-other", "   @decimal 0.0~1.5, 10.0"),
//!     ],
//! )
//! .unwrap();
//! let ru = compile_locale("ru", &cardinal, None, &CompileOptions::default()).unwrap();
//!
//! let one = &ru.cardinal.arms[0];
//! assert_eq!(one.guards[0].to_string(), "v == 0 && i10 == 1 && i100 != 11");
//! assert!(ru.verify_samples().is_empty());
//! ```

pub mod cldr;
pub mod compiler;
mod error;
pub mod interpreter;
pub mod parser;
mod registry;

pub use cldr::CldrData;
pub use compiler::{
    CompileOptions, CompileReport, CompiledLocale, CompiledRules, Condition, Extraction,
    RuleSet, Specialization, compile_all, compile_locale,
};
pub use error::{CompileError, LoadError, compute_suggestions};
pub use interpreter::SampleMismatch;
pub use parser::{MalformedRuleError, SampleCase, SampleValue};
pub use plural_runtime::{IntoOperands, OperandError, Operands, PluralCategory, RuleType};
pub use registry::OperandRegistry;
