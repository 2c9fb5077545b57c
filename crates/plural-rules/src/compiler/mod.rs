//! Rule compiler: lowering, operand hoisting, and locale compilation.

mod condition;
mod hoist;
mod locale;
mod lower;
mod options;
mod rule_set;

pub use condition::{CompareOp, Condition};
pub use hoist::{Binding, EXTRACTION_EXPECT, Extraction, INPUT_NAME};
pub use locale::{Arm, CompileReport, CompiledLocale, CompiledRules, compile_all, compile_locale};
pub use lower::{lower_comparison, lower_tree};
pub use options::{CompileOptions, Specialization};
pub use rule_set::{RULE_KEY_PREFIX, RuleSet};
