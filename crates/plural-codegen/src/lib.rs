//! Emits Rust source for compiled CLDR plural rules.
//!
//! The generated module depends only on `plural-runtime`: one function per
//! locale, a `category_for` dispatcher, and a test module that replays the
//! rule samples against the generated functions.
//!
//! # Example
//!
//! ```
//! use plural_codegen::render_module;
//! use plural_rules::{CldrData, CompileOptions, compile_all};
//!
//! let mut data = CldrData::new();
//! data.load_str(r#"{
//!     "supplemental": {
//!         "plurals-type-cardinal": {
//!             "en": {
//!                 "pluralRule-count-one": "i = 1 and v = 0 @integer 1",
//!                 "pluralRule-count-other": " @integer 0, 2~16"
//!             }
//!         }
//!     }
//! }"#).unwrap();
//!
//! let report = compile_all(&data, &CompileOptions::default());
//! let source = render_module(&report.compiled, &data.header_lines()).unwrap();
//! assert!(source.contains("pub fn en"));
//! ```

mod codegen;
mod ident;

pub use codegen::{generate_module, render_module};
pub use ident::locale_ident;
