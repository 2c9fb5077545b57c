//! CLDR plural-rule relation parser.
//!
//! This module provides tokenizing and parsing of relation text into an
//! AND/OR tree, plus extraction of the `@integer`/`@decimal` sample annex.
//! The AST is public so that tooling can inspect relations directly.

pub mod ast;
pub mod error;
mod relation;
mod samples;
mod token;

pub use ast::*;
pub use error::MalformedRuleError;
pub use relation::{parse_relation, split_relation};
pub use samples::{SampleCase, SampleValue, extract_samples};
