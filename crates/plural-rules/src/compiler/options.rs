//! Compilation options.

use bon::Builder;

/// How aggressively operand extraction may be specialized for integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Specialization {
    /// Skip fractional decomposition only when `i` is the sole operand a
    /// locale reads. Always exact.
    #[default]
    Strict,
    /// Also skip it when `n` appears only as a modulo base and no
    /// fraction operand is read, rewriting `n % k` to `i % k`.
    ///
    /// This treats `1.1` like `1` for such locales. Use it only when the
    /// classified values are known to be integers.
    AssumeIntegral,
}

/// Options for [`compile_locale`](crate::compile_locale) and
/// [`compile_all`](crate::compile_all).
///
/// # Example
///
/// ```
/// use plural_rules::{CompileOptions, Specialization};
///
/// let options = CompileOptions::builder()
///     .specialization(Specialization::AssumeIntegral)
///     .build();
/// assert!(options.include_samples);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct CompileOptions {
    #[builder(default)]
    pub specialization: Specialization,

    /// Extract `@integer`/`@decimal` samples alongside the guards.
    #[builder(default = true)]
    pub include_samples: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions::builder().build()
    }
}
