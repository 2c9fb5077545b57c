//! Rust source generation for compiled locales.
//!
//! Produces a self-contained module with:
//! - One classification function per locale
//! - A `LOCALES` table and a `category_for` dispatcher
//! - A `#[cfg(test)]` module asserting every documented sample

use std::collections::BTreeMap;

use proc_macro2::{Literal, Span, TokenStream};
use quote::{format_ident, quote};
use syn::{Expr, Stmt};

use plural_rules::{CompiledLocale, CompiledRules, Extraction, PluralCategory, SampleValue};

use crate::ident::{locale_ident, locale_stem};

/// Generate the module tokens for `locales`.
///
/// Guards and declarations are embedded from their rendered text, so any
/// fragment that is not valid Rust surfaces as a [`syn::Error`].
pub fn generate_module(locales: &[CompiledLocale]) -> syn::Result<TokenStream> {
    check_unique_names(locales)?;

    let imports = generate_imports(locales);
    let functions = locales
        .iter()
        .map(generate_function)
        .collect::<syn::Result<Vec<_>>>()?;
    let dispatcher = generate_dispatcher(locales);
    let tests = generate_tests(locales);

    Ok(quote! {
        #imports
        #(#functions)*
        #dispatcher
        #tests
    })
}

/// Render the module as source text, preceded by `header` as line comments.
///
/// The token text is not pretty-printed; run `rustfmt` over the result for
/// a readable layout.
pub fn render_module(locales: &[CompiledLocale], header: &[String]) -> syn::Result<String> {
    let tokens = generate_module(locales)?;
    let file: syn::File = syn::parse2(tokens)?;

    let mut source = String::new();
    for line in header {
        source.push_str("// ");
        source.push_str(line);
        source.push('\n');
    }
    source.push_str("// @generated by plural-codegen. Do not edit.\n\n");
    source.push_str(&quote!(#file).to_string());
    source.push('\n');
    Ok(source)
}

fn check_unique_names(locales: &[CompiledLocale]) -> syn::Result<()> {
    let mut seen: BTreeMap<String, &str> = BTreeMap::new();
    for compiled in locales {
        let name = locale_ident(&compiled.locale).to_string();
        if let Some(previous) = seen.insert(name.clone(), &compiled.locale) {
            return Err(syn::Error::new(
                Span::call_site(),
                format!(
                    "locales '{previous}' and '{}' both map to function `{name}`",
                    compiled.locale
                ),
            ));
        }
    }
    Ok(())
}

// =============================================================================
// Imports
// =============================================================================

fn generate_imports(locales: &[CompiledLocale]) -> TokenStream {
    let operands = locales
        .iter()
        .any(|compiled| compiled.extraction.uses_operands_struct())
        .then(|| quote! { Operands, });

    quote! {
        use ::plural_runtime::{IntoOperands, #operands PluralCategory};
    }
}

// =============================================================================
// Classification Functions
// =============================================================================

/// Generate one locale's classification function.
///
/// ```text
/// pub fn ru(value: impl IntoOperands, ordinal: bool) -> PluralCategory {
///     <declarations>
///     if ordinal { <ordinal arms> return PluralCategory::Other; }
///     <cardinal arms>
///     PluralCategory::Other
/// }
/// ```
fn generate_function(compiled: &CompiledLocale) -> syn::Result<TokenStream> {
    let fn_name = locale_ident(&compiled.locale);
    let doc = format!(
        " Plural category of `value` under the `{}` rules.",
        compiled.locale
    );

    let value = if compiled.extraction == Extraction::None {
        format_ident!("_value")
    } else {
        format_ident!("value")
    };
    let declarations = compiled
        .declarations()
        .iter()
        .map(|declaration| syn::parse_str::<Stmt>(declaration))
        .collect::<syn::Result<Vec<_>>>()?;

    let ordinal_arms = match &compiled.ordinal {
        Some(rules) => generate_arms(rules)?,
        None => Vec::new(),
    };
    let cardinal_arms = generate_arms(&compiled.cardinal)?;

    let (ordinal, ordinal_block) = if ordinal_arms.is_empty() && cardinal_arms.is_empty() {
        (format_ident!("_ordinal"), TokenStream::new())
    } else {
        (
            format_ident!("ordinal"),
            quote! {
                if ordinal {
                    #(#ordinal_arms)*
                    return PluralCategory::Other;
                }
            },
        )
    };

    Ok(quote! {
        #[doc = #doc]
        pub fn #fn_name(#value: impl IntoOperands, #ordinal: bool) -> PluralCategory {
            #(#declarations)*
            #ordinal_block
            #(#cardinal_arms)*
            PluralCategory::Other
        }
    })
}

/// One `if` per guard, in arm order.
fn generate_arms(rules: &CompiledRules) -> syn::Result<Vec<TokenStream>> {
    let mut arms = Vec::new();
    for arm in &rules.arms {
        let variant = category_variant(arm.category);
        for guard in &arm.guards {
            let condition: Expr = syn::parse_str(&guard.to_string())?;
            arms.push(quote! {
                if #condition {
                    return PluralCategory::#variant;
                }
            });
        }
    }
    Ok(arms)
}

fn category_variant(category: PluralCategory) -> syn::Ident {
    format_ident!("{}", category.variant_name())
}

// =============================================================================
// Dispatcher
// =============================================================================

fn generate_dispatcher(locales: &[CompiledLocale]) -> TokenStream {
    let names: Vec<&str> = locales
        .iter()
        .map(|compiled| compiled.locale.as_str())
        .collect();
    let functions = locales.iter().map(|compiled| locale_ident(&compiled.locale));

    let (value, ordinal) = if locales.is_empty() {
        (format_ident!("_value"), format_ident!("_ordinal"))
    } else {
        (format_ident!("value"), format_ident!("ordinal"))
    };

    quote! {
        /// Locales with a generated classification function.
        pub const LOCALES: &[&str] = &[#(#names),*];

        /// Plural category of `value` in `locale`, or `None` for a locale
        /// without generated rules.
        pub fn category_for(
            locale: &str,
            #value: impl IntoOperands,
            #ordinal: bool,
        ) -> Option<PluralCategory> {
            match locale {
                #(#names => Some(#functions(value, ordinal)),)*
                _ => None,
            }
        }
    }
}

// =============================================================================
// Sample Tests
// =============================================================================

fn generate_tests(locales: &[CompiledLocale]) -> TokenStream {
    let tests: Vec<TokenStream> = locales
        .iter()
        .filter(|compiled| !compiled.samples.is_empty())
        .map(generate_locale_test)
        .collect();
    if tests.is_empty() {
        return TokenStream::new();
    }

    quote! {
    }
}

fn generate_locale_test(compiled: &CompiledLocale) -> TokenStream {
    let fn_name = locale_ident(&compiled.locale);
    let test_name = format_ident!("{}_samples", locale_stem(&compiled.locale));

    let assertions = compiled.samples.iter().map(|case| {
        let value = match &case.value {
            SampleValue::Integer(value) => Literal::u64_suffixed(*value),
            SampleValue::Decimal(text) => Literal::string(text),
        };
        let ordinal = case.is_ordinal();
        let expected = category_variant(case.category);
        let message = format!("{} {} {}", compiled.locale, case.rule_type, case.value);
        quote! {
            assert_eq!(#fn_name(#value, #ordinal), PluralCategory::#expected, #message);
        }
    });

    quote! {
        #[test]
        fn #test_name() {
            #(#assertions)*
        }
    }
}
