//! Locale tags as Rust identifiers.

use proc_macro2::{Ident, Span};

/// Function name for a locale tag.
///
/// Tags are lowercased and every character outside `[a-z0-9_]` becomes an
/// underscore, so `pt-PT` and `pt_PT` both map to `pt_pt`. Tags that
/// collide with a keyword are emitted as raw identifiers (`r#in`).
pub fn locale_ident(locale: &str) -> Ident {
    let mut name: String = locale
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert_str(0, "locale_");
    }

    if syn::parse_str::<Ident>(&name).is_ok() {
        return Ident::new(&name, Span::call_site());
    }
    match name.as_str() {
        // Keywords that cannot be raw identifiers.
        "self" | "super" | "crate" | "_" => Ident::new(&format!("{name}_"), Span::call_site()),
        _ => Ident::new_raw(&name, Span::call_site()),
    }
}

/// [`locale_ident`] without any `r#` prefix, for composing derived names.
pub(crate) fn locale_stem(locale: &str) -> String {
    locale_ident(locale)
        .to_string()
        .trim_start_matches("r#")
        .to_owned()
}
