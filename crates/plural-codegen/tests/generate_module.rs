//! Tests for generated module structure.

use plural_codegen::{generate_module, locale_ident, render_module};
use plural_rules::{CompileOptions, CompiledLocale, RuleSet, RuleType, compile_locale};
use quote::ToTokens;
use syn::{Expr, File, Item, ItemFn, Stmt, parse_quote};

fn rules(locale: &str, rule_type: RuleType, rules: &[(&str, &str)]) -> RuleSet {
    RuleSet::from_cldr(
        locale,
        rule_type,
        rules
            .iter()
            .map(|(category, relation)| (format!("pluralRule-count-{category}"), *relation)),
    )
    .unwrap()
}

fn compile(
    locale: &str,
    cardinal: &[(&str, &str)],
    ordinal: Option<&[(&str, &str)]>,
    include_samples: bool,
) -> CompiledLocale {
    let options = CompileOptions::builder()
        .include_samples(include_samples)
        .build();
    let ordinal = ordinal.map(|entries| rules(locale, RuleType::Ordinal, entries));
    compile_locale(
        locale,
        &rules(locale, RuleType::Cardinal, cardinal),
        ordinal.as_ref(),
        &options,
    )
    .unwrap()
}

fn english(include_samples: bool) -> CompiledLocale {
    compile(
        "en",
        &[("one", "i = 1 and v = 0 @integer 1"), ("other", " @integer 0, 2~16")],
        Some(&[
            ("one", "n % 10 = 1 and n % 100 != 11"),
            ("two", "n % 10 = 2 and n % 100 != 12"),
            ("few", "n % 10 = 3 and n % 100 != 13"),
            ("other", ""),
        ]),
        include_samples,
    )
}

fn japanese() -> CompiledLocale {
    compile("ja", &[("other", " @integer 0~15")], None, false)
}

fn module(locales: &[CompiledLocale]) -> File {
    syn::parse2(generate_module(locales).unwrap()).unwrap()
}

fn function<'a>(file: &'a File, name: &str) -> &'a ItemFn {
    file.items
        .iter()
        .find_map(|item| match item {
            Item::Fn(function) if function.sig.ident == name => Some(function),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no function `{name}`"))
}

fn assert_tokens_eq(actual: &impl ToTokens, expected: &impl ToTokens) {
    assert_eq!(
        actual.to_token_stream().to_string(),
        expected.to_token_stream().to_string()
    );
}

// =============================================================================
// Locale Functions
// =============================================================================

#[test]
fn locale_function_hoists_operands_and_checks_ordinal_first() {
    let file = module(&[english(false)]);
    let expected: ItemFn = parse_quote! {
        #[doc = " Plural category of `value` under the `en` rules."]
        pub fn en(value: impl IntoOperands, ordinal: bool) -> PluralCategory {
            let Operands { n, i, v, .. } = value.into_operands().expect("plural classification requires a finite number");
            let n10 = n % 10.0;
            let n100 = n % 100.0;
            if ordinal {
                if n10 == 1.0 && n100 != 11.0 {
                    return PluralCategory::One;
                }
                if n10 == 2.0 && n100 != 12.0 {
                    return PluralCategory::Two;
                }
                if n10 == 3.0 && n100 != 13.0 {
                    return PluralCategory::Few;
                }
                return PluralCategory::Other;
            }
            if i == 1 && v == 0 {
                return PluralCategory::One;
            }
            PluralCategory::Other
        }
    };
    assert_tokens_eq(function(&file, "en"), &expected);
}

#[test]
fn other_only_locale_ignores_its_arguments() {
    let file = module(&[japanese()]);
    let expected: ItemFn = parse_quote! {
        #[doc = " Plural category of `value` under the `ja` rules."]
        pub fn ja(_value: impl IntoOperands, _ordinal: bool) -> PluralCategory {
            PluralCategory::Other
        }
    };
    assert_tokens_eq(function(&file, "ja"), &expected);
}

#[test]
fn each_guard_is_its_own_branch() {
    let compiled = compile(
        "xx",
        &[("one", "i = 0 or i % 10 = 1"), ("other", "")],
        None,
        false,
    );
    let file = module(&[compiled]);
    let body = &function(&file, "xx").block.stmts;
    let branches = body
        .iter()
        .filter(|stmt| matches!(stmt, Stmt::Expr(Expr::If(_), _)))
        .count();
    // `if ordinal` plus one branch per guard
    assert_eq!(branches, 3);
}

#[test]
fn keyword_locale_uses_raw_identifier() {
    let compiled = compile("in", &[("other", " @integer 0~15")], None, true);
    let file = module(&[compiled]);
    assert_eq!(locale_ident("in").to_string(), "r#in");
    assert!(file.items.iter().any(|item| matches!(
        item,
        Item::Fn(function) if function.sig.ident == "r#in"
    )));
}

// =============================================================================
// Imports and Dispatch
// =============================================================================

#[test]
fn operands_import_only_when_destructured() {
    let integer_only = compile("xx", &[("one", "i % 10 = 1"), ("other", "")], None, false);
    let file = module(&[integer_only, japanese()]);
    let expected: Item = parse_quote! {
        use ::plural_runtime::{IntoOperands, PluralCategory};
    };
    assert_tokens_eq(&file.items[0], &expected);

    let file = module(&[english(false)]);
    let expected: Item = parse_quote! {
        use ::plural_runtime::{IntoOperands, Operands, PluralCategory};
    };
    assert_tokens_eq(&file.items[0], &expected);
}

#[test]
fn dispatcher_matches_original_locale_tags() {
    let pt = compile("pt-PT", &[("one", "i = 1 and v = 0"), ("other", "")], None, false);
    let file = module(&[japanese(), pt]);
    let expected: ItemFn = parse_quote! {
        /// Plural category of `value` in `locale`, or `None` for a locale
        /// without generated rules.
        pub fn category_for(
            locale: &str,
            value: impl IntoOperands,
            ordinal: bool,
        ) -> Option<PluralCategory> {
            match locale {
                "ja" => Some(ja(value, ordinal)),
                "pt-PT" => Some(pt_pt(value, ordinal)),
                _ => None,
            }
        }
    };
    assert_tokens_eq(function(&file, "category_for"), &expected);

    let locales = file.items.iter().find_map(|item| match item {
        Item::Const(constant) if constant.ident == "LOCALES" => Some(constant),
        _ => None,
    });
    let expected: Expr = parse_quote!(&["ja", "pt-PT"]);
    assert_tokens_eq(&locales.unwrap().expr, &expected);
}

#[test]
fn colliding_function_names_are_rejected() {
    let rules = [("other", "")];
    let err = generate_module(&[
        compile("pt-PT", &rules, None, false),
        compile("pt_PT", &rules, None, false),
    ])
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "locales 'pt-PT' and 'pt_PT' both map to function `pt_pt`"
    );
}

// =============================================================================
// Sample Tests
// =============================================================================

#[test]
fn samples_become_assertions() {
    let file = module(&[english(true), japanese()]);
    let tests = file
        .items
        .iter()
        .find_map(|item| match item {
            Item::Mod(module) if module.ident == "tests" => module.content.as_ref(),
            _ => None,
        })
        .map(|(_, items)| items)
        .unwrap();

    let names: Vec<String> = tests
        .iter()
        .filter_map(|item| match item {
            Item::Fn(function) => Some(function.sig.ident.to_string()),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec!["en_samples"]);

    let Some(Item::Fn(en_samples)) = tests.iter().find(|item| matches!(item, Item::Fn(_))) else {
        panic!("missing en_samples");
    };
    let expected: Stmt = parse_quote! {
        assert_eq!(en(1u64, false), PluralCategory::One, "en cardinal 1");
    };
    assert_tokens_eq(&en_samples.block.stmts[0], &expected);
    assert_eq!(en_samples.block.stmts.len(), 4);
}

#[test]
fn no_samples_means_no_test_module() {
    let file = module(&[english(false)]);
    assert!(!file.items.iter().any(|item| matches!(item, Item::Mod(_))));
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn render_module_prefixes_header_comments() {
    let header = vec![
        "Plural category rules generated from CLDR data.".to_string(),
        "CLDR version: 38".to_string(),
    ];
    let source = render_module(&[english(true)], &header).unwrap();
    let preamble: Vec<&str> = source.lines().take(3).collect();
    insta::assert_snapshot!(preamble.join("\n"), @r"
    // Plural category rules generated from CLDR data.
    // CLDR version: 38
    // @generated by plural-codegen. Do not edit.
    ");

    let reparsed = syn::parse_file(&source).unwrap();
    assert_tokens_eq(&reparsed, &module(&[english(true)]));
}

#[test]
fn empty_module_still_parses() {
    let file = module(&[]);
    let expected: ItemFn = parse_quote! {
        /// Plural category of `value` in `locale`, or `None` for a locale
        /// without generated rules.
        pub fn category_for(
            locale: &str,
            _value: impl IntoOperands,
            _ordinal: bool,
        ) -> Option<PluralCategory> {
            match locale {
                _ => None,
            }
        }
    };
    assert_tokens_eq(function(&file, "category_for"), &expected);
}
