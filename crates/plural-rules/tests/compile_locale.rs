//! Integration tests for locale compilation and operand hoisting.

use plural_rules::{
    CompileError, CompileOptions, CompiledLocale, Extraction, PluralCategory, RuleSet, RuleType,
    Specialization, compile_locale,
};

fn cardinal(locale: &str, rules: &[(&str, &str)]) -> RuleSet {
    RuleSet::from_cldr(
        locale,
        RuleType::Cardinal,
        rules
            .iter()
            .map(|(category, relation)| (format!("pluralRule-count-{category}"), *relation)),
    )
    .unwrap()
}

fn ordinal(locale: &str, rules: &[(&str, &str)]) -> RuleSet {
    RuleSet::from_cldr(
        locale,
        RuleType::Ordinal,
        rules
            .iter()
            .map(|(category, relation)| (format!("pluralRule-count-{category}"), *relation)),
    )
    .unwrap()
}

fn compile(locale: &str, rules: &[(&str, &str)]) -> CompiledLocale {
    compile_locale(
        locale,
        &cardinal(locale, rules),
        None,
        &CompileOptions::default(),
    )
    .unwrap()
}

fn guards(compiled: &CompiledLocale, rule_type: RuleType) -> Vec<(PluralCategory, Vec<String>)> {
    compiled
        .rules(rule_type)
        .unwrap()
        .arms
        .iter()
        .map(|arm| {
            (
                arm.category,
                arm.guards.iter().map(ToString::to_string).collect(),
            )
        })
        .collect()
}

// =============================================================================
// End-to-end classification
// =============================================================================

#[test]
fn test_one_requires_integer_one() {
    let compiled = compile("en", &[("other", ""), ("one", "i = 1 and v = 0")]);

    assert_eq!(
        compiled.category_for(1, RuleType::Cardinal),
        Ok(PluralCategory::One)
    );
    assert_eq!(
        compiled.category_for("1.0", RuleType::Cardinal),
        Ok(PluralCategory::Other)
    );
    assert_eq!(
        compiled.category_for(2, RuleType::Cardinal),
        Ok(PluralCategory::Other)
    );
    assert_eq!(
        compiled.category_for(-1, RuleType::Cardinal),
        Ok(PluralCategory::One)
    );
}

#[test]
fn test_only_other_never_extracts() {
    let compiled = compile("ja", &[("other", " @integer 0~15")]);
    assert_eq!(compiled.extraction, Extraction::None);
    assert!(compiled.declarations().is_empty());
    assert!(compiled.cardinal.arms.is_empty());
    assert_eq!(
        compiled.category_for(f64::NAN, RuleType::Cardinal),
        Ok(PluralCategory::Other)
    );
}

#[test]
fn test_non_finite_input_fails_when_operands_are_needed() {
    let compiled = compile("en", &[("one", "i = 1 and v = 0"), ("other", "")]);
    assert!(compiled.category_for(f64::INFINITY, RuleType::Cardinal).is_err());
}

#[test]
fn test_tiny_residues_classify() {
    let en = compile("en", &[("one", "i = 1 and v = 0"), ("other", "")]);
    assert_eq!(
        en.category_for(1e-20_f64, RuleType::Cardinal),
        Ok(PluralCategory::Other)
    );

    let mk = compile(
        "mk",
        &[
            (
                "one",
                "v = 0 and i % 10 = 1 and i % 100 != 11 or f % 10 = 1 and f % 100 != 11",
            ),
            ("other", ""),
        ],
    );
    assert_eq!(
        mk.category_for(1e-20_f64, RuleType::Cardinal),
        Ok(PluralCategory::One)
    );
    assert_eq!(
        mk.category_for("0.00000000000000000001", RuleType::Cardinal),
        Ok(PluralCategory::One)
    );
    assert_eq!(
        mk.category_for(1.5e-19_f64, RuleType::Cardinal),
        Ok(PluralCategory::Other)
    );
}

// =============================================================================
// Guards
// =============================================================================

#[test]
fn test_russian_guards() {
    let compiled = compile(
        "ru",
        &[
            ("one", "v = 0 and i % 10 = 1 and i % 100 != 11"),
            ("few", "v = 0 and i % 10 = 2..4 and i % 100 != 12..14"),
            (
                "many",
                "v = 0 and i % 10 = 0 or v = 0 and i % 10 = 5..9 or v = 0 and i % 100 = 11..14",
            ),
            ("other", ""),
        ],
    );

    insta::assert_debug_snapshot!(guards(&compiled, RuleType::Cardinal), @r#"
    [
        (
            One,
            [
                "v == 0 && i10 == 1 && i100 != 11",
            ],
        ),
        (
            Few,
            [
                "v == 0 && (i10 == 2 || i10 == 3 || i10 == 4) && (i100 < 12 || i100 > 14)",
            ],
        ),
        (
            Many,
            [
                "v == 0 && i10 == 0",
                "v == 0 && i10 >= 5 && i10 <= 9",
                "v == 0 && i100 >= 11 && i100 <= 14",
            ],
        ),
    ]
    "#);
}

#[test]
fn test_other_has_no_arm() {
    let compiled = compile("en", &[("one", "i = 1 and v = 0"), ("other", "")]);
    let categories: Vec<PluralCategory> =
        compiled.cardinal.arms.iter().map(|arm| arm.category).collect();
    assert_eq!(categories, vec![PluralCategory::One]);
    assert_eq!(
        compiled.cardinal.categories,
        vec![PluralCategory::One, PluralCategory::Other]
    );
}

#[test]
fn test_unmatchable_category_is_dropped() {
    let compiled = compile(
        "fr",
        &[
            ("one", "i = 0,1"),
            ("many", "e = 0 and i != 0 and i % 1000000 = 0 and v = 0 or e != 0..5"),
            ("other", ""),
        ],
    );
    assert_eq!(
        guards(&compiled, RuleType::Cardinal),
        vec![
            (PluralCategory::One, vec!["i == 0 || i == 1".to_string()]),
            (
                PluralCategory::Many,
                vec!["i != 0 && i1000000 == 0 && v == 0".to_string()]
            ),
        ]
    );

    let never = compile("xx", &[("few", "e = 1"), ("other", "")]);
    assert!(never.cardinal.arms.is_empty());
    assert_eq!(never.extraction, Extraction::None);
}

// =============================================================================
// Hoisting
// =============================================================================

#[test]
fn test_declarations_compute_each_operand_once() {
    let compiled = compile(
        "be",
        &[
            ("one", "n % 10 = 1 and n % 100 != 11"),
            ("few", "n % 10 = 2..4 and n % 100 != 12..14"),
            ("many", "n % 10 = 0 or n % 10 = 5..9 or n % 100 = 11..14"),
            ("other", ""),
        ],
    );
    insta::assert_snapshot!(compiled.declarations().join("\n"), @r#"
    let Operands { n, .. } = value.into_operands().expect("plural classification requires a finite number");
    let n10 = n % 10.0;
    let n100 = n % 100.0;
    "#);
}

#[test]
fn test_integer_only_locale_truncates() {
    let compiled = compile(
        "xx",
        &[("one", "i % 10 = 1 and i % 100 != 11"), ("other", "")],
    );
    assert_eq!(compiled.extraction, Extraction::IntegerOnly);
    assert_eq!(
        compiled.declarations(),
        vec![
            "let i = value.integer_digits().expect(\"plural classification requires a finite number\");",
            "let i10 = i % 10;",
            "let i100 = i % 100;",
        ]
    );
    assert_eq!(
        compiled.category_for(21.7, RuleType::Cardinal),
        Ok(PluralCategory::One)
    );
}

#[test]
fn test_ordinal_and_cardinal_share_one_registry() {
    let cardinal = cardinal("en", &[("one", "i = 1 and v = 0"), ("other", "")]);
    let ordinal = ordinal(
        "en",
        &[
            ("one", "n % 10 = 1 and n % 100 != 11"),
            ("two", "n % 10 = 2 and n % 100 != 12"),
            ("few", "n % 10 = 3 and n % 100 != 13"),
            ("other", ""),
        ],
    );
    let compiled =
        compile_locale("en", &cardinal, Some(&ordinal), &CompileOptions::default()).unwrap();

    assert_eq!(
        compiled.declarations(),
        vec![
            "let Operands { n, i, v, .. } = value.into_operands().expect(\"plural classification requires a finite number\");",
            "let n10 = n % 10.0;",
            "let n100 = n % 100.0;",
        ]
    );
    assert_eq!(
        compiled.category_for(22, RuleType::Ordinal),
        Ok(PluralCategory::Two)
    );
    assert_eq!(
        compiled.category_for(12, RuleType::Ordinal),
        Ok(PluralCategory::Other)
    );
    assert_eq!(
        compiled.category_for(1, RuleType::Cardinal),
        Ok(PluralCategory::One)
    );
}

// =============================================================================
// Integer specialization
// =============================================================================

const BELARUSIAN: &[(&str, &str)] = &[
    (
        "one",
        "n % 10 = 1 and n % 100 != 11 @integer 1, 21, 101 @decimal 1.0, 21.0",
    ),
    (
        "few",
        "n % 10 = 2..4 and n % 100 != 12..14 @integer 2~4, 22~24 @decimal 2.0, 3.0",
    ),
    (
        "many",
        "n % 10 = 0 or n % 10 = 5..9 or n % 100 = 11..14 @integer 0, 5~19 @decimal 0.0, 5.0",
    ),
    ("other", "   @decimal 0.1~0.9, 1.1~1.7, 10.1"),
];

#[test]
fn test_strict_specialization_keeps_fractions_exact() {
    let compiled = compile("be", BELARUSIAN);
    assert!(matches!(compiled.extraction, Extraction::Full(_)));
    assert_eq!(
        compiled.category_for("1.1", RuleType::Cardinal),
        Ok(PluralCategory::Other)
    );
    assert!(compiled.verify_samples().is_empty());
}

#[test]
fn test_assume_integral_rewrites_n_modulo() {
    let options = CompileOptions::builder()
        .specialization(Specialization::AssumeIntegral)
        .build();
    let compiled = compile_locale("be", &cardinal("be", BELARUSIAN), None, &options).unwrap();

    assert_eq!(compiled.extraction, Extraction::IntegerOnly);
    assert_eq!(
        compiled.declarations()[1..],
        ["let i10 = i % 10;", "let i100 = i % 100;"]
    );
    assert_eq!(
        guards(&compiled, RuleType::Cardinal)[1].1,
        vec!["(i10 == 2 || i10 == 3 || i10 == 4) && (i100 < 12 || i100 > 14)"]
    );

    // Integers classify the same; fractional values no longer do.
    assert_eq!(
        compiled.category_for(21, RuleType::Cardinal),
        Ok(PluralCategory::One)
    );
    assert_eq!(
        compiled.category_for("1.1", RuleType::Cardinal),
        Ok(PluralCategory::One)
    );
    let mismatched: Vec<String> = compiled
        .verify_samples()
        .iter()
        .map(|mismatch| mismatch.case.value.to_string())
        .collect();
    assert_eq!(mismatched, vec!["0.1", "0.9", "1.1", "1.7", "10.1"]);
    assert_eq!(
        compiled.verify_samples()[0].to_string(),
        "cardinal sample 0.1 documented as 'other' but classified as 'many'"
    );
}

#[test]
fn test_assume_integral_does_not_apply_with_fraction_operands() {
    let options = CompileOptions::builder()
        .specialization(Specialization::AssumeIntegral)
        .build();
    let rules = cardinal(
        "lv",
        &[
            ("zero", "n % 10 = 0 or n % 100 = 11..19 or v = 2 and f % 100 = 11..19"),
            ("other", ""),
        ],
    );
    let compiled = compile_locale("lv", &rules, None, &options).unwrap();
    assert!(matches!(compiled.extraction, Extraction::Full(_)));
}

// =============================================================================
// Samples
// =============================================================================

#[test]
fn test_samples_are_ordinal_first_in_priority_order() {
    let cardinal = cardinal(
        "en",
        &[("other", " @integer 0, 2"), ("one", "i = 1 and v = 0 @integer 1")],
    );
    let ordinal = ordinal(
        "en",
        &[("other", " @integer 4"), ("one", "n % 10 = 1 and n % 100 != 11 @integer 21")],
    );
    let compiled =
        compile_locale("en", &cardinal, Some(&ordinal), &CompileOptions::default()).unwrap();

    let order: Vec<(RuleType, PluralCategory, String)> = compiled
        .samples
        .iter()
        .map(|case| (case.rule_type, case.category, case.value.to_string()))
        .collect();
    assert_eq!(
        order,
        vec![
            (RuleType::Ordinal, PluralCategory::One, "21".to_string()),
            (RuleType::Ordinal, PluralCategory::Other, "4".to_string()),
            (RuleType::Cardinal, PluralCategory::One, "1".to_string()),
            (RuleType::Cardinal, PluralCategory::Other, "0".to_string()),
            (RuleType::Cardinal, PluralCategory::Other, "2".to_string()),
        ]
    );
    assert!(compiled.verify_samples().is_empty());
}

#[test]
fn test_samples_can_be_disabled() {
    let options = CompileOptions::builder().include_samples(false).build();
    let compiled = compile_locale(
        "en",
        &cardinal("en", &[("one", "i = 1 and v = 0 @integer 1"), ("other", "")]),
        None,
        &options,
    )
    .unwrap();
    assert!(compiled.samples.is_empty());
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_malformed_relation_names_category() {
    let err = compile_locale(
        "xx",
        &cardinal("xx", &[("few", "n = 3 and and"), ("other", "")]),
        None,
        &CompileOptions::default(),
    )
    .unwrap_err();
    match &err {
        CompileError::MalformedRule {
            locale,
            rule_type,
            category,
            source,
        } => {
            assert_eq!(locale, "xx");
            assert_eq!(*rule_type, RuleType::Cardinal);
            assert_eq!(*category, PluralCategory::Few);
            assert_eq!(source.column, 11);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().starts_with("xx cardinal 'few': malformed plural rule"));
}

#[test]
fn test_empty_condition_outside_other_is_malformed() {
    let err = compile_locale(
        "xx",
        &cardinal("xx", &[("one", " @integer 1"), ("other", "")]),
        None,
        &CompileOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CompileError::MalformedRule {
            category: PluralCategory::One,
            ..
        }
    ));
}

#[test]
fn test_malformed_ordinal_fails_whole_locale() {
    let err = compile_locale(
        "xx",
        &cardinal("xx", &[("other", "")]),
        Some(&ordinal("xx", &[("one", "n = "), ("other", "")])),
        &CompileOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CompileError::MalformedRule {
            rule_type: RuleType::Ordinal,
            ..
        }
    ));
}
