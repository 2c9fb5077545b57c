//! Locale compilation driver.
//!
//! Compiles one locale's ordinal and cardinal rule sets against a shared
//! operand registry, then decides operand hoisting over everything the
//! surviving guards read.

use plural_runtime::{PluralCategory, RuleType};
use tracing::{debug, trace, warn};

use crate::cldr::CldrData;
use crate::compiler::condition::Condition;
use crate::compiler::hoist::{self, Binding, Extraction};
use crate::compiler::lower::lower_tree;
use crate::compiler::options::CompileOptions;
use crate::compiler::rule_set::RuleSet;
use crate::error::CompileError;
use crate::parser::{
    MalformedRuleError, OperandExpr, SampleCase, extract_samples, parse_relation, split_relation,
};
use crate::registry::OperandRegistry;

/// One category's guards. The category applies when any guard holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arm {
    pub category: PluralCategory,
    pub guards: Vec<Condition>,
}

impl Arm {
    /// The guards joined into a single condition.
    pub fn condition(&self) -> Condition {
        Condition::any(self.guards.iter().cloned())
    }
}

/// The compiled arms of one rule type, in priority order.
///
/// `other` never has an arm: it is the fallback when no arm matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledRules {
    pub rule_type: RuleType,
    pub arms: Vec<Arm>,
    /// Every category the rule set defines, `other` included.
    pub categories: Vec<PluralCategory>,
}

/// A fully compiled locale: declarations, guards, and samples.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledLocale {
    pub locale: String,
    pub extraction: Extraction,
    /// Hoisted modulo computations, in registration order.
    pub bindings: Vec<Binding>,
    pub cardinal: CompiledRules,
    pub ordinal: Option<CompiledRules>,
    /// Ordinal samples first, then cardinal, each in category priority
    /// order.
    pub samples: Vec<SampleCase>,
}

impl CompiledLocale {
    /// The declaration block: operand extraction followed by bindings.
    ///
    /// # Example
    ///
    /// ```
    /// use plural_rules::{CompileOptions, RuleSet, RuleType, compile_locale};
    ///
    /// let cardinal = RuleSet::from_cldr(
    ///     "lv",
    ///     RuleType::Cardinal,
    ///     [
    ///         ("pluralRule-count-zero", "n % 10 = 0 or n % 100 = 11..19 or v = 2 and f % 100 = 11..19"),
    ///         ("pluralRule-count-one", "n % 10 = 1 and n % 100 != 11 or v = 2 and f % 10 = 1 and f % 100 != 11 or v != 2 and f % 10 = 1"),
    ///         ("pluralRule-count-other", ""),
    ///     ],
    /// )
    /// .unwrap();
    /// let compiled = compile_locale("lv", &cardinal, None, &CompileOptions::default()).unwrap();
    /// assert_eq!(
    ///     compiled.declarations()[1..],
    ///     ["let n10 = n % 10.0;", "let n100 = n % 100.0;", "let f100 = f % 100;", "let f10 = f % 10;"]
    /// );
    /// ```
    pub fn declarations(&self) -> Vec<String> {
        self.extraction
            .declaration()
            .into_iter()
            .chain(self.bindings.iter().map(ToString::to_string))
            .collect()
    }

    /// The compiled rules of `rule_type`, if the locale defines them.
    pub fn rules(&self, rule_type: RuleType) -> Option<&CompiledRules> {
        match rule_type {
            RuleType::Cardinal => Some(&self.cardinal),
            RuleType::Ordinal => self.ordinal.as_ref(),
        }
    }
}

/// Outcome of compiling every locale of a CLDR data set.
#[derive(Debug, Default)]
pub struct CompileReport {
    pub compiled: Vec<CompiledLocale>,
    /// Locales that failed, with the reason. They do not affect the others.
    pub skipped: Vec<CompileError>,
}

/// Compile one locale.
///
/// Ordinal rules are parsed before cardinal rules; both share one operand
/// registry so that hoisted names are stable across the two.
pub fn compile_locale(
    locale: &str,
    cardinal: &RuleSet,
    ordinal: Option<&RuleSet>,
    options: &CompileOptions,
) -> Result<CompiledLocale, CompileError> {
    let mut registry = OperandRegistry::new();
    let mut samples = Vec::new();

    let ordinal = ordinal
        .map(|rules| compile_rules(locale, rules, &mut registry, &mut samples, options))
        .transpose()?;
    let cardinal = compile_rules(locale, cardinal, &mut registry, &mut samples, options)?;

    let mut compiled = CompiledLocale {
        locale: locale.to_string(),
        extraction: Extraction::None,
        bindings: Vec::new(),
        cardinal,
        ordinal,
        samples,
    };
    hoist_operands(&mut compiled, &registry, options);
    Ok(compiled)
}

fn compile_rules(
    locale: &str,
    rules: &RuleSet,
    registry: &mut OperandRegistry,
    samples: &mut Vec<SampleCase>,
    options: &CompileOptions,
) -> Result<CompiledRules, CompileError> {
    let rule_type = rules.rule_type();
    let malformed = |category, source| CompileError::MalformedRule {
        locale: locale.to_string(),
        rule_type,
        category,
        source,
    };

    let mut arms = Vec::new();
    for (category, relation) in rules.iter() {
        let tree = parse_relation(relation, registry).map_err(|err| malformed(category, err))?;
        if options.include_samples {
            let cases = extract_samples(relation, category, rule_type)
                .map_err(|err| malformed(category, err))?;
            samples.extend(cases);
        }

        if category == PluralCategory::Other {
            continue;
        }
        if tree.is_empty() {
            let (condition, _) = split_relation(relation);
            let column = condition.chars().count() + 1;
            return Err(malformed(
                category,
                MalformedRuleError::new(relation, column, "missing condition"),
            ));
        }

        let guards = lower_tree(&tree);
        if guards.is_empty() {
            trace!(locale, %rule_type, %category, "dropping category that can never match");
            continue;
        }
        arms.push(Arm { category, guards });
    }

    Ok(CompiledRules {
        rule_type,
        arms,
        categories: rules.categories().collect(),
    })
}

fn hoist_operands(
    compiled: &mut CompiledLocale,
    registry: &OperandRegistry,
    options: &CompileOptions,
) {
    let used: Vec<OperandExpr> = all_arms(compiled)
        .flat_map(|arm| arm.guards.iter())
        .flat_map(Condition::operands)
        .collect();
    let referenced: Vec<OperandExpr> = registry
        .entries()
        .iter()
        .copied()
        .filter(|expr| used.contains(expr))
        .collect();

    let decision = hoist::decide(&referenced, options.specialization);
    let referenced = if decision.rewrite_n_modulo {
        for rules in all_rules_mut(compiled) {
            for arm in &mut rules.arms {
                arm.guards = arm
                    .guards
                    .iter()
                    .map(|guard| guard.map_operands(&hoist::integral_modulo))
                    .filter(|guard| guard.is_constant() != Some(false))
                    .collect();
            }
            rules.arms.retain(|arm| !arm.guards.is_empty());
        }
        let mut rewritten: Vec<OperandExpr> = Vec::new();
        for expr in referenced.into_iter().map(hoist::integral_modulo) {
            if !rewritten.contains(&expr) {
                rewritten.push(expr);
            }
        }
        rewritten
    } else {
        referenced
    };

    compiled.extraction = decision.extraction;
    compiled.bindings = referenced
        .into_iter()
        .filter(|expr| expr.modulus.is_some())
        .map(|expr| Binding { expr })
        .collect();
}

fn all_arms(compiled: &CompiledLocale) -> impl Iterator<Item = &Arm> {
    compiled
        .ordinal
        .iter()
        .chain([&compiled.cardinal])
        .flat_map(|rules| rules.arms.iter())
}

fn all_rules_mut(compiled: &mut CompiledLocale) -> impl Iterator<Item = &mut CompiledRules> {
    compiled.ordinal.iter_mut().chain([&mut compiled.cardinal])
}

/// Compile every locale with cardinal rules, in sorted locale order.
///
/// A locale whose rules fail to compile is reported in
/// [`CompileReport::skipped`] and does not stop the others.
pub fn compile_all(data: &CldrData, options: &CompileOptions) -> CompileReport {
    let mut report = CompileReport::default();

    for (locale, cardinal) in data.cardinal() {
        let result = RuleSet::from_cldr(locale, RuleType::Cardinal, cardinal).and_then(|cardinal| {
            let ordinal = data
                .ordinal_for(locale)
                .map(|rules| RuleSet::from_cldr(locale, RuleType::Ordinal, rules))
                .transpose()?;
            compile_locale(locale, &cardinal, ordinal.as_ref(), options)
        });

        match result {
            Ok(compiled) => {
                debug!(
                    locale = %compiled.locale,
                    extraction = ?compiled.extraction,
                    samples = compiled.samples.len(),
                    "compiled locale"
                );
                report.compiled.push(compiled);
            }
            Err(err) => {
                warn!(locale = %locale, error = %err, "skipping locale");
                report.skipped.push(err);
            }
        }
    }

    report
}
