//! Per-locale category rule sets.

use std::collections::BTreeMap;
use std::str::FromStr;

use plural_runtime::{PluralCategory, RuleType};

use crate::error::{CompileError, compute_suggestions};

/// Prefix of every rule key in CLDR documents.
pub const RULE_KEY_PREFIX: &str = "pluralRule-count-";

/// The relations of one locale and rule type, keyed by category.
///
/// Iteration follows the fixed category priority order
/// (`zero, one, two, few, many, other`). A rule set always contains
/// `other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rule_type: RuleType,
    relations: BTreeMap<PluralCategory, String>,
}

impl RuleSet {
    /// Build a rule set from CLDR `pluralRule-count-<category>` entries.
    ///
    /// # Example
    ///
    /// ```
    /// use plural_rules::{PluralCategory, RuleSet, RuleType};
    ///
    /// let rules = RuleSet::from_cldr(
    ///     "en",
    ///     RuleType::Cardinal,
    ///     [
    ///         ("pluralRule-count-one", "i = 1 and v = 0 @integer 1"),
    ///         ("pluralRule-count-other", " @integer 0, 2~16"),
    ///     ],
    /// )
    /// .unwrap();
    /// assert_eq!(rules.categories().collect::<Vec<_>>(), [PluralCategory::One, PluralCategory::Other]);
    /// ```
    pub fn from_cldr<K, V>(
        locale: &str,
        rule_type: RuleType,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, CompileError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut relations = BTreeMap::new();
        for (key, relation) in entries {
            let key = key.as_ref();
            let category = key
                .strip_prefix(RULE_KEY_PREFIX)
                .and_then(|name| PluralCategory::from_str(name).ok())
                .ok_or_else(|| CompileError::UnknownCategory {
                    locale: locale.to_string(),
                    rule_type,
                    key: key.to_string(),
                    suggestions: compute_suggestions(key, &known_keys()),
                })?;
            relations.insert(category, relation.as_ref().to_string());
        }
        Self::new(locale, rule_type, relations)
    }

    /// Build a rule set from relations already keyed by category.
    pub fn new(
        locale: &str,
        rule_type: RuleType,
        relations: BTreeMap<PluralCategory, String>,
    ) -> Result<Self, CompileError> {
        if !relations.contains_key(&PluralCategory::Other) {
            return Err(CompileError::MissingDefaultCategory {
                locale: locale.to_string(),
                rule_type,
            });
        }
        Ok(RuleSet {
            rule_type,
            relations,
        })
    }

    pub fn rule_type(&self) -> RuleType {
        self.rule_type
    }

    /// The relation of `category`, if the rule set defines one.
    pub fn get(&self, category: PluralCategory) -> Option<&str> {
        self.relations.get(&category).map(String::as_str)
    }

    /// Categories in priority order.
    pub fn categories(&self) -> impl Iterator<Item = PluralCategory> + '_ {
        self.relations.keys().copied()
    }

    /// `(category, relation)` pairs in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (PluralCategory, &str)> {
        self.relations
            .iter()
            .map(|(category, relation)| (*category, relation.as_str()))
    }
}

fn known_keys() -> Vec<String> {
    PluralCategory::ALL
        .iter()
        .map(|category| format!("{RULE_KEY_PREFIX}{category}"))
        .collect()
}
