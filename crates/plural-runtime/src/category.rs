//! Plural categories and rule types.

use std::fmt;
use std::str::FromStr;

use crate::error::UnknownCategory;

/// CLDR plural categories.
///
/// The derived ordering is the fixed priority order in which category
/// guards are tested: `zero, one, two, few, many`, with `other` last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    /// All categories in priority order.
    pub const ALL: [PluralCategory; 6] = [
        PluralCategory::Zero,
        PluralCategory::One,
        PluralCategory::Two,
        PluralCategory::Few,
        PluralCategory::Many,
        PluralCategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PluralCategory::Zero => "zero",
            PluralCategory::One => "one",
            PluralCategory::Two => "two",
            PluralCategory::Few => "few",
            PluralCategory::Many => "many",
            PluralCategory::Other => "other",
        }
    }

    /// Name of the enum variant, as used in generated source.
    pub fn variant_name(self) -> &'static str {
        match self {
            PluralCategory::Zero => "Zero",
            PluralCategory::One => "One",
            PluralCategory::Two => "Two",
            PluralCategory::Few => "Few",
            PluralCategory::Many => "Many",
            PluralCategory::Other => "Other",
        }
    }
}

impl fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PluralCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PluralCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory {
                name: s.to_string(),
            })
    }
}

/// Which of a locale's two rule sets applies: "three items" versus
/// "3rd item".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleType {
    Cardinal,
    Ordinal,
}

impl RuleType {
    pub fn from_ordinal_flag(ordinal: bool) -> Self {
        if ordinal {
            RuleType::Ordinal
        } else {
            RuleType::Cardinal
        }
    }

    pub fn is_ordinal(self) -> bool {
        self == RuleType::Ordinal
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RuleType::Cardinal => "cardinal",
            RuleType::Ordinal => "ordinal",
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
