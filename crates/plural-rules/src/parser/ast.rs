//! Public AST types for parsed plural-rule relations.
//!
//! These types are public so that tooling can inspect a relation without
//! going through the lowering step.

use std::fmt;

/// One of the CLDR operand symbols.
///
/// `c` and `e` are the compact-exponent operands introduced by newer CLDR
/// releases. They are always zero for plain numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OperandSymbol {
    N,
    I,
    V,
    W,
    F,
    T,
    C,
    E,
}

impl OperandSymbol {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'n' => Some(OperandSymbol::N),
            'i' => Some(OperandSymbol::I),
            'v' => Some(OperandSymbol::V),
            'w' => Some(OperandSymbol::W),
            'f' => Some(OperandSymbol::F),
            't' => Some(OperandSymbol::T),
            'c' => Some(OperandSymbol::C),
            'e' => Some(OperandSymbol::E),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            OperandSymbol::N => 'n',
            OperandSymbol::I => 'i',
            OperandSymbol::V => 'v',
            OperandSymbol::W => 'w',
            OperandSymbol::F => 'f',
            OperandSymbol::T => 't',
            OperandSymbol::C => 'c',
            OperandSymbol::E => 'e',
        }
    }

    /// `n` is the only operand that carries a fractional part.
    pub fn is_decimal(self) -> bool {
        self == OperandSymbol::N
    }

    /// Compact-exponent operands, constant zero for non-compact numbers.
    pub fn is_compact(self) -> bool {
        matches!(self, OperandSymbol::C | OperandSymbol::E)
    }
}

impl fmt::Display for OperandSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// An operand expression: a bare symbol or `symbol % modulus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperandExpr {
    pub symbol: OperandSymbol,
    pub modulus: Option<u64>,
}

impl OperandExpr {
    pub fn bare(symbol: OperandSymbol) -> Self {
        OperandExpr {
            symbol,
            modulus: None,
        }
    }

    pub fn modulo(symbol: OperandSymbol, modulus: u64) -> Self {
        OperandExpr {
            symbol,
            modulus: Some(modulus),
        }
    }

    /// Short variable name: `i` for a bare symbol, `n100` for `n % 100`.
    pub fn name(&self) -> String {
        match self.modulus {
            Some(modulus) => format!("{}{modulus}", self.symbol),
            None => self.symbol.to_string(),
        }
    }

    /// Whether the expression evaluates to an `f64` rather than an integer.
    pub fn is_decimal(&self) -> bool {
        self.symbol.is_decimal()
    }
}

/// Normalized CLDR spelling, e.g. `n % 10`.
impl fmt::Display for OperandExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.modulus {
            Some(modulus) => write!(f, "{} % {modulus}", self.symbol),
            None => write!(f, "{}", self.symbol),
        }
    }
}

/// Relation operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `=`: the operand is one of the listed values.
    Equal,
    /// `!=`: the operand is none of the listed values.
    NotEqual,
}

/// One entry of a comma-separated value list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeItem {
    Value(u64),
    /// Inclusive integer range `start..end`.
    Range { start: u64, end: u64 },
}

impl RangeItem {
    pub fn contains(&self, value: u64) -> bool {
        match *self {
            RangeItem::Value(v) => v == value,
            RangeItem::Range { start, end } => (start..=end).contains(&value),
        }
    }
}

/// `operand (= | !=) value_list`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub operand: OperandExpr,
    pub operator: Operator,
    pub items: Vec<RangeItem>,
}

/// Comparisons joined by `and`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Conjunction {
    pub comparisons: Vec<Comparison>,
}

/// A parsed relation: conjunctions joined by `or`.
///
/// An empty tree is the condition of a category that relies on samples
/// only, which is how CLDR writes `other`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AndOrTree {
    pub conjunctions: Vec<Conjunction>,
}

impl AndOrTree {
    pub fn is_empty(&self) -> bool {
        self.conjunctions.is_empty()
    }

    /// Every comparison, in source order.
    pub fn comparisons(&self) -> impl Iterator<Item = &Comparison> {
        self.conjunctions
            .iter()
            .flat_map(|conjunction| conjunction.comparisons.iter())
    }
}
