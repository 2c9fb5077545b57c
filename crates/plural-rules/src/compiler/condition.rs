//! Lowered boolean conditions.
//!
//! A [`Condition`] is what a relation becomes once value lists and ranges
//! are expanded into plain comparisons. Its `Display` output is a Rust
//! boolean expression over the hoisted operand variables, so a rendered
//! guard can be embedded verbatim in a generated function body.

use std::fmt;

use crate::parser::OperandExpr;

/// Comparison operator of a lowered condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    pub fn as_str(self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }

    /// Apply the operator to two values of any ordered type.
    pub fn test<T: PartialOrd>(self, lhs: T, rhs: T) -> bool {
        match self {
            CompareOp::Eq => lhs == rhs,
            CompareOp::Ne => lhs != rhs,
            CompareOp::Lt => lhs < rhs,
            CompareOp::Le => lhs <= rhs,
            CompareOp::Gt => lhs > rhs,
            CompareOp::Ge => lhs >= rhs,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lowered boolean condition.
///
/// Build compound conditions with [`Condition::all`] and [`Condition::any`]
/// rather than the variants directly: the constructors flatten nesting and
/// fold constants, which is what removes always-false groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// `operand op value`.
    Compare {
        operand: OperandExpr,
        op: CompareOp,
        value: u64,
    },
    /// `operand.fract() == 0.0`, or `!= 0.0` when negated.
    Integral { operand: OperandExpr, negated: bool },
    All(Vec<Condition>),
    Any(Vec<Condition>),
    Constant(bool),
}

impl Condition {
    pub fn compare(operand: OperandExpr, op: CompareOp, value: u64) -> Self {
        Condition::Compare { operand, op, value }
    }

    /// Integrality check. Integer-valued operands are always integral, so
    /// the check folds to a constant for them.
    pub fn integral(operand: OperandExpr, negated: bool) -> Self {
        if operand.is_decimal() {
            Condition::Integral { operand, negated }
        } else {
            Condition::Constant(!negated)
        }
    }

    /// Conjunction of `conditions`.
    pub fn all(conditions: impl IntoIterator<Item = Condition>) -> Self {
        let mut flat = Vec::new();
        for condition in conditions {
            match condition {
                Condition::Constant(true) => {}
                Condition::Constant(false) => return Condition::Constant(false),
                Condition::All(children) => flat.extend(children),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => Condition::Constant(true),
            1 => flat.remove(0),
            _ => Condition::All(flat),
        }
    }

    /// Disjunction of `conditions`.
    pub fn any(conditions: impl IntoIterator<Item = Condition>) -> Self {
        let mut flat = Vec::new();
        for condition in conditions {
            match condition {
                Condition::Constant(false) => {}
                Condition::Constant(true) => return Condition::Constant(true),
                Condition::Any(children) => flat.extend(children),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => Condition::Constant(false),
            1 => flat.remove(0),
            _ => Condition::Any(flat),
        }
    }

    pub fn is_constant(&self) -> Option<bool> {
        match self {
            Condition::Constant(value) => Some(*value),
            _ => None,
        }
    }

    /// Every operand expression the condition reads, in first-use order.
    pub fn operands(&self) -> Vec<OperandExpr> {
        let mut seen = Vec::new();
        self.collect_operands(&mut seen);
        seen
    }

    fn collect_operands(&self, seen: &mut Vec<OperandExpr>) {
        match self {
            Condition::Compare { operand, .. } | Condition::Integral { operand, .. } => {
                if !seen.contains(operand) {
                    seen.push(*operand);
                }
            }
            Condition::All(children) | Condition::Any(children) => {
                for child in children {
                    child.collect_operands(seen);
                }
            }
            Condition::Constant(_) => {}
        }
    }

    /// Rewrite every operand expression through `rewrite`, re-folding the
    /// result.
    pub fn map_operands(&self, rewrite: &impl Fn(OperandExpr) -> OperandExpr) -> Condition {
        match self {
            Condition::Compare { operand, op, value } => {
                Condition::compare(rewrite(*operand), *op, *value)
            }
            Condition::Integral { operand, negated } => {
                Condition::integral(rewrite(*operand), *negated)
            }
            Condition::All(children) => {
                Condition::all(children.iter().map(|child| child.map_operands(rewrite)))
            }
            Condition::Any(children) => {
                Condition::any(children.iter().map(|child| child.map_operands(rewrite)))
            }
            Condition::Constant(value) => Condition::Constant(*value),
        }
    }

    fn is_compound(&self) -> bool {
        matches!(self, Condition::All(_) | Condition::Any(_))
    }
}

/// Renders Rust syntax over the short operand names.
impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Compare { operand, op, value } => {
                if operand.is_decimal() {
                    write!(f, "{} {op} {value}.0", operand.name())
                } else {
                    write!(f, "{} {op} {value}", operand.name())
                }
            }
            Condition::Integral { operand, negated } => {
                let op = if *negated { "!=" } else { "==" };
                write!(f, "{}.fract() {op} 0.0", operand.name())
            }
            Condition::All(children) => write_joined(f, children, " && "),
            Condition::Any(children) => write_joined(f, children, " || "),
            Condition::Constant(value) => write!(f, "{value}"),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, children: &[Condition], separator: &str) -> fmt::Result {
    for (index, child) in children.iter().enumerate() {
        if index > 0 {
            f.write_str(separator)?;
        }
        if child.is_compound() {
            write!(f, "({child})")?;
        } else {
            write!(f, "{child}")?;
        }
    }
    Ok(())
}
