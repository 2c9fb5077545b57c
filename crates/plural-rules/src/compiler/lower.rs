//! Lowering of parsed relations into guard conditions.

use crate::compiler::condition::{CompareOp, Condition};
use crate::parser::{AndOrTree, Comparison, OperandExpr, Operator, RangeItem};

/// Ranges with at most this many members expand to a list of equalities.
const MAX_EXPANDED_RANGE: u64 = 3;

/// Lower a relation into its guards, one per `or` group, in source order.
///
/// Groups that can never hold are dropped, so the result may be empty even
/// for a non-empty tree.
pub fn lower_tree(tree: &AndOrTree) -> Vec<Condition> {
    tree.conjunctions
        .iter()
        .map(|conjunction| Condition::all(conjunction.comparisons.iter().map(lower_comparison)))
        .filter(|guard| guard.is_constant() != Some(false))
        .collect()
}

/// Lower one comparison. `=` lists are OR'd, `!=` lists are AND'd.
pub fn lower_comparison(comparison: &Comparison) -> Condition {
    let operand = comparison.operand;

    // Compact-exponent operands are zero for every plain number.
    if operand.symbol.is_compact() {
        let matches = comparison.items.iter().any(|item| item.contains(0));
        return Condition::Constant(match comparison.operator {
            Operator::Equal => matches,
            Operator::NotEqual => !matches,
        });
    }

    match comparison.operator {
        Operator::Equal => Condition::any(comparison.items.iter().map(|item| match *item {
            RangeItem::Value(value) => Condition::compare(operand, CompareOp::Eq, value),
            // An inverted range has no members.
            RangeItem::Range { start, end } if end < start => Condition::Constant(false),
            RangeItem::Range { start, end } if end - start < MAX_EXPANDED_RANGE => {
                Condition::any(
                    (start..=end).map(|value| Condition::compare(operand, CompareOp::Eq, value)),
                )
            }
            RangeItem::Range { start, end } => Condition::all([
                Condition::integral(operand, false),
                lower_bound(operand, CompareOp::Ge, start),
                Condition::compare(operand, CompareOp::Le, end),
            ]),
        })),
        Operator::NotEqual => Condition::all(comparison.items.iter().map(|item| match *item {
            RangeItem::Value(value) => Condition::compare(operand, CompareOp::Ne, value),
            RangeItem::Range { start, end } if end < start => Condition::Constant(true),
            RangeItem::Range { start, end } => Condition::any([
                Condition::integral(operand, true),
                lower_bound(operand, CompareOp::Lt, start),
                Condition::compare(operand, CompareOp::Gt, end),
            ]),
        })),
    }
}

/// Operands are magnitudes, so `x >= 0` always holds and `x < 0` never
/// does.
fn lower_bound(operand: OperandExpr, op: CompareOp, start: u64) -> Condition {
    if start == 0 {
        Condition::Constant(op == CompareOp::Ge)
    } else {
        Condition::compare(operand, op, start)
    }
}
