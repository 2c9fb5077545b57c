//! Operand expression registry.
//!
//! Every distinct operand expression of one locale's rules is registered
//! exactly once, in first-seen order. The registry is owned by a single
//! locale compilation and passed explicitly to the parser.

use std::collections::BTreeSet;

use crate::parser::{OperandExpr, OperandSymbol};

#[derive(Debug, Clone, Default)]
pub struct OperandRegistry {
    entries: Vec<OperandExpr>,
}

impl OperandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an expression, returning its short variable name.
    ///
    /// Registering an already known expression is a no-op.
    pub fn register(&mut self, expr: OperandExpr) -> String {
        if !self.entries.contains(&expr) {
            self.entries.push(expr);
        }
        expr.name()
    }

    /// Registered expressions in first-seen order.
    pub fn entries(&self) -> &[OperandExpr] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Base symbols referenced bare or as a modulo operand.
    pub fn symbols(&self) -> BTreeSet<OperandSymbol> {
        self.entries.iter().map(|expr| expr.symbol).collect()
    }
}
