//! Relation parser.
//!
//! A single left-to-right pass over the tokens drives an explicit state
//! machine. `and` appends the finished comparison to the current
//! conjunction; `or` additionally closes that conjunction, so `and` always
//! binds tighter than `or`.

use std::mem;

use super::ast::{
    AndOrTree, Comparison, Conjunction, OperandExpr, OperandSymbol, Operator, RangeItem,
};
use super::error::MalformedRuleError;
use super::token::{Token, TokenKind, tokenize};
use crate::registry::OperandRegistry;

/// Split a relation into its condition and its sample annex.
///
/// The annex keeps its leading `@`; it is empty when the relation has no
/// samples.
pub fn split_relation(relation: &str) -> (&str, &str) {
    match relation.find('@') {
        Some(pos) => relation.split_at(pos),
        None => (relation, ""),
    }
}

/// Parse the condition part of a relation, registering every operand
/// expression it references.
///
/// Blank conditions (as used by `other`) produce an empty tree.
///
/// # Example
///
/// ```
/// use plural_rules::OperandRegistry;
/// use plural_rules::parser::parse_relation;
///
/// let mut registry = OperandRegistry::new();
/// let tree = parse_relation("v = 0 and i % 10 = 1 @integer 1, 21", &mut registry).unwrap();
/// assert_eq!(tree.conjunctions.len(), 1);
/// assert_eq!(tree.conjunctions[0].comparisons.len(), 2);
/// assert_eq!(registry.len(), 2);
/// ```
pub fn parse_relation(
    relation: &str,
    registry: &mut OperandRegistry,
) -> Result<AndOrTree, MalformedRuleError> {
    let (condition, _) = split_relation(relation);
    let tokens = tokenize(relation, condition)?;
    let end_column = condition.trim_end().chars().count() + 1;

    let mut parser = RelationParser::new(relation, registry);
    for token in tokens {
        parser.advance(token)?;
    }
    parser.finish(end_column)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    /// Start of a comparison.
    AwaitingOperand,
    /// After an operand symbol or `symbol % k`.
    AwaitingOperator(OperandExpr),
    /// After `symbol %`.
    AwaitingModulus(OperandSymbol),
    /// After the operator or a comma.
    InValueList,
    /// After a value that may still open a range.
    AfterValue(u64),
    /// After `start..`.
    AwaitingRangeEnd(u64),
    /// After a complete value list item.
    AwaitingConnector,
}

struct RelationParser<'a> {
    relation: &'a str,
    registry: &'a mut OperandRegistry,
    state: ParserState,
    conjunctions: Vec<Conjunction>,
    current: Vec<Comparison>,
    pending: Option<(OperandExpr, Operator)>,
    items: Vec<RangeItem>,
}

impl<'a> RelationParser<'a> {
    fn new(relation: &'a str, registry: &'a mut OperandRegistry) -> Self {
        RelationParser {
            relation,
            registry,
            state: ParserState::AwaitingOperand,
            conjunctions: Vec::new(),
            current: Vec::new(),
            pending: None,
            items: Vec::new(),
        }
    }

    fn advance(&mut self, token: Token) -> Result<(), MalformedRuleError> {
        self.state = match (self.state, token.kind) {
            (ParserState::AwaitingOperand, TokenKind::Operand(symbol)) => {
                ParserState::AwaitingOperator(OperandExpr::bare(symbol))
            }
            (ParserState::AwaitingOperand, _) => {
                return Err(self.error(token, "expected an operand"));
            }

            (ParserState::AwaitingOperator(expr), TokenKind::Percent) if expr.modulus.is_none() => {
                ParserState::AwaitingModulus(expr.symbol)
            }
            (ParserState::AwaitingOperator(expr), TokenKind::Equal) => {
                self.open_comparison(expr, Operator::Equal)
            }
            (ParserState::AwaitingOperator(expr), TokenKind::NotEqual) => {
                self.open_comparison(expr, Operator::NotEqual)
            }
            (ParserState::AwaitingOperator(_), _) => {
                return Err(self.error(token, "expected '=' or '!='"));
            }

            (ParserState::AwaitingModulus(_), TokenKind::Integer(0)) => {
                return Err(self.error(token, "modulus must be positive"));
            }
            (ParserState::AwaitingModulus(symbol), TokenKind::Integer(modulus)) => {
                ParserState::AwaitingOperator(OperandExpr::modulo(symbol, modulus))
            }
            (ParserState::AwaitingModulus(_), _) => {
                return Err(self.error(token, "expected a modulus after '%'"));
            }

            (ParserState::InValueList, TokenKind::Integer(value)) => ParserState::AfterValue(value),
            (ParserState::InValueList, _) => {
                return Err(self.error(token, "expected a value"));
            }

            (ParserState::AfterValue(start), TokenKind::RangeDots) => {
                ParserState::AwaitingRangeEnd(start)
            }
            (ParserState::AfterValue(value), kind) => {
                self.items.push(RangeItem::Value(value));
                self.connect(token, kind)?
            }

            (ParserState::AwaitingRangeEnd(start), TokenKind::Integer(end)) if end >= start => {
                self.items.push(RangeItem::Range { start, end });
                ParserState::AwaitingConnector
            }
            (ParserState::AwaitingRangeEnd(start), TokenKind::Integer(end)) => {
                return Err(self.error(
                    token,
                    format!("range end {end} is smaller than its start {start}"),
                ));
            }
            (ParserState::AwaitingRangeEnd(_), _) => {
                return Err(self.error(token, "expected the end of a range"));
            }

            (ParserState::AwaitingConnector, kind) => self.connect(token, kind)?,
        };
        Ok(())
    }

    /// Handle the token following a complete value list item.
    fn connect(&mut self, token: Token, kind: TokenKind) -> Result<ParserState, MalformedRuleError> {
        match kind {
            TokenKind::Comma => Ok(ParserState::InValueList),
            TokenKind::And => {
                self.close_comparison();
                Ok(ParserState::AwaitingOperand)
            }
            TokenKind::Or => {
                self.close_comparison();
                self.close_conjunction();
                Ok(ParserState::AwaitingOperand)
            }
            _ => Err(self.error(token, "expected ',', 'and' or 'or'")),
        }
    }

    fn open_comparison(&mut self, expr: OperandExpr, operator: Operator) -> ParserState {
        self.registry.register(expr);
        self.pending = Some((expr, operator));
        ParserState::InValueList
    }

    fn close_comparison(&mut self) {
        if let Some((operand, operator)) = self.pending.take() {
            self.current.push(Comparison {
                operand,
                operator,
                items: mem::take(&mut self.items),
            });
        }
    }

    fn close_conjunction(&mut self) {
        let comparisons = mem::take(&mut self.current);
        self.conjunctions.push(Conjunction { comparisons });
    }

    fn finish(mut self, end_column: usize) -> Result<AndOrTree, MalformedRuleError> {
        match self.state {
            ParserState::AwaitingOperand if self.conjunctions.is_empty() && self.current.is_empty() => {
                return Ok(AndOrTree::default());
            }
            ParserState::AfterValue(value) => self.items.push(RangeItem::Value(value)),
            ParserState::AwaitingConnector => {}
            _ => {
                return Err(MalformedRuleError::new(
                    self.relation,
                    end_column,
                    "unexpected end of condition",
                ));
            }
        }
        self.close_comparison();
        self.close_conjunction();
        Ok(AndOrTree {
            conjunctions: self.conjunctions,
        })
    }

    fn error(&self, token: Token, message: impl Into<String>) -> MalformedRuleError {
        MalformedRuleError::new(self.relation, token.column, message)
    }
}
