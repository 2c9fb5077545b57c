//! Relation tokenizer using winnow.
//!
//! Splits the condition part of a relation (everything before the first
//! `@`) into spanned tokens. Whitespace only separates tokens.

use winnow::ascii::digit1;
use winnow::combinator::alt;
use winnow::prelude::*;
use winnow::token::take_while;

use super::ast::OperandSymbol;
use super::error::MalformedRuleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Operand(OperandSymbol),
    Percent,
    Integer(u64),
    RangeDots,
    Comma,
    Equal,
    NotEqual,
    And,
    Or,
}

/// A token with the 1-based column where it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub column: usize,
}

/// Tokenize a condition. `relation` is the full text, used for errors.
pub fn tokenize(relation: &str, condition: &str) -> Result<Vec<Token>, MalformedRuleError> {
    let mut remaining = condition;
    let mut tokens = Vec::new();

    loop {
        let _ = ws(&mut remaining);
        if remaining.is_empty() {
            return Ok(tokens);
        }

        let column = column_of(condition, remaining);
        let before = remaining;
        match token(&mut remaining) {
            Ok(kind) => tokens.push(Token { kind, column }),
            Err(_) => {
                return Err(MalformedRuleError::new(
                    relation,
                    column,
                    describe_unexpected(before),
                ));
            }
        }
    }
}

/// 1-based character column of `remaining` within `original`.
fn column_of(original: &str, remaining: &str) -> usize {
    let consumed = original.len() - remaining.len();
    original[..consumed].chars().count() + 1
}

fn describe_unexpected(input: &str) -> String {
    let word: String = input
        .chars()
        .take_while(char::is_ascii_alphabetic)
        .collect();
    if !word.is_empty() {
        return format!("unknown word '{word}'");
    }
    match input.chars().next() {
        Some(c) if c.is_ascii_digit() => "integer literal out of range".to_string(),
        Some(c) => format!("unexpected character '{c}'"),
        None => "unexpected end of input".to_string(),
    }
}

/// Parse optional whitespace.
fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}

fn token(input: &mut &str) -> ModalResult<TokenKind> {
    alt((
        "!=".value(TokenKind::NotEqual),
        '='.value(TokenKind::Equal),
        "..".value(TokenKind::RangeDots),
        ','.value(TokenKind::Comma),
        '%'.value(TokenKind::Percent),
        word,
        integer,
    ))
    .parse_next(input)
}

/// Parse a connector keyword or a single-letter operand symbol.
fn word(input: &mut &str) -> ModalResult<TokenKind> {
    take_while(1.., |c: char| c.is_ascii_alphabetic())
        .verify_map(|word: &str| match word {
            "and" => Some(TokenKind::And),
            "or" => Some(TokenKind::Or),
            _ => {
                let mut chars = word.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => OperandSymbol::from_char(c).map(TokenKind::Operand),
                    _ => None,
                }
            }
        })
        .parse_next(input)
}

fn integer(input: &mut &str) -> ModalResult<TokenKind> {
    digit1
        .try_map(|digits: &str| digits.parse::<u64>())
        .map(TokenKind::Integer)
        .parse_next(input)
}
