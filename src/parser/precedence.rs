//! Binding power of infix operators

use rustc_hash::FxHashMap;

use super::token::TokenKind;

/// Binding power, weakest first. The derived ordering follows declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Precedence {
    Lowest = 0,
    Assignment,  // :=
    LogicalOr,   // or
    LogicalAnd,  // and
    Equality,    // = <>
    LessGreater, // < > <= >=
    Sum,         // + -
    Product,     // * / mod div
    Prefix,      // -x, not x
    Call,        // f(x)
    Index,       // a[i]
}

/// Token kind to binding power for every token that can continue an expression.
pub(crate) fn precedence_table() -> FxHashMap<TokenKind, Precedence> {
    [
        (TokenKind::Assign, Precedence::Assignment),
        (TokenKind::Or, Precedence::LogicalOr),
        (TokenKind::And, Precedence::LogicalAnd),
        (TokenKind::Eq, Precedence::Equality),
        (TokenKind::NotEq, Precedence::Equality),
        (TokenKind::Lt, Precedence::LessGreater),
        (TokenKind::Gt, Precedence::LessGreater),
        (TokenKind::LtEq, Precedence::LessGreater),
        (TokenKind::GtEq, Precedence::LessGreater),
        (TokenKind::Plus, Precedence::Sum),
        (TokenKind::Minus, Precedence::Sum),
        (TokenKind::Asterisk, Precedence::Product),
        (TokenKind::Slash, Precedence::Product),
        (TokenKind::Mod, Precedence::Product),
        (TokenKind::Div, Precedence::Product),
        (TokenKind::LParen, Precedence::Call),
        // Ranked but without an infix handler, so a subscript ends the expression.
        (TokenKind::LBracket, Precedence::Index),
    ]
    .into_iter()
    .collect()
}
