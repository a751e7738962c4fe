//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct: the two-token cursor over the
//! lexer, the handler and precedence tables, diagnostics, and the
//! `parse_program` entry point.
//!
//! # Parser Architecture
//!
//! The Parser is a recursive descent parser for statements and declarations
//! and a Pratt parser for expressions:
//! - This module: Parser struct, cursor helpers, and coordination
//! - `declarations`: blocks, `var` sections, routines, parameters and types
//! - `statements`: `begin ... end`, `if`, `while` and expression statements
//! - `expressions`: the precedence-climbing loop and its handlers
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! Errors never unwind. A failed production records a [`ParseError`] and
//! returns `None`, which callers propagate with `?`.

use rustc_hash::FxHashMap;
use std::mem;
use tracing::{debug, trace};

use super::ast::{Expression, Identifier, Program, Statement};
use super::diagnostics::{Diagnostics, ParseError};
use super::lexer::Lexer;
use super::precedence::{precedence_table, Precedence};
use super::token::{Token, TokenKind};

/// Deepest combined expression and statement nesting the parser follows.
const MAX_NESTING_DEPTH: usize = 128;

/// Starts an expression at the current token.
pub(crate) type PrefixParseFn = fn(&mut Parser) -> Option<Expression>;
/// Continues an expression whose operator is the current token.
pub(crate) type InfixParseFn = fn(&mut Parser, Expression) -> Option<Expression>;

/// Pratt parser for minipas
pub struct Parser {
    lexer: Lexer,
    pub(crate) cur: Token,
    pub(crate) peek: Token,
    /// Source lines of `cur` and `peek`, for diagnostics.
    cur_line: usize,
    pub(crate) peek_line: usize,
    pub(crate) precedences: FxHashMap<TokenKind, Precedence>,
    pub(crate) prefix_fns: FxHashMap<TokenKind, PrefixParseFn>,
    pub(crate) infix_fns: FxHashMap<TokenKind, InfixParseFn>,
    errors: Diagnostics<ParseError>,
    /// Assignment operators seen in the current expression statement.
    pub(crate) assignment_count: usize,
    nesting_depth: usize,
}

impl Parser {
    /// Create a parser and fill the two-token window from `lexer`.
    pub fn new(mut lexer: Lexer) -> Self {
        let cur = lexer.next_token();
        let cur_line = lexer.line();
        let peek = lexer.next_token();
        let peek_line = lexer.line();

        let mut parser = Self {
            lexer,
            cur,
            peek,
            cur_line,
            peek_line,
            precedences: precedence_table(),
            prefix_fns: FxHashMap::default(),
            infix_fns: FxHashMap::default(),
            errors: Diagnostics::new(),
            assignment_count: 0,
            nesting_depth: 0,
        };

        parser.register_prefix(TokenKind::Ident, Parser::parse_identifier);
        parser.register_prefix(TokenKind::IntLit, Parser::parse_integer_literal);
        parser.register_prefix(TokenKind::FloatLit, Parser::parse_float_literal);
        parser.register_prefix(TokenKind::True, Parser::parse_boolean_literal);
        parser.register_prefix(TokenKind::False, Parser::parse_boolean_literal);
        parser.register_prefix(TokenKind::StrLit, Parser::parse_string_literal);
        parser.register_prefix(TokenKind::CharLit, Parser::parse_char_literal);
        parser.register_prefix(TokenKind::Minus, Parser::parse_prefix_expression);
        parser.register_prefix(TokenKind::Not, Parser::parse_prefix_expression);
        parser.register_prefix(TokenKind::LParen, Parser::parse_grouped_expression);

        for kind in [
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Asterisk,
            TokenKind::Slash,
            TokenKind::Mod,
            TokenKind::Div,
            TokenKind::Eq,
            TokenKind::NotEq,
            TokenKind::Lt,
            TokenKind::Gt,
            TokenKind::LtEq,
            TokenKind::GtEq,
            TokenKind::And,
            TokenKind::Or,
        ] {
            parser.register_infix(kind, Parser::parse_infix_expression);
        }
        parser.register_infix(TokenKind::Assign, Parser::parse_assignment);
        parser.register_infix(TokenKind::LParen, Parser::parse_call_expression);

        parser
    }

    fn register_prefix(&mut self, kind: TokenKind, handler: PrefixParseFn) {
        self.prefix_fns.insert(kind, handler);
    }

    fn register_infix(&mut self, kind: TokenKind, handler: InfixParseFn) {
        self.infix_fns.insert(kind, handler);
    }

    /// Parse `program <name>; <block>.` up to end of input.
    ///
    /// Returns `None` when the program structure could not be completed. A
    /// returned tree may still come with diagnostics for statements that
    /// were dropped along the way; check [`Parser::errors`] before trusting it.
    pub fn parse_program(&mut self) -> Option<Program> {
        debug!("parsing program");

        if !self.cur_is(TokenKind::Program) {
            let got = describe(&self.cur);
            self.record(ParseError::UnexpectedToken {
                line: self.cur_line,
                expected: TokenKind::Program,
                got,
            });
            return None;
        }
        let token = self.cur.clone();

        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = Identifier::new(self.cur.clone());

        if !self.expect_peek(TokenKind::Semicolon) {
            return None;
        }
        let block = self.parse_block()?;

        if !self.expect_peek(TokenKind::Dot) || !self.expect_peek(TokenKind::Eof) {
            return None;
        }

        Some(Program { token, name, block })
    }

    /// Parse every statement from the current token to end of input.
    ///
    /// Statements that fail to parse are dropped after their error is
    /// recorded; scanning resumes at the following token.
    pub fn parse_statements(&mut self) -> Vec<Statement> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
            self.next_token();
        }

        statements
    }

    pub fn errors(&self) -> &Diagnostics<ParseError> {
        &self.errors
    }

    /// The lexer being driven, for its diagnostics and counters.
    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    pub fn into_lexer(self) -> Lexer {
        self.lexer
    }

    /// True once the current token is EOF.
    pub fn is_at_end(&self) -> bool {
        self.cur_is(TokenKind::Eof)
    }

    // ===== Helper methods =====

    /// Shift the window by one token.
    pub(crate) fn next_token(&mut self) {
        let next = self.lexer.next_token();
        self.cur = mem::replace(&mut self.peek, next);
        self.cur_line = self.peek_line;
        self.peek_line = self.lexer.line();
        trace!(token = %self.cur, "advance");
    }

    pub(crate) fn cur_is(&self, kind: TokenKind) -> bool {
        self.cur.is(kind)
    }

    pub(crate) fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.is(kind)
    }

    /// Advance only if the lookahead has the expected kind, recording an error otherwise.
    pub(crate) fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek_is(kind) {
            self.next_token();
            true
        } else {
            self.peek_error(kind);
            false
        }
    }

    pub(crate) fn peek_error(&mut self, expected: TokenKind) {
        let got = describe(&self.peek);
        self.record(ParseError::UnexpectedToken {
            line: self.peek_line,
            expected,
            got,
        });
    }

    pub(crate) fn no_prefix_parse_fn_error(&mut self) {
        let literal = describe(&self.cur);
        self.record(ParseError::NoPrefixParseFn {
            line: self.cur_line,
            literal,
        });
    }

    /// Record a structural error on the line of the current token.
    pub(crate) fn error(&mut self, message: impl Into<String>) {
        self.error_at(self.cur_line, message);
    }

    pub(crate) fn error_at(&mut self, line: usize, message: impl Into<String>) {
        self.record(ParseError::Custom {
            line,
            message: message.into(),
        });
    }

    /// Step one level deeper into an expression or statement, recording an
    /// error instead when the nesting limit is reached. Pair every `true`
    /// with [`Parser::leave_nesting`].
    pub(crate) fn enter_nesting(&mut self) -> bool {
        if self.nesting_depth >= MAX_NESTING_DEPTH {
            self.error(format!(
                "expression nested too deeply (maximum {MAX_NESTING_DEPTH} levels)"
            ));
            return false;
        }
        self.nesting_depth += 1;
        true
    }

    pub(crate) fn leave_nesting(&mut self) {
        self.nesting_depth = self.nesting_depth.saturating_sub(1);
    }

    fn record(&mut self, error: ParseError) {
        debug!(%error, "parse error");
        self.errors.push(error);
    }

    pub(crate) fn peek_precedence(&self) -> Precedence {
        self.precedences
            .get(&self.peek.kind)
            .copied()
            .unwrap_or(Precedence::Lowest)
    }

    pub(crate) fn cur_precedence(&self) -> Precedence {
        self.precedences
            .get(&self.cur.kind)
            .copied()
            .unwrap_or(Precedence::Lowest)
    }
}

/// Token text for diagnostics; EOF has no literal, so fall back to its kind.
fn describe(token: &Token) -> String {
    if token.literal.is_empty() {
        token.kind.to_string()
    } else {
        token.literal.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::{Expression, Node};

    fn parser(source: &str) -> Parser {
        Parser::new(Lexer::new(source))
    }

    #[test]
    fn test_parse_minimal_program() {
        let mut parser = parser("program Test; begin x := 1; end.");
        let program = parser.parse_program().unwrap();

        assert!(parser.errors().is_empty());
        assert_eq!(program.name.value, "test");
        assert!(program.block.var_section.is_none());
        assert!(program.block.routines.is_empty());
        assert_eq!(program.block.body.statements.len(), 1);

        match &program.block.body.statements[0] {
            Statement::Expression(stmt) => match &stmt.expression {
                Expression::Assignment(assign) => {
                    assert_eq!(assign.target.value, "x");
                    assert!(matches!(*assign.value, Expression::Integer(ref i) if i.value == 1));
                }
                other => panic!("Expected assignment, got {other}"),
            },
            other => panic!("Expected expression statement, got {other}"),
        }
    }

    #[test]
    fn test_window_starts_with_two_tokens() {
        let parser = parser("program x");
        assert!(parser.cur_is(TokenKind::Program));
        assert!(parser.peek_is(TokenKind::Ident));
    }

    #[test]
    fn test_missing_program_keyword() {
        let mut parser = parser("begin end.");
        assert!(parser.parse_program().is_none());
        assert_eq!(
            parser.errors().messages(),
            vec!["Line 1: expected token `PROGRAM`, got `begin`".to_string()]
        );
    }

    #[test]
    fn test_missing_begin() {
        let mut parser = parser("program Test; end.");
        assert!(parser.parse_program().is_none());
        assert!(parser.errors().iter().any(|e| e.to_string().contains("BEGIN")));
    }

    #[test]
    fn test_trailing_tokens_after_dot() {
        let mut parser = parser("program t; begin end. x");
        assert!(parser.parse_program().is_none());
        assert_eq!(
            parser.errors().messages(),
            vec!["Line 1: expected token `EOF`, got `x`".to_string()]
        );
    }

    #[test]
    fn test_missing_dot_reports_eof() {
        let mut parser = parser("program t; begin end");
        assert!(parser.parse_program().is_none());
        assert_eq!(
            parser.errors().messages(),
            vec!["Line 1: expected token `.`, got `EOF`".to_string()]
        );
    }

    #[test]
    fn test_parse_statements() {
        let mut parser = parser("x := 1; y := x + 2; if x then y := 3;");
        let statements = parser.parse_statements();

        assert!(parser.errors().is_empty());
        assert_eq!(statements.len(), 3);
        assert!(matches!(statements[2], Statement::Conditional(_)));
        assert_eq!(statements[0].token().literal, "x");
    }

    #[test]
    fn test_lexer_errors_stay_separate() {
        let mut parser = parser("program t; begin x := @; end.");
        parser.parse_program();

        assert_eq!(parser.lexer().errors().len(), 1);
        assert!(parser
            .errors()
            .iter()
            .all(|e| !e.to_string().contains("invalid character")));
    }

    #[test]
    fn test_into_lexer_keeps_lexer_diagnostics() {
        let mut parser = parser("program t; begin x := 1 # 2; end.");
        parser.parse_program();

        let lexer = parser.into_lexer();
        assert_eq!(
            lexer.errors().messages(),
            vec!["invalid character: '#', line: 1".to_string()]
        );
    }
}
