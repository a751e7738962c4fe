//! Statement parsing implementation
//!
//! This module handles the statements that may appear inside `begin ... end`:
//!
//! - Compound statements: `begin ... end`
//! - Control flow: `if ... then ... else`, `while ... do`
//! - Expression statements: assignments and calls terminated by `;`
//!
//! # Grammar
//!
//! ```text
//! statement   ::= begin_end [';'] | conditional | while_stmt | expr_stmt
//! begin_end   ::= "begin" statement* "end"
//! conditional ::= "if" expression "then" statement ["else" statement]
//! while_stmt  ::= "while" expression "do" statement
//! expr_stmt   ::= expression ';'
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::Parser;
use crate::parser::precedence::Precedence;
use crate::parser::token::TokenKind;

impl Parser {
    /// Parse one statement starting at the current token.
    ///
    /// On success the current token is the statement's last token.
    pub fn parse_statement(&mut self) -> Option<Statement> {
        if !self.enter_nesting() {
            return None;
        }
        let statement = match self.cur.kind {
            TokenKind::Begin => self.parse_compound_statement(),
            TokenKind::If => self.parse_conditional().map(Statement::Conditional),
            TokenKind::While => self.parse_while().map(Statement::While),
            _ => self.parse_expression_statement().map(Statement::Expression),
        };
        self.leave_nesting();
        statement
    }

    /// A nested `begin ... end` with its optional trailing `;`
    fn parse_compound_statement(&mut self) -> Option<Statement> {
        let block = self.parse_begin_end()?;
        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }
        Some(Statement::BeginEnd(block))
    }

    /// Parse `begin ... end`; the current token is `begin`.
    ///
    /// A statement that fails is dropped and parsing continues with the next
    /// token, so one bad line does not hide errors further down.
    pub(crate) fn parse_begin_end(&mut self) -> Option<BeginEnd> {
        let token = self.cur.clone();
        let mut statements = Vec::new();

        while !self.peek_is(TokenKind::End) && !self.peek_is(TokenKind::Eof) {
            self.next_token();
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
        }

        if !self.expect_peek(TokenKind::End) {
            return None;
        }

        Some(BeginEnd { token, statements })
    }

    /// Parse `if <condition> then <stmt> [else <stmt>]`
    fn parse_conditional(&mut self) -> Option<Conditional> {
        let token = self.cur.clone();

        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::Then) {
            return None;
        }
        self.next_token();
        let consequence = Box::new(self.parse_statement()?);

        let alternative = if self.peek_is(TokenKind::Else) {
            self.next_token();
            self.next_token();
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Some(Conditional {
            token,
            condition,
            consequence,
            alternative,
        })
    }

    /// Parse `while <condition> do <stmt>`
    fn parse_while(&mut self) -> Option<While> {
        let token = self.cur.clone();

        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::Do) {
            return None;
        }
        self.next_token();
        let body = Box::new(self.parse_statement()?);

        Some(While {
            token,
            condition,
            body,
        })
    }

    /// Parse `<expression> ;`
    ///
    /// At most one `:=` may appear in the whole statement; the check runs
    /// after the terminating `;` so the statement is consumed either way.
    fn parse_expression_statement(&mut self) -> Option<ExpressionStatement> {
        let token = self.cur.clone();
        self.assignment_count = 0;

        let expression = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::Semicolon) {
            return None;
        }

        if self.assignment_count > 1 {
            self.error("multiple assignment operators in a single expression");
            return None;
        }

        Some(ExpressionStatement { token, expression })
    }
}
