//! Expression parsing implementation
//!
//! Expressions are parsed by precedence climbing (a Pratt parser). Every
//! token kind that can start an expression has a prefix handler; every token
//! kind that can continue one has an infix handler and a binding power in the
//! precedence table. Binary operators, calls and assignment all go through
//! the same dispatch.
//!
//! # Supported Expressions
//!
//! - Literals: integers, reals, booleans, strings, characters
//! - Identifiers
//! - Prefix operators: `-`, `not`
//! - Binary operators: `or`, `and`, `= <>`, `< > <= >=`, `+ -`, `* / mod div`
//! - Grouping: `( expr )`
//! - Calls: `name(arg, ...)`
//! - Assignment: `name := expr` (right-nested, at most one per statement)
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::Parser;
use crate::parser::precedence::Precedence;
use crate::parser::token::TokenKind;

impl Parser {
    /// Parse an expression whose operators all bind tighter than `precedence`.
    pub(crate) fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        if !self.enter_nesting() {
            return None;
        }
        let expression = self.parse_operators(precedence);
        self.leave_nesting();
        expression
    }

    fn parse_operators(&mut self, precedence: Precedence) -> Option<Expression> {
        let Some(prefix) = self.prefix_fns.get(&self.cur.kind).copied() else {
            self.no_prefix_parse_fn_error();
            return None;
        };
        let mut left = prefix(self)?;

        while !self.peek_is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            let Some(infix) = self.infix_fns.get(&self.peek.kind).copied() else {
                return Some(left);
            };
            self.next_token();
            left = infix(self, left)?;
        }

        Some(left)
    }

    // ===== Prefix handlers =====

    pub(crate) fn parse_identifier(&mut self) -> Option<Expression> {
        Some(Expression::Identifier(Identifier::new(self.cur.clone())))
    }

    pub(crate) fn parse_integer_literal(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        match token.literal.parse::<i64>() {
            Ok(value) => Some(Expression::Integer(IntegerLiteral { token, value })),
            Err(_) => {
                self.error(format!("could not parse `{}` as integer", token.literal));
                None
            }
        }
    }

    pub(crate) fn parse_float_literal(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        match token.literal.parse::<f64>() {
            Ok(value) => Some(Expression::Float(FloatLiteral { token, value })),
            Err(_) => {
                self.error(format!("could not parse `{}` as float", token.literal));
                None
            }
        }
    }

    pub(crate) fn parse_boolean_literal(&mut self) -> Option<Expression> {
        Some(Expression::Boolean(BooleanLiteral {
            value: self.cur_is(TokenKind::True),
            token: self.cur.clone(),
        }))
    }

    pub(crate) fn parse_string_literal(&mut self) -> Option<Expression> {
        Some(Expression::Str(StringLiteral {
            value: self.cur.literal.clone(),
            token: self.cur.clone(),
        }))
    }

    pub(crate) fn parse_char_literal(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        let mut chars = token.literal.chars();
        match (chars.next(), chars.next()) {
            (Some(value), None) => Some(Expression::Char(CharLiteral { token, value })),
            _ => {
                self.error(format!("could not parse `{}` as char", token.literal));
                None
            }
        }
    }

    /// Parse `-x` or `not x`
    pub(crate) fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        let operator = token.literal.clone();

        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;

        Some(Expression::Prefix(PrefixExpression {
            token,
            operator,
            right: Box::new(right),
        }))
    }

    /// Parse `( expr )`; the parentheses leave no node behind.
    pub(crate) fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();
        let expr = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(expr)
    }

    // ===== Infix handlers =====

    /// Parse binary operator (left-associative)
    pub(crate) fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.cur.clone();
        let operator = token.literal.clone();
        let precedence = self.cur_precedence();

        self.next_token();
        let right = self.parse_expression(precedence)?;

        Some(Expression::Infix(InfixExpression {
            token,
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }))
    }

    /// Parse `target := value`. The value is parsed at the lowest level, so a
    /// chain nests to the right; the statement parser rejects chains by count.
    pub(crate) fn parse_assignment(&mut self, left: Expression) -> Option<Expression> {
        self.assignment_count += 1;
        let token = self.cur.clone();

        let target = match left {
            Expression::Identifier(ident) => ident,
            other => {
                self.error(format!(
                    "invalid assignment target `{}`",
                    other.token().literal
                ));
                return None;
            }
        };

        // Lowest rather than Assignment so a chain nests to the right.
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;

        Some(Expression::Assignment(Assignment {
            token,
            target,
            value: Box::new(value),
        }))
    }

    /// Parse `name(args)`; the current token is `(`.
    pub(crate) fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let token = self.cur.clone();

        let Expression::Identifier(function) = function else {
            self.error("invalid call target");
            return None;
        };

        let arguments = self.parse_call_arguments()?;

        Some(Expression::Call(Call {
            token,
            function,
            arguments,
        }))
    }

    /// Comma-separated arguments up to and including the closing `)`
    fn parse_call_arguments(&mut self) -> Option<Vec<Expression>> {
        let mut arguments = Vec::new();

        if self.peek_is(TokenKind::RParen) {
            self.next_token();
            return Some(arguments);
        }

        self.next_token();
        arguments.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            arguments.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(arguments)
    }
}
