//! Declaration parsing implementation
//!
//! This module handles everything in a block that comes before its body:
//!
//! - Variable sections: `var a, b: integer; c: real;`
//! - Routines: `function f(x: integer): integer; <block>` and
//!   `procedure p(var y: real); <block>`
//! - Parameter groups, declarations and type names
//!
//! # Grammar
//!
//! ```text
//! block       ::= ["var" (declaration ';')+] routine* begin_end
//! declaration ::= IDENT (',' IDENT)* ':' type
//! routine     ::= ("function" | "procedure") IDENT ['(' params ')'] [':' type] ';' block [';']
//! params      ::= parameter (';' parameter)*
//! parameter   ::= ["var"] declaration (',' declaration)*
//! type        ::= "char" | "boolean" | "integer" | "real" | "string"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use tracing::trace;

use crate::parser::ast::*;
use crate::parser::parse::Parser;
use crate::parser::token::TokenKind;

impl Parser {
    /// Parse a block; the current token is the `;` that precedes it.
    pub(crate) fn parse_block(&mut self) -> Option<Block> {
        trace!(line = self.lexer().line(), "parsing block");
        let token = self.cur.clone();

        let var_section = if self.peek_is(TokenKind::Var) {
            self.next_token();
            Some(self.parse_var_section()?)
        } else {
            None
        };

        let mut routines = Vec::new();
        while self.peek_is(TokenKind::Function) || self.peek_is(TokenKind::Procedure) {
            self.next_token();
            routines.push(self.parse_routine()?);
        }

        if !self.peek_is(TokenKind::Begin) {
            self.error_at(self.peek_line, "invalid block, expected BEGIN");
            return None;
        }
        self.next_token();
        let body = self.parse_begin_end()?;

        Some(Block {
            token,
            var_section,
            routines,
            body,
        })
    }

    /// Parse `var (declaration ;)+`; the current token is `var`.
    fn parse_var_section(&mut self) -> Option<VarSection> {
        let token = self.cur.clone();
        let mut declarations = Vec::new();

        while self.peek_is(TokenKind::Ident) {
            self.next_token();
            declarations.push(self.parse_declaration()?);
            if !self.expect_peek(TokenKind::Semicolon) {
                return None;
            }
        }

        if declarations.is_empty() {
            self.peek_error(TokenKind::Ident);
            return None;
        }

        Some(VarSection {
            token,
            declarations,
        })
    }

    /// Parse `a, b: type`; the current token is the first identifier.
    pub(crate) fn parse_declaration(&mut self) -> Option<Declaration> {
        let mut names = vec![Identifier::new(self.cur.clone())];

        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            if !self.expect_peek(TokenKind::Ident) {
                return None;
            }
            names.push(Identifier::new(self.cur.clone()));
        }

        if !self.expect_peek(TokenKind::Colon) {
            return None;
        }
        let token = self.cur.clone();

        self.next_token();
        let ty = self.parse_type()?;

        Some(Declaration { token, names, ty })
    }

    /// Parse a function or procedure; the current token is the keyword.
    fn parse_routine(&mut self) -> Option<Routine> {
        let token = self.cur.clone();
        let is_function = self.cur_is(TokenKind::Function);

        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = Identifier::new(self.cur.clone());
        trace!(routine = %name.value, is_function, "parsing routine");

        let parameters = if self.peek_is(TokenKind::LParen) {
            self.next_token();
            self.parse_parameters()?
        } else {
            Vec::new()
        };

        let return_type = if is_function {
            if !self.expect_peek(TokenKind::Colon) {
                return None;
            }
            self.next_token();
            Some(self.parse_type()?)
        } else {
            None
        };

        if !self.expect_peek(TokenKind::Semicolon) {
            return None;
        }
        let block = self.parse_block()?;

        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }

        Some(Routine {
            token,
            name,
            parameters,
            return_type,
            block,
        })
    }

    /// Parse a parameter list up to and including `)`; the current token is `(`.
    fn parse_parameters(&mut self) -> Option<Vec<Parameter>> {
        let mut parameters = Vec::new();

        if self.peek_is(TokenKind::RParen) {
            self.next_token();
            return Some(parameters);
        }

        self.next_token();
        parameters.push(self.parse_parameter()?);

        while self.peek_is(TokenKind::Semicolon) {
            self.next_token();
            self.next_token();
            parameters.push(self.parse_parameter()?);
        }

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(parameters)
    }

    /// Parse `[var] declaration (, declaration)*`
    fn parse_parameter(&mut self) -> Option<Parameter> {
        let token = self.cur.clone();
        let is_var = self.cur_is(TokenKind::Var);

        if is_var && !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        if !self.cur_is(TokenKind::Ident) {
            self.error("invalid parameter");
            return None;
        }

        let mut declarations = vec![self.parse_declaration()?];

        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            if !self.peek_is(TokenKind::Ident) {
                self.error("invalid parameter declaration");
                return None;
            }
            self.next_token();
            declarations.push(self.parse_declaration()?);
        }

        Some(Parameter {
            token,
            is_var,
            declarations,
        })
    }

    /// Parse one of the five built-in type names at the current token.
    pub(crate) fn parse_type(&mut self) -> Option<TypeName> {
        if !self.cur.kind.is_type_name() {
            self.error("invalid type");
            return None;
        }
        Some(TypeName {
            token: self.cur.clone(),
        })
    }
}
