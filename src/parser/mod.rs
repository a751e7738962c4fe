//! minipas front end
//!
//! This module turns minipas source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions and structural rendering
//! - [`diagnostics`]: error types and the per-stage error sink
//!
//! # Supported language
//!
//! A small Pascal-like teaching language:
//! - Types: `char`, `boolean`, `integer`, `real`, `string`
//! - Declarations: `var` sections, functions and procedures with value or
//!   `var` parameters
//! - Statements: `begin ... end`, `if ... then ... else`, `while ... do`,
//!   assignments and calls
//! - Expressions: arithmetic, comparison, `and`/`or`/`not`, calls
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent for declarations and statements, Pratt
//! (precedence climbing) parsing for expressions. No external parser
//! generator dependencies.

pub mod ast;
mod declarations;
pub mod diagnostics;
mod expressions;
pub mod lexer;
pub mod parse;
pub mod precedence;
mod statements;
pub mod token;


pub use diagnostics::{Diagnostics, LexError, ParseError};
pub use lexer::Lexer;
pub use parse::Parser;
pub use token::{Token, TokenKind};
