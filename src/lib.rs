//! # Introduction
//!
//! minipas is the front end of a small Pascal-like teaching language. It
//! tokenizes source text, parses it into an abstract syntax tree, and prints
//! either the token stream or a structural rendering of the tree.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → rendering
//! ```
//!
//! 1. [`parser`]: lexer, Pratt parser, AST and diagnostics.
//! 2. [`listing`]: token listings in debug, normal and simple modes.
//! 3. [`repl`]: line-at-a-time interactive front end.
//!
//! Neither stage stops at the first problem. The lexer turns bad input into
//! `ILLEGAL` tokens and the parser drops the node it could not build; both
//! record what happened in their own [`parser::Diagnostics`].
//!
//! ```
//! use minipas::parser::{Lexer, Parser};
//!
//! let mut parser = Parser::new(Lexer::new("program demo; begin x := 1 + 2; end."));
//! let program = parser.parse_program().unwrap();
//! assert!(parser.errors().is_empty());
//! assert!(program.to_string().contains("Value: (1 + 2)"));
//! ```

pub mod listing;
pub mod parser;
pub mod repl;
