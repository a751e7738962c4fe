//! Error types and the append-only diagnostics sink.
//!
//! Neither the lexer nor the parser aborts on a bad input. Each records what
//! went wrong in its own [`Diagnostics`] and keeps going (the lexer) or
//! returns `None` for the node it could not build (the parser). The caller
//! decides what to do with the collected messages.

use std::fmt;
use std::slice;
use thiserror::Error;

use super::token::TokenKind;

/// Errors recorded while scanning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("invalid character: '{ch}', line: {line}")]
    InvalidCharacter { ch: char, line: usize },

    #[error("invalid number: '{text}', line: {line}")]
    InvalidNumber { text: String, line: usize },

    /// A string, character literal or block comment ran into the end of input.
    #[error("unexpected end of file, line: {line}")]
    UnexpectedEof { line: usize },
}

impl LexError {
    pub fn line(&self) -> usize {
        match self {
            LexError::InvalidCharacter { line, .. }
            | LexError::InvalidNumber { line, .. }
            | LexError::UnexpectedEof { line } => *line,
        }
    }
}

/// Errors recorded while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The lookahead token did not have the required kind.
    #[error("Line {line}: expected token `{expected}`, got `{got}`")]
    UnexpectedToken {
        line: usize,
        expected: TokenKind,
        got: String,
    },

    #[error("Line {line}: no prefix parse function for `{literal}`")]
    NoPrefixParseFn { line: usize, literal: String },

    /// Structural errors: missing `begin`, invalid type, chained assignment, ...
    #[error("Line {line}: {message}")]
    Custom { line: usize, message: String },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { line, .. }
            | ParseError::NoPrefixParseFn { line, .. }
            | ParseError::Custom { line, .. } => *line,
        }
    }
}

/// Ordered, growable collection of reported errors.
///
/// Each lexer and parser owns exactly one; they are never merged
/// automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostics<E> {
    entries: Vec<E>,
}

impl<E> Default for Diagnostics<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<E> Diagnostics<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: E) {
        self.entries.push(error);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, E> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<E: fmt::Display> Diagnostics<E> {
    /// Formatted messages in the order they were reported.
    pub fn messages(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

impl<'a, E> IntoIterator for &'a Diagnostics<E> {
    type Item = &'a E;
    type IntoIter = slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_error_messages() {
        let err = LexError::InvalidCharacter { ch: '@', line: 3 };
        assert_eq!(err.to_string(), "invalid character: '@', line: 3");

        let err = LexError::InvalidNumber {
            text: "1.2.3".to_string(),
            line: 1,
        };
        assert_eq!(err.to_string(), "invalid number: '1.2.3', line: 1");

        let err = LexError::UnexpectedEof { line: 7 };
        assert_eq!(err.to_string(), "unexpected end of file, line: 7");
        assert_eq!(err.line(), 7);
    }

    #[test]
    fn test_parse_error_messages() {
        let err = ParseError::UnexpectedToken {
            line: 2,
            expected: TokenKind::Semicolon,
            got: "end".to_string(),
        };
        assert_eq!(err.to_string(), "Line 2: expected token `;`, got `end`");

        let err = ParseError::NoPrefixParseFn {
            line: 4,
            literal: ")".to_string(),
        };
        assert_eq!(err.to_string(), "Line 4: no prefix parse function for `)`");

        let err = ParseError::Custom {
            line: 1,
            message: "invalid type".to_string(),
        };
        assert_eq!(err.to_string(), "Line 1: invalid type");
    }

    #[test]
    fn test_sink_keeps_order() {
        let mut sink = Diagnostics::new();
        assert!(sink.is_empty());

        sink.push(LexError::UnexpectedEof { line: 1 });
        sink.push(LexError::InvalidCharacter { ch: '#', line: 2 });

        assert_eq!(sink.len(), 2);
        assert_eq!(
            sink.messages(),
            vec![
                "unexpected end of file, line: 1".to_string(),
                "invalid character: '#', line: 2".to_string(),
            ]
        );
        assert_eq!(sink.iter().map(LexError::line).collect::<Vec<_>>(), vec![1, 2]);

        sink.clear();
        assert!(sink.is_empty());
    }
}
