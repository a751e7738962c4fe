//! Token listings for the batch `tokens` command
//!
//! A listing drains a [`Lexer`] and prints every token as its numeric kind
//! code followed by a slot number: the running identifier count for
//! identifiers, the running literal count for literals, and zero otherwise.
//!
//! ```text
//! NORMAL MODE
//!
//! Line 0001: 0x280x00 0x020x01 0x200x00
//! ```

use std::fmt;
use std::io::{self, Write};

use clap::ValueEnum;

use crate::parser::lexer::Lexer;
use crate::parser::token::{Token, TokenKind};

/// How much detail a listing carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    /// Line groups, codes, and the decoded `(code slot)[literal]` of every token
    Debug,
    /// Line groups and codes
    #[default]
    Normal,
    /// Codes only, no line groups or error trailer
    Simple,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Debug => f.write_str("DEBUG"),
            Mode::Normal => f.write_str("NORMAL"),
            Mode::Simple => f.write_str("SIMPLE"),
        }
    }
}

/// Slot number of a token that the lexer has just produced.
pub fn slot(lexer: &Lexer, kind: TokenKind) -> usize {
    if kind == TokenKind::Ident {
        lexer.identifier_count()
    } else if kind.is_literal() {
        lexer.literal_count()
    } else {
        0
    }
}

/// `0x020x01` style code for one token.
pub fn encode(token: &Token, slot: usize) -> String {
    format!("{:#04x}{:#04x}", token.kind.code(), slot)
}

/// Drain `lexer` and write the listing for `mode` to `out`.
pub fn write_listing<W: Write>(lexer: &mut Lexer, mode: Mode, out: &mut W) -> io::Result<()> {
    writeln!(out, "{mode} MODE")?;

    let grouped = mode != Mode::Simple;
    let mut current_line = None;

    loop {
        let token = lexer.next_token();
        if token.is(TokenKind::Eof) {
            break;
        }

        if grouped {
            let line = lexer.line();
            if current_line != Some(line) {
                write!(out, "\nLine {line:04}: ")?;
                current_line = Some(line);
            }

            if token.is(TokenKind::Illegal) {
                write!(out, "ILLEGAL [{}] ", token.literal)?;
                continue;
            }
        }

        let slot_number = slot(lexer, token.kind);
        write!(out, "{} ", encode(&token, slot_number))?;

        if mode == Mode::Debug {
            write!(out, "({} {})[{}] ", token.kind.code(), slot_number, token.literal)?;
        }
    }
    writeln!(out)?;

    if grouped && !lexer.errors().is_empty() {
        write!(out, "\nErrors:\n")?;
        for (i, error) in lexer.errors().iter().enumerate() {
            writeln!(out, "Error {:04}: {error}", i + 1)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(source: &str, mode: Mode) -> String {
        let mut lexer = Lexer::new(source);
        let mut out = Vec::new();
        write_listing(&mut lexer, mode, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_normal_mode() {
        let out = listing("x := 1;\ny", Mode::Normal);
        assert_eq!(
            out,
            "NORMAL MODE\n\
             \n\
             Line 0001: 0x020x01 0x0e0x00 0x060x01 0x200x00 \n\
             Line 0002: 0x020x02 \n"
        );
    }

    #[test]
    fn test_debug_mode() {
        let out = listing("x", Mode::Debug);
        assert_eq!(out, "DEBUG MODE\n\nLine 0001: 0x020x01 (2 1)[x] \n");
    }

    #[test]
    fn test_simple_mode_has_no_line_groups() {
        let out = listing("a\nb @", Mode::Simple);
        assert_eq!(out, "SIMPLE MODE\n0x020x01 0x020x02 0x010x00 \n");
    }

    #[test]
    fn test_error_trailer() {
        let out = listing("a @", Mode::Normal);
        assert_eq!(
            out,
            "NORMAL MODE\n\
             \n\
             Line 0001: 0x020x01 ILLEGAL [@] \n\
             \n\
             Errors:\n\
             Error 0001: invalid character: '@', line: 1\n\
             \n"
        );
    }

    #[test]
    fn test_slot_counts() {
        let mut lexer = Lexer::new("a 'c' b");
        let kinds: Vec<_> = (0..3)
            .map(|_| {
                let token = lexer.next_token();
                slot(&lexer, token.kind)
            })
            .collect();
        assert_eq!(kinds, vec![1, 1, 2]);
    }
}
