//! Lexer (tokenizer) for minipas source code
//!
//! The lexer is pull-based: every call to [`Lexer::next_token`] returns exactly
//! one [`Token`]. Malformed input never stops scanning. The offending text
//! comes back as a [`TokenKind::Illegal`] token and a line-numbered
//! [`LexError`] is appended to the lexer's own diagnostics.
//!
//! Identifiers and keywords are case-insensitive and are lowercased as they
//! are scanned. `// ...` and `(* ... *)` comments are skipped together with
//! whitespace.

use tracing::trace;

use super::diagnostics::{Diagnostics, LexError};
use super::token::{lookup_ident, Token, TokenKind};

/// Lexer for minipas source code
pub struct Lexer {
    input: Vec<char>,
    /// Index of `ch`.
    position: usize,
    /// Index of the next character to read.
    read_position: usize,
    /// Current character, `'\0'` once the input is exhausted.
    ch: char,
    line: usize,
    identifier_count: usize,
    literal_count: usize,
    errors: Diagnostics<LexError>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        let mut lexer = Self {
            input: input.chars().collect(),
            position: 0,
            read_position: 0,
            ch: '\0',
            line: 1,
            identifier_count: 0,
            literal_count: 0,
            errors: Diagnostics::new(),
        };
        lexer.read_char();
        lexer
    }

    /// Current 1-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Number of identifier tokens produced so far.
    pub fn identifier_count(&self) -> usize {
        self.identifier_count
    }

    /// Number of int, float, string and char literals produced so far.
    pub fn literal_count(&self) -> usize {
        self.literal_count
    }

    pub fn errors(&self) -> &Diagnostics<LexError> {
        &self.errors
    }

    /// Drain the lexer, returning every token up to and including EOF.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.is(TokenKind::Eof);
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    /// Produce the next token. Once the input is exhausted every call returns EOF.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        if self.is_at_end() {
            return Token::new(TokenKind::Eof, "");
        }

        match self.ch {
            '+' => self.single(TokenKind::Plus),
            '-' => self.single(TokenKind::Minus),
            '*' => self.single(TokenKind::Asterisk),
            '/' => self.single(TokenKind::Slash),
            '=' => self.single(TokenKind::Eq),
            ',' => self.single(TokenKind::Comma),
            ';' => self.single(TokenKind::Semicolon),
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),

            '.' if self.peek_char().is_ascii_digit() => self.number_literal(),
            '.' => self.single(TokenKind::Dot),

            ':' => self.compoundable(&[('=', TokenKind::Assign)], TokenKind::Colon),
            '<' => self.compoundable(
                &[('>', TokenKind::NotEq), ('=', TokenKind::LtEq)],
                TokenKind::Lt,
            ),
            '>' => self.compoundable(&[('=', TokenKind::GtEq)], TokenKind::Gt),

            '"' => self.string_literal(),
            '\'' => self.char_literal(),

            c if c.is_ascii_alphabetic() => self.identifier_or_keyword(),
            c if c.is_ascii_digit() => self.number_literal(),

            _ => self.illegal_character(),
        }
    }

    /// Emit a one-character token and step past it.
    fn single(&mut self, kind: TokenKind) -> Token {
        let token = Token::new(kind, self.ch.to_string());
        self.read_char();
        token
    }

    /// Longest match over a one-character lookahead. Candidates are tried in
    /// order; the single-character kind is the fallback.
    fn compoundable(&mut self, candidates: &[(char, TokenKind)], single: TokenKind) -> Token {
        let first = self.ch;
        let next = self.peek_char();

        for &(second, kind) in candidates {
            if next == second {
                self.read_char();
                self.read_char();
                return Token::new(kind, format!("{first}{second}"));
            }
        }

        self.single(single)
    }

    /// Parse string literal: `"..."`, no escapes
    fn string_literal(&mut self) -> Token {
        let start = self.position;

        loop {
            self.read_char();
            if self.ch == '"' || self.is_at_end() {
                break;
            }
        }

        if self.is_at_end() {
            self.report(LexError::UnexpectedEof { line: self.line });
            return Token::new(TokenKind::Illegal, self.slice(start, self.position));
        }

        let literal = self.slice(start + 1, self.position);
        self.read_char(); // closing quote
        self.literal_count += 1;
        Token::new(TokenKind::StrLit, literal)
    }

    /// Parse character literal: exactly one character between single quotes
    fn char_literal(&mut self) -> Token {
        let start = self.position;

        self.read_char();
        if self.is_at_end() {
            self.report(LexError::UnexpectedEof { line: self.line });
            return Token::new(TokenKind::Illegal, self.slice(start, self.position));
        }

        // `''` holds no character: the token ends at the second quote.
        if self.ch == '\'' {
            self.report(LexError::InvalidCharacter {
                ch: self.ch,
                line: self.line,
            });
            self.read_char();
            return Token::new(TokenKind::Illegal, self.slice(start, self.position));
        }

        self.read_char();
        if self.is_at_end() {
            self.report(LexError::UnexpectedEof { line: self.line });
            return Token::new(TokenKind::Illegal, self.slice(start, self.position));
        }

        if self.ch == '\'' {
            let literal = self.slice(start + 1, self.position);
            self.read_char(); // closing quote
            self.literal_count += 1;
            return Token::new(TokenKind::CharLit, literal);
        }

        self.report(LexError::InvalidCharacter {
            ch: self.ch,
            line: self.line,
        });

        // `'ab'` is one bad token. Anything longer stops before the extra
        // character, so a later quote is never taken as this literal's closer.
        if self.peek_char() == '\'' {
            self.read_char();
            self.read_char();
        }

        Token::new(TokenKind::Illegal, self.slice(start, self.position))
    }

    /// Parse numeric literal. One `.` makes a float; a second one makes the
    /// whole run up to the next terminator illegal.
    fn number_literal(&mut self) -> Token {
        let start = self.position;
        let mut dots = 0;
        let mut illegal = false;

        while self.ch.is_ascii_digit() || self.ch == '.' {
            if self.ch == '.' {
                dots += 1;
                if dots > 1 {
                    illegal = true;
                    break;
                }
            }
            self.read_char();
        }

        if illegal {
            while !self.is_at_end() && !is_terminator(self.ch) {
                self.read_char();
            }
        }

        let literal = self.slice(start, self.position);

        if illegal {
            self.report(LexError::InvalidNumber {
                text: literal.clone(),
                line: self.line,
            });
            return Token::new(TokenKind::Illegal, literal);
        }

        self.literal_count += 1;
        let kind = if dots == 1 {
            TokenKind::FloatLit
        } else {
            TokenKind::IntLit
        };
        Token::new(kind, literal)
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self) -> Token {
        let start = self.position;

        while self.ch.is_ascii_alphanumeric() {
            self.read_char();
        }

        let word = self.slice(start, self.position).to_ascii_lowercase();
        let kind = lookup_ident(&word);
        if kind == TokenKind::Ident {
            self.identifier_count += 1;
        }

        Token::new(kind, word)
    }

    fn illegal_character(&mut self) -> Token {
        let ch = self.ch;
        self.report(LexError::InvalidCharacter {
            ch,
            line: self.line,
        });
        self.read_char();
        Token::new(TokenKind::Illegal, ch.to_string())
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.ch {
                ' ' | '\t' | '\r' | '\n' if !self.is_at_end() => self.read_char(),
                '/' if self.peek_char() == '/' => self.skip_line_comment(),
                '(' if self.peek_char() == '*' => self.skip_block_comment(),
                _ => break,
            }
        }
    }

    /// Skip single-line comment (// ...), leaving the newline in place
    fn skip_line_comment(&mut self) {
        while self.ch != '\n' && !self.is_at_end() {
            self.read_char();
        }
    }

    /// Skip block comment ((* ... *))
    fn skip_block_comment(&mut self) {
        self.read_char(); // skip '('
        self.read_char(); // skip '*'

        while !self.is_at_end() {
            if self.ch == '*' && self.peek_char() == ')' {
                self.read_char();
                self.read_char();
                return;
            }
            self.read_char();
        }

        self.report(LexError::UnexpectedEof { line: self.line });
    }

    /// Advance to the next character. Stepping past a newline bumps the line counter.
    fn read_char(&mut self) {
        if self.ch == '\n' && !self.is_at_end() {
            self.line += 1;
        }

        self.position = self.read_position;
        self.ch = self.input.get(self.position).copied().unwrap_or('\0');
        if self.read_position < self.input.len() {
            self.read_position += 1;
        }
    }

    /// Peek at the character after `ch` without consuming
    fn peek_char(&self) -> char {
        self.input.get(self.read_position).copied().unwrap_or('\0')
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.input[start..end].iter().collect()
    }

    fn report(&mut self, error: LexError) {
        trace!(%error, "lexical error");
        self.errors.push(error);
    }
}

/// Characters that end a malformed number.
fn is_terminator(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\0' | '\n' | '\r' | '\t' | ';' | ':' | ')' | '}' | ']' | ','
    )
}
