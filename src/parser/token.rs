//! Token definitions and the reserved-word table.
//!
//! A [`Token`] pairs a [`TokenKind`] with the literal text it was scanned from.
//! Literal text is the exact source slice for identifiers and numbers, the
//! decoded payload (without quotes) for strings and characters, and the
//! matched symbol for punctuation and operators.

use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::LazyLock;

/// All token kinds produced by the lexer.
///
/// The discriminant doubles as the numeric code printed by token listings, so
/// the declaration order is part of the output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    // Special
    Eof = 0,
    Illegal,

    // Identifiers and literals
    Ident,
    CharLit,
    True,
    False,
    IntLit,
    FloatLit,
    StrLit,

    // Type names
    CharType,
    BooleanType,
    IntegerType,
    RealType,
    StringType,

    // Assignment
    Assign, // :=

    // Arithmetic
    Plus,     // +
    Minus,    // -
    Asterisk, // *
    Slash,    // /
    Mod,      // mod
    Div,      // div

    // Comparison
    Eq,    // =
    NotEq, // <>
    Lt,    // <
    Gt,    // >
    LtEq,  // <=
    GtEq,  // >=

    // Logical
    And,
    Or,
    Not,

    // Delimiters
    Comma,
    Dot,
    Semicolon,
    Colon,

    // Brackets
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // Keywords
    Program,
    Begin,
    End,
    If,
    Then,
    Else,
    Continue,
    Break,
    Return,
    While,
    Do,
    Repeat,
    Until,
    For,
    To,
    Downto,
    Case,
    Of,
    Var,
    Const,
    Type,
    Function,
    Procedure,
    Goto,
    Label,
    Nil,
}

impl TokenKind {
    /// Numeric code used by token listings.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// True for the five built-in type names.
    pub fn is_type_name(self) -> bool {
        matches!(
            self,
            TokenKind::CharType
                | TokenKind::BooleanType
                | TokenKind::IntegerType
                | TokenKind::RealType
                | TokenKind::StringType
        )
    }

    /// True for the literal kinds that draw a slot from the lexer's literal counter.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::IntLit | TokenKind::FloatLit | TokenKind::CharLit | TokenKind::StrLit
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Eof => "EOF",
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Ident => "IDENT",
            TokenKind::CharLit => "CHAR",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::IntLit => "INT",
            TokenKind::FloatLit => "FLOAT",
            TokenKind::StrLit => "STR",
            TokenKind::CharType => "CHAR_TYPE",
            TokenKind::BooleanType => "BOOLEAN",
            TokenKind::IntegerType => "INTEGER",
            TokenKind::RealType => "REAL",
            TokenKind::StringType => "STRING",
            TokenKind::Assign => ":=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Mod => "MOD",
            TokenKind::Div => "DIV",
            TokenKind::Eq => "=",
            TokenKind::NotEq => "<>",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::LtEq => "<=",
            TokenKind::GtEq => ">=",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Program => "PROGRAM",
            TokenKind::Begin => "BEGIN",
            TokenKind::End => "END",
            TokenKind::If => "IF",
            TokenKind::Then => "THEN",
            TokenKind::Else => "ELSE",
            TokenKind::Continue => "CONTINUE",
            TokenKind::Break => "BREAK",
            TokenKind::Return => "RETURN",
            TokenKind::While => "WHILE",
            TokenKind::Do => "DO",
            TokenKind::Repeat => "REPEAT",
            TokenKind::Until => "UNTIL",
            TokenKind::For => "FOR",
            TokenKind::To => "TO",
            TokenKind::Downto => "DOWNTO",
            TokenKind::Case => "CASE",
            TokenKind::Of => "OF",
            TokenKind::Var => "VAR",
            TokenKind::Const => "CONST",
            TokenKind::Type => "TYPE",
            TokenKind::Function => "FUNCTION",
            TokenKind::Procedure => "PROCEDURE",
            TokenKind::Goto => "GOTO",
            TokenKind::Label => "LABEL",
            TokenKind::Nil => "NIL",
        };
        f.write_str(name)
    }
}

/// A single lexical unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>) -> Self {
        Self {
            kind,
            literal: literal.into(),
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.kind, self.literal)
    }
}

static KEYWORDS: LazyLock<FxHashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    let entries = [
        ("true", TokenKind::True),
        ("false", TokenKind::False),
        ("char", TokenKind::CharType),
        ("boolean", TokenKind::BooleanType),
        ("integer", TokenKind::IntegerType),
        ("real", TokenKind::RealType),
        ("string", TokenKind::StringType),
        ("mod", TokenKind::Mod),
        ("div", TokenKind::Div),
        ("and", TokenKind::And),
        ("or", TokenKind::Or),
        ("not", TokenKind::Not),
        ("program", TokenKind::Program),
        ("begin", TokenKind::Begin),
        ("end", TokenKind::End),
        ("if", TokenKind::If),
        ("then", TokenKind::Then),
        ("else", TokenKind::Else),
        ("continue", TokenKind::Continue),
        ("break", TokenKind::Break),
        ("return", TokenKind::Return),
        ("while", TokenKind::While),
        ("do", TokenKind::Do),
        ("repeat", TokenKind::Repeat),
        ("until", TokenKind::Until),
        ("for", TokenKind::For),
        ("to", TokenKind::To),
        ("downto", TokenKind::Downto),
        ("case", TokenKind::Case),
        ("of", TokenKind::Of),
        ("var", TokenKind::Var),
        ("const", TokenKind::Const),
        ("type", TokenKind::Type),
        ("function", TokenKind::Function),
        ("procedure", TokenKind::Procedure),
        ("goto", TokenKind::Goto),
        ("label", TokenKind::Label),
        ("nil", TokenKind::Nil),
    ];
    entries.into_iter().collect()
});

/// Resolve an already-lowercased word to its keyword kind, or [`TokenKind::Ident`].
pub fn lookup_ident(word: &str) -> TokenKind {
    KEYWORDS.get(word).copied().unwrap_or(TokenKind::Ident)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(lookup_ident("begin"), TokenKind::Begin);
        assert_eq!(lookup_ident("integer"), TokenKind::IntegerType);
        assert_eq!(lookup_ident("char"), TokenKind::CharType);
        assert_eq!(lookup_ident("beginx"), TokenKind::Ident);
        assert_eq!(lookup_ident("character"), TokenKind::Ident);
    }

    #[test]
    fn test_codes_follow_declaration_order() {
        assert_eq!(TokenKind::Eof.code(), 0);
        assert_eq!(TokenKind::Illegal.code(), 1);
        assert_eq!(TokenKind::Ident.code(), 2);
        assert_eq!(TokenKind::Nil.code(), TokenKind::Label.code() + 1);
    }

    #[test]
    fn test_type_names() {
        let types = ["char", "boolean", "integer", "real", "string"];
        for word in types {
            assert!(lookup_ident(word).is_type_name(), "{word}");
        }
        assert!(!TokenKind::Ident.is_type_name());
    }
}
