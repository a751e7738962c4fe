//! Interactive loop
//!
//! Every line gets a fresh lexer (and parser in AST mode); nothing survives
//! from one line to the next except the process-wide keyword table.

use std::fmt;

use crossterm::style::Stylize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use crate::listing;
use crate::parser::ast::Node;
use crate::parser::lexer::Lexer;
use crate::parser::parse::Parser;
use crate::parser::token::TokenKind;

const PROMPT: &str = ">> ";

const HELP: &str = "\
Commands:
  :tokens        print the tokens of each line
  :ast           parse each line as statements and print the tree
  :help          show this message
  :quit, :q      leave (Ctrl-D works too)";

/// What the REPL does with each input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplMode {
    Tokens,
    Ast,
}

impl fmt::Display for ReplMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplMode::Tokens => f.write_str("tokens"),
            ReplMode::Ast => f.write_str("ast"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ReplOptions {
    pub mode: ReplMode,
    pub color: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Quit,
    Help,
    Switch(ReplMode),
    Unknown(&'a str),
}

/// Lines starting with `:` are REPL commands, everything else is source.
fn parse_command(line: &str) -> Option<Command<'_>> {
    let command = line.strip_prefix(':')?;
    Some(match command {
        "quit" | "q" | "exit" => Command::Quit,
        "help" | "h" => Command::Help,
        "tokens" => Command::Switch(ReplMode::Tokens),
        "ast" => Command::Switch(ReplMode::Ast),
        other => Command::Unknown(other),
    })
}

/// Run one line through the front end and return what the REPL prints for it.
pub fn evaluate(line: &str, mode: ReplMode, color: bool) -> String {
    debug!(%mode, "evaluating line");
    let mut out = String::new();

    let diagnostics = match mode {
        ReplMode::Tokens => list_tokens(line, &mut out),
        ReplMode::Ast => print_statements(line, &mut out),
    };
    for message in diagnostics {
        push_diagnostic(&mut out, &message, color);
    }

    out
}

/// One token per line; returns the lexer diagnostics.
fn list_tokens(line: &str, out: &mut String) -> Vec<String> {
    let mut lexer = Lexer::new(line);

    loop {
        let token = lexer.next_token();
        if token.is(TokenKind::Eof) {
            break;
        }
        if token.is(TokenKind::Illegal) {
            out.push_str(&format!("ILLEGAL [{}]\n", token.literal));
            continue;
        }

        let slot = listing::slot(&lexer, token.kind);
        out.push_str(&format!(
            "{} ({} {})[{}]\n",
            listing::encode(&token, slot),
            token.kind.code(),
            slot,
            token.literal
        ));
    }

    lexer.errors().messages()
}

/// Rendered statements; returns lexer then parser diagnostics.
fn print_statements(line: &str, out: &mut String) -> Vec<String> {
    let mut parser = Parser::new(Lexer::new(line));

    for statement in parser.parse_statements() {
        out.push_str(&statement.render(0));
        out.push('\n');
    }

    let mut diagnostics = parser.lexer().errors().messages();
    diagnostics.extend(parser.errors().messages());
    diagnostics
}

fn push_diagnostic(out: &mut String, message: &str, color: bool) {
    if color {
        out.push_str(&format!("{}\n", message.red()));
    } else {
        out.push_str(message);
        out.push('\n');
    }
}

/// Read lines until `:quit` or end of input.
pub fn run(options: ReplOptions) -> rustyline::Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut mode = options.mode;

    println!("minipas REPL ({mode} mode), :help for commands");

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                match parse_command(line) {
                    Some(Command::Quit) => break,
                    Some(Command::Help) => println!("{HELP}"),
                    Some(Command::Switch(next)) => {
                        mode = next;
                        println!("{mode} mode");
                    }
                    Some(Command::Unknown(name)) => {
                        eprintln!("unknown command `:{name}`, try :help");
                    }
                    None => print!("{}", evaluate(line, mode, options.color)),
                }
            }
            // Ctrl-C drops the current line
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command(":q"), Some(Command::Quit));
        assert_eq!(parse_command(":exit"), Some(Command::Quit));
        assert_eq!(parse_command(":ast"), Some(Command::Switch(ReplMode::Ast)));
        assert_eq!(parse_command(":nope"), Some(Command::Unknown("nope")));
        assert_eq!(parse_command("x := 1;"), None);
    }

    #[test]
    fn test_evaluate_tokens() {
        let out = evaluate("x := 'a' @", ReplMode::Tokens, false);
        assert_eq!(
            out,
            "0x020x01 (2 1)[x]\n\
             0x0e0x00 (14 0)[:=]\n\
             0x030x01 (3 1)[a]\n\
             ILLEGAL [@]\n\
             invalid character: '@', line: 1\n"
        );
    }

    #[test]
    fn test_evaluate_ast() {
        let out = evaluate("x := 1 + 2;", ReplMode::Ast, false);
        assert_eq!(
            out,
            "Expression: {\n\tAssignment: {\n\t\tIdentifier: x\n\t\tValue: (1 + 2)\n\t}\n}\n"
        );
    }

    #[test]
    fn test_evaluate_ast_reports_errors() {
        let out = evaluate("x := y := 1;", ReplMode::Ast, false);
        assert_eq!(
            out,
            "Line 1: multiple assignment operators in a single expression\n"
        );
    }

    #[test]
    fn test_fresh_state_per_line() {
        let first = evaluate("a b", ReplMode::Tokens, false);
        let second = evaluate("c", ReplMode::Tokens, false);
        assert!(first.ends_with("0x020x02 (2 2)[b]\n"));
        assert_eq!(second, "0x020x01 (2 1)[c]\n");
    }
}
