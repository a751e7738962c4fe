// minipas: lexer and parser front end for a Pascal-like teaching language

use std::fs::{self, File};
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser as ClapParser, Subcommand, ValueEnum};
use crossterm::style::Stylize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use minipas::listing::{self, Mode};
use minipas::parser::{Lexer, Parser};
use minipas::repl::{self, ReplMode, ReplOptions};

/// Lexer, parser and AST printer for a small Pascal-like language
#[derive(Debug, ClapParser)]
#[command(name = "minipas", version, about, long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// When to colour diagnostics
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto, global = true)]
    color: ColorChoice,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write the token listing of a source file
    Tokens {
        /// Source file to tokenize
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Listing detail
        #[arg(long, value_enum, default_value_t = Mode::Normal)]
        mode: Mode,
    },

    /// Parse a source file and print its syntax tree
    Parse {
        /// Source file to parse
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start an interactive session
    Repl {
        /// Start in AST mode instead of token mode
        #[arg(long)]
        ast: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn enabled(self) -> bool {
        match self {
            ColorChoice::Auto => io::stdout().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        .with_writer(io::stderr)
        .init();

    let color = cli.color.enabled();

    let clean = match cli.command {
        Command::Tokens {
            input,
            output,
            mode,
        } => tokens(&input, output.as_deref(), mode)?,
        Command::Parse { input, output } => parse(&input, output.as_deref(), color)?,
        Command::Repl { ast } => {
            let mode = if ast { ReplMode::Ast } else { ReplMode::Tokens };
            repl::run(ReplOptions { mode, color })?;
            true
        }
    };

    Ok(if clean {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "warn",
        1 => "minipas=debug",
        _ => "minipas=trace",
    }
}

/// Output file when given, stdout otherwise.
fn open_output(output: Option<&Path>) -> io::Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    })
}

/// Write the token listing; returns whether the lexer stayed quiet.
fn tokens(input: &Path, output: Option<&Path>, mode: Mode) -> io::Result<bool> {
    let source = fs::read_to_string(input)?;
    debug!(input = %input.display(), %mode, "tokenizing");

    let mut lexer = Lexer::new(&source);
    let mut out = open_output(output)?;
    listing::write_listing(&mut lexer, mode, &mut out)?;
    out.flush()?;

    Ok(lexer.errors().is_empty())
}

/// Print the tree followed by lexer then parser diagnostics; returns whether
/// both stayed quiet.
fn parse(input: &Path, output: Option<&Path>, color: bool) -> io::Result<bool> {
    let source = fs::read_to_string(input)?;
    debug!(input = %input.display(), "parsing");

    let mut parser = Parser::new(Lexer::new(&source));
    let program = parser.parse_program();

    let mut out = open_output(output)?;
    if let Some(program) = &program {
        writeln!(out, "{program}")?;
    }
    out.flush()?;

    let parse_messages = parser.errors().messages();
    let messages: Vec<String> = parser
        .into_lexer()
        .errors()
        .messages()
        .into_iter()
        .chain(parse_messages)
        .collect();

    let mut stderr = io::stderr().lock();
    for message in &messages {
        if color {
            writeln!(stderr, "{}", message.as_str().red())?;
        } else {
            writeln!(stderr, "{message}")?;
        }
    }

    Ok(program.is_some() && messages.is_empty())
}
