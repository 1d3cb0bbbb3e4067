//! Parse input and print its syntax tree as JSON.

use std::fmt;
use std::io::IsTerminal;
use std::path::PathBuf;

use peglet_lib::{Parser, SyntaxTree, render_syntax_error};

use super::input::Loaded;
use super::run_common::{self, GrammarInput, ParseOptions, RunInput, as_lines};

pub struct ExecArgs {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub input_path: Option<PathBuf>,
    pub input_text: Option<String>,
    pub start: Option<String>,
    pub compact: bool,
    pub full_match: bool,
    pub packrat: bool,
    pub fuel: u32,
    pub depth: u32,
    pub color: bool,
}

/// Why a run produced no tree.
#[derive(Debug, PartialEq, Eq)]
pub enum ExecFailure {
    /// Input didn't match; holds the rendered report.
    Syntax(String),
    /// Action failure or exhausted limits.
    Runtime(String),
}

impl fmt::Display for ExecFailure {
    /// The text written to stderr, newline-terminated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecFailure::Syntax(report) => f.write_str(&as_lines(report)),
            ExecFailure::Runtime(msg) => writeln!(f, "runtime error: {msg}"),
        }
    }
}

impl ExecFailure {
    pub fn exit_code(&self) -> i32 {
        match self {
            ExecFailure::Syntax(_) => 1,
            ExecFailure::Runtime(_) => 2,
        }
    }
}

pub fn run(args: ExecArgs) {
    let (parser, source) = run_common::prepare_run(
        &RunInput {
            grammar: GrammarInput {
                grammar_path: args.grammar_path.as_deref(),
                grammar_text: args.grammar_text.as_deref(),
                start: args.start.as_deref(),
                color: args.color,
            },
            input_path: args.input_path.as_deref(),
            input_text: args.input_text.as_deref(),
        },
        &ParseOptions {
            full_match: args.full_match,
            packrat: args.packrat,
            fuel: args.fuel,
            depth: args.depth,
        },
    );

    let pretty = !args.compact && std::io::stdout().is_terminal();
    match execute(&parser, &source, pretty, args.color) {
        Ok(json) => println!("{}", json),
        Err(failure) => {
            eprint!("{failure}");
            std::process::exit(failure.exit_code());
        }
    }
}

/// Parses `source` and serializes the resulting tree.
pub fn execute(
    parser: &Parser,
    source: &Loaded,
    pretty: bool,
    color: bool,
) -> Result<String, ExecFailure> {
    let outcome = parser
        .parse(&source.text)
        .map_err(|e| ExecFailure::Runtime(e.to_string()))?;

    if let Some(error) = outcome.error() {
        let report = render_syntax_error(&source.text, error, source.name.as_deref(), color);
        return Err(ExecFailure::Syntax(report));
    }

    let Some(tree) = outcome.value_as::<SyntaxTree>() else {
        return Err(ExecFailure::Runtime(
            "start rule produced no syntax tree".to_string(),
        ));
    };

    let json = if pretty {
        serde_json::to_string_pretty(tree)
    } else {
        serde_json::to_string(tree)
    };
    json.map_err(|e| ExecFailure::Runtime(e.to_string()))
}
