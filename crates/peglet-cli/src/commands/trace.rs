//! Trace rule invocations while parsing input.

use std::path::PathBuf;

use peglet_lib::{Colors, ParseOutcome, Parser, PrintTracer, Verbosity};

use super::input::Loaded;
use super::run_common::{self, GrammarInput, ParseOptions, RunInput};

pub struct TraceArgs {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub input_path: Option<PathBuf>,
    pub input_text: Option<String>,
    pub start: Option<String>,
    pub verbosity: Verbosity,
    pub full_match: bool,
    pub packrat: bool,
    pub fuel: u32,
    pub depth: u32,
    pub color: bool,
}

pub fn run(args: TraceArgs) {
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

    let colors = Colors::new(args.color);
    let (lines, result) = trace(&parser, &source, args.verbosity, colors);
    for line in &lines {
        println!("{}", line);
    }

    match result {
        Ok(outcome) => {
            println!("{}---{}", colors.meta, colors.reset);
            println!("{}", summary(&outcome, &source.text));
            if !outcome.is_success() {
                std::process::exit(1);
            }
        }
        Err(msg) => {
            eprintln!("runtime error: {}", msg);
            std::process::exit(2);
        }
    }
}

/// Runs the parse, returning the trace lines even when it errors.
pub fn trace(
    parser: &Parser,
    source: &Loaded,
    verbosity: Verbosity,
    colors: Colors,
) -> (Vec<String>, Result<ParseOutcome, String>) {
    let mut tracer = PrintTracer::new(&source.text, verbosity, colors);
    let result = parser
        .parse_with(&source.text, &mut tracer)
        .map_err(|e| e.to_string());
    (tracer.into_lines(), result)
}

/// One-line result plus parse statistics.
pub fn summary(outcome: &ParseOutcome, input: &str) -> String {
    let stats = outcome.stats();
    let result = match outcome.error() {
        None => format!("matched {} of {} bytes", outcome.consumed(), input.len()),
        Some(error) => {
            let (line, col) = error.line_col(input);
            format!("{} (line {}, column {})", error, line, col)
        }
    };
    format!(
        "{}\nrule calls: {}, memo hits: {}, memo entries: {}",
        result, stats.rule_calls, stats.memo_hits, stats.memo_entries
    )
}
