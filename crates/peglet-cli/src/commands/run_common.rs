//! Shared steps for commands that compile a grammar and run it.

use std::path::Path;

use peglet_lib::{Compilation, FuelLimits, Grammar, Parser};

use super::input::{Loaded, load_grammar, load_input};

/// `text` ending in exactly one newline, so the shell prompt starts on its own
/// line. Empty text stays empty.
pub fn as_lines(text: &str) -> String {
    match text.trim_end_matches('\n') {
        "" => String::new(),
        body => format!("{body}\n"),
    }
}

pub struct GrammarInput<'a> {
    pub grammar_path: Option<&'a Path>,
    pub grammar_text: Option<&'a str>,
    pub start: Option<&'a str>,
    pub color: bool,
}

pub struct RunInput<'a> {
    pub grammar: GrammarInput<'a>,
    pub input_path: Option<&'a Path>,
    pub input_text: Option<&'a str>,
}

pub struct ParseOptions {
    pub full_match: bool,
    pub packrat: bool,
    pub fuel: u32,
    pub depth: u32,
}

/// Compiles grammar text, rendering diagnostics into the error on failure.
///
/// Warnings of a valid grammar are returned alongside it, already rendered.
pub fn compile_grammar(
    source: &Loaded,
    start: Option<&str>,
    color: bool,
) -> Result<(Grammar, String), String> {
    let mut compilation = Compilation::new(&source.text);
    if let Some(start) = start {
        compilation = compilation.with_start(start);
    }
    let compiled = compilation.exec().map_err(|e| e.to_string())?;

    let mut printer = compiled
        .diagnostics()
        .filtered_printer()
        .source(&source.text)
        .colored(color);
    if let Some(name) = &source.name {
        printer = printer.path(name);
    }
    let rendered = printer.render();

    match compiled.grammar() {
        Some(grammar) => Ok((grammar.clone(), rendered)),
        None => Err(rendered),
    }
}

pub fn build_parser(grammar: Grammar, options: &ParseOptions) -> Parser {
    let mut parser = Parser::from_grammar(grammar);
    parser
        .bind_syntax_tree()
        .packrat(options.packrat)
        .require_full_match(options.full_match)
        .limits(
            FuelLimits::new()
                .exec_fuel(options.fuel)
                .recursion_limit(options.depth),
        );
    parser
}

/// Loads and compiles the grammar, exiting on any failure.
pub fn prepare_grammar(input: &GrammarInput<'_>) -> (Grammar, Loaded) {
    let source = load_grammar(input.grammar_path, input.grammar_text).unwrap_or_else(|msg| {
        eprintln!("error: {}", msg);
        std::process::exit(1);
    });

    match compile_grammar(&source, input.start, input.color) {
        Ok((grammar, warnings)) => {
            eprint!("{}", as_lines(&warnings));
            (grammar, source)
        }
        Err(rendered) => {
            eprint!("{}", as_lines(&rendered));
            std::process::exit(1);
        }
    }
}

/// Loads the grammar and the input, then builds the parser.
pub fn prepare_run(input: &RunInput<'_>, options: &ParseOptions) -> (Parser, Loaded) {
    let (grammar, _) = prepare_grammar(&input.grammar);
    let source = load_input(input.input_path, input.input_text).unwrap_or_else(|msg| {
        eprintln!("error: {}", msg);
        std::process::exit(1);
    });
    (build_parser(grammar, options), source)
}
