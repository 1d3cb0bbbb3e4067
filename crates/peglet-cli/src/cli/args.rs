//! Argument builders shared between subcommands.
//!
//! Commands that don't use an argument still register it hidden, so the
//! same flags are accepted everywhere.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Boolean `--name` switch stored under `id`.
fn flag(id: &'static str, long: &'static str, help: &'static str) -> Arg {
    Arg::new(id).long(long).action(ArgAction::SetTrue).help(help)
}

/// `--name N` limit with a default.
fn limit(id: &'static str, default: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .long(id)
        .value_name("N")
        .default_value(default)
        .value_parser(value_parser!(u32))
        .help(help)
}

fn path(id: &'static str, value_name: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .value_name(value_name)
        .value_parser(value_parser!(PathBuf))
        .help(help)
}

fn text(id: &'static str, short: char, long: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .short(short)
        .long(long)
        .value_name("TEXT")
        .help(help)
}

pub fn grammar_path_arg() -> Arg {
    path("grammar_path", "GRAMMAR", "Grammar file, or \"-\" for stdin")
}

pub fn grammar_text_arg() -> Arg {
    text("grammar_text", 'g', "grammar", "Grammar given inline")
}

pub fn input_path_arg() -> Arg {
    path("input_path", "INPUT", "File to parse, or \"-\" for stdin")
}

pub fn input_text_arg() -> Arg {
    text("input_text", 'i', "input", "Input given inline")
}

pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .value_parser(["auto", "always", "never"])
        .default_value("auto")
        .help("When to use ANSI colors")
}

pub fn raw_arg() -> Arg {
    flag("raw", "raw", "Print the concrete syntax tree instead of the AST")
}

pub fn spans_arg() -> Arg {
    flag("spans", "spans", "Annotate nodes with byte ranges")
}

pub fn strict_arg() -> Arg {
    flag("strict", "strict", "Fail on warnings")
}

pub fn json_arg() -> Arg {
    flag("json", "json", "Print the compiled grammar as JSON")
}

pub fn compact_arg() -> Arg {
    flag(
        "compact",
        "compact",
        "Single-line JSON (pretty by default when stdout is a terminal)",
    )
}

pub fn no_packrat_arg() -> Arg {
    flag("no_packrat", "no-packrat", "Parse without the memo table")
}

pub fn partial_arg() -> Arg {
    flag("partial", "partial", "Accept a match that stops before the end of input")
}

pub fn start_arg() -> Arg {
    Arg::new("start")
        .long("start")
        .value_name("RULE")
        .help("Start rule (defaults to the first definition)")
}

/// `-v` adds matched text and semantic actions, `-vv` adds backtracking.
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("More trace detail (repeat for more)")
}

pub fn fuel_arg() -> Arg {
    limit("fuel", "1000000", "Rule invocations allowed before giving up")
}

pub fn depth_arg() -> Arg {
    limit("depth", "256", "Deepest allowed rule nesting")
}
