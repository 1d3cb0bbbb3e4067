//! Validate a grammar.

use std::path::PathBuf;

use peglet_lib::Compilation;

use super::input::{Loaded, load_grammar};
use super::run_common::as_lines;

pub struct CheckArgs {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub start: Option<String>,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let source = load_grammar(args.grammar_path.as_deref(), args.grammar_text.as_deref())
        .unwrap_or_else(|msg| {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        });

    if let Err(rendered) = check(&source, args.start.as_deref(), args.strict, args.color) {
        eprint!("{}", as_lines(&rendered));
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}

/// `Err` holds the rendered diagnostics of an invalid grammar.
pub fn check(source: &Loaded, start: Option<&str>, strict: bool, color: bool) -> Result<(), String> {
    let mut compilation = Compilation::new(&source.text);
    if let Some(start) = start {
        compilation = compilation.with_start(start);
    }
    let compiled = compilation.exec().map_err(|e| format!("error: {}\n", e))?;

    let diagnostics = compiled.diagnostics();
    let is_valid = if strict {
        !diagnostics.has_errors() && !diagnostics.has_warnings()
    } else {
        compiled.is_valid()
    };
    if is_valid {
        return Ok(());
    }

    let mut printer = diagnostics
        .filtered_printer()
        .source(&source.text)
        .colored(color);
    if let Some(name) = &source.name {
        printer = printer.path(name);
    }
    Err(printer.render())
}
