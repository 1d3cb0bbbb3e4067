//! Show the syntax tree of a grammar definition.

use std::path::PathBuf;

use peglet_compiler::AstPrinter;
use peglet_lib::Compilation;

use super::input::{Loaded, load_grammar};
use super::run_common::as_lines;

pub struct AstArgs {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub raw: bool,
    pub spans: bool,
    pub color: bool,
}

pub fn run(args: AstArgs) {
    let source = load_grammar(args.grammar_path.as_deref(), args.grammar_text.as_deref())
        .unwrap_or_else(|msg| {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        });

    match render(&source, args.raw, args.spans, args.color) {
        Ok((tree, diagnostics)) => {
            print!("{}", tree);
            eprint!("{}", as_lines(&diagnostics));
        }
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    }
}

/// The tree dump plus rendered diagnostics; a malformed grammar still dumps.
pub fn render(source: &Loaded, raw: bool, spans: bool, color: bool) -> Result<(String, String), String> {
    let compiled = Compilation::new(&source.text)
        .exec()
        .map_err(|e| e.to_string())?;
    let tree = AstPrinter::new(&compiled)
        .raw(raw)
        .with_spans(spans)
        .dump();
    let diagnostics = compiled
        .diagnostics()
        .render_colored(&source.text, color);
    Ok((tree, diagnostics))
}
