//! Show the compiled grammar.

use std::path::PathBuf;

use peglet_lib::{Colors, Grammar};

use super::run_common::{self, GrammarInput};

pub struct DumpArgs {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub start: Option<String>,
    pub json: bool,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let (grammar, _) = run_common::prepare_grammar(&GrammarInput {
        grammar_path: args.grammar_path.as_deref(),
        grammar_text: args.grammar_text.as_deref(),
        start: args.start.as_deref(),
        color: args.color,
    });

    if args.json {
        match serde_json::to_string_pretty(&grammar) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    print!("{}", render(&grammar, Colors::new(args.color)));
}

/// Grammar text, preceded by the start rule when it isn't the first one.
pub fn render(grammar: &Grammar, colors: Colors) -> String {
    let mut out = String::new();
    let start = grammar.start();
    if start.index() != 0 {
        out.push_str(&format!(
            "{}# start: {}{}\n",
            colors.meta,
            grammar.rule_name(start),
            colors.reset
        ));
    }
    out.push_str(&grammar.to_string());
    out
}
