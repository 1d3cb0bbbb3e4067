//! `ArgMatches` to per-command params, and params to command args.
//!
//! Flags a command ignores are accepted by clap and dropped here.

use std::path::PathBuf;

use clap::ArgMatches;
use peglet_lib::Verbosity;

use super::ColorChoice;
use crate::commands::ast::AstArgs;
use crate::commands::check::CheckArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::exec::ExecArgs;
use crate::commands::trace::TraceArgs;

/// Typed lookups for the ids registered in `args`.
trait Lookup {
    fn path(&self, id: &str) -> Option<PathBuf>;
    fn text(&self, id: &str) -> Option<String>;
    fn color(&self) -> ColorChoice;
    /// Limits carry a clap default; `u32::MAX` is only reachable if one is
    /// registered without it.
    fn limit(&self, id: &str) -> u32;
    /// Grammar and input positionals after applying the `-g` shift.
    fn positionals(&self) -> (Option<PathBuf>, Option<PathBuf>);
}

impl Lookup for ArgMatches {
    fn path(&self, id: &str) -> Option<PathBuf> {
        self.get_one::<PathBuf>(id).cloned()
    }

    fn text(&self, id: &str) -> Option<String> {
        self.get_one::<String>(id).cloned()
    }

    fn color(&self) -> ColorChoice {
        ColorChoice::from_flag(self.get_one::<String>("color").map(String::as_str))
    }

    fn limit(&self, id: &str) -> u32 {
        self.get_one::<u32>(id).copied().unwrap_or(u32::MAX)
    }

    fn positionals(&self) -> (Option<PathBuf>, Option<PathBuf>) {
        shift_positional_to_input(
            self.get_one::<String>("grammar_text").is_some(),
            self.path("grammar_path"),
            self.path("input_path"),
        )
    }
}

pub struct AstParams {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub raw: bool,
    pub spans: bool,
    pub color: ColorChoice,
}

impl AstParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: m.path("grammar_path"),
            grammar_text: m.text("grammar_text"),
            raw: m.get_flag("raw"),
            spans: m.get_flag("spans"),
            color: m.color(),
        }
    }
}

impl From<AstParams> for AstArgs {
    fn from(p: AstParams) -> Self {
        Self {
            grammar_path: p.grammar_path,
            grammar_text: p.grammar_text,
            raw: p.raw,
            spans: p.spans,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub start: Option<String>,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: m.path("grammar_path"),
            grammar_text: m.text("grammar_text"),
            start: m.text("start"),
            strict: m.get_flag("strict"),
            color: m.color(),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            grammar_path: p.grammar_path,
            grammar_text: p.grammar_text,
            start: p.start,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub start: Option<String>,
    pub json: bool,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: m.path("grammar_path"),
            grammar_text: m.text("grammar_text"),
            start: m.text("start"),
            json: m.get_flag("json"),
            color: m.color(),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            grammar_path: p.grammar_path,
            grammar_text: p.grammar_text,
            start: p.start,
            json: p.json,
            color: p.color.should_colorize(),
        }
    }
}

pub struct ExecParams {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub input_path: Option<PathBuf>,
    pub input_text: Option<String>,
    pub start: Option<String>,
    pub compact: bool,
    pub partial: bool,
    pub no_packrat: bool,
    pub fuel: u32,
    pub depth: u32,
    pub color: ColorChoice,
}

impl ExecParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let (grammar_path, input_path) = m.positionals();

        Self {
            grammar_path,
            grammar_text: m.text("grammar_text"),
            input_path,
            input_text: m.text("input_text"),
            start: m.text("start"),
            compact: m.get_flag("compact"),
            partial: m.get_flag("partial"),
            no_packrat: m.get_flag("no_packrat"),
            fuel: m.limit("fuel"),
            depth: m.limit("depth"),
            color: m.color(),
        }
    }
}

impl From<ExecParams> for ExecArgs {
    fn from(p: ExecParams) -> Self {
        Self {
            grammar_path: p.grammar_path,
            grammar_text: p.grammar_text,
            input_path: p.input_path,
            input_text: p.input_text,
            start: p.start,
            compact: p.compact,
            full_match: !p.partial,
            packrat: !p.no_packrat,
            fuel: p.fuel,
            depth: p.depth,
            color: p.color.should_colorize(),
        }
    }
}

pub struct TraceParams {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub input_path: Option<PathBuf>,
    pub input_text: Option<String>,
    pub start: Option<String>,
    pub verbosity: Verbosity,
    pub partial: bool,
    pub no_packrat: bool,
    pub fuel: u32,
    pub depth: u32,
    pub color: ColorChoice,
}

impl TraceParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let (grammar_path, input_path) = m.positionals();

        let verbosity = match m.get_count("verbose") {
            0 => Verbosity::Default,
            1 => Verbosity::Verbose,
            _ => Verbosity::VeryVerbose,
        };

        Self {
            grammar_path,
            grammar_text: m.text("grammar_text"),
            input_path,
            input_text: m.text("input_text"),
            start: m.text("start"),
            verbosity,
            partial: m.get_flag("partial"),
            no_packrat: m.get_flag("no_packrat"),
            fuel: m.limit("fuel"),
            depth: m.limit("depth"),
            color: m.color(),
        }
    }
}

impl From<TraceParams> for TraceArgs {
    fn from(p: TraceParams) -> Self {
        Self {
            grammar_path: p.grammar_path,
            grammar_text: p.grammar_text,
            input_path: p.input_path,
            input_text: p.input_text,
            start: p.start,
            verbosity: p.verbosity,
            full_match: !p.partial,
            packrat: !p.no_packrat,
            fuel: p.fuel,
            depth: p.depth,
            color: p.color.should_colorize(),
        }
    }
}

/// With `-g`, a lone positional names the input file:
/// `peglet exec -g 'N <- [0-9]+' input.txt`.
fn shift_positional_to_input(
    has_grammar_text: bool,
    grammar_path: Option<PathBuf>,
    input_path: Option<PathBuf>,
) -> (Option<PathBuf>, Option<PathBuf>) {
    if has_grammar_text && grammar_path.is_some() && input_path.is_none() {
        (None, grammar_path)
    } else {
        (grammar_path, input_path)
    }
}
