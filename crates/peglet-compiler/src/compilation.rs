//! Staged compilation facade: configure, then run all passes at once.

use peglet_core::Grammar;

use crate::analyze::{self, Analysis, SymbolTable};
use crate::diagnostics::DiagnosticKind;
use crate::lower::lower;
use crate::parser::{Parse, Parser, Root, SyntaxNode, lex, parse_with_parser};
use crate::{Diagnostics, Error, Result};

const DEFAULT_PARSE_FUEL: u32 = 1_000_000;
/// Later passes recurse over the tree too; this bound keeps all of them
/// within a 2 MiB stack in unoptimized builds.
const DEFAULT_PARSE_MAX_DEPTH: u32 = 512;

pub struct CompilationConfig {
    pub start: Option<String>,
    pub parse_fuel: Option<u32>,
    pub parse_max_depth: Option<u32>,
}

/// Compilation builder.
///
/// ```ignore
/// let compiled = Compilation::new("Num <- [0-9]+").with_start("Num").exec()?;
/// assert!(compiled.is_valid());
/// ```
pub struct Compilation<'src> {
    source: &'src str,
    config: CompilationConfig,
}

impl<'src> Compilation<'src> {
    pub fn new(source: &'src str) -> Self {
        let config = CompilationConfig {
            start: None,
            parse_fuel: Some(DEFAULT_PARSE_FUEL),
            parse_max_depth: Some(DEFAULT_PARSE_MAX_DEPTH),
        };
        Self { source, config }
    }

    /// Rule to start parsing from, instead of the first definition.
    pub fn with_start(mut self, name: impl Into<String>) -> Self {
        self.config.start = Some(name.into());
        self
    }

    /// `None` disables the limit.
    pub fn with_exec_fuel(mut self, fuel: Option<u32>) -> Self {
        self.config.parse_fuel = fuel;
        self
    }

    pub fn with_recursion_limit(mut self, limit: Option<u32>) -> Self {
        self.config.parse_max_depth = limit;
        self
    }

    /// Runs parsing, analysis and lowering.
    ///
    /// Only fuel exhaustion is an `Err` here; grammar errors are collected in
    /// [`Compiled::diagnostics`].
    pub fn exec(self) -> Result<Compiled<'src>> {
        let parser = Parser::new(self.source, lex(self.source))
            .with_token_limit(self.config.parse_fuel)
            .with_depth_limit(self.config.parse_max_depth);
        let (parse, mut diag) = parse_with_parser(parser)?;

        let Analysis { symbols, .. } = analyze::analyze(&parse.root(), &mut diag);
        let grammar = lower(&symbols, self.config.start.as_deref(), &mut diag)
            .filter(|_| !diag.has_errors());

        Ok(Compiled {
            source: self.source,
            parse,
            symbols,
            diag,
            grammar,
        })
    }
}

/// Result of running every compilation pass.
#[derive(Debug)]
pub struct Compiled<'src> {
    source: &'src str,
    parse: Parse,
    symbols: SymbolTable,
    diag: Diagnostics,
    grammar: Option<Grammar>,
}

impl<'src> Compiled<'src> {
    pub fn is_valid(&self) -> bool {
        !self.diag.has_errors()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diag
    }

    /// The compiled grammar; `None` when any error was reported.
    pub fn grammar(&self) -> Option<&Grammar> {
        self.grammar.as_ref()
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn root(&self) -> Root {
        self.parse.root()
    }

    pub fn syntax(&self) -> SyntaxNode {
        self.parse.syntax()
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn parse_fuel_consumed(&self) -> u32 {
        self.parse.exec_fuel_consumed()
    }

    /// Extracts the grammar, or classifies the failure.
    pub fn into_grammar(self) -> Result<Grammar> {
        if let Some(grammar) = self.grammar {
            return Ok(grammar);
        }
        let only_left_recursion = self
            .diag
            .iter()
            .filter(|d| d.is_error())
            .all(|d| d.kind() == DiagnosticKind::LeftRecursion);
        if only_left_recursion && self.diag.has_errors() {
            return Err(Error::LeftRecursion(self.diag));
        }
        Err(Error::Grammar(self.diag))
    }
}
