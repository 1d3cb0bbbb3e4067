//! peglet compiler: grammar-definition text to [`peglet_core::Grammar`].
//!
//! The pipeline:
//! - `parser` - lexer, lossless CST, typed AST
//! - `analyze` - symbol table, nullability, left-recursion detection
//! - `lower` - AST to the compiled grammar model
//! - `diagnostics` - collected, filtered and rendered grammar errors
//! - `compilation` - the staged facade tying the passes together
//!
//! # Grammar syntax (version 1)
//!
//! ```text
//! Grammar    <- Definition+
//! Definition <- (Identifier / '%whitespace') ('<-' / '←') Expression
//! Expression <- Sequence ('/' Sequence)*
//! Sequence   <- Prefix+
//! Prefix     <- ('&' / '!')? Suffix
//! Suffix     <- Primary ('?' / '*' / '+' / '{' n? (',' m?)? '}')*
//! Primary    <- Identifier !('<-' / '←') / '(' Expression ')' / '<' Expression '>'
//!             / Literal / Class / '.'
//! Literal    <- '\'' ... '\'' 'i'? / '"' ... '"' 'i'?
//! Class      <- '[' '^'? (Char '-' Char / Char)* ']' 'i'?
//! Comment    <- '#' (!EndOfLine .)*
//! ```
//!
//! The first non-directive definition is the start rule unless one is named
//! explicitly. `<...>` marks a token capture; `%whitespace` declares the skip
//! expression applied between tokens.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analyze;
pub mod compilation;
pub mod diagnostics;
pub mod lower;
pub mod parser;
pub mod printer;

#[cfg(test)]
mod printer_tests;

pub use compilation::{Compilation, Compiled};
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use printer::AstPrinter;

use peglet_core::Grammar;

/// A pass's output with what it reported. `Err` only when a limit aborted
/// the pass.
pub type PassResult<T> = std::result::Result<(T, Diagnostics), Error>;

/// Errors that can occur while compiling a grammar.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The grammar has more tokens than the token limit allows.
    #[error("execution limit exceeded")]
    ExecFuelExhausted,

    /// Expressions nest deeper than the depth limit.
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    #[error("grammar compilation failed with {} errors", .0.error_count())]
    Grammar(Diagnostics),

    /// The only errors are left-recursive rule cycles.
    #[error("grammar is left-recursive ({} cycles)", .0.error_count())]
    LeftRecursion(Diagnostics),
}

impl Error {
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Error::Grammar(d) | Error::LeftRecursion(d) => Some(d),
            Error::ExecFuelExhausted | Error::RecursionLimitExceeded => None,
        }
    }

    /// Byte offset in the grammar text of the first error.
    pub fn position(&self) -> Option<usize> {
        let first = self.diagnostics()?.first_error()?;
        Some(u32::from(first.range().start()) as usize)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Compiles grammar text with default settings.
pub fn compile(text: &str) -> Result<Grammar> {
    Compilation::new(text).exec()?.into_grammar()
}
