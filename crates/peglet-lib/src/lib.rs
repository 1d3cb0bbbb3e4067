//! peglet: PEG parsers from grammar text, with semantic actions.
//!
//! # Example
//!
//! ```
//! use peglet_lib::Parser;
//!
//! let mut parser = Parser::new(r#"
//!     Sum    <- Number ('+' Number)*
//!     Number <- <[0-9]+>
//!     %whitespace <- [ ]*
//! "#).expect("valid grammar");
//!
//! parser
//!     .bind("Number", |sv| sv.parse_token::<i64>())
//!     .and_then(|p| p.bind("Sum", |sv| Ok(sv.collect::<i64>().iter().sum::<i64>())))
//!     .expect("rules exist");
//!
//! let outcome = parser.parse(" 1 + 2 + 39 ").expect("no runtime error");
//! assert_eq!(outcome.value_as::<i64>(), Some(&42));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod parser;
mod report;

#[cfg(test)]
mod report_tests;

pub use parser::Parser;
pub use report::render_syntax_error;

pub use peglet_compiler::{Compilation, Compiled, Diagnostics, DiagnosticsPrinter, Severity};
pub use peglet_core::{Colors, Grammar, RuleId};
pub use peglet_vm::{
    ActionError, FuelLimits, NoopTracer, ParseOutcome, ParseStats, PrintTracer, RuntimeError,
    SemanticValues, SyntaxError, SyntaxTree, Tracer, Value, Verbosity,
};

/// Errors surfaced by the parser facade.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The grammar text did not compile.
    #[error(transparent)]
    Compile(#[from] peglet_compiler::Error),

    /// A parse was aborted by an action or a runtime limit.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("unknown rule `{0}`")]
    UnknownRule(String),
}

/// Result type for parser operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Compiles grammar text into an immutable [`Grammar`].
pub fn compile(text: &str) -> Result<Grammar> {
    Ok(peglet_compiler::compile(text)?)
}
