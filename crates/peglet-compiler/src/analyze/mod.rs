//! Semantic analysis over the typed AST.
//!
//! Runs after parsing, before lowering:
//! - `symbol_table` - definitions, duplicates, undefined references, directives
//! - `nullable` - which expressions can match without consuming input
//! - `recursion` - left-recursive rule cycles

pub mod nullable;
pub mod recursion;
pub mod symbol_table;

#[cfg(test)]
mod nullable_tests;
#[cfg(test)]
mod recursion_tests;
#[cfg(test)]
mod symbol_table_tests;

pub use nullable::{Nullability, analyze_nullable};
pub use recursion::validate_left_recursion;
pub use symbol_table::{SymbolTable, WHITESPACE_DIRECTIVE, resolve_names};

use crate::Diagnostics;
use crate::parser::Root;

/// Output of all analysis passes.
#[derive(Clone, Debug)]
pub struct Analysis {
    pub symbols: SymbolTable,
    pub nullability: Nullability,
}

pub fn analyze(root: &Root, diag: &mut Diagnostics) -> Analysis {
    let symbols = resolve_names(root, diag);
    let nullability = analyze_nullable(&symbols, diag);
    validate_left_recursion(&symbols, &nullability, diag);
    Analysis {
        symbols,
        nullability,
    }
}
