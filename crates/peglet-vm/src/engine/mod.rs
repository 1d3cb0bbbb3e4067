//! Evaluation engine.
//!
//! A parse walks the grammar's expression trees directly. Each rule
//! invocation collects the values produced by its sub-rules in a frame; when
//! the rule matches, its bound action (or default propagation) reduces the
//! frame to a single [`Value`].

mod action;
mod error;
mod frame;
mod memo;
mod outcome;
mod semantic;
mod trace;
mod tree;
mod value;
mod vm;

#[cfg(test)]
mod action_tests;
#[cfg(test)]
mod engine_tests;
#[cfg(test)]
mod memo_tests;
#[cfg(test)]
mod tree_tests;
#[cfg(test)]
mod value_tests;

pub use action::{Action, ActionError, Actions};
pub use error::RuntimeError;
pub use memo::{MemoEntry, MemoKey, MemoTable};
pub use outcome::{ParseOutcome, ParseStats, SyntaxError};
pub use semantic::SemanticValues;
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
pub use tree::{SyntaxTree, tree_actions};
pub use value::Value;
pub use vm::{FuelLimits, VM, VMBuilder};
