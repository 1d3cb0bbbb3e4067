//! Runtime for compiled peglet grammars.
//!
//! The [`VM`] evaluates a [`peglet_core::Grammar`] against an input string by
//! recursive descent with ordered choice and optional packrat memoization,
//! calling bound semantic actions to build a result value.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod engine;

pub use engine::{
    Action, ActionError, Actions, FuelLimits, MemoEntry, MemoKey, MemoTable, NoopTracer,
    ParseOutcome, ParseStats, PrintTracer, RuntimeError, SemanticValues, SyntaxError, SyntaxTree,
    Tracer, VM, VMBuilder, Value, Verbosity, tree_actions,
};
