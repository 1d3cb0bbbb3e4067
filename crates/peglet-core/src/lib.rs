//! Core data structures for peglet.
//!
//! The [`Grammar`] is the compiled form of a grammar definition: a flat rule
//! table whose expressions refer to other rules through [`RuleId`] handles.
//! It is produced by `peglet-compiler` and executed by `peglet-vm`.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod colors;
pub mod grammar;

pub use colors::Colors;
pub use grammar::{CharClass, Expr, Grammar, Rule, RuleId};
