//! Grammar productions for the grammar-definition language.
//!
//! This module implements all `parse_*` methods as an extension of `Parser`.

mod atoms;
mod expressions;
mod items;
