//! Symbol table: name resolution and reference checking.
//!
//! Two-pass approach:
//! 1. Collect all `Name <- expr` definitions and the `%whitespace` directive
//! 2. Check that every rule reference is defined

use indexmap::IndexMap;

use crate::Diagnostics;
use crate::diagnostics::DiagnosticKind;
use crate::parser::{Def, Expr, Ref, Root};

pub const WHITESPACE_DIRECTIVE: &str = "%whitespace";

/// Registry of named definitions in a grammar, in source order.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    table: IndexMap<String, Def>,
    whitespace: Option<Def>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Def> {
        self.table.get(name)
    }

    pub fn get_index_of(&self, name: &str) -> Option<usize> {
        self.table.get_index_of(name)
    }

    /// Body expression of a rule; `None` for undefined rules and empty bodies.
    pub fn body(&self, name: &str) -> Option<Expr> {
        self.table.get(name)?.body()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Iterate over symbol names in definition order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Def)> {
        self.table.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The `%whitespace` definition, if declared.
    pub fn whitespace(&self) -> Option<&Def> {
        self.whitespace.as_ref()
    }
}

pub fn resolve_names(root: &Root, diag: &mut Diagnostics) -> SymbolTable {
    let mut symbols = SymbolTable::new();

    for def in root.defs() {
        collect_def(&mut symbols, def, diag);
    }

    for def in root.defs() {
        let Some(body) = def.body() else {
            continue;
        };
        for node in body.as_cst().descendants() {
            if let Some(r) = Ref::cast(node) {
                check_ref(&symbols, &r, diag);
            }
        }
    }

    symbols
}

fn collect_def(symbols: &mut SymbolTable, def: Def, diag: &mut Diagnostics) {
    let Some(token) = def.name() else {
        return;
    };
    let name = token.text();

    if def.is_directive() {
        if name != WHITESPACE_DIRECTIVE {
            diag.report(DiagnosticKind::UnknownDirective, token.text_range())
                .message(name)
                .emit();
            return;
        }
        if let Some(first) = symbols.whitespace.as_ref().and_then(Def::name) {
            diag.report(DiagnosticKind::DuplicateDefinition, token.text_range())
                .message(name)
                .related_to("first defined here", first.text_range())
                .emit();
            return;
        }
        symbols.whitespace = Some(def);
        return;
    }

    if let Some(first) = symbols.table.get(name).and_then(Def::name) {
        diag.report(DiagnosticKind::DuplicateDefinition, token.text_range())
            .message(name)
            .related_to("first defined here", first.text_range())
            .emit();
        return;
    }
    symbols.table.insert(name.to_owned(), def);
}

fn check_ref(symbols: &SymbolTable, r: &Ref, diag: &mut Diagnostics) {
    let Some(token) = r.name() else {
        return;
    };
    if symbols.contains(token.text()) {
        return;
    }
    diag.report(DiagnosticKind::UndefinedReference, token.text_range())
        .message(token.text())
        .emit();
}
