//! Left-recursion detection.
//!
//! A rule is left-recursive when it can reach itself again without consuming
//! input. Left edges are the references evaluated at the rule's starting
//! position: every alternative of a choice, sequence items up to and including
//! the first non-nullable one, and the operands of predicates and repetitions.

use indexmap::{IndexMap, IndexSet};
use rowan::TextRange;

use super::nullable::Nullability;
use super::symbol_table::SymbolTable;
use crate::Diagnostics;
use crate::diagnostics::DiagnosticKind;
use crate::parser::Expr;

type LeftEdges<'a> = IndexMap<&'a str, Vec<(String, TextRange)>>;

pub fn validate_left_recursion(
    symbols: &SymbolTable,
    nullability: &Nullability,
    diag: &mut Diagnostics,
) {
    let mut edges: LeftEdges<'_> = IndexMap::new();
    for (name, def) in symbols.iter() {
        let mut refs = Vec::new();
        if let Some(body) = def.body() {
            collect_left_refs(&body, nullability, &mut refs);
        }
        refs.retain(|(target, _)| symbols.contains(target));
        edges.insert(name, refs);
    }

    // Each reported cycle is removed from the graph so that disjoint cycles
    // are reported once each.
    while let Some(chain) = CycleFinder::find(&edges) {
        emit_left_recursion(&chain, diag);
        for (_, target) in &chain {
            edges.shift_remove(target.as_str());
        }
        for refs in edges.values_mut() {
            refs.retain(|(target, _)| chain.iter().all(|(_, t)| t != target));
        }
    }
}

fn collect_left_refs(expr: &Expr, nullability: &Nullability, out: &mut Vec<(String, TextRange)>) {
    match expr {
        Expr::Ref(r) => {
            if let Some(name) = r.name() {
                out.push((name.text().to_owned(), name.text_range()));
            }
        }
        Expr::Choice(c) => {
            for alt in c.alternatives() {
                collect_left_refs(&alt, nullability, out);
            }
        }
        Expr::Seq(s) => {
            for item in s.items() {
                collect_left_refs(&item, nullability, out);
                if !nullability.is_nullable(&item) {
                    break;
                }
            }
        }
        Expr::Prefix(_) | Expr::Suffix(_) | Expr::Group(_) | Expr::Capture(_) => {
            for child in expr.children() {
                collect_left_refs(&child, nullability, out);
            }
        }
        Expr::Literal(_) | Expr::Class(_) | Expr::Any(_) => {}
    }
}

/// Depth-first search for a cycle, returning its edges as
/// `(reference range, target rule)` pairs in traversal order.
struct CycleFinder<'e, 'a> {
    edges: &'e LeftEdges<'a>,
    visited: IndexSet<&'a str>,
    on_path: IndexSet<&'a str>,
    path: Vec<(TextRange, String)>,
}

impl<'e, 'a> CycleFinder<'e, 'a> {
    fn find(edges: &'e LeftEdges<'a>) -> Option<Vec<(TextRange, String)>> {
        let mut finder = Self {
            edges,
            visited: IndexSet::new(),
            on_path: IndexSet::new(),
            path: Vec::new(),
        };
        edges.keys().find_map(|&start| finder.visit(start))
    }

    fn visit(&mut self, node: &'a str) -> Option<Vec<(TextRange, String)>> {
        if !self.visited.insert(node) {
            return None;
        }
        self.on_path.insert(node);

        let edges = self.edges;
        for (target, range) in edges.get(node).into_iter().flatten() {
            self.path.push((*range, target.clone()));
            if let Some(index) = self.on_path.get_index_of(target.as_str()) {
                return Some(self.path.split_off(index));
            }
            if let Some((&next, _)) = edges.get_key_value(target.as_str())
                && let Some(cycle) = self.visit(next)
            {
                return Some(cycle);
            }
            self.path.pop();
        }

        self.on_path.pop();
        None
    }
}

fn emit_left_recursion(chain: &[(TextRange, String)], diag: &mut Diagnostics) {
    let Some(((range, _), (_, name))) = chain.first().zip(chain.last()) else {
        return;
    };

    let mut builder = diag
        .report(DiagnosticKind::LeftRecursion, *range)
        .message(name);

    if chain.len() == 1 {
        builder = builder.related_to(format!("{name} references itself"), *range);
    } else {
        for (i, (range, target)) in chain.iter().enumerate() {
            let msg = if i == chain.len() - 1 {
                format!("references {target} (completing cycle)")
            } else {
                format!("references {target}")
            };
            builder = builder.related_to(msg, *range);
        }
    }

    builder.emit();
}
