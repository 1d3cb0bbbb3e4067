//! Nullability: which rules and expressions can succeed without consuming input.
//!
//! Computed as a least fixpoint over the symbol table. Predicates never
//! consume; literals are nullable only when empty.

use indexmap::IndexMap;

use super::symbol_table::SymbolTable;
use crate::Diagnostics;
use crate::diagnostics::DiagnosticKind;
use crate::parser::{Expr, Literal, Suffix, SuffixOp};

#[derive(Clone, Debug, Default)]
pub struct Nullability {
    rules: IndexMap<String, bool>,
}

impl Nullability {
    pub fn is_rule_nullable(&self, name: &str) -> bool {
        self.rules.get(name).copied().unwrap_or(false)
    }

    pub fn is_nullable(&self, expr: &Expr) -> bool {
        match expr {
            Expr::Choice(c) => c.alternatives().any(|alt| self.is_nullable(&alt)),
            Expr::Seq(s) => s.items().all(|item| self.is_nullable(&item)),
            Expr::Prefix(_) => true,
            Expr::Suffix(s) => self.is_suffix_nullable(s),
            Expr::Group(g) => g.inner().is_none_or(|inner| self.is_nullable(&inner)),
            Expr::Capture(c) => c.inner().is_none_or(|inner| self.is_nullable(&inner)),
            Expr::Ref(r) => r.name().is_some_and(|n| self.is_rule_nullable(n.text())),
            Expr::Literal(l) => is_empty_literal(l),
            Expr::Class(_) | Expr::Any(_) => false,
        }
    }

    fn is_suffix_nullable(&self, suffix: &Suffix) -> bool {
        let inner_nullable = || suffix.inner().is_none_or(|inner| self.is_nullable(&inner));
        match suffix.op() {
            Some(SuffixOp::Star | SuffixOp::Question) | None => true,
            Some(SuffixOp::Plus) => inner_nullable(),
            Some(SuffixOp::Bounds { min, .. }) => {
                let min = min.and_then(|t| t.text().parse::<u32>().ok()).unwrap_or(0);
                min == 0 || inner_nullable()
            }
        }
    }
}

/// Computes rule nullability and warns about unbounded repetitions of
/// nullable expressions.
pub fn analyze_nullable(symbols: &SymbolTable, diag: &mut Diagnostics) -> Nullability {
    let mut result = Nullability {
        rules: symbols.names().map(|name| (name.to_owned(), false)).collect(),
    };

    loop {
        let mut changed = false;
        for (name, def) in symbols.iter() {
            if result.is_rule_nullable(name) {
                continue;
            }
            if def.body().is_some_and(|body| result.is_nullable(&body)) {
                result.rules.insert(name.to_owned(), true);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    let bodies = symbols
        .iter()
        .filter_map(|(_, def)| def.body())
        .chain(symbols.whitespace().and_then(|def| def.body()));
    for body in bodies {
        for node in body.as_cst().descendants() {
            let Some(suffix) = Suffix::cast(node) else {
                continue;
            };
            if is_unbounded(&suffix)
                && suffix.inner().is_some_and(|inner| result.is_nullable(&inner))
            {
                diag.report(DiagnosticKind::NullableRepetition, suffix.text_range())
                    .emit();
            }
        }
    }

    result
}

fn is_unbounded(suffix: &Suffix) -> bool {
    match suffix.op() {
        Some(SuffixOp::Star | SuffixOp::Plus) => true,
        Some(SuffixOp::Bounds { comma, max, .. }) => comma && max.is_none(),
        Some(SuffixOp::Question) | None => false,
    }
}

fn is_empty_literal(literal: &Literal) -> bool {
    let Some(token) = literal.token().filter(|_| literal.is_terminated()) else {
        return false;
    };
    let text = token.text();
    let text = text.strip_suffix('i').unwrap_or(text);
    text.len() == 2
}
