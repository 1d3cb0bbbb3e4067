//! Lowering: typed AST to the compiled [`Grammar`].
//!
//! Rule references become [`RuleId`]s in definition order, escapes are
//! decoded, classes and repetition bounds are validated. Malformed parts
//! lower to an empty sequence after their diagnostic has been reported.

pub mod escape;

#[cfg(test)]
mod escape_tests;
#[cfg(test)]
mod lower_tests;

use peglet_core::{Expr, Grammar, Rule, RuleId};
use rowan::{TextRange, TextSize};

use crate::Diagnostics;
use crate::analyze::SymbolTable;
use crate::diagnostics::DiagnosticKind;
use crate::parser::{self as ast, SuffixOp, SyntaxToken};

use escape::{parse_class, unescape_literal};

/// Lowers all rules; `None` when there is no start rule to run.
pub fn lower(symbols: &SymbolTable, start: Option<&str>, diag: &mut Diagnostics) -> Option<Grammar> {
    let start = resolve_start(symbols, start, diag)?;
    let mut lowerer = Lowerer { symbols, diag };

    let rules = symbols
        .iter()
        .map(|(name, def)| {
            let alternatives = match def.body() {
                Some(ast::Expr::Choice(choice)) => choice
                    .alternatives()
                    .map(|alt| lowerer.lower_expr(&alt))
                    .collect(),
                Some(body) => vec![lowerer.lower_expr(&body)],
                None => Vec::new(),
            };
            Rule::new(name, alternatives)
        })
        .collect();

    let whitespace = symbols
        .whitespace()
        .and_then(|def| def.body())
        .map(|body| lowerer.lower_expr(&body));

    Some(Grammar::new(rules, start, whitespace))
}

fn resolve_start(symbols: &SymbolTable, start: Option<&str>, diag: &mut Diagnostics) -> Option<RuleId> {
    let empty = TextRange::empty(TextSize::from(0));
    match start {
        Some(name) => {
            let index = symbols.get_index_of(name);
            if index.is_none() {
                diag.report(DiagnosticKind::MissingStartRule, empty)
                    .message(name)
                    .emit();
            }
            index.map(RuleId::new)
        }
        None if symbols.is_empty() => {
            diag.report(DiagnosticKind::MissingStartRule, empty).emit();
            None
        }
        None => Some(RuleId::new(0)),
    }
}

struct Lowerer<'a> {
    symbols: &'a SymbolTable,
    diag: &'a mut Diagnostics,
}

impl Lowerer<'_> {
    fn lower_expr(&mut self, expr: &ast::Expr) -> Expr {
        match expr {
            ast::Expr::Choice(c) => {
                Expr::Choice(c.alternatives().map(|alt| self.lower_expr(&alt)).collect())
            }
            ast::Expr::Seq(s) => Expr::Seq(s.items().map(|item| self.lower_expr(&item)).collect()),
            ast::Expr::Prefix(p) => {
                let inner = Box::new(self.lower_opt(p.inner()));
                if p.is_negative() {
                    Expr::Not(inner)
                } else {
                    Expr::And(inner)
                }
            }
            ast::Expr::Suffix(s) => self.lower_suffix(s),
            ast::Expr::Group(g) => self.lower_opt(g.inner()),
            ast::Expr::Capture(c) => Expr::Capture(Box::new(self.lower_opt(c.inner()))),
            ast::Expr::Ref(r) => r
                .name()
                .and_then(|name| self.symbols.get_index_of(name.text()))
                .map_or_else(empty, |index| Expr::Ref(RuleId::new(index))),
            ast::Expr::Literal(l) => self.lower_literal(l),
            ast::Expr::Class(c) => self.lower_class(c),
            ast::Expr::Any(_) => Expr::Any,
        }
    }

    fn lower_opt(&mut self, expr: Option<ast::Expr>) -> Expr {
        expr.map_or_else(empty, |e| self.lower_expr(&e))
    }

    fn lower_suffix(&mut self, suffix: &ast::Suffix) -> Expr {
        let inner = self.lower_opt(suffix.inner());
        let (min, max) = match suffix.op() {
            Some(SuffixOp::Star) => (0, None),
            Some(SuffixOp::Plus) => (1, None),
            Some(SuffixOp::Question) => (0, Some(1)),
            Some(SuffixOp::Bounds { min, comma, max }) => {
                match self.lower_bounds(suffix, min, comma, max) {
                    Some(bounds) => bounds,
                    None => return empty(),
                }
            }
            None => return inner,
        };
        Expr::repeat(inner, min, max)
    }

    fn lower_bounds(
        &mut self,
        suffix: &ast::Suffix,
        min: Option<SyntaxToken>,
        comma: bool,
        max: Option<SyntaxToken>,
    ) -> Option<(u32, Option<u32>)> {
        let range = suffix.op_range();
        if min.is_none() && max.is_none() && !comma {
            self.diag
                .report(DiagnosticKind::InvalidRepetitionBounds, range)
                .message("expected at least one bound")
                .emit();
            return None;
        }

        let min = match min {
            Some(token) => self.bound_value(&token)?,
            None => 0,
        };
        let max = match max {
            Some(token) => Some(self.bound_value(&token)?),
            None if comma => None,
            None => Some(min),
        };

        if let Some(max) = max
            && min > max
        {
            self.diag
                .report(DiagnosticKind::InvalidRepetitionBounds, range)
                .message(format!("minimum {min} exceeds maximum {max}"))
                .emit();
            return None;
        }
        Some((min, max))
    }

    fn bound_value(&mut self, token: &SyntaxToken) -> Option<u32> {
        let value = token.text().parse().ok();
        if value.is_none() {
            self.diag
                .report(DiagnosticKind::InvalidRepetitionBounds, token.text_range())
                .message(format!("`{}` is too large", token.text()))
                .emit();
        }
        value
    }

    fn lower_literal(&mut self, literal: &ast::Literal) -> Expr {
        let Some(token) = literal.token().filter(|_| literal.is_terminated()) else {
            return empty();
        };
        let (body, offset, ignore_case) = split_delimited(&token);
        let text = unescape_literal(body, offset, self.diag);
        Expr::Literal { text, ignore_case }
    }

    fn lower_class(&mut self, class: &ast::Class) -> Expr {
        let Some(token) = class.token().filter(|_| class.is_terminated()) else {
            return empty();
        };
        let (body, offset, ignore_case) = split_delimited(&token);
        Expr::Class(parse_class(body, offset, ignore_case, self.diag))
    }
}

fn empty() -> Expr {
    Expr::Seq(Vec::new())
}

/// Splits `'...'i`, `"..."` or `[...]i` into the body between delimiters,
/// the body's offset, and the case-insensitivity flag.
fn split_delimited(token: &SyntaxToken) -> (&str, TextSize, bool) {
    let text = token.text();
    let (text, ignore_case) = match text.strip_suffix('i') {
        Some(rest) if rest.ends_with(['\'', '"', ']']) && rest.len() >= 2 => (rest, true),
        _ => (text, false),
    };
    let body = &text[1..text.len() - 1];
    (body, token.text_range().start() + TextSize::from(1), ignore_case)
}
