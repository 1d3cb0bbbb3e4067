//! Generic syntax tree built by binding every rule to a node constructor.
//!
//! Used by `peglet exec` to show what a grammar matches without writing any
//! actions.

use std::sync::Arc;

use peglet_core::Grammar;
use serde::Serialize;

use super::action::{Action, ActionError, Actions};
use super::semantic::SemanticValues;
use super::value::Value;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SyntaxTree {
    pub rule: String,
    pub choice: usize,
    pub start: usize,
    pub end: usize,
    /// Captured token, or the whole text of a token rule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SyntaxTree>,
}

impl SyntaxTree {
    /// Renders the tree as an indented outline, one node per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_into(0, &mut out);
        out
    }

    fn dump_into(&self, indent: usize, out: &mut String) {
        out.push_str(&"  ".repeat(indent));
        out.push_str(&format!("{} [{}..{}]", self.rule, self.start, self.end));
        if let Some(token) = &self.token {
            out.push_str(&format!(" {token:?}"));
        }
        out.push('\n');
        for child in &self.children {
            child.dump_into(indent + 1, out);
        }
    }
}

/// Actions that turn every rule match into a [`SyntaxTree`] node.
pub fn tree_actions(grammar: &Grammar) -> Actions {
    let mut actions = Actions::new(grammar);
    for (id, rule) in grammar.rules() {
        let is_token = rule.is_token();
        let action: Action = Arc::new(move |sv: &SemanticValues<'_>| {
            let token = match sv.token_spans().first() {
                Some(_) => Some(sv.token().to_owned()),
                None if is_token => Some(sv.text().to_owned()),
                None => None,
            };
            let span = sv.span();
            Ok::<_, ActionError>(Value::new(SyntaxTree {
                rule: sv.rule().to_owned(),
                choice: sv.choice(),
                start: span.start,
                end: span.end,
                token,
                children: sv.collect::<SyntaxTree>(),
            }))
        });
        actions.bind(id, action);
    }
    actions
}
