use std::sync::Arc;

use peglet_core::{Expr, Grammar, Rule, RuleId};

use super::*;

fn two_rules() -> Grammar {
    let rules = vec![
        Rule::new("A", vec![Expr::Ref(RuleId::new(1))]),
        Rule::new("B", vec![Expr::literal("b")]),
    ];
    Grammar::new(rules, RuleId::new(0), None)
}

#[test]
fn bind_and_unbind() {
    let g = two_rules();
    let mut actions = Actions::new(&g);
    let b = g.rule_id("B").unwrap();

    actions.bind(b, Arc::new(|_: &SemanticValues<'_>| Ok(Value::new(1u8))));
    assert!(actions.is_bound(b));
    assert!(!actions.is_bound(g.start()));
    assert_eq!(actions.bound_count(), 1);
    assert_eq!(format!("{actions:?}"), "Actions { rules: 2, bound: 1 }");

    actions.unbind(b);
    assert_eq!(actions.bound_count(), 0);
}

#[test]
fn action_error_messages() {
    assert_eq!(ActionError::msg("bad number").to_string(), "bad number");

    let io = std::io::Error::other("disk on fire");
    assert_eq!(ActionError::other(io).to_string(), "disk on fire");
}

#[test]
fn runtime_error_keeps_action_source() {
    use std::error::Error as _;

    let err = RuntimeError::Action {
        rule: "B".to_owned(),
        source: ActionError::msg("nope"),
    };

    assert_eq!(err.source().map(|e| e.to_string()), Some("nope".to_owned()));
}
