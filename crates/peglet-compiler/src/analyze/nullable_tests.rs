use indoc::indoc;

use super::{Nullability, analyze_nullable, resolve_names};
use crate::Diagnostics;
use crate::parser::parse;

fn nullability(src: &str) -> (Nullability, Diagnostics) {
    let (parse, mut diag) = parse(src).expect("parse");
    let symbols = resolve_names(&parse.root(), &mut diag);
    let nullability = analyze_nullable(&symbols, &mut diag);
    (nullability, diag)
}

#[test]
fn nullable_rules() {
    let (n, diag) = nullability(indoc! {"
        A <- B 'x' / ''
        B <- 'b'?
        C <- !'c'
        D <- 'd'+
        E <- D{0,2}
        F <- D{1,}
        G <- [a-z] / .
    "});

    assert!(diag.is_empty());
    assert!(n.is_rule_nullable("A"));
    assert!(n.is_rule_nullable("B"));
    assert!(n.is_rule_nullable("C"));
    assert!(!n.is_rule_nullable("D"));
    assert!(n.is_rule_nullable("E"));
    assert!(!n.is_rule_nullable("F"));
    assert!(!n.is_rule_nullable("G"));
}

#[test]
fn nullability_propagates_through_references() {
    let (n, _) = nullability(indoc! {"
        A <- B C
        B <- C?
        C <- ''i
    "});

    assert!(n.is_rule_nullable("A"));
    assert!(n.is_rule_nullable("B"));
    assert!(n.is_rule_nullable("C"));
    assert!(!n.is_rule_nullable("Missing"));
}

#[test]
fn warns_on_unbounded_nullable_repetition() {
    let (_, diag) = nullability("A <- ('a'?)* 'b'*");

    insta::assert_snapshot!(diag.to_string(), @"warning at 5..12: repeated expression can match empty input");
}

#[test]
fn bounded_nullable_repetition_is_fine() {
    let (_, diag) = nullability("A <- ('a'?){3} ('a'?)?");

    assert!(diag.is_empty());
}
