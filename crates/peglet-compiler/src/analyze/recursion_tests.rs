use indoc::indoc;

use super::analyze;
use crate::Diagnostics;
use crate::parser::parse;

fn left_recursion(src: &str) -> Diagnostics {
    let (parse, mut diag) = parse(src).expect("parse");
    analyze(&parse.root(), &mut diag);
    diag
}

#[test]
fn direct_left_recursion() {
    let diag = left_recursion("A <- A 'x' / 'y'");

    insta::assert_snapshot!(diag.to_string(), @"error at 5..6: `A` is left-recursive (related: A references itself at 5..6)");
}

#[test]
fn indirect_left_recursion() {
    let diag = left_recursion(indoc! {"
        A <- B 'a'
        B <- C / 'b'
        C <- A
    "});

    insta::assert_snapshot!(diag.to_string(), @"error at 5..6: `A` is left-recursive (related: references B at 5..6) (related: references C at 16..17) (related: references A (completing cycle) at 29..30)");
}

#[test]
fn recursion_behind_nullable_prefix() {
    let diag = left_recursion("A <- 'x'? &'y' A");

    insta::assert_snapshot!(diag.to_string(), @"error at 15..16: `A` is left-recursive (related: A references itself at 15..16)");
}

#[test]
fn recursion_inside_predicate() {
    let diag = left_recursion("A <- !A 'a'");

    insta::assert_snapshot!(diag.to_string(), @"error at 6..7: `A` is left-recursive (related: A references itself at 6..7)");
}

#[test]
fn guarded_recursion_is_accepted() {
    let diag = left_recursion(indoc! {"
        Expr <- Term '+' Expr / Term
        Term <- '(' Expr ')' / [0-9]+
    "});

    assert!(diag.is_empty());
}

#[test]
fn disjoint_cycles_are_reported_once_each() {
    let diag = left_recursion(indoc! {"
        A <- A 'a'
        B <- C
        C <- B
    "});

    assert_eq!(diag.error_count(), 2);
}
