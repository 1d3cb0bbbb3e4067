use indoc::indoc;

use super::{SymbolTable, resolve_names};
use crate::Diagnostics;
use crate::parser::parse;

fn resolve(src: &str) -> (SymbolTable, Diagnostics) {
    let (parse, mut diag) = parse(src).expect("parse");
    let symbols = resolve_names(&parse.root(), &mut diag);
    (symbols, diag)
}

#[test]
fn collects_rules_in_source_order() {
    let (symbols, diag) = resolve(indoc! {"
        Sum <- Num '+' Num
        Num <- [0-9]+
        %whitespace <- ' '*
    "});

    assert!(diag.is_empty());
    assert_eq!(symbols.names().collect::<Vec<_>>(), ["Sum", "Num"]);
    assert!(symbols.whitespace().is_some());
    assert_eq!(symbols.get_index_of("Num"), Some(1));
}

#[test]
fn duplicate_definition() {
    let (symbols, diag) = resolve(indoc! {"
        A <- 'a'
        A <- 'b'
    "});

    assert_eq!(symbols.len(), 1);
    insta::assert_snapshot!(diag.to_string(), @"error at 9..10: `A` is already defined (related: first defined here at 0..1)");
}

#[test]
fn duplicate_whitespace_directive() {
    let (_, diag) = resolve("%whitespace <- ' '\n%whitespace <- '\\t'");

    insta::assert_snapshot!(diag.to_string(), @"error at 19..30: `%whitespace` is already defined (related: first defined here at 0..11)");
}

#[test]
fn undefined_reference() {
    let (_, diag) = resolve("A <- B 'x' / (C)");

    insta::assert_snapshot!(diag.to_string(), @r"
    error at 5..6: `B` is not defined
    error at 14..15: `C` is not defined
    ");
}

#[test]
fn unknown_directive() {
    let (symbols, diag) = resolve("%word <- [a-z]+\nA <- 'a'");

    assert_eq!(symbols.names().collect::<Vec<_>>(), ["A"]);
    assert!(symbols.whitespace().is_none());
    insta::assert_snapshot!(diag.to_string(), @"error at 0..5: unknown directive `%word`");
}
