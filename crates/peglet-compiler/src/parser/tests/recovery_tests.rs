use indoc::indoc;

use super::{cst, parse_errors};

#[test]
fn equals_instead_of_arrow() {
    insta::assert_snapshot!(parse_errors("A = 'a'"), @"error at 2..3: expected `<-`: found `=` (fix: use `<-`)");
}

#[test]
fn missing_arrow() {
    insta::assert_snapshot!(parse_errors("A 'a'"), @"error at 2..5: expected `<-`: after rule name");
}

#[test]
fn missing_rule_body() {
    let src = indoc! {"
        A <-
        B <- 'b'
    "};

    insta::assert_snapshot!(parse_errors(src), @"error at 5..6: expected an expression: for rule body");
}

#[test]
fn unclosed_group_stops_at_next_definition() {
    let src = indoc! {"
        A <- ('a' 'b'
        B <- 'c'
    "};

    insta::assert_snapshot!(parse_errors(src), @"error at 5..15: unclosed group; expected `)` (related: group started here at 5..6)");
}

#[test]
fn unclosed_capture_at_end_of_input() {
    insta::assert_snapshot!(parse_errors("A <- <'a'"), @"error at 5..9: unclosed token capture; expected `>` (related: capture started here at 5..6)");
}

#[test]
fn stray_token_inside_group() {
    let src = "A <- ('a' } 'b')";

    insta::assert_snapshot!(parse_errors(src), @"error at 10..11: unexpected token: `}`");
    insta::assert_snapshot!(cst(src), @r#"
    Root
      Def
        Id "A"
        Arrow "<-"
        Group
          ParenOpen "("
          Literal
            StrLit "'a'"
          Error
            BraceClose "}"
          Literal
            StrLit "'b'"
          ParenClose ")"
    "#);
}

#[test]
fn unterminated_literal() {
    let src = indoc! {"
        A <- 'abc
        B <- 'b'
    "};

    insta::assert_snapshot!(parse_errors(src), @"error at 5..9: unterminated string literal");
}

#[test]
fn unterminated_class() {
    insta::assert_snapshot!(parse_errors("A <- [a-z"), @"error at 5..9: unterminated character class");
}

#[test]
fn expression_outside_of_definition() {
    insta::assert_snapshot!(parse_errors("'a' A <- 'b'"), @"error at 0..3: unexpected token: `'a'` outside of a definition");
}

#[test]
fn garbage_in_sequence() {
    insta::assert_snapshot!(parse_errors("A <- 'a' @@ 'b'"), @"error at 9..11: unexpected token: `@@`");
}

#[test]
fn predicate_without_operand() {
    insta::assert_snapshot!(parse_errors("A <- 'a' !"), @"error at 10..10: expected an expression: after predicate");
}

#[test]
fn trailing_slash() {
    insta::assert_snapshot!(parse_errors("A <- 'a' /"), @"error at 10..10: expected an expression: after `/`");
}

#[test]
fn unclosed_repetition_bounds() {
    insta::assert_snapshot!(parse_errors("A <- 'a'{2"), @"error at 10..10: unexpected token: expected closing `}` for repetition bounds");
}
