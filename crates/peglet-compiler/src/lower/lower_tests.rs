use indoc::indoc;
use peglet_core::{CharClass, Expr, Grammar, RuleId};

use super::lower;
use crate::Diagnostics;
use crate::analyze::resolve_names;
use crate::parser::parse;

fn lower_with_start(src: &str, start: Option<&str>) -> (Option<Grammar>, Diagnostics) {
    let (parse, mut diag) = parse(src).expect("parse");
    let symbols = resolve_names(&parse.root(), &mut diag);
    let grammar = lower(&symbols, start, &mut diag);
    (grammar, diag)
}

fn lower_ok(src: &str) -> Grammar {
    let (grammar, diag) = lower_with_start(src, None);
    assert!(diag.is_empty(), "{diag}");
    grammar.expect("grammar")
}

#[test]
fn calculator() {
    let grammar = lower_ok(indoc! {"
        # arithmetic
        Additive       <- Multiplicative '+' Additive / Multiplicative
        Multiplicative <- Primary '*' Multiplicative / Primary
        Primary        <- '(' Additive ')' / Number
        Number         <- < [0-9]+ >
        %whitespace    <- [ \\t]*
    "});

    assert_eq!(grammar.start(), RuleId::new(0));
    assert_eq!(grammar.rule_id("Number"), Some(RuleId::new(3)));
    assert!(grammar.rule(RuleId::new(3)).is_token());
    assert!(!grammar.rule(RuleId::new(2)).is_token());
    insta::assert_snapshot!(grammar.to_string(), @r"
    Additive <- Multiplicative '+' Additive / Multiplicative
    Multiplicative <- Primary '*' Multiplicative / Primary
    Primary <- '(' Additive ')' / Number
    Number <- <[0-9]+>
    %whitespace <- [ \t]*
    ");
}

#[test]
fn explicit_start_rule() {
    let (grammar, _) = lower_with_start("A <- B\nB <- 'b'", Some("B"));

    assert_eq!(grammar.map(|g| g.start()), Some(RuleId::new(1)));
}

#[test]
fn missing_start_rule() {
    let (grammar, diag) = lower_with_start("A <- 'a'", Some("Nope"));

    assert!(grammar.is_none());
    insta::assert_snapshot!(diag.to_string(), @"error at 0..0: start rule `Nope` is not defined");
}

#[test]
fn empty_grammar_has_no_start_rule() {
    let (grammar, diag) = lower_with_start("# nothing here\n", None);

    assert!(grammar.is_none());
    insta::assert_snapshot!(diag.to_string(), @"error at 0..0: grammar has no start rule");
}

#[test]
fn decodes_literals_and_classes() {
    let grammar = lower_ok(r#"A <- 'a\tb' "q"i [^a-z\]] ."#);

    assert_eq!(
        grammar.rule(RuleId::new(0)).alternatives(),
        [Expr::Seq(vec![
            Expr::Literal {
                text: "a\tb".to_owned(),
                ignore_case: false,
            },
            Expr::Literal {
                text: "q".to_owned(),
                ignore_case: true,
            },
            Expr::Class(CharClass::new(vec![('a', 'z'), (']', ']')], true, false)),
            Expr::Any,
        ])]
    );
}

#[test]
fn predicates_groups_and_repetition() {
    let grammar = lower_ok("A <- !('a' / 'b') &. ('c' 'd')? 'e'{2,3} 'f'{2} 'g'{,3} 'h'{2,}");

    insta::assert_snapshot!(grammar.to_string(), @"A <- !('a' / 'b') &. ('c' 'd')? 'e'{2,3} 'f'{2} 'g'{,3} 'h'{2,}");
}

#[test]
fn invalid_repetition_bounds() {
    let (_, diag) = lower_with_start("A <- 'a'{} 'b'{3,1}", None);

    insta::assert_snapshot!(diag.to_string(), @r"
    error at 8..10: invalid repetition bounds: expected at least one bound
    error at 14..19: invalid repetition bounds: minimum 3 exceeds maximum 1
    ");
}

#[test]
fn escape_errors_point_into_the_literal() {
    let (_, diag) = lower_with_start(r"A <- 'x\qy'", None);

    insta::assert_snapshot!(diag.to_string(), @r"error at 7..9: invalid escape sequence: `\q`");
}
