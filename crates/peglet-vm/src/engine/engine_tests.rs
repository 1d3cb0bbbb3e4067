use std::any::Any;
use std::sync::Arc;

use indoc::indoc;
use peglet_core::{Expr, Grammar, Rule, RuleId};

use super::*;

const CALCULATOR: &str = indoc! {r#"
    Additive       <- Multiplicative '+' Additive / Multiplicative
    Multiplicative <- Primary '*' Multiplicative / Primary
    Primary        <- '(' Additive ')' / Number
    Number         <- <[0-9]+>
    %whitespace    <- [ \t]*
"#};

fn grammar(src: &str) -> Grammar {
    peglet_compiler::compile(src).expect("grammar should compile")
}

fn bind<T: Any + Send + Sync>(
    actions: &mut Actions,
    grammar: &Grammar,
    rule: &str,
    f: impl Fn(&SemanticValues<'_>) -> Result<T, ActionError> + Send + Sync + 'static,
) {
    let id = grammar.rule_id(rule).expect("rule exists");
    actions.bind(id, Arc::new(move |sv: &SemanticValues<'_>| f(sv).map(Value::new)));
}

fn calculator_actions(g: &Grammar) -> Actions {
    let mut actions = Actions::new(g);
    bind(&mut actions, g, "Additive", |sv| match sv.choice() {
        0 => Ok(sv.get::<i64>(0)? + sv.get::<i64>(1)?),
        _ => sv.get::<i64>(0),
    });
    bind(&mut actions, g, "Multiplicative", |sv| match sv.choice() {
        0 => Ok(sv.get::<i64>(0)? * sv.get::<i64>(1)?),
        _ => sv.get::<i64>(0),
    });
    bind(&mut actions, g, "Primary", |sv| sv.get::<i64>(0));
    bind(&mut actions, g, "Number", |sv| sv.parse_token::<i64>());
    actions
}

fn parse(g: &Grammar, input: &str) -> ParseOutcome {
    VM::builder(g).build().parse(input).expect("no runtime error")
}

#[test]
fn calculator_with_whitespace() {
    let g = grammar(CALCULATOR);
    let actions = calculator_actions(&g);
    let vm = VM::builder(&g).actions(&actions).build();

    let outcome = vm.parse(" (1 + 2) * 3 ").unwrap();

    assert!(outcome.is_success());
    assert_eq!(outcome.value_as::<i64>(), Some(&9));
    assert_eq!(outcome.consumed(), 13);
}

#[test]
fn calculator_with_packrat() {
    let g = grammar(CALCULATOR);
    let actions = calculator_actions(&g);
    let vm = VM::builder(&g).actions(&actions).packrat(true).build();

    let outcome = vm.parse("2 * (3 + 4) + 1").unwrap();

    assert_eq!(outcome.value_as::<i64>(), Some(&15));
    assert!(outcome.stats().memo_hits > 0);
    assert!(outcome.stats().memo_entries > 0);
}

#[test]
fn unbalanced_parens_report_furthest_failure() {
    let g = grammar(CALCULATOR);

    let outcome = parse(&g, "(1 + 2");

    assert!(!outcome.is_success());
    assert!(outcome.value().is_none());
    let error = outcome.error().unwrap();
    assert_eq!(error.offset, 6);
    assert_eq!(
        error.to_string(),
        "syntax error at offset 6: expected [0-9], '*', '+' or ')'"
    );
}

#[test]
fn ordered_choice_commits_to_first_match() {
    let g = grammar("A <- 'a' / 'ab'");

    let outcome = parse(&g, "ab");

    assert!(!outcome.is_success());
    assert_eq!(outcome.consumed(), 1);
    assert_eq!(
        outcome.error().unwrap().to_string(),
        "syntax error at offset 1: expected end of input"
    );
}

#[test]
fn partial_match_reports_consumed_length() {
    let g = grammar("A <- 'a' / 'ab'");
    let vm = VM::builder(&g).full_match(false).build();

    let outcome = vm.parse("ab").unwrap();

    assert!(outcome.is_success());
    assert_eq!(outcome.consumed(), 1);
}

#[test]
fn token_capture() {
    let g = grammar("Number <- <[0-9]+>");
    let mut actions = Actions::new(&g);
    bind(&mut actions, &g, "Number", |sv| Ok(sv.token().to_owned()));
    let vm = VM::builder(&g).actions(&actions).build();

    let empty = vm.parse("").unwrap();
    assert!(!empty.is_success());
    assert_eq!(empty.error_position(), Some(0));
    assert_eq!(empty.error().unwrap().expected, vec!["[0-9]".to_owned()]);

    let outcome = vm.parse("007").unwrap();
    assert_eq!(outcome.value_as::<String>().map(String::as_str), Some("007"));
}

#[test]
fn multiple_tokens_in_one_rule() {
    let g = grammar("Pair <- <[a-z]+> '=' <[0-9]+>");
    let mut actions = Actions::new(&g);
    bind(&mut actions, &g, "Pair", |sv| {
        Ok(sv.tokens().map(str::to_owned).collect::<Vec<_>>())
    });
    let vm = VM::builder(&g).actions(&actions).build();

    let outcome = vm.parse("key=42").unwrap();

    assert_eq!(
        outcome.value_as::<Vec<String>>(),
        Some(&vec!["key".to_owned(), "42".to_owned()])
    );
}

#[test]
fn choice_index_is_reported() {
    let g = grammar("A <- 'x' / 'y' / 'z'");
    let mut actions = Actions::new(&g);
    bind(&mut actions, &g, "A", |sv| Ok(sv.choice()));
    let vm = VM::builder(&g).actions(&actions).build();

    assert_eq!(vm.parse("y").unwrap().value_as::<usize>(), Some(&1));
    assert_eq!(vm.parse("z").unwrap().value_as::<usize>(), Some(&2));
}

#[test]
fn action_error_aborts_parse() {
    let g = grammar(indoc! {"
        A <- B / 'b'
        B <- 'b'
    "});
    let mut actions = Actions::new(&g);
    bind(&mut actions, &g, "B", |_| -> Result<(), _> {
        Err(ActionError::msg("nope"))
    });
    let vm = VM::builder(&g).actions(&actions).build();

    let err = vm.parse("b").unwrap_err();

    assert!(matches!(&err, RuntimeError::Action { rule, .. } if rule == "B"));
    assert_eq!(err.to_string(), "action for rule `B` failed: nope");
}

#[test]
fn single_child_value_propagates() {
    let g = grammar(indoc! {"
        A <- B
        B <- 'x'
    "});
    let mut actions = Actions::new(&g);
    bind(&mut actions, &g, "B", |_| Ok(42i64));
    let vm = VM::builder(&g).actions(&actions).build();

    let outcome = vm.parse("x").unwrap();

    assert_eq!(outcome.value_as::<i64>(), Some(&42));
}

#[test]
fn several_child_values_reduce_to_unit() {
    let g = grammar(indoc! {"
        A <- B B
        B <- 'x'
    "});
    let mut actions = Actions::new(&g);
    bind(&mut actions, &g, "B", |_| Ok(42i64));
    let vm = VM::builder(&g).actions(&actions).build();

    let outcome = vm.parse("xx").unwrap();

    assert!(outcome.is_success());
    assert!(outcome.value().unwrap().is_unit());
}

#[test]
fn failed_alternative_discards_its_values() {
    let g = grammar(indoc! {"
        A <- B 'y' / B 'z'
        B <- 'x'
    "});
    let mut actions = Actions::new(&g);
    bind(&mut actions, &g, "B", |_| Ok(1i64));
    bind(&mut actions, &g, "A", |sv| Ok(sv.len()));
    let vm = VM::builder(&g).actions(&actions).build();

    let outcome = vm.parse("xz").unwrap();

    assert_eq!(outcome.value_as::<usize>(), Some(&1));
}

#[test]
fn whitespace_is_skipped_between_elements() {
    let g = grammar(indoc! {"
        List <- Item (',' Item)*
        Item <- <[a-z]+>
        %whitespace <- [ ]*
    "});
    let mut actions = Actions::new(&g);
    bind(&mut actions, &g, "Item", |sv| Ok(sv.token().to_owned()));
    bind(&mut actions, &g, "List", |sv| Ok(sv.collect::<String>().join("|")));
    let vm = VM::builder(&g).actions(&actions).build();

    let outcome = vm.parse(" ab , c ,d ").unwrap();

    assert_eq!(outcome.value_as::<String>().map(String::as_str), Some("ab|c|d"));
    assert_eq!(outcome.consumed(), 11);
}

#[test]
fn token_rules_do_not_skip_inside() {
    let mut g = grammar(indoc! {"
        Word <- 'a' 'b'
        %whitespace <- [ ]*
    "});

    assert!(parse(&g, " ab ").is_success());
    assert!(!parse(&g, "a b").is_success());

    let id = g.rule_id("Word").unwrap();
    g.set_token(id, false);
    assert!(parse(&g, "a b").is_success());
}

#[test]
fn captures_do_not_skip_inside() {
    let g = grammar(indoc! {"
        Pair  <- Key '=' Key
        Key   <- <'k' Digit>
        Digit <- [0-9]
        %whitespace <- [ ]*
    "});

    assert!(parse(&g, "k1 = k2").is_success());
    assert!(!parse(&g, "k 1 = k2").is_success());
}

#[test]
fn negative_lookahead() {
    let g = grammar(indoc! {"
        Ident   <- !Keyword <[a-z]+>
        Keyword <- 'if'
    "});

    assert!(!parse(&g, "if").is_success());
    assert!(parse(&g, "x").is_success());
}

#[test]
fn positive_lookahead_does_not_consume() {
    let g = grammar("A <- &'a' 'a'");

    let outcome = parse(&g, "a");

    assert!(outcome.is_success());
    assert_eq!(outcome.consumed(), 1);
}

#[test]
fn predicates_do_not_contribute_values() {
    let g = grammar(indoc! {"
        A <- &B B
        B <- 'x'
    "});
    let mut actions = Actions::new(&g);
    bind(&mut actions, &g, "B", |_| Ok(7i64));
    bind(&mut actions, &g, "A", |sv| Ok(sv.len()));
    let vm = VM::builder(&g).actions(&actions).build();

    assert_eq!(vm.parse("x").unwrap().value_as::<usize>(), Some(&1));
}

#[test]
fn bounded_repetition() {
    let g = grammar("A <- 'a'{2,3}");

    assert!(!parse(&g, "a").is_success());
    assert!(parse(&g, "aa").is_success());
    assert!(parse(&g, "aaa").is_success());

    let four = parse(&g, "aaaa");
    assert!(!four.is_success());
    assert_eq!(four.error_position(), Some(3));
}

#[test]
fn zero_width_repetition_terminates() {
    let g = grammar("A <- ('')* 'x'");

    assert!(parse(&g, "x").is_success());
}

#[test]
fn case_insensitive_terminals() {
    let g = grammar(indoc! {"
        A <- 'select'i [a-c]i
    "});

    assert!(parse(&g, "SeLeCtB").is_success());
    assert!(!parse(&g, "SeLeCtD").is_success());
}

#[test]
fn any_char_is_unicode_aware() {
    let g = grammar("A <- . 'x'");

    let outcome = parse(&g, "éx");

    assert!(outcome.is_success());
    assert_eq!(outcome.consumed(), 3);
}

#[test]
fn explicit_start_rule() {
    let g = grammar(indoc! {"
        A <- 'a'
        B <- 'b'
    "});
    let vm = VM::builder(&g).start_rule("B").unwrap().build();

    assert!(vm.parse("b").unwrap().is_success());
    assert!(matches!(
        VM::builder(&g).start_rule("C"),
        Err(RuntimeError::UnknownRule(name)) if name == "C"
    ));
}

#[test]
fn recursion_limit() {
    let g = grammar("A <- '(' A ')' / ''");
    let vm = VM::builder(&g).recursion_limit(4).build();

    let err = vm.parse("((((((").unwrap_err();

    assert!(matches!(err, RuntimeError::RecursionLimitExceeded(4)));
    assert_eq!(err.to_string(), "runtime recursion limit exceeded (depth 4)");
}

/// `n` nested parentheses around `1`; the innermost `Number` sits at rule
/// depth `3n + 4`.
fn nested_parens(n: usize) -> String {
    format!("{}1{}", "(".repeat(n), ")".repeat(n))
}

#[test]
fn nesting_up_to_default_depth_limit() {
    let g = grammar(CALCULATOR);
    let actions = calculator_actions(&g);
    let vm = VM::builder(&g).actions(&actions).packrat(true).build();

    let outcome = vm.parse(&nested_parens(84)).unwrap();

    assert!(outcome.is_success());
    assert_eq!(outcome.value_as::<i64>(), Some(&1));
}

#[test]
fn nesting_past_default_depth_limit() {
    let g = grammar(CALCULATOR);
    let vm = VM::builder(&g).packrat(true).build();

    let err = vm.parse(&nested_parens(85)).unwrap_err();

    assert!(matches!(err, RuntimeError::RecursionLimitExceeded(256)));
}

#[test]
fn foreign_start_rule_is_an_error() {
    let g = grammar("A <- 'a'");
    let vm = VM::builder(&g).start(RuleId::new(7)).build();

    let err = vm.parse("a").unwrap_err();

    assert!(matches!(err, RuntimeError::ForeignRule(id) if id == RuleId::new(7)));
    assert_eq!(err.to_string(), "rule #7 does not belong to this grammar");
}

#[test]
fn foreign_rule_reference_is_an_error() {
    let rules = vec![Rule::new("A", vec![Expr::Ref(RuleId::new(3))])];
    let g = Grammar::new(rules, RuleId::new(0), None);

    let err = VM::builder(&g).build().parse("a").unwrap_err();

    assert!(matches!(err, RuntimeError::ForeignRule(_)));
}

#[test]
fn exec_fuel_exhaustion() {
    let g = grammar(CALCULATOR);
    let vm = VM::builder(&g).exec_fuel(5).build();

    let err = vm.parse("1 + 2 + 3").unwrap_err();

    assert!(matches!(err, RuntimeError::ExecFuelExhausted(5)));
}

#[test]
fn packrat_does_not_change_results() {
    let cases: &[(&str, &[&str])] = &[
        (CALCULATOR, &["1+2*3", " (1 + 2) * 3 ", "(1 + 2", "1 + + 2", ""]),
        (
            indoc! {"
                A <- B 'x' / B 'y' / C
                B <- 'b'+
                C <- <'b'*> 'z'?
            "},
            &["bbby", "bbx", "bbz", "b", "q"],
        ),
        (
            indoc! {"
                List <- Item (',' Item)* ','?
                Item <- !',' <[a-z]+> / '[' List? ']'
                %whitespace <- [ ]*
            "},
            &["a, [b, c], []", "a,,b", "[a, [b]", "a ,"],
        ),
    ];

    for (src, inputs) in cases {
        let g = grammar(src);
        let actions = tree_actions(&g);
        let plain = VM::builder(&g).actions(&actions).build();
        let memo = VM::builder(&g).actions(&actions).packrat(true).build();

        for input in *inputs {
            let a = plain.parse(input).unwrap();
            let b = memo.parse(input).unwrap();
            assert_eq!(a.is_success(), b.is_success(), "{input:?}");
            assert_eq!(a.consumed(), b.consumed(), "{input:?}");
            assert_eq!(a.error(), b.error(), "{input:?}");
            assert_eq!(
                a.value_as::<SyntaxTree>(),
                b.value_as::<SyntaxTree>(),
                "{input:?}"
            );
        }
    }
}

#[test]
fn syntax_error_line_col() {
    let g = grammar(indoc! {"
        Lines <- Line+
        Line  <- [a-z]* '\\n'
    "});

    let outcome = parse(&g, "ab\ncd!\n");
    let error = outcome.error().unwrap();

    assert_eq!(error.offset, 5);
    assert_eq!(error.line_col("ab\ncd!\n"), (2, 3));
}
