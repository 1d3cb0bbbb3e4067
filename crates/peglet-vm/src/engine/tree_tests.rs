use indoc::indoc;

use super::*;

fn parse_tree(src: &str, input: &str) -> SyntaxTree {
    let g = peglet_compiler::compile(src).expect("grammar should compile");
    let actions = tree_actions(&g);
    let vm = VM::builder(&g).actions(&actions).build();
    let outcome = vm.parse(input).unwrap();
    outcome.value_as::<SyntaxTree>().cloned().expect("tree value")
}

#[test]
fn builds_nested_tree() {
    let tree = parse_tree(
        indoc! {"
            Sum <- Num ('+' Num)*
            Num <- <[0-9]+>
        "},
        "1+23",
    );

    insta::assert_snapshot!(tree.dump(), @r#"
    Sum [0..4]
      Num [0..1] "1"
      Num [2..4] "23"
    "#);
}

#[test]
fn token_rules_keep_their_text() {
    let tree = parse_tree(
        indoc! {"
            Greeting <- Word ' ' Word
            Word     <- [a-z]+
        "},
        "hi there",
    );

    insta::assert_snapshot!(tree.dump(), @r#"
    Greeting [0..8]
      Word [0..2] "hi"
      Word [3..8] "there"
    "#);
}

#[test]
fn serializes_to_json() {
    let tree = parse_tree("Num <- <[0-9]+>", "42");

    let json = serde_json::to_string(&tree).unwrap();

    assert_eq!(
        json,
        r#"{"rule":"Num","choice":0,"start":0,"end":2,"token":"42"}"#
    );
}
