use indoc::indoc;

use super::{cst, parse_errors};

#[test]
fn unicode_arrow() {
    assert_eq!(parse_errors("A ← 'a'"), "");
}

#[test]
fn definitions_are_split_on_name_arrow() {
    let src = indoc! {"
        A <- B
        B <- 'b'
    "};

    assert_eq!(parse_errors(src), "");
    insta::assert_snapshot!(cst(src), @r#"
    Root
      Def
        Id "A"
        Arrow "<-"
        Ref
          Id "B"
      Def
        Id "B"
        Arrow "<-"
        Literal
          StrLit "'b'"
    "#);
}

#[test]
fn whitespace_directive() {
    insta::assert_snapshot!(cst("%whitespace <- [ ]*"), @r#"
    Root
      Def
        Directive "%whitespace"
        Arrow "<-"
        Suffix
          Class
            ClassLit "[ ]"
          Star "*"
    "#);
}

#[test]
fn bounded_repetition() {
    insta::assert_snapshot!(cst("A <- .{2,3}?"), @r#"
    Root
      Def
        Id "A"
        Arrow "<-"
        Suffix
          Suffix
            Any
              Dot "."
            BraceOpen "{"
            Number "2"
            Comma ","
            Number "3"
            BraceClose "}"
          Question "?"
    "#);
}

#[test]
fn comments_are_trivia() {
    let src = indoc! {"
        # leading
        A <- 'a' # trailing
    "};

    assert_eq!(parse_errors(src), "");
}
