use indoc::indoc;

use crate::{AstPrinter, Compilation};

#[test]
fn typed_ast() {
    let compiled = Compilation::new(indoc! {"
        A <- !'x' B{2,} / <[a-z]i> .
        B <- ('b')?
    "})
    .exec()
    .expect("exec");

    insta::assert_snapshot!(AstPrinter::new(&compiled).dump(), @r"
    Root
      Def A
        Choice
          Seq
            Prefix !
              Literal 'x'
            Suffix {2,}
              Ref B
          Seq
            Capture
              Class [a-z]i
            Any
      Def B
        Suffix ?
          Group
            Literal 'b'
    ");
}

#[test]
fn raw_cst_with_spans() {
    let compiled = Compilation::new("A <- 'a'*").exec().expect("exec");

    let dump = AstPrinter::new(&compiled).raw(true).with_spans(true).dump();
    insta::assert_snapshot!(dump, @r#"
    Root [0..9]
      Def [0..9]
        Id [0..1] "A"
        Arrow [2..4] "<-"
        Suffix [5..9]
          Literal [5..8]
            StrLit [5..8] "'a'"
          Star [8..9] "*"
    "#);
}

#[test]
fn raw_cst_with_trivia() {
    let compiled = Compilation::new("A <- .").exec().expect("exec");

    let dump = AstPrinter::new(&compiled).raw(true).with_trivia(true).dump();
    insta::assert_snapshot!(dump, @r#"
    Root
      Def
        Id "A"
        Whitespace " "
        Arrow "<-"
        Whitespace " "
        Any
          Dot "."
    "#);
}
