use crate::parser::lexer::{lex, token_text};

fn snapshot(input: &str) -> String {
    format_tokens(input, false)
}

fn snapshot_raw(input: &str) -> String {
    format_tokens(input, true)
}

fn format_tokens(input: &str, include_trivia: bool) -> String {
    let tokens = lex(input);
    let mut out = String::new();
    for token in tokens {
        if include_trivia || !token.kind.is_trivia() {
            out.push_str(&format!(
                "{:?} {:?}\n",
                token.kind,
                token_text(input, &token)
            ));
        }
    }
    out
}

#[test]
fn punctuation() {
    insta::assert_snapshot!(snapshot("( ) < > { } / & ! ? * + . , ="), @r#"
    ParenOpen "("
    ParenClose ")"
    AngleOpen "<"
    AngleClose ">"
    BraceOpen "{"
    BraceClose "}"
    Slash "/"
    Amp "&"
    Bang "!"
    Question "?"
    Star "*"
    Plus "+"
    Dot "."
    Comma ","
    Equals "="
    "#);
}

#[test]
fn arrows() {
    insta::assert_snapshot!(snapshot("A <- B ← <C>"), @r#"
    Id "A"
    Arrow "<-"
    Id "B"
    Arrow "←"
    AngleOpen "<"
    Id "C"
    AngleClose ">"
    "#);
}

#[test]
fn literals() {
    insta::assert_snapshot!(snapshot(r#"'if' "then" 'esc\'aped' 'kw'i ''"#), @r#"
    StrLit "'if'"
    StrLit "\"then\""
    StrLit "'esc\\'aped'"
    StrLit "'kw'i"
    StrLit "''"
    "#);
}

#[test]
fn classes() {
    insta::assert_snapshot!(snapshot(r"[a-z] [^0-9] [\]\-] [x]i"), @r#"
    ClassLit "[a-z]"
    ClassLit "[^0-9]"
    ClassLit "[\\]\\-]"
    ClassLit "[x]i"
    "#);
}

#[test]
fn unterminated_literal_stops_at_newline() {
    insta::assert_snapshot!(snapshot("A <- 'abc\nB <- 'x'"), @r#"
    Id "A"
    Arrow "<-"
    UnterminatedStr "'abc"
    Id "B"
    Arrow "<-"
    StrLit "'x'"
    "#);
}

#[test]
fn unterminated_class() {
    insta::assert_snapshot!(snapshot("A <- [a-z"), @r#"
    Id "A"
    Arrow "<-"
    UnterminatedClass "[a-z"
    "#);
}

#[test]
fn directives_numbers_and_ids() {
    insta::assert_snapshot!(snapshot("%whitespace <- x{2,10} _tail"), @r#"
    Directive "%whitespace"
    Arrow "<-"
    Id "x"
    BraceOpen "{"
    Number "2"
    Comma ","
    Number "10"
    BraceClose "}"
    Id "_tail"
    "#);
}

#[test]
fn trivia() {
    insta::assert_snapshot!(snapshot_raw("A <- 'a' # note\r\n\tB"), @r##"
    Id "A"
    Whitespace " "
    Arrow "<-"
    Whitespace " "
    StrLit "'a'"
    Whitespace " "
    Comment "# note\r"
    Newline "\n"
    Whitespace "\t"
    Id "B"
    "##);
}

#[test]
fn garbage_is_coalesced() {
    insta::assert_snapshot!(snapshot("A <- $$$ 'a' @"), @r#"
    Id "A"
    Arrow "<-"
    Garbage "$$$"
    StrLit "'a'"
    Garbage "@"
    "#);
}
