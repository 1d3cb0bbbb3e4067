use crate::{Parser, render_syntax_error};

#[test]
fn points_at_the_furthest_failure() {
    let parser = Parser::new("Greeting <- 'hello' ' ' [a-z]+").unwrap();
    let input = "hello W";

    let outcome = parser.parse(input).unwrap();
    let error = outcome.error().unwrap();
    let rendered = render_syntax_error(input, error, Some("greeting.txt"), false);

    assert!(rendered.contains("error: syntax error"), "{rendered}");
    assert!(rendered.contains("expected [a-z]"), "{rendered}");
    assert!(rendered.contains("greeting.txt"), "{rendered}");
    assert!(rendered.contains("hello W"), "{rendered}");
}

#[test]
fn end_of_input() {
    let parser = Parser::new("Pair <- 'a' 'b'").unwrap();
    let input = "a";

    let outcome = parser.parse(input).unwrap();
    let rendered = render_syntax_error(input, outcome.error().unwrap(), None, false);

    assert!(rendered.contains("unexpected end of input"), "{rendered}");
    assert!(rendered.contains("expected 'b'"), "{rendered}");
}

#[test]
fn label_matches_error_display() {
    let parser = Parser::new("Pick <- 'x' / 'y' / 'z'").unwrap();
    let input = "w";

    let outcome = parser.parse(input).unwrap();
    let error = outcome.error().unwrap();
    let rendered = render_syntax_error(input, error, None, false);

    assert_eq!(error.describe_expected(), "expected 'x', 'y' or 'z'");
    assert!(rendered.contains("expected 'x', 'y' or 'z'"), "{rendered}");
    assert!(error.to_string().ends_with("expected 'x', 'y' or 'z'"));
}
