use peglet_core::CharClass;
use rowan::TextSize;

use super::escape::{parse_class, unescape_literal};
use crate::Diagnostics;

#[test]
fn decodes_escapes() {
    let mut diag = Diagnostics::new();
    let text = unescape_literal(r"\n\t\\\'\x41\u{1F600}\]", TextSize::from(0), &mut diag);

    assert!(diag.is_empty());
    assert_eq!(text, "\n\t\\'A\u{1F600}]");
}

#[test]
fn reports_invalid_escapes_with_absolute_ranges() {
    let mut diag = Diagnostics::new();
    let text = unescape_literal(r"a\qb\x4", TextSize::from(10), &mut diag);

    assert_eq!(text, "ab");
    insta::assert_snapshot!(diag.to_string(), @r"
    error at 11..13: invalid escape sequence: `\q`
    error at 14..17: invalid escape sequence: `\x4`
    ");
}

#[test]
fn unicode_escape_needs_braces() {
    let mut diag = Diagnostics::new();
    unescape_literal(r"\u41", TextSize::from(0), &mut diag);

    insta::assert_snapshot!(diag.to_string(), @r"error at 0..2: invalid escape sequence: `\u`");
}

#[test]
fn class_ranges_and_negation() {
    let mut diag = Diagnostics::new();
    let class = parse_class(r"^a-c\-x", TextSize::from(0), false, &mut diag);

    assert!(diag.is_empty());
    assert_eq!(
        class,
        CharClass::new(vec![('a', 'c'), ('-', '-'), ('x', 'x')], true, false)
    );
}

#[test]
fn trailing_dash_is_literal() {
    let mut diag = Diagnostics::new();
    let class = parse_class("a-", TextSize::from(0), true, &mut diag);

    assert_eq!(class, CharClass::new(vec![('a', 'a'), ('-', '-')], false, true));
}

#[test]
fn reversed_range() {
    let mut diag = Diagnostics::new();
    let class = parse_class("0z-a", TextSize::from(6), false, &mut diag);

    assert_eq!(class, CharClass::new(vec![('0', '0')], false, false));
    insta::assert_snapshot!(diag.to_string(), @"error at 7..10: invalid character range: `z-a` is reversed");
}
