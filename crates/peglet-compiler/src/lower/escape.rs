//! Escape decoding for string literals and character classes.
//!
//! Supported escapes: `\n \r \t \0 \\ \' \" \[ \] \- \^`, `\xHH` and
//! `\u{H...}` (one to six hex digits).

use std::iter::Peekable;
use std::str::CharIndices;

use peglet_core::CharClass;
use rowan::{TextRange, TextSize};

use crate::Diagnostics;
use crate::diagnostics::DiagnosticKind;

/// Decodes the body of a quoted literal (without quotes).
///
/// `offset` is the position of `body` in the grammar text. Invalid escapes
/// are reported and dropped.
pub fn unescape_literal(body: &str, offset: TextSize, diag: &mut Diagnostics) -> String {
    let mut scanner = Scanner::new(body, offset);
    let mut out = String::with_capacity(body.len());
    while let Some((_, c)) = scanner.next_char(diag) {
        out.push(c);
    }
    out
}

/// Parses the body of `[...]` (without brackets).
pub fn parse_class(
    body: &str,
    offset: TextSize,
    ignore_case: bool,
    diag: &mut Diagnostics,
) -> CharClass {
    let mut scanner = Scanner::new(body, offset);
    let negated = scanner.eat_plain('^');
    let mut ranges = Vec::new();

    while let Some((start, lo)) = scanner.next_char(diag) {
        if !scanner.at_range_dash() {
            ranges.push((lo, lo));
            continue;
        }
        scanner.eat_plain('-');
        let Some((_, hi)) = scanner.next_char(diag) else {
            ranges.push((lo, lo));
            ranges.push(('-', '-'));
            break;
        };
        if lo > hi {
            let end = scanner.pos();
            diag.report(DiagnosticKind::InvalidClassRange, scanner.span(start, end))
                .message(format!("`{}` is reversed", &body[start..end]))
                .emit();
            continue;
        }
        ranges.push((lo, hi));
    }

    CharClass::new(ranges, negated, ignore_case)
}

struct Scanner<'a> {
    text: &'a str,
    chars: Peekable<CharIndices<'a>>,
    offset: TextSize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str, offset: TextSize) -> Self {
        Self {
            text,
            chars: text.char_indices().peekable(),
            offset,
        }
    }

    fn pos(&mut self) -> usize {
        self.chars.peek().map_or(self.text.len(), |&(i, _)| i)
    }

    fn span(&self, start: usize, end: usize) -> TextRange {
        TextRange::new(
            self.offset + TextSize::from(start as u32),
            self.offset + TextSize::from(end as u32),
        )
    }

    fn eat_plain(&mut self, expected: char) -> bool {
        self.chars.next_if(|&(_, c)| c == expected).is_some()
    }

    /// An unescaped `-` followed by another character.
    fn at_range_dash(&self) -> bool {
        let mut ahead = self.chars.clone();
        matches!(ahead.next(), Some((_, '-'))) && ahead.next().is_some()
    }

    /// Next decoded character with its byte position in the body.
    fn next_char(&mut self, diag: &mut Diagnostics) -> Option<(usize, char)> {
        loop {
            let (start, c) = self.chars.next()?;
            if c != '\\' {
                return Some((start, c));
            }
            match self.escape() {
                Some(decoded) => return Some((start, decoded)),
                None => {
                    let end = self.pos();
                    diag.report(DiagnosticKind::InvalidEscape, self.span(start, end))
                        .message(format!("`{}`", &self.text[start..end]))
                        .emit();
                }
            }
        }
    }

    /// Decodes the escape after a backslash; `None` when malformed.
    fn escape(&mut self) -> Option<char> {
        let (_, c) = self.chars.next()?;
        match c {
            'n' => Some('\n'),
            'r' => Some('\r'),
            't' => Some('\t'),
            '0' => Some('\0'),
            '\\' | '\'' | '"' | '[' | ']' | '-' | '^' => Some(c),
            'x' => {
                let digits = self.hex_digits(2);
                if digits.len() != 2 {
                    return None;
                }
                u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32)
            }
            'u' => {
                if !self.eat_plain('{') {
                    return None;
                }
                let digits = self.hex_digits(6);
                if digits.is_empty() || !self.eat_plain('}') {
                    return None;
                }
                u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32)
            }
            _ => None,
        }
    }

    fn hex_digits(&mut self, max: usize) -> String {
        let mut digits = String::new();
        while digits.len() < max {
            match self.chars.next_if(|(_, c)| c.is_ascii_hexdigit()) {
                Some((_, c)) => digits.push(c),
                None => break,
            }
        }
        digits
    }
}
