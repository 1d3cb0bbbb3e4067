//! Tokenizer for grammar source.
//!
//! Tokens hold only a kind and a byte span. Runs of characters logos can't
//! classify are merged into one `Garbage` token. A literal or class that hits
//! a newline before its closing delimiter lexes as `UnterminatedStr` or
//! `UnterminatedClass`, which the parser reports with a precise span.

use logos::Logos;
use rowan::{TextRange, TextSize};

use super::cst::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

fn span(start: usize, end: usize) -> TextRange {
    TextRange::new(TextSize::from(start as u32), TextSize::from(end as u32))
}

/// Emits the pending garbage run, if any, ending at `end`.
fn close_garbage(tokens: &mut Vec<Token>, garbage: &mut Option<usize>, end: usize) {
    if let Some(start) = garbage.take() {
        tokens.push(Token {
            kind: SyntaxKind::Garbage,
            span: span(start, end),
        });
    }
}

pub fn lex(source: &str) -> Vec<Token> {
    let mut lexer = SyntaxKind::lexer(source);
    let mut tokens = Vec::new();
    // Start of the pending run of unrecognized characters.
    let mut garbage: Option<usize> = None;

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        match result {
            Ok(kind) => {
                close_garbage(&mut tokens, &mut garbage, range.start);
                tokens.push(Token {
                    kind,
                    span: span(range.start, range.end),
                });
            }
            Err(()) => {
                garbage.get_or_insert(range.start);
            }
        }
    }
    close_garbage(&mut tokens, &mut garbage, source.len());

    tokens
}

pub fn token_text<'src>(source: &'src str, token: &Token) -> &'src str {
    &source[token.span]
}
