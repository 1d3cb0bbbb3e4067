//! Token cursor and tree-building primitives shared by the grammar rules.

use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

use super::cst::{SyntaxKind, TokenSet};
use super::lexer::{Token, token_text};
use crate::Error;
use crate::diagnostics::{DiagnosticBuilder, DiagnosticKind, Diagnostics};

/// Work and nesting allowances; `None` disables a limit.
#[derive(Debug, Clone, Copy, Default)]
struct Budget {
    tokens: Option<u32>,
    spent: u32,
    depth: Option<u32>,
}

/// Recursive-descent state over a lexed token vector.
///
/// Trivia is never consumed into the tree on its own: the tokens in
/// `trivia_from..pos` are pending and get attached right before the next node
/// or token, so comments end up inside the definition that follows them.
pub struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    trivia_from: usize,
    builder: GreenNodeBuilder<'static>,
    diagnostics: Diagnostics,
    depth: u32,
    budget: Budget,
    /// Start of the last reported range; one diagnostic per position.
    last_report: Option<TextSize>,
    /// Start offsets of the open `(`, `<` and `{` delimiters.
    open: Vec<TextSize>,
    halted: Option<Error>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            trivia_from: 0,
            builder: GreenNodeBuilder::new(),
            diagnostics: Diagnostics::new(),
            depth: 0,
            budget: Budget::default(),
            last_report: None,
            open: Vec::new(),
            halted: None,
        }
    }

    /// Caps the number of consumed tokens.
    pub fn with_token_limit(mut self, limit: Option<u32>) -> Self {
        self.budget.tokens = limit;
        self
    }

    /// Caps expression nesting.
    pub fn with_depth_limit(mut self, limit: Option<u32>) -> Self {
        self.budget.depth = limit;
        self
    }

    /// Green tree, diagnostics and the number of consumed tokens.
    pub(super) fn finish(mut self) -> Result<(GreenNode, Diagnostics, u32), Error> {
        self.flush_trivia();
        match self.halted {
            Some(err) => Err(err),
            None => Ok((self.builder.finish(), self.diagnostics, self.budget.spent)),
        }
    }

    fn halt(&mut self, err: Error) {
        self.halted.get_or_insert(err);
    }

    pub(super) fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    // Cursor

    pub(super) fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(super) fn should_stop(&self) -> bool {
        self.eof() || self.is_halted()
    }

    /// Moves past trivia, leaving it pending.
    pub(super) fn skip_trivia(&mut self) {
        while self.tokens.get(self.pos).is_some_and(|t| t.kind.is_trivia()) {
            self.pos += 1;
        }
    }

    fn current_token(&mut self) -> Option<Token> {
        self.skip_trivia();
        self.tokens.get(self.pos).copied()
    }

    pub(super) fn current(&mut self) -> SyntaxKind {
        self.current_token().map_or(SyntaxKind::Error, |t| t.kind)
    }

    pub(super) fn current_span(&mut self) -> TextRange {
        let eof = self.eof_offset();
        self.current_token()
            .map_or_else(|| TextRange::empty(eof), |t| t.span)
    }

    pub(super) fn current_text(&mut self) -> &'src str {
        let source = self.source;
        self.current_token().map_or("", |t| token_text(source, &t))
    }

    fn eof_offset(&self) -> TextSize {
        TextSize::of(self.source)
    }

    pub(super) fn at(&mut self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(super) fn at_any(&mut self, set: TokenSet) -> bool {
        set.contains(self.current())
    }

    /// Whether the significant token after the current one is in `set`.
    pub(super) fn peek_any(&mut self, set: TokenSet) -> bool {
        self.skip_trivia();
        let next = self.tokens[self.pos..]
            .iter()
            .map(|t| t.kind)
            .filter(|kind| !kind.is_trivia())
            .nth(1)
            .unwrap_or(SyntaxKind::Error);
        set.contains(next)
    }

    // Tree building

    fn flush_trivia(&mut self) {
        for token in &self.tokens[self.trivia_from..self.pos] {
            self.builder
                .token(token.kind.into(), token_text(self.source, token));
        }
        self.trivia_from = self.pos;
    }

    /// Attaches all trivia up to the next significant token.
    pub(super) fn eat_trivia(&mut self) {
        self.skip_trivia();
        self.flush_trivia();
    }

    pub(super) fn start_node(&mut self, kind: SyntaxKind) {
        self.flush_trivia();
        self.builder.start_node(kind.into());
    }

    pub(super) fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    pub(super) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    pub(super) fn checkpoint(&mut self) -> Checkpoint {
        self.flush_trivia();
        self.builder.checkpoint()
    }

    /// Adds the current token to the tree. Panics at end of input.
    pub(super) fn bump(&mut self) {
        let Some(token) = self.current_token() else {
            panic!("bump called at EOF");
        };
        match self.budget.tokens {
            Some(limit) if self.budget.spent >= limit => self.halt(Error::ExecFuelExhausted),
            _ => self.budget.spent += 1,
        }

        self.flush_trivia();
        self.builder
            .token(token.kind.into(), token_text(self.source, &token));
        self.pos += 1;
        self.trivia_from = self.pos;
    }

    pub(super) fn eat(&mut self, kind: SyntaxKind) -> bool {
        let matched = self.at(kind);
        if matched {
            self.bump();
        }
        matched
    }

    /// Reports a missing `kind` without consuming anything.
    pub(super) fn expect(&mut self, kind: SyntaxKind, what: &str) -> bool {
        let found = self.eat(kind);
        if !found {
            self.error_msg(DiagnosticKind::UnexpectedToken, format!("expected {what}"));
        }
        found
    }

    pub(super) fn descend(&mut self) -> bool {
        if self.budget.depth.is_some_and(|limit| self.depth >= limit) {
            self.halt(Error::RecursionLimitExceeded);
            return false;
        }
        self.depth += 1;
        true
    }

    pub(super) fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(super) fn push_delimiter(&mut self) -> TextRange {
        let span = self.current_span();
        self.open.push(span.start());
        span
    }

    pub(super) fn pop_delimiter(&mut self) {
        self.open.pop();
    }

    // Diagnostics

    /// Starts a diagnostic at `range` unless one was already reported there.
    fn report(&mut self, kind: DiagnosticKind, range: TextRange) -> Option<DiagnosticBuilder<'_>> {
        if self.last_report == Some(range.start()) {
            return None;
        }
        self.last_report = Some(range.start());
        Some(self.diagnostics.report(kind, range))
    }

    /// A diagnostic at the current token. Inside an open delimiter, it
    /// suppresses lower-priority diagnostics up to the end of input.
    fn report_here(&mut self, kind: DiagnosticKind) -> Option<DiagnosticBuilder<'_>> {
        let range = self.current_span();
        let suppression = match self.open.last() {
            Some(&start) => TextRange::new(start, self.eof_offset()),
            None => range,
        };
        Some(self.report(kind, range)?.suppression_range(suppression))
    }

    pub(super) fn error(&mut self, kind: DiagnosticKind) {
        if let Some(builder) = self.report_here(kind) {
            builder.emit();
        }
    }

    pub(super) fn error_msg(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        if let Some(builder) = self.report_here(kind) {
            builder.message(message).emit();
        }
    }

    /// Reports the current token and wraps it in an `Error` node.
    pub(super) fn error_and_skip(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.error_msg(kind, message);
        if self.current_token().is_some() {
            self.start_node(SyntaxKind::Error);
            self.bump();
            self.finish_node();
        }
    }

    /// Spans from the opening delimiter to the current token, so everything
    /// the unclosed group swallowed is covered.
    pub(super) fn error_unclosed(
        &mut self,
        kind: DiagnosticKind,
        message: impl Into<String>,
        note: impl Into<String>,
        opened: TextRange,
    ) {
        let current = self.current_span();
        if self.last_report == Some(current.start()) {
            return;
        }
        self.last_report = Some(current.start());
        self.diagnostics
            .report(kind, opened.cover(current))
            .message(message)
            .related_to(note, opened)
            .emit();
    }

    pub(super) fn error_fixable(
        &mut self,
        kind: DiagnosticKind,
        range: TextRange,
        message: impl Into<String>,
        fix_label: impl Into<String>,
        fix_edit: impl Into<String>,
    ) {
        if let Some(builder) = self.report(kind, range) {
            builder
                .message(message)
                .fix(fix_label, fix_edit)
                .emit();
        }
    }
}
