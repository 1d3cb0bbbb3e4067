use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::{EXPR_FIRST, PREDICATES, QUANTIFIERS};

impl Parser<'_> {
    /// Whether the current token can start a sequence item.
    ///
    /// An identifier followed by `<-` starts the next definition instead.
    pub(crate) fn at_item_start(&mut self) -> bool {
        self.at_any(EXPR_FIRST) && !self.at_def_start()
    }

    /// `seq ('/' seq)*`
    pub(crate) fn parse_choice(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_seq();

        if !self.at(SyntaxKind::Slash) {
            return;
        }

        self.start_node_at(checkpoint, SyntaxKind::Choice);
        while self.at(SyntaxKind::Slash) && !self.is_halted() {
            self.bump();
            if self.at_item_start() {
                self.parse_seq();
            } else {
                self.error_msg(DiagnosticKind::ExpectedExpression, "after `/`");
            }
        }
        self.finish_node();
    }

    /// Juxtaposed items; wrapped in `Seq` only when there is more than one.
    fn parse_seq(&mut self) {
        let checkpoint = self.checkpoint();
        let mut count = 0;

        while !self.should_stop() {
            if self.at_item_start() {
                self.parse_prefix();
                count += 1;
                continue;
            }
            if self.at(SyntaxKind::Garbage) {
                let text = self.current_text();
                self.error_and_skip(DiagnosticKind::UnexpectedToken, format!("`{text}`"));
                continue;
            }
            break;
        }

        if count > 1 {
            self.start_node_at(checkpoint, SyntaxKind::Seq);
            self.finish_node();
        }
    }

    /// `('&' / '!')? suffix`
    fn parse_prefix(&mut self) {
        if !self.descend() {
            self.start_node(SyntaxKind::Error);
            while !self.eof() {
                self.bump();
            }
            self.finish_node();
            return;
        }

        if self.at_any(PREDICATES) {
            self.start_node(SyntaxKind::Prefix);
            self.bump();
            if self.at_item_start() {
                self.parse_prefix();
            } else {
                self.error_msg(DiagnosticKind::ExpectedExpression, "after predicate");
            }
            self.finish_node();
        } else {
            self.parse_suffix();
        }

        self.ascend();
    }

    /// `primary ('?' / '*' / '+' / '{' n? (',' m?)? '}')*`
    fn parse_suffix(&mut self) {
        let checkpoint = self.checkpoint();
        if !self.parse_primary() {
            return;
        }

        while self.at_any(QUANTIFIERS) && !self.is_halted() {
            self.start_node_at(checkpoint, SyntaxKind::Suffix);
            if self.at(SyntaxKind::BraceOpen) {
                self.parse_bounds();
            } else {
                self.bump();
            }
            self.finish_node();
        }
    }

    /// `{n}` | `{n,}` | `{,m}` | `{n,m}`; values are checked during lowering.
    fn parse_bounds(&mut self) {
        self.push_delimiter();
        self.bump(); // consume '{'

        self.eat(SyntaxKind::Number);
        if self.eat(SyntaxKind::Comma) {
            self.eat(SyntaxKind::Number);
        }

        self.pop_delimiter();
        self.expect(SyntaxKind::BraceClose, "closing `}` for repetition bounds");
    }
}
