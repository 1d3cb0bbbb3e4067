use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::{ARROWS, DEF_NAMES};

impl Parser<'_> {
    pub fn parse_root(&mut self) {
        self.start_node(SyntaxKind::Root);

        while !self.should_stop() {
            if self.at_any(DEF_NAMES) {
                self.parse_def();
                continue;
            }
            self.skip_to_next_def();
        }

        self.eat_trivia();
        self.finish_node();
    }

    /// Wraps everything up to the next definition start in an `Error` node.
    pub(crate) fn skip_to_next_def(&mut self) {
        if self.should_stop() || self.at_def_start() {
            return;
        }

        let text = self.current_text();
        self.error_msg(
            DiagnosticKind::UnexpectedToken,
            format!("`{text}` outside of a definition"),
        );

        self.start_node(SyntaxKind::Error);
        while !self.should_stop() && !self.at_def_start() {
            self.bump();
            self.skip_trivia();
        }
        self.finish_node();
    }

    /// LL(2): a name followed by `<-` (or the mistaken `=`).
    pub(crate) fn at_def_start(&mut self) -> bool {
        self.at_any(DEF_NAMES) && self.peek_any(ARROWS)
    }

    /// `Name <- expr` | `%directive <- expr`
    fn parse_def(&mut self) {
        self.start_node(SyntaxKind::Def);
        self.bump(); // name

        match self.current() {
            SyntaxKind::Arrow => self.bump(),
            SyntaxKind::Equals => {
                let span = self.current_span();
                self.error_fixable(
                    DiagnosticKind::ExpectedArrow,
                    span,
                    "found `=`",
                    "use `<-`",
                    "<-",
                );
                self.bump();
            }
            _ => self.error_msg(DiagnosticKind::ExpectedArrow, "after rule name"),
        }

        if self.at_item_start() {
            self.parse_choice();
        } else {
            self.error_msg(DiagnosticKind::ExpectedExpression, "for rule body");
        }

        self.finish_node();
    }
}
