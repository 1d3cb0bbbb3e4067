use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;

impl Parser<'_> {
    /// Returns `false` when nothing could be parsed at the current position.
    pub(crate) fn parse_primary(&mut self) -> bool {
        match self.current() {
            SyntaxKind::ParenOpen => self.parse_group(
                SyntaxKind::Group,
                SyntaxKind::ParenClose,
                DiagnosticKind::UnclosedGroup,
                "group",
            ),
            SyntaxKind::AngleOpen => self.parse_group(
                SyntaxKind::Capture,
                SyntaxKind::AngleClose,
                DiagnosticKind::UnclosedCapture,
                "capture",
            ),
            SyntaxKind::Id => self.parse_leaf(SyntaxKind::Ref),
            SyntaxKind::StrLit => self.parse_leaf(SyntaxKind::Literal),
            SyntaxKind::ClassLit => self.parse_leaf(SyntaxKind::Class),
            SyntaxKind::Dot => self.parse_leaf(SyntaxKind::Any),
            SyntaxKind::UnterminatedStr => {
                self.start_node(SyntaxKind::Literal);
                self.error(DiagnosticKind::UnterminatedLiteral);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::UnterminatedClass => {
                self.start_node(SyntaxKind::Class);
                self.error(DiagnosticKind::UnterminatedClass);
                self.bump();
                self.finish_node();
            }
            _ => {
                self.error(DiagnosticKind::ExpectedExpression);
                return false;
            }
        }
        true
    }

    fn parse_leaf(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        self.finish_node();
    }

    /// `'(' choice ')'` | `'<' choice '>'`
    ///
    /// Stray tokens inside are reported and skipped; the group ends at its
    /// closing delimiter, at the next definition, or at end of input.
    fn parse_group(
        &mut self,
        kind: SyntaxKind,
        close: SyntaxKind,
        unclosed: DiagnosticKind,
        construct: &str,
    ) {
        self.start_node(kind);
        let open_span = self.push_delimiter();
        self.bump();

        if self.at_item_start() {
            self.parse_choice();
        } else {
            self.error_msg(DiagnosticKind::ExpectedExpression, format!("inside {construct}"));
        }

        loop {
            if self.at(close) {
                self.pop_delimiter();
                self.bump();
                break;
            }
            if self.should_stop() || self.at_def_start() {
                self.pop_delimiter();
                let delim = match close {
                    SyntaxKind::ParenClose => "`)`",
                    _ => "`>`",
                };
                self.error_unclosed(
                    unclosed,
                    format!("expected {delim}"),
                    format!("{construct} started here"),
                    open_span,
                );
                break;
            }
            if self.at_item_start() {
                self.parse_choice();
                continue;
            }
            let text = self.current_text();
            self.error_and_skip(DiagnosticKind::UnexpectedToken, format!("`{text}`"));
        }

        self.finish_node();
    }
}
