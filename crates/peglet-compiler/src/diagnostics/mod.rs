//! Grammar diagnostics: collection, cascade filtering and rendering.

mod message;
mod printer;


use std::fmt;

use rowan::TextRange;

pub use message::{DiagnosticKind, DiagnosticMessage, Severity};
pub use printer::DiagnosticsPrinter;

use message::{Cascade, Fix, Note};

/// Diagnostics in the order the compiler passes reported them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics(Vec<DiagnosticMessage>);

/// A diagnostic under construction. Nothing is recorded until [`emit`](Self::emit).
#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    sink: &'a mut Vec<DiagnosticMessage>,
    pending: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a `kind` diagnostic at `range` with the kind's summary as its
    /// message.
    pub fn report(&mut self, kind: DiagnosticKind, range: TextRange) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            sink: &mut self.0,
            pending: DiagnosticMessage::new(kind, range),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiagnosticMessage> {
        self.0.iter()
    }

    fn count(&self, severity: Severity) -> usize {
        self.0.iter().filter(|d| d.severity() == severity).count()
    }

    pub fn has_errors(&self) -> bool {
        self.first_error().is_some()
    }

    pub fn has_warnings(&self) -> bool {
        self.0.iter().any(DiagnosticMessage::is_warning)
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn first_error(&self) -> Option<&DiagnosticMessage> {
        self.0.iter().find(|d| d.is_error())
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    /// Drops diagnostics that are most likely fallout of another one.
    ///
    /// `b` is hidden by `a` when `a`'s suppression range starts strictly
    /// before and covers `b`, and `a` has the higher priority. At a shared
    /// start offset, a missing-piece error hides an unclosed-delimiter error
    /// and otherwise priority decides. A hidden diagnostic hides nothing.
    pub fn filtered(&self) -> Diagnostics {
        let all = &self.0;
        let mut hidden = vec![false; all.len()];
        for (i, a) in all.iter().enumerate() {
            for (j, b) in all.iter().enumerate() {
                if i != j && !hidden[i] && !hidden[j] && hides(a, b) {
                    hidden[j] = true;
                }
            }
        }

        all.iter()
            .zip(hidden)
            .filter_map(|(d, gone)| (!gone).then(|| d.clone()))
            .collect()
    }

    pub fn printer<'s>(&self) -> DiagnosticsPrinter<'s> {
        DiagnosticsPrinter::new(self.0.clone())
    }

    pub fn filtered_printer<'s>(&self) -> DiagnosticsPrinter<'s> {
        DiagnosticsPrinter::new(self.filtered().0)
    }

    pub fn render(&self, source: &str) -> String {
        self.render_colored(source, false)
    }

    pub fn render_colored(&self, source: &str, colored: bool) -> String {
        self.filtered_printer()
            .source(source)
            .colored(colored)
            .render()
    }
}

fn hides(a: &DiagnosticMessage, b: &DiagnosticMessage) -> bool {
    let cover = a.suppression_range;
    if cover.start() < b.range.start() && b.range.end() <= cover.end() && a.kind.outranks(b.kind) {
        return true;
    }
    if a.range.start() != b.range.start() {
        return false;
    }
    match (a.kind.cascade(), b.kind.cascade()) {
        (Cascade::Structural, Cascade::RootCause) => false,
        (Cascade::RootCause, Cascade::Structural) => true,
        _ => a.kind.outranks(b.kind),
    }
}

impl IntoIterator for Diagnostics {
    type Item = DiagnosticMessage;
    type IntoIter = std::vec::IntoIter<DiagnosticMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a DiagnosticMessage;
    type IntoIter = std::slice::Iter<'a, DiagnosticMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<DiagnosticMessage> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = DiagnosticMessage>>(iter: I) -> Self {
        Self(Vec::from_iter(iter))
    }
}

/// One diagnostic per line.
impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        for diag in &self.0 {
            write!(f, "{sep}{diag}")?;
            sep = "\n";
        }
        Ok(())
    }
}

impl DiagnosticBuilder<'_> {
    /// Replaces the summary with the kind's phrasing of `detail`.
    pub fn message(mut self, detail: impl Into<String>) -> Self {
        self.pending.message = self.pending.kind.describe(&detail.into());
        self
    }

    pub fn suppression_range(mut self, range: TextRange) -> Self {
        self.pending.suppression_range = range;
        self
    }

    pub fn related_to(mut self, text: impl Into<String>, range: TextRange) -> Self {
        self.pending.notes.push(Note {
            range,
            text: text.into(),
        });
        self
    }

    /// Suggests replacing the primary range with `edit`.
    pub fn fix(mut self, label: impl Into<String>, edit: impl Into<String>) -> Self {
        self.pending.fix = Some(Fix {
            label: label.into(),
            edit: edit.into(),
        });
        self
    }

    pub fn emit(self) {
        self.sink.push(self.pending);
    }
}
