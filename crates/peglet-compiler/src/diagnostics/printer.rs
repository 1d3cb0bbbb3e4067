//! Source-annotated rendering of diagnostics.

use std::fmt::Write;
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Patch, Renderer, Snippet};
use rowan::TextRange;

use super::message::{DiagnosticMessage, Severity};

/// Renders diagnostics as annotated snippets of the grammar source.
///
/// Without a source, each diagnostic is printed on its own line using its
/// `Display` form.
pub struct DiagnosticsPrinter<'s> {
    messages: Vec<DiagnosticMessage>,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'s> DiagnosticsPrinter<'s> {
    pub(crate) fn new(messages: Vec<DiagnosticMessage>) -> Self {
        Self {
            messages,
            source: None,
            path: None,
            colored: false,
        }
    }

    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    /// File name shown in the snippet header.
    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let renderer = match self.colored {
            true => Renderer::styled(),
            false => Renderer::plain(),
        };

        for (i, diag) in self.messages.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            match self.source {
                Some(source) => {
                    let groups = self.groups(source, diag);
                    write!(w, "{}", renderer.render(&groups))?;
                }
                None => write!(w, "{diag}")?,
            }
        }
        Ok(())
    }

    /// The titled snippet for `diag`, plus a help group with the patched
    /// source when a fix is attached.
    fn groups<'a>(&self, source: &'a str, diag: &'a DiagnosticMessage) -> Vec<Group<'a>>
    where
        's: 'a,
    {
        let primary = caret_range(diag.range, source.len());

        let mut snippet = Snippet::source(source).line_start(1).annotation(
            AnnotationKind::Primary
                .span(primary.clone())
                .label(&diag.message),
        );
        if let Some(path) = self.path {
            snippet = snippet.path(path);
        }
        for note in &diag.notes {
            snippet = snippet.annotation(
                AnnotationKind::Context
                    .span(caret_range(note.range, source.len()))
                    .label(&note.text),
            );
        }

        let level = match diag.severity() {
            Severity::Error => Level::ERROR,
            Severity::Warning => Level::WARNING,
        };
        let mut groups = vec![level.primary_title(&diag.message).element(snippet)];

        if let Some(fix) = &diag.fix {
            let patched = Snippet::source(source)
                .line_start(1)
                .patch(Patch::new(primary, &fix.edit));
            groups.push(Level::HELP.secondary_title(&fix.label).element(patched));
        }
        groups
    }
}

/// Byte range for annotation; an empty range covers one byte so the caret
/// shows up, clamped to the end of the source.
fn caret_range(range: TextRange, len: usize) -> Range<usize> {
    let start = usize::from(range.start());
    let end = usize::from(range.end());
    if start == end {
        start..(start + 1).min(len)
    } else {
        start..end
    }
}
