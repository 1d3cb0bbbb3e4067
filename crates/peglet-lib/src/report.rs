//! Rendering of input syntax errors against the parsed text.

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};
use peglet_vm::SyntaxError;

/// Renders `error` as an annotated snippet of `input`.
pub fn render_syntax_error(
    input: &str,
    error: &SyntaxError,
    path: Option<&str>,
    colored: bool,
) -> String {
    let renderer = if colored {
        Renderer::styled()
    } else {
        Renderer::plain()
    };

    let start = error.offset.min(input.len());
    let end = input
        .get(start..)
        .and_then(|rest| rest.chars().next())
        .map_or(start, |c| start + c.len_utf8());

    let label = error.describe_expected();

    let mut snippet = Snippet::source(input)
        .line_start(1)
        .annotation(AnnotationKind::Primary.span(start..end).label(&label));
    if let Some(path) = path {
        snippet = snippet.path(path);
    }

    let title = if start == input.len() {
        "unexpected end of input"
    } else {
        "syntax error"
    };
    let report = vec![Level::ERROR.primary_title(title).element(snippet)];
    renderer.render(&report).to_string()
}
