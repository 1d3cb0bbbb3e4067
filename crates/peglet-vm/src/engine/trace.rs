//! Tracing infrastructure for debugging parses.
//!
//! # Design: Zero-Cost Abstraction
//!
//! The VM is generic over [`Tracer`]. With [`NoopTracer`] every method is an
//! `#[inline(always)]` empty function, so untraced parses carry no tracing
//! cost and no tracing state lives in the evaluator.
//!
//! [`PrintTracer`] keeps its own indentation state and collects one line per
//! event, for `peglet trace`.

use peglet_core::Colors;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Rule enter/exit and memo hits.
    #[default]
    Default,
    /// Also matched text on exit and action calls.
    Verbose,
    /// Also alternative backtracking inside rules.
    VeryVerbose,
}

/// Tracer trait for VM instrumentation.
///
/// - `trace_enter` - before a rule body is evaluated
/// - `trace_exit` - after it matched (`end` is `Some`) or failed
/// - `trace_memo_hit` - when a rule call is answered from the memo table
/// - `trace_action` - before a bound action runs
/// - `trace_backtrack` - when a top-level alternative of a rule fails
pub trait Tracer {
    fn trace_enter(&mut self, rule: &str, offset: usize);

    fn trace_exit(&mut self, rule: &str, offset: usize, end: Option<usize>);

    fn trace_memo_hit(&mut self, rule: &str, offset: usize, end: Option<usize>);

    fn trace_action(&mut self, rule: &str, choice: usize);

    fn trace_backtrack(&mut self, rule: &str, choice: usize, offset: usize);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_enter(&mut self, _rule: &str, _offset: usize) {}

    #[inline(always)]
    fn trace_exit(&mut self, _rule: &str, _offset: usize, _end: Option<usize>) {}

    #[inline(always)]
    fn trace_memo_hit(&mut self, _rule: &str, _offset: usize, _end: Option<usize>) {}

    #[inline(always)]
    fn trace_action(&mut self, _rule: &str, _choice: usize) {}

    #[inline(always)]
    fn trace_backtrack(&mut self, _rule: &str, _choice: usize, _offset: usize) {}
}

const TEXT_BUDGET: usize = 24;

/// Tracer that collects an indented execution trace.
pub struct PrintTracer<'s> {
    /// Parsed input, for matched-text display.
    source: &'s str,
    verbosity: Verbosity,
    lines: Vec<String>,
    depth: usize,
    colors: Colors,
}

impl<'s> PrintTracer<'s> {
    pub fn new(source: &'s str, verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            source,
            verbosity,
            lines: Vec::new(),
            depth: 0,
            colors,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Print all trace lines.
    pub fn print(&self) {
        for line in &self.lines {
            println!("{}", line);
        }
    }

    fn push(&mut self, content: String) {
        let indent = "  ".repeat(self.depth);
        self.lines.push(format!("{indent}{content}"));
    }

    fn rule_name(&self, rule: &str) -> String {
        let c = self.colors;
        format!("{}{}{}", c.rule, rule, c.reset)
    }

    fn matched_text(&self, start: usize, end: usize) -> String {
        let c = self.colors;
        let text = self.source.get(start..end).unwrap_or("?");
        format!(" {}{:?}{}", c.ok, truncate_text(text, TEXT_BUDGET), c.reset)
    }
}

impl Tracer for PrintTracer<'_> {
    fn trace_enter(&mut self, rule: &str, offset: usize) {
        let c = self.colors;
        let name = self.rule_name(rule);
        let line = format!("{}>{} {} {}@{}{}", c.meta, c.reset, name, c.meta, offset, c.reset);
        self.push(line);
        self.depth += 1;
    }

    fn trace_exit(&mut self, rule: &str, offset: usize, end: Option<usize>) {
        self.depth = self.depth.saturating_sub(1);
        let c = self.colors;
        let name = self.rule_name(rule);
        let line = match end {
            Some(end) => {
                let mut line = format!(
                    "{}<{} {} {}{}..{}{}",
                    c.ok, c.reset, name, c.meta, offset, end, c.reset
                );
                if self.verbosity >= Verbosity::Verbose {
                    line.push_str(&self.matched_text(offset, end));
                }
                line
            }
            None => format!("{}x{} {} {}@{}{}", c.fail, c.reset, name, c.meta, offset, c.reset),
        };
        self.push(line);
    }

    fn trace_memo_hit(&mut self, rule: &str, offset: usize, end: Option<usize>) {
        let c = self.colors;
        let result = match end {
            Some(end) => format!("{}{}..{}{}", c.ok, offset, end, c.reset),
            None => format!("{}failed{}", c.fail, c.reset),
        };
        let name = self.rule_name(rule);
        let line = format!(
            "{}={} {} {}@{} memo{} {}",
            c.meta, c.reset, name, c.meta, offset, c.reset, result
        );
        self.push(line);
    }

    fn trace_action(&mut self, rule: &str, choice: usize) {
        if self.verbosity < Verbosity::Verbose {
            return;
        }
        let c = self.colors;
        self.push(format!("{}action {} #{}{}", c.meta, rule, choice, c.reset));
    }

    fn trace_backtrack(&mut self, rule: &str, choice: usize, offset: usize) {
        if self.verbosity < Verbosity::VeryVerbose {
            return;
        }
        let c = self.colors;
        let line = format!("{}backtrack {} #{} @{}{}", c.meta, rule, choice, offset, c.reset);
        self.push(line);
    }
}

/// Truncates to `max` characters, marking the cut with `…`.
fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_owned();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
