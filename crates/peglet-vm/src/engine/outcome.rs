//! Parse results.

use std::any::Any;

use super::value::Value;

/// Counters collected during one parse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ParseStats {
    /// Rule invocations that evaluated a rule body.
    pub rule_calls: usize,
    /// Rule invocations answered from the memo table.
    pub memo_hits: usize,
    /// Memo table size at the end of the parse.
    pub memo_entries: usize,
}

/// Input did not match: furthest failure offset and what was expected there.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, thiserror::Error)]
#[error("syntax error at offset {offset}: {}", describe_expected(.expected))]
pub struct SyntaxError {
    pub offset: usize,
    /// Terminals tried at `offset`, in first-attempt order.
    pub expected: Vec<String>,
}

impl SyntaxError {
    /// 1-based line and column (in characters) of the error in `input`.
    pub fn line_col(&self, input: &str) -> (usize, usize) {
        let offset = self.offset.min(input.len());
        let before = input.get(..offset).unwrap_or(input);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        (line, column)
    }

    /// `expected 'a', 'b' or 'c'`, or `unexpected input` when nothing was tried.
    pub fn describe_expected(&self) -> String {
        describe_expected(&self.expected)
    }
}

fn describe_expected(expected: &[String]) -> String {
    match expected {
        [] => "unexpected input".to_owned(),
        [one] => format!("expected {one}"),
        [init @ .., last] => format!("expected {} or {last}", init.join(", ")),
    }
}

#[derive(Clone, Debug)]
pub struct ParseOutcome {
    value: Option<Value>,
    consumed: usize,
    error: Option<SyntaxError>,
    stats: ParseStats,
}

impl ParseOutcome {
    pub(crate) fn success(value: Value, consumed: usize, stats: ParseStats) -> Self {
        Self {
            value: Some(value),
            consumed,
            error: None,
            stats,
        }
    }

    pub(crate) fn failure(error: SyntaxError, consumed: usize, stats: ParseStats) -> Self {
        Self {
            value: None,
            consumed,
            error: Some(error),
            stats,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Value of the start rule; `None` on failure.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn value_as<T: Any>(&self) -> Option<&T> {
        self.value.as_ref()?.downcast_ref()
    }

    pub fn into_value(self) -> Option<Value> {
        self.value
    }

    /// Bytes matched by the start rule, including trailing skipped whitespace.
    ///
    /// On a full-match failure this is how far the start rule got.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn error(&self) -> Option<&SyntaxError> {
        self.error.as_ref()
    }

    pub fn error_position(&self) -> Option<usize> {
        self.error.as_ref().map(|e| e.offset)
    }

    pub fn stats(&self) -> ParseStats {
        self.stats
    }
}
