//! Per-rule-invocation value and capture lists.
//!
//! Frames only grow while a rule body is evaluated; backtracking truncates
//! them to a saved [`FrameMark`].

use std::ops::Range;

use super::value::Value;

#[derive(Debug, Default)]
pub struct Frame {
    pub values: Vec<Value>,
    pub tokens: Vec<Range<usize>>,
}

#[derive(Clone, Copy, Debug)]
pub struct FrameMark {
    values: usize,
    tokens: usize,
}

impl Frame {
    #[inline]
    pub fn mark(&self) -> FrameMark {
        FrameMark {
            values: self.values.len(),
            tokens: self.tokens.len(),
        }
    }

    #[inline]
    pub fn restore(&mut self, mark: FrameMark) {
        self.values.truncate(mark.values);
        self.tokens.truncate(mark.tokens);
    }
}
