//! The view of a successful rule match handed to its semantic action.

use std::any::{Any, type_name};
use std::ops::Range;
use std::str::FromStr;

use super::action::ActionError;
use super::value::Value;

/// Everything an action can see about the rule match it reduces.
///
/// `values` holds the results of the rule's direct sub-rule matches, in the
/// order they completed. `tokens` holds the spans of the rule's own `<...>`
/// captures; captures inside sub-rules belong to those rules.
#[derive(Debug)]
pub struct SemanticValues<'a> {
    input: &'a str,
    rule: &'a str,
    choice: usize,
    span: Range<usize>,
    tokens: Vec<Range<usize>>,
    values: Vec<Value>,
}

impl<'a> SemanticValues<'a> {
    pub fn new(
        input: &'a str,
        rule: &'a str,
        choice: usize,
        span: Range<usize>,
        tokens: Vec<Range<usize>>,
        values: Vec<Value>,
    ) -> Self {
        Self {
            input,
            rule,
            choice,
            span,
            tokens,
            values,
        }
    }

    pub fn rule(&self) -> &'a str {
        self.rule
    }

    /// Index of the top-level alternative that matched.
    pub fn choice(&self) -> usize {
        self.choice
    }

    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Full text matched by the rule.
    pub fn text(&self) -> &'a str {
        &self.input[self.span.clone()]
    }

    /// First captured token, or the whole match when nothing was captured.
    pub fn token(&self) -> &'a str {
        match self.tokens.first() {
            Some(range) => &self.input[range.clone()],
            None => self.text(),
        }
    }

    pub fn tokens(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.tokens.iter().map(|range| &self.input[range.clone()])
    }

    pub fn token_spans(&self) -> &[Range<usize>] {
        &self.tokens
    }

    /// Parses [`token`](Self::token) with `FromStr`.
    pub fn parse_token<T>(&self) -> Result<T, ActionError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let token = self.token();
        token
            .parse()
            .map_err(|e| ActionError::msg(format!("invalid token `{token}`: {e}")))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Checked borrow of the child value at `index`.
    pub fn get_ref<T: Any>(&self, index: usize) -> Result<&T, ActionError> {
        let value = self.values.get(index).ok_or(ActionError::MissingValue {
            index,
            len: self.values.len(),
        })?;
        value
            .downcast_ref::<T>()
            .ok_or_else(|| ActionError::TypeMismatch {
                index,
                expected: type_name::<T>(),
                found: value.type_name(),
            })
    }

    /// Checked copy of the child value at `index`.
    pub fn get<T: Any + Clone>(&self, index: usize) -> Result<T, ActionError> {
        self.get_ref::<T>(index).cloned()
    }

    /// All child values of type `T`, skipping the rest.
    pub fn collect<T: Any + Clone>(&self) -> Vec<T> {
        self.values.iter().filter_map(Value::get::<T>).collect()
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}
