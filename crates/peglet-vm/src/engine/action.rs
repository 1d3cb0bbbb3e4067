//! Semantic actions and their binding table.

use std::fmt;
use std::sync::Arc;

use peglet_core::{Grammar, RuleId};

use super::semantic::SemanticValues;
use super::value::Value;

/// Failure reported by a semantic action. Aborts the whole parse.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ActionError {
    #[error("{0}")]
    Message(String),

    #[error("missing value at index {index} ({len} available)")]
    MissingValue { index: usize, len: usize },

    #[error("value at index {index} is `{found}`, expected `{expected}`")]
    TypeMismatch {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error(transparent)]
    Other(Arc<dyn std::error::Error + Send + Sync>),
}

impl ActionError {
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    pub fn other(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Other(Arc::new(error))
    }
}

pub type Action = Arc<dyn Fn(&SemanticValues<'_>) -> Result<Value, ActionError> + Send + Sync>;

/// Per-rule action slots, indexed by [`RuleId`].
#[derive(Clone, Default)]
pub struct Actions {
    slots: Vec<Option<Action>>,
}

impl Actions {
    pub fn new(grammar: &Grammar) -> Self {
        Self {
            slots: vec![None; grammar.len()],
        }
    }

    /// Binds `action` to `rule`, replacing any previous binding.
    pub fn bind(&mut self, rule: RuleId, action: Action) {
        let index = rule.index();
        if index >= self.slots.len() {
            self.slots.resize(index + 1, None);
        }
        self.slots[index] = Some(action);
    }

    pub fn unbind(&mut self, rule: RuleId) {
        if let Some(slot) = self.slots.get_mut(rule.index()) {
            *slot = None;
        }
    }

    pub fn get(&self, rule: RuleId) -> Option<&Action> {
        self.slots.get(rule.index())?.as_ref()
    }

    pub fn is_bound(&self, rule: RuleId) -> bool {
        self.get(rule).is_some()
    }

    pub fn bound_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

impl fmt::Debug for Actions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actions")
            .field("rules", &self.slots.len())
            .field("bound", &self.bound_count())
            .finish()
    }
}
