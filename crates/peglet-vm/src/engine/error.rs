//! Errors that abort a parse.
//!
//! An input that simply does not match is not an error here; it is reported
//! as a failed [`ParseOutcome`](super::ParseOutcome).

use peglet_core::RuleId;

use super::action::ActionError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum RuntimeError {
    /// A semantic action returned an error.
    #[error("action for rule `{rule}` failed: {source}")]
    Action {
        rule: String,
        #[source]
        source: ActionError,
    },

    /// Execution fuel exhausted (too many rule invocations).
    #[error("runtime execution limit exceeded ({0} rule calls)")]
    ExecFuelExhausted(u32),

    /// Too many nested rule invocations.
    #[error("runtime recursion limit exceeded (depth {0})")]
    RecursionLimitExceeded(u32),

    #[error("unknown rule `{0}`")]
    UnknownRule(String),

    /// A rule id outside the grammar's rule table.
    #[error("rule #{} does not belong to this grammar", .0.index())]
    ForeignRule(RuleId),
}
