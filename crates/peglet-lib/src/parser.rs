//! The parser facade: a compiled grammar plus bound actions and options.

use std::any::Any;
use std::sync::Arc;

use peglet_core::{Grammar, RuleId};
use peglet_vm::{
    ActionError, Actions, FuelLimits, NoopTracer, ParseOutcome, SemanticValues, Tracer, VM,
    Value, tree_actions,
};

use crate::{Error, Result, compile};

/// A ready-to-use parser.
///
/// Configuration methods take `&mut self`; parsing takes `&self` and keeps
/// all per-parse state local, so a configured parser can be shared between
/// threads.
#[derive(Debug, Clone)]
pub struct Parser {
    grammar: Grammar,
    actions: Actions,
    packrat: bool,
    full_match: bool,
    limits: FuelLimits,
}

impl Parser {
    /// Compiles `grammar` text.
    pub fn new(grammar: &str) -> Result<Self> {
        Ok(Self::from_grammar(compile(grammar)?))
    }

    pub fn from_grammar(grammar: Grammar) -> Self {
        let actions = Actions::new(&grammar);
        Self {
            grammar,
            actions,
            packrat: false,
            full_match: true,
            limits: FuelLimits::default(),
        }
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    fn rule_id(&self, rule: &str) -> Result<RuleId> {
        self.grammar
            .rule_id(rule)
            .ok_or_else(|| Error::UnknownRule(rule.to_owned()))
    }

    /// Binds a semantic action to `rule`, replacing any previous one.
    pub fn bind<T, F>(&mut self, rule: &str, action: F) -> Result<&mut Self>
    where
        T: Any + Send + Sync,
        F: Fn(&SemanticValues<'_>) -> std::result::Result<T, ActionError> + Send + Sync + 'static,
    {
        let id = self.rule_id(rule)?;
        self.actions.bind(
            id,
            Arc::new(move |sv: &SemanticValues<'_>| action(sv).map(Value::new)),
        );
        Ok(self)
    }

    /// Binds an action that always yields a clone of `value`.
    pub fn bind_value<T>(&mut self, rule: &str, value: T) -> Result<&mut Self>
    where
        T: Any + Clone + Send + Sync,
    {
        self.bind(rule, move |_| Ok(value.clone()))
    }

    pub fn unbind(&mut self, rule: &str) -> Result<&mut Self> {
        let id = self.rule_id(rule)?;
        self.actions.unbind(id);
        Ok(self)
    }

    /// Replaces all actions with ones that build a [`peglet_vm::SyntaxTree`].
    pub fn bind_syntax_tree(&mut self) -> &mut Self {
        self.actions = tree_actions(&self.grammar);
        self
    }

    pub fn enable_packrat_parsing(&mut self) -> &mut Self {
        self.packrat(true)
    }

    pub fn packrat(&mut self, enabled: bool) -> &mut Self {
        self.packrat = enabled;
        self
    }

    /// When disabled, a prefix match of the input is a success.
    pub fn require_full_match(&mut self, enabled: bool) -> &mut Self {
        self.full_match = enabled;
        self
    }

    pub fn limits(&mut self, limits: FuelLimits) -> &mut Self {
        self.limits = limits;
        self
    }

    /// Starts parsing from `rule` instead of the grammar's start rule.
    pub fn start(&mut self, rule: &str) -> Result<&mut Self> {
        let id = self.rule_id(rule)?;
        self.grammar.set_start(id);
        Ok(self)
    }

    /// Overrides whether whitespace is skipped inside `rule`.
    pub fn set_token_rule(&mut self, rule: &str, token: bool) -> Result<&mut Self> {
        let id = self.rule_id(rule)?;
        self.grammar.set_token(id, token);
        Ok(self)
    }

    fn vm(&self) -> VM<'_> {
        VM::builder(&self.grammar)
            .actions(&self.actions)
            .packrat(self.packrat)
            .full_match(self.full_match)
            .limits(self.limits)
            .build()
    }

    /// Parses `input`.
    ///
    /// A non-matching input is `Ok` with a failed [`ParseOutcome`]; `Err` is
    /// reserved for action failures and exhausted limits.
    pub fn parse(&self, input: &str) -> Result<ParseOutcome> {
        self.parse_with(input, &mut NoopTracer)
    }

    pub fn parse_with<T: Tracer>(&self, input: &str, tracer: &mut T) -> Result<ParseOutcome> {
        Ok(self.vm().parse_with(input, tracer)?)
    }
}
