//! Recursive-descent evaluator for compiled grammars.
//!
//! Every expression evaluates to `Ok(Some(end))` on a match, `Ok(None)` on an
//! ordinary match failure (the caller backtracks), or `Err` for conditions
//! that abort the whole parse.

use peglet_core::{Expr, Grammar, Rule, RuleId};

use super::action::Actions;
use super::error::RuntimeError;
use super::frame::Frame;
use super::memo::{MemoEntry, MemoKey, MemoTable};
use super::outcome::{ParseOutcome, ParseStats, SyntaxError};
use super::semantic::SemanticValues;
use super::trace::{NoopTracer, Tracer};
use super::value::Value;

type MatchResult = Result<Option<usize>, RuntimeError>;

const DEFAULT_EXEC_FUEL: u32 = 1_000_000;
const DEFAULT_RECURSION_LIMIT: u32 = 256;

/// Runtime limits for a parse.
#[derive(Clone, Copy, Debug)]
pub struct FuelLimits {
    /// Maximum rule invocations (default: 1,000,000).
    pub(crate) exec_fuel: u32,
    /// Maximum rule nesting depth (default: 256).
    ///
    /// Each nested rule costs several evaluator frames, so the default stays
    /// within a 2 MiB thread stack in unoptimized builds.
    pub(crate) recursion_limit: u32,
}

impl Default for FuelLimits {
    fn default() -> Self {
        Self {
            exec_fuel: DEFAULT_EXEC_FUEL,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }
}

impl FuelLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exec_fuel(mut self, fuel: u32) -> Self {
        self.exec_fuel = fuel;
        self
    }

    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn get_exec_fuel(&self) -> u32 {
        self.exec_fuel
    }
    pub fn get_recursion_limit(&self) -> u32 {
        self.recursion_limit
    }
}

/// A configured evaluator over one grammar.
///
/// The VM borrows the grammar and actions immutably; every call to
/// [`parse`](VM::parse) allocates its own context, so one VM can serve
/// concurrent parses.
pub struct VM<'g> {
    grammar: &'g Grammar,
    actions: Option<&'g Actions>,
    start: RuleId,
    packrat: bool,
    full_match: bool,
    limits: FuelLimits,
}

/// Builder for VM instances.
pub struct VMBuilder<'g> {
    grammar: &'g Grammar,
    actions: Option<&'g Actions>,
    start: RuleId,
    packrat: bool,
    full_match: bool,
    limits: FuelLimits,
}

impl<'g> VMBuilder<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self {
            grammar,
            actions: None,
            start: grammar.start(),
            packrat: false,
            full_match: true,
            limits: FuelLimits::default(),
        }
    }

    pub fn actions(mut self, actions: &'g Actions) -> Self {
        self.actions = Some(actions);
        self
    }

    /// Memoize rule results per input offset.
    pub fn packrat(mut self, enabled: bool) -> Self {
        self.packrat = enabled;
        self
    }

    /// Require the start rule to consume the whole input.
    pub fn full_match(mut self, enabled: bool) -> Self {
        self.full_match = enabled;
        self
    }

    pub fn limits(mut self, limits: FuelLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn exec_fuel(mut self, fuel: u32) -> Self {
        self.limits = self.limits.exec_fuel(fuel);
        self
    }

    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.limits = self.limits.recursion_limit(limit);
        self
    }

    pub fn start(mut self, rule: RuleId) -> Self {
        self.start = rule;
        self
    }

    pub fn start_rule(self, name: &str) -> Result<Self, RuntimeError> {
        let id = self
            .grammar
            .rule_id(name)
            .ok_or_else(|| RuntimeError::UnknownRule(name.to_owned()))?;
        Ok(self.start(id))
    }

    pub fn build(self) -> VM<'g> {
        VM {
            grammar: self.grammar,
            actions: self.actions,
            start: self.start,
            packrat: self.packrat,
            full_match: self.full_match,
            limits: self.limits,
        }
    }
}

impl<'g> VM<'g> {
    pub fn builder(grammar: &'g Grammar) -> VMBuilder<'g> {
        VMBuilder::new(grammar)
    }

    /// Parses `input` from the start rule.
    ///
    /// This is a convenience method that uses `NoopTracer`, which gets
    /// completely optimized away at compile time.
    pub fn parse(&self, input: &str) -> Result<ParseOutcome, RuntimeError> {
        self.parse_with(input, &mut NoopTracer)
    }

    /// Parses with a tracer for debugging.
    pub fn parse_with<T: Tracer>(
        &self,
        input: &str,
        tracer: &mut T,
    ) -> Result<ParseOutcome, RuntimeError> {
        let mut ctx = ParseContext::new(self, input, tracer);
        let mut frame = Frame::default();

        let pos = ctx.skip(0, false)?;
        let matched = ctx.call_rule(self.start, pos, false, &mut frame)?;

        let (end, consumed) = match matched {
            Some(end) => {
                let end = ctx.skip(end, false)?;
                (Some(end), end)
            }
            None => (None, 0),
        };

        match end {
            Some(end) if !self.full_match || end == input.len() => {
                let value = frame.values.pop().unwrap_or_default();
                let stats = ctx.stats();
                Ok(ParseOutcome::success(value, consumed, stats))
            }
            Some(end) => {
                ctx.expect(end, || "end of input".to_owned());
                let stats = ctx.stats();
                Ok(ParseOutcome::failure(ctx.into_error(), consumed, stats))
            }
            None => {
                let stats = ctx.stats();
                Ok(ParseOutcome::failure(ctx.into_error(), consumed, stats))
            }
        }
    }
}

/// State of a single parse.
struct ParseContext<'g, 'i, 't, T: Tracer> {
    grammar: &'g Grammar,
    actions: Option<&'g Actions>,
    input: &'i str,
    limits: FuelLimits,
    memo: Option<MemoTable>,
    tracer: &'t mut T,

    exec_fuel: u32,
    depth: u32,
    /// Inside the skip expression; no nested skipping.
    skipping: bool,
    /// Failures are not recorded while > 0.
    quiet: u32,

    furthest: usize,
    expected: Vec<String>,

    rule_calls: usize,
    memo_hits: usize,
}

impl<'g, 'i, 't, T: Tracer> ParseContext<'g, 'i, 't, T> {
    fn new(vm: &VM<'g>, input: &'i str, tracer: &'t mut T) -> Self {
        Self {
            grammar: vm.grammar,
            actions: vm.actions,
            input,
            limits: vm.limits,
            memo: vm.packrat.then(MemoTable::new),
            tracer,
            exec_fuel: vm.limits.get_exec_fuel(),
            depth: 0,
            skipping: false,
            quiet: 0,
            furthest: 0,
            expected: Vec::new(),
            rule_calls: 0,
            memo_hits: 0,
        }
    }

    fn stats(&self) -> ParseStats {
        ParseStats {
            rule_calls: self.rule_calls,
            memo_hits: self.memo_hits,
            memo_entries: self.memo.as_ref().map_or(0, MemoTable::len),
        }
    }

    fn into_error(self) -> SyntaxError {
        SyntaxError {
            offset: self.furthest,
            expected: self.expected,
        }
    }

    /// Records a failed terminal attempt for error reporting.
    fn expect(&mut self, pos: usize, describe: impl FnOnce() -> String) {
        if self.quiet > 0 || pos < self.furthest {
            return;
        }
        if pos > self.furthest {
            self.furthest = pos;
            self.expected.clear();
        }
        let description = describe();
        if !self.expected.contains(&description) {
            self.expected.push(description);
        }
    }

    fn fail(&mut self, pos: usize, expr: &Expr) -> MatchResult {
        let grammar = self.grammar;
        self.expect(pos, || grammar.display_expr(expr).to_string());
        Ok(None)
    }

    /// Applies the `%whitespace` expression at `pos` outside token context.
    fn skip(&mut self, pos: usize, no_skip: bool) -> Result<usize, RuntimeError> {
        if no_skip || self.skipping {
            return Ok(pos);
        }
        let grammar = self.grammar;
        let Some(whitespace) = grammar.whitespace() else {
            return Ok(pos);
        };

        self.skipping = true;
        self.quiet += 1;
        let mut scratch = Frame::default();
        let result = self.eval(whitespace, pos, true, &mut scratch);
        self.skipping = false;
        self.quiet -= 1;

        Ok(result?.unwrap_or(pos))
    }

    fn eval(
        &mut self,
        expr: &'g Expr,
        pos: usize,
        no_skip: bool,
        frame: &mut Frame,
    ) -> MatchResult {
        match expr {
            Expr::Literal { .. } | Expr::Class(_) | Expr::Any => {
                self.eval_terminal(expr, pos, no_skip)
            }
            Expr::Ref(id) => {
                let pos = self.skip(pos, no_skip)?;
                self.call_rule(*id, pos, no_skip, frame)
            }
            Expr::Seq(items) => {
                let mark = frame.mark();
                let mut cur = pos;
                for item in items {
                    match self.eval(item, cur, no_skip, frame)? {
                        Some(end) => cur = end,
                        None => {
                            frame.restore(mark);
                            return Ok(None);
                        }
                    }
                }
                Ok(Some(cur))
            }
            Expr::Choice(alternatives) => {
                for alt in alternatives {
                    let mark = frame.mark();
                    if let Some(end) = self.eval(alt, pos, no_skip, frame)? {
                        return Ok(Some(end));
                    }
                    frame.restore(mark);
                }
                Ok(None)
            }
            Expr::Repeat { inner, min, max } => {
                self.eval_repeat(inner, *min, *max, pos, no_skip, frame)
            }
            Expr::And(inner) => self.eval_lookahead(expr, inner, false, pos, no_skip),
            Expr::Not(inner) => self.eval_lookahead(expr, inner, true, pos, no_skip),
            Expr::Capture(inner) => self.eval_capture(inner, pos, no_skip, frame),
        }
    }

    /// Literals, classes and `.`, after skipping whitespace.
    fn eval_terminal(&mut self, expr: &'g Expr, pos: usize, no_skip: bool) -> MatchResult {
        let pos = self.skip(pos, no_skip)?;
        let len = match expr {
            Expr::Literal { text, ignore_case } => {
                let rest = self.input.get(pos..).unwrap_or_default();
                match_literal(rest, text, *ignore_case)
            }
            Expr::Class(class) => self
                .next_char(pos)
                .filter(|&c| class.contains(c))
                .map(char::len_utf8),
            _ => self.next_char(pos).map(char::len_utf8),
        };
        match len {
            Some(len) => Ok(Some(pos + len)),
            None => self.fail(pos, expr),
        }
    }

    /// `&e` and `!e`: never consume, never contribute values.
    fn eval_lookahead(
        &mut self,
        expr: &'g Expr,
        inner: &'g Expr,
        negative: bool,
        pos: usize,
        no_skip: bool,
    ) -> MatchResult {
        let mut scratch = Frame::default();
        if negative {
            self.quiet += 1;
        }
        let matched = self.eval(inner, pos, no_skip, &mut scratch);
        if negative {
            self.quiet -= 1;
        }
        match (matched?, negative) {
            (Some(_), false) | (None, true) => Ok(Some(pos)),
            (None, false) => Ok(None),
            (Some(_), true) => self.fail(pos, expr),
        }
    }

    fn eval_capture(
        &mut self,
        inner: &'g Expr,
        pos: usize,
        no_skip: bool,
        frame: &mut Frame,
    ) -> MatchResult {
        let start = self.skip(pos, no_skip)?;
        let mark = frame.mark();
        match self.eval(inner, start, true, frame)? {
            Some(end) => {
                frame.tokens.push(start..end);
                Ok(Some(end))
            }
            None => {
                frame.restore(mark);
                Ok(None)
            }
        }
    }

    fn eval_repeat(
        &mut self,
        inner: &'g Expr,
        min: u32,
        max: Option<u32>,
        pos: usize,
        no_skip: bool,
        frame: &mut Frame,
    ) -> MatchResult {
        let mark = frame.mark();
        let mut count = 0u32;
        let mut cur = pos;

        while max.is_none_or(|max| count < max) {
            let iteration = frame.mark();
            match self.eval(inner, cur, no_skip, frame)? {
                Some(end) if end > cur => {
                    cur = end;
                    count += 1;
                }
                // No progress: further iterations would match the same way.
                Some(_) => {
                    count = count.max(min);
                    break;
                }
                None => {
                    frame.restore(iteration);
                    break;
                }
            }
        }

        if count < min {
            frame.restore(mark);
            return Ok(None);
        }
        Ok(Some(cur))
    }

    /// Invokes a rule at `pos`, pushing its value onto the caller's frame.
    fn call_rule(
        &mut self,
        id: RuleId,
        pos: usize,
        no_skip: bool,
        parent: &mut Frame,
    ) -> MatchResult {
        if self.exec_fuel == 0 {
            return Err(RuntimeError::ExecFuelExhausted(self.limits.exec_fuel));
        }
        self.exec_fuel -= 1;

        let grammar = self.grammar;
        let rule = grammar.get(id).ok_or(RuntimeError::ForeignRule(id))?;
        let key = MemoKey {
            rule: id,
            offset: pos,
            no_skip: no_skip || rule.is_token(),
        };
        if let Some(end) = self.recall(&key, rule, parent) {
            return Ok(end);
        }

        if self.depth >= self.limits.recursion_limit {
            return Err(RuntimeError::RecursionLimitExceeded(
                self.limits.recursion_limit,
            ));
        }

        self.rule_calls += 1;
        self.depth += 1;
        self.tracer.trace_enter(rule.name(), pos);
        let result = self.eval_rule(id, rule, pos, key.no_skip);
        self.depth -= 1;

        let result = result?;
        self.tracer
            .trace_exit(rule.name(), pos, result.as_ref().map(|(end, _)| *end));
        Ok(self.memoize(key, result, parent))
    }

    /// Replays a memoized result, if there is one.
    fn recall(&mut self, key: &MemoKey, rule: &Rule, parent: &mut Frame) -> Option<Option<usize>> {
        let entry = self.memo.as_ref()?.lookup(key)?.clone();
        self.memo_hits += 1;
        self.tracer.trace_memo_hit(rule.name(), key.offset, entry.end());
        Some(match entry {
            MemoEntry::Failed => None,
            MemoEntry::Matched { end, value } => {
                parent.values.push(value);
                Some(end)
            }
        })
    }

    fn memoize(
        &mut self,
        key: MemoKey,
        result: Option<(usize, Value)>,
        parent: &mut Frame,
    ) -> Option<usize> {
        let entry = match result {
            Some((end, value)) => MemoEntry::Matched { end, value },
            None => MemoEntry::Failed,
        };
        let end = entry.end();
        if let MemoEntry::Matched { value, .. } = &entry {
            parent.values.push(value.clone());
        }
        if let Some(memo) = self.memo.as_mut() {
            memo.store(key, entry);
        }
        end
    }

    /// Tries the rule's alternatives in order and reduces the first match.
    fn eval_rule(
        &mut self,
        id: RuleId,
        rule: &'g Rule,
        pos: usize,
        no_skip: bool,
    ) -> Result<Option<(usize, Value)>, RuntimeError> {
        for (choice, alt) in rule.alternatives().iter().enumerate() {
            let mut frame = Frame::default();
            if let Some(end) = self.eval(alt, pos, no_skip, &mut frame)? {
                let value = self.reduce(id, rule, choice, pos, end, frame)?;
                return Ok(Some((end, value)));
            }
            self.tracer.trace_backtrack(rule.name(), choice, pos);
        }
        Ok(None)
    }

    fn reduce(
        &mut self,
        id: RuleId,
        rule: &'g Rule,
        choice: usize,
        start: usize,
        end: usize,
        mut frame: Frame,
    ) -> Result<Value, RuntimeError> {
        let Some(action) = self.actions.and_then(|actions| actions.get(id)) else {
            // Default propagation: a lone child value passes through.
            if frame.values.len() == 1 {
                return Ok(frame.values.pop().unwrap_or_default());
            }
            return Ok(Value::unit());
        };

        self.tracer.trace_action(rule.name(), choice);
        let sv = SemanticValues::new(
            self.input,
            rule.name(),
            choice,
            start..end,
            frame.tokens,
            frame.values,
        );
        action(&sv).map_err(|source| RuntimeError::Action {
            rule: rule.name().to_owned(),
            source,
        })
    }

    fn next_char(&self, pos: usize) -> Option<char> {
        self.input.get(pos..)?.chars().next()
    }
}

/// Length of the matched prefix of `rest`, if it starts with `text`.
fn match_literal(rest: &str, text: &str, ignore_case: bool) -> Option<usize> {
    if !ignore_case {
        return rest.starts_with(text).then_some(text.len());
    }
    let mut len = 0;
    let mut input = rest.chars();
    for expected in text.chars() {
        let c = input.next()?;
        if !chars_eq_ignore_case(c, expected) {
            return None;
        }
        len += c.len_utf8();
    }
    Some(len)
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
