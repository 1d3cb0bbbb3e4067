//! Compiled grammar representation.
//!
//! Rules live in a dense table indexed by [`RuleId`]. Expressions never own
//! the rules they reference, so recursive and mutually recursive grammars are
//! plain trees with integer back-references.

mod class;
mod printer;


use indexmap::IndexMap;
use serde::Serialize;

pub use class::CharClass;
pub use printer::ExprDisplay;

/// Handle into a grammar's rule table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RuleId(u32);

impl RuleId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A parsing expression.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "op", content = "args", rename_all = "snake_case")]
pub enum Expr {
    /// Exact text; `ignore_case` compares with simple case folding.
    Literal { text: String, ignore_case: bool },
    /// One character from a set of ranges.
    Class(CharClass),
    /// Any single character.
    Any,
    Ref(RuleId),
    Seq(Vec<Expr>),
    /// Ordered choice: first matching alternative wins.
    Choice(Vec<Expr>),
    /// Greedy repetition; `max: None` is unbounded.
    Repeat {
        inner: Box<Expr>,
        min: u32,
        max: Option<u32>,
    },
    /// Positive lookahead, never consumes.
    And(Box<Expr>),
    /// Negative lookahead, never consumes.
    Not(Box<Expr>),
    /// Token boundary `< ... >`: records the matched span and disables
    /// whitespace skipping inside.
    Capture(Box<Expr>),
}

impl Expr {
    pub fn literal(text: impl Into<String>) -> Self {
        Expr::Literal {
            text: text.into(),
            ignore_case: false,
        }
    }

    pub fn repeat(inner: Expr, min: u32, max: Option<u32>) -> Self {
        Expr::Repeat {
            inner: Box::new(inner),
            min,
            max,
        }
    }

    /// Calls `f` for every rule reference in this expression, in source order.
    pub fn for_each_ref(&self, f: &mut impl FnMut(RuleId)) {
        match self {
            Expr::Ref(id) => f(*id),
            Expr::Seq(items) | Expr::Choice(items) => {
                for item in items {
                    item.for_each_ref(f);
                }
            }
            Expr::Repeat { inner, .. }
            | Expr::And(inner)
            | Expr::Not(inner)
            | Expr::Capture(inner) => inner.for_each_ref(f),
            Expr::Literal { .. } | Expr::Class(_) | Expr::Any => {}
        }
    }

    pub fn has_refs(&self) -> bool {
        let mut found = false;
        self.for_each_ref(&mut |_| found = true);
        found
    }
}

/// A named rule: its top-level ordered choice plus the token flag.
///
/// The index of the alternative that matched is reported to semantic actions
/// as the "choice".
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Rule {
    name: String,
    alternatives: Vec<Expr>,
    token: bool,
}

impl Rule {
    pub fn new(name: impl Into<String>, alternatives: Vec<Expr>) -> Self {
        let alternatives = if alternatives.is_empty() {
            vec![Expr::Seq(Vec::new())]
        } else {
            alternatives
        };
        let token = !alternatives.iter().any(Expr::has_refs);
        Self {
            name: name.into(),
            alternatives,
            token,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alternatives(&self) -> &[Expr] {
        &self.alternatives
    }

    /// Token rules match without skipping whitespace between their elements.
    pub fn is_token(&self) -> bool {
        self.token
    }

    pub fn set_token(&mut self, token: bool) {
        self.token = token;
    }
}

/// Immutable, thread-shareable compiled grammar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Grammar {
    rules: Vec<Rule>,
    names: IndexMap<String, RuleId>,
    start: RuleId,
    whitespace: Option<Expr>,
}

impl Grammar {
    /// Builds a grammar from its rule table.
    ///
    /// Rule names must be unique and every `Ref` must point into `rules`;
    /// the compiler guarantees both.
    pub fn new(rules: Vec<Rule>, start: RuleId, whitespace: Option<Expr>) -> Self {
        assert!(
            start.index() < rules.len(),
            "start rule {start:?} out of bounds for {} rules",
            rules.len()
        );
        let names = rules
            .iter()
            .enumerate()
            .map(|(i, rule)| (rule.name.clone(), RuleId::new(i)))
            .collect();
        Self {
            rules,
            names,
            start,
            whitespace,
        }
    }

    /// Panics if `id` was not issued for this grammar; see [`get`](Self::get).
    pub fn rule(&self, id: RuleId) -> &Rule {
        &self.rules[id.index()]
    }

    pub fn get(&self, id: RuleId) -> Option<&Rule> {
        self.rules.get(id.index())
    }

    pub fn rule_id(&self, name: &str) -> Option<RuleId> {
        self.names.get(name).copied()
    }

    pub fn rule_name(&self, id: RuleId) -> &str {
        &self.rules[id.index()].name
    }

    pub fn rules(&self) -> impl Iterator<Item = (RuleId, &Rule)> {
        self.rules
            .iter()
            .enumerate()
            .map(|(i, rule)| (RuleId::new(i), rule))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn start(&self) -> RuleId {
        self.start
    }

    pub fn set_start(&mut self, id: RuleId) {
        assert!(id.index() < self.rules.len(), "start rule {id:?} out of bounds");
        self.start = id;
    }

    /// The `%whitespace` expression, if declared.
    pub fn whitespace(&self) -> Option<&Expr> {
        self.whitespace.as_ref()
    }

    pub fn set_token(&mut self, id: RuleId, token: bool) {
        self.rules[id.index()].set_token(token);
    }

    /// Renders `expr` in grammar-definition syntax, resolving rule names.
    pub fn display_expr<'g>(&'g self, expr: &'g Expr) -> ExprDisplay<'g> {
        ExprDisplay::new(self, expr)
    }
}
