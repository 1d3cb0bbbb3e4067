//! Renders compiled grammars back into definition syntax.
//!
//! Output parses to an equivalent grammar: parentheses are emitted only where
//! operator precedence requires them.

use std::fmt::{self, Display, Formatter, Write};

use super::{CharClass, Expr, Grammar};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Prec {
    Choice,
    Seq,
    Prefix,
    Suffix,
}

pub struct ExprDisplay<'g> {
    grammar: &'g Grammar,
    expr: &'g Expr,
}

impl<'g> ExprDisplay<'g> {
    pub(super) fn new(grammar: &'g Grammar, expr: &'g Expr) -> Self {
        Self { grammar, expr }
    }
}

impl Display for ExprDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_expr(self.grammar, self.expr, Prec::Choice, f)
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (_, rule) in self.rules() {
            write!(f, "{} <- ", rule.name())?;
            for (i, alt) in rule.alternatives().iter().enumerate() {
                if i > 0 {
                    f.write_str(" / ")?;
                }
                write_expr(self, alt, Prec::Seq, f)?;
            }
            f.write_char('\n')?;
        }
        if let Some(ws) = self.whitespace() {
            f.write_str("%whitespace <- ")?;
            write_expr(self, ws, Prec::Choice, f)?;
            f.write_char('\n')?;
        }
        Ok(())
    }
}

fn write_expr(g: &Grammar, expr: &Expr, outer: Prec, f: &mut Formatter<'_>) -> fmt::Result {
    let own = match expr {
        Expr::Choice(alts) if alts.len() > 1 => Prec::Choice,
        Expr::Seq(items) if items.len() > 1 => Prec::Seq,
        Expr::And(_) | Expr::Not(_) => Prec::Prefix,
        _ => Prec::Suffix,
    };
    let parens = own < outer;
    if parens {
        f.write_char('(')?;
    }

    match expr {
        Expr::Choice(alts) => match alts.as_slice() {
            [single] => write_expr(g, single, outer, f)?,
            _ => {
                for (i, alt) in alts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" / ")?;
                    }
                    write_expr(g, alt, Prec::Seq, f)?;
                }
            }
        },
        Expr::Seq(items) => match items.as_slice() {
            [] => f.write_str("''")?,
            [single] => write_expr(g, single, outer, f)?,
            _ => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(' ')?;
                    }
                    write_expr(g, item, Prec::Prefix, f)?;
                }
            }
        },
        Expr::And(inner) => {
            f.write_char('&')?;
            write_expr(g, inner, Prec::Suffix, f)?;
        }
        Expr::Not(inner) => {
            f.write_char('!')?;
            write_expr(g, inner, Prec::Suffix, f)?;
        }
        Expr::Repeat { inner, min, max } => {
            write_expr(g, inner, Prec::Suffix, f)?;
            match (min, max) {
                (0, None) => f.write_char('*')?,
                (1, None) => f.write_char('+')?,
                (0, Some(1)) => f.write_char('?')?,
                (n, None) => write!(f, "{{{n},}}")?,
                (n, Some(m)) if n == m => write!(f, "{{{n}}}")?,
                (0, Some(m)) => write!(f, "{{,{m}}}")?,
                (n, Some(m)) => write!(f, "{{{n},{m}}}")?,
            }
        }
        Expr::Capture(inner) => {
            f.write_char('<')?;
            write_expr(g, inner, Prec::Choice, f)?;
            f.write_char('>')?;
        }
        Expr::Literal { text, ignore_case } => {
            f.write_char('\'')?;
            for c in text.chars() {
                match c {
                    '\'' => f.write_str("\\'")?,
                    _ => write_char_escaped(c, f)?,
                }
            }
            f.write_char('\'')?;
            if *ignore_case {
                f.write_char('i')?;
            }
        }
        Expr::Class(class) => write_class(class, f)?,
        Expr::Any => f.write_char('.')?,
        Expr::Ref(id) => f.write_str(g.rule_name(*id))?,
    }

    if parens {
        f.write_char(')')?;
    }
    Ok(())
}

fn write_class(class: &CharClass, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_char('[')?;
    if class.is_negated() {
        f.write_char('^')?;
    }
    for (i, &(lo, hi)) in class.ranges().iter().enumerate() {
        write_class_char(lo, i == 0 && !class.is_negated(), f)?;
        if lo != hi {
            f.write_char('-')?;
            write_class_char(hi, false, f)?;
        }
    }
    f.write_char(']')?;
    if class.ignores_case() {
        f.write_char('i')?;
    }
    Ok(())
}

fn write_class_char(c: char, first: bool, f: &mut Formatter<'_>) -> fmt::Result {
    match c {
        ']' | '-' => write!(f, "\\{c}"),
        '^' if first => f.write_str("\\^"),
        _ => write_char_escaped(c, f),
    }
}

fn write_char_escaped(c: char, f: &mut Formatter<'_>) -> fmt::Result {
    match c {
        '\\' => f.write_str("\\\\"),
        '\n' => f.write_str("\\n"),
        '\r' => f.write_str("\\r"),
        '\t' => f.write_str("\\t"),
        c if c.is_control() => write!(f, "\\u{{{:x}}}", c as u32),
        c => f.write_char(c),
    }
}
