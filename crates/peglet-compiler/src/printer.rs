//! Indented tree dumps of a grammar source, for `peglet ast` and tests.

use std::fmt::{self, Write};

use rowan::{NodeOrToken, TextRange};

use crate::Compiled;
use crate::parser::{Def, Expr, SuffixOp, SyntaxNode, SyntaxToken};

pub struct AstPrinter<'c, 'src> {
    compiled: &'c Compiled<'src>,
    raw: bool,
    trivia: bool,
    spans: bool,
}

impl<'c, 'src> AstPrinter<'c, 'src> {
    pub fn new(compiled: &'c Compiled<'src>) -> Self {
        Self {
            compiled,
            raw: false,
            trivia: false,
            spans: false,
        }
    }

    /// Dump the lossless CST instead of the typed AST.
    pub fn raw(mut self, value: bool) -> Self {
        self.raw = value;
        self
    }

    /// Include whitespace and comment tokens. Only affects raw dumps.
    pub fn with_trivia(mut self, value: bool) -> Self {
        self.trivia = value;
        self
    }

    /// Suffix every line with the byte range it covers.
    pub fn with_spans(mut self, value: bool) -> Self {
        self.spans = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> fmt::Result {
        let mut out = Lines { w, spans: self.spans };
        if self.raw {
            self.cst(&mut out, &self.compiled.syntax(), 0)
        } else {
            let root = self.compiled.root();
            out.line(0, "Root", root.text_range(), "")?;
            root.defs().try_for_each(|def| self.def(&mut out, &def))
        }
    }

    fn cst<W: Write>(&self, out: &mut Lines<'_, W>, node: &SyntaxNode, depth: usize) -> fmt::Result {
        out.line(depth, &format!("{:?}", node.kind()), node.text_range(), "")?;
        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Node(n) => self.cst(out, &n, depth + 1)?,
                NodeOrToken::Token(t) if self.trivia || !t.kind().is_trivia() => {
                    let text = format!(" {:?}", t.text());
                    out.line(depth + 1, &format!("{:?}", t.kind()), t.text_range(), &text)?;
                }
                NodeOrToken::Token(_) => {}
            }
        }
        Ok(())
    }

    fn def<W: Write>(&self, out: &mut Lines<'_, W>, def: &Def) -> fmt::Result {
        out.line(1, "Def", def.text_range(), &token_detail(def.name()))?;
        match def.body() {
            Some(body) => expr(out, &body, 2),
            None => Ok(()),
        }
    }
}

/// Writes `label[span]detail` lines at two spaces per depth level.
struct Lines<'w, W> {
    w: &'w mut W,
    spans: bool,
}

impl<W: Write> Lines<'_, W> {
    fn line(&mut self, depth: usize, label: &str, range: TextRange, detail: &str) -> fmt::Result {
        write!(self.w, "{:width$}{label}", "", width = depth * 2)?;
        if self.spans {
            write!(self.w, " [{}..{}]", u32::from(range.start()), u32::from(range.end()))?;
        }
        writeln!(self.w, "{detail}")
    }
}

fn expr<W: Write>(out: &mut Lines<'_, W>, e: &Expr, depth: usize) -> fmt::Result {
    let (label, detail) = match e {
        Expr::Choice(_) => ("Choice", String::new()),
        Expr::Seq(_) => ("Seq", String::new()),
        Expr::Prefix(p) => ("Prefix", (if p.is_negative() { " !" } else { " &" }).to_owned()),
        Expr::Suffix(s) => ("Suffix", format!(" {}", suffix_text(s.op()))),
        Expr::Group(_) => ("Group", String::new()),
        Expr::Capture(_) => ("Capture", String::new()),
        Expr::Ref(r) => ("Ref", token_detail(r.name())),
        Expr::Literal(l) => ("Literal", token_detail(l.token())),
        Expr::Class(c) => ("Class", token_detail(c.token())),
        Expr::Any(_) => ("Any", String::new()),
    };
    out.line(depth, label, e.text_range(), &detail)?;
    e.children()
        .iter()
        .try_for_each(|child| expr(out, child, depth + 1))
}

fn token_detail(token: Option<SyntaxToken>) -> String {
    token.map_or_else(String::new, |t| format!(" {}", t.text()))
}

fn suffix_text(op: Option<SuffixOp>) -> String {
    let num = |t: Option<SyntaxToken>| t.map_or_else(String::new, |t| t.text().to_owned());
    match op {
        Some(SuffixOp::Star) => "*".to_owned(),
        Some(SuffixOp::Plus) => "+".to_owned(),
        Some(SuffixOp::Question) => "?".to_owned(),
        Some(SuffixOp::Bounds { min, comma, max }) => {
            format!("{{{}{}{}}}", num(min), if comma { "," } else { "" }, num(max))
        }
        None => String::new(),
    }
}
