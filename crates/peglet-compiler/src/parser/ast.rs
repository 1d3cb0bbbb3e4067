//! Typed views over CST nodes.
//!
//! Accessors return `Option` because the tree may come from malformed
//! source; the parser never drops a node kind, but it may leave a child out.

use rowan::TextRange;

use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};

/// One wrapper type per listed kind, named after the kind.
macro_rules! typed_nodes {
    ($($kind:ident),+ $(,)?) => {$(
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $kind(SyntaxNode);

        impl $kind {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                if node.kind() == SyntaxKind::$kind {
                    Some(Self(node))
                } else {
                    None
                }
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }

            pub fn text_range(&self) -> TextRange {
                self.0.text_range()
            }
        }
    )+};
}

/// Wrapper types for the expression kinds plus the [`Expr`] sum over them.
macro_rules! expr_nodes {
    ($($kind:ident),+ $(,)?) => {
        typed_nodes!($($kind),+);

        /// Any parsing expression.
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum Expr {
            $($kind($kind)),+
        }

        impl Expr {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                match node.kind() {
                    $(SyntaxKind::$kind => Some(Expr::$kind($kind(node))),)+
                    _ => None,
                }
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                match self {
                    $(Expr::$kind(n) => &n.0,)+
                }
            }
        }
    };
}

typed_nodes!(Root, Def);
expr_nodes!(Choice, Seq, Prefix, Suffix, Group, Capture, Ref, Literal, Class, Any);

impl Expr {
    pub fn text_range(&self) -> TextRange {
        self.as_cst().text_range()
    }

    pub fn children(&self) -> Vec<Expr> {
        sub_exprs(self.as_cst()).collect()
    }
}

fn sub_exprs(node: &SyntaxNode) -> impl Iterator<Item = Expr> + '_ {
    node.children().filter_map(Expr::cast)
}

fn first_expr(node: &SyntaxNode) -> Option<Expr> {
    sub_exprs(node).next()
}

fn first_token(node: &SyntaxNode, pred: impl Fn(SyntaxKind) -> bool) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|t| pred(t.kind()))
}

impl Root {
    pub fn defs(&self) -> impl Iterator<Item = Def> + '_ {
        self.0.children().filter_map(Def::cast)
    }
}

impl Def {
    /// Rule name or `%directive` token.
    pub fn name(&self) -> Option<SyntaxToken> {
        first_token(&self.0, |k| matches!(k, SyntaxKind::Id | SyntaxKind::Directive))
    }

    pub fn is_directive(&self) -> bool {
        self.name()
            .is_some_and(|t| t.kind() == SyntaxKind::Directive)
    }

    pub fn body(&self) -> Option<Expr> {
        first_expr(&self.0)
    }
}

impl Choice {
    pub fn alternatives(&self) -> impl Iterator<Item = Expr> + '_ {
        sub_exprs(&self.0)
    }
}

impl Seq {
    pub fn items(&self) -> impl Iterator<Item = Expr> + '_ {
        sub_exprs(&self.0)
    }
}

impl Prefix {
    pub fn operator(&self) -> Option<SyntaxToken> {
        first_token(&self.0, |k| matches!(k, SyntaxKind::Amp | SyntaxKind::Bang))
    }

    pub fn is_negative(&self) -> bool {
        self.operator().is_some_and(|t| t.kind() == SyntaxKind::Bang)
    }

    pub fn inner(&self) -> Option<Expr> {
        first_expr(&self.0)
    }
}

/// Repetition operator of a [`Suffix`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuffixOp {
    Star,
    Plus,
    Question,
    /// `{min,max}`; `comma` distinguishes `{n}` from `{n,}`.
    Bounds {
        min: Option<SyntaxToken>,
        comma: bool,
        max: Option<SyntaxToken>,
    },
}

impl Suffix {
    pub fn inner(&self) -> Option<Expr> {
        first_expr(&self.0)
    }

    pub fn op(&self) -> Option<SuffixOp> {
        let mut tokens = self
            .0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|t| !t.kind().is_trivia());

        match tokens.next()?.kind() {
            SyntaxKind::Star => Some(SuffixOp::Star),
            SyntaxKind::Plus => Some(SuffixOp::Plus),
            SyntaxKind::Question => Some(SuffixOp::Question),
            SyntaxKind::BraceOpen => {
                let (mut min, mut comma, mut max) = (None, false, None);
                for token in tokens {
                    match token.kind() {
                        SyntaxKind::Number if comma => max = Some(token),
                        SyntaxKind::Number => min = Some(token),
                        SyntaxKind::Comma => comma = true,
                        _ => break,
                    }
                }
                Some(SuffixOp::Bounds { min, comma, max })
            }
            _ => None,
        }
    }

    /// Range of the operator tokens, excluding the repeated expression.
    pub fn op_range(&self) -> TextRange {
        let start = self
            .inner()
            .map_or(self.0.text_range().start(), |inner| inner.text_range().end());
        TextRange::new(start, self.0.text_range().end())
    }
}

impl Group {
    pub fn inner(&self) -> Option<Expr> {
        first_expr(&self.0)
    }
}

impl Capture {
    pub fn inner(&self) -> Option<Expr> {
        first_expr(&self.0)
    }
}

impl Ref {
    pub fn name(&self) -> Option<SyntaxToken> {
        first_token(&self.0, |k| k == SyntaxKind::Id)
    }
}

impl Literal {
    /// The quoted token; `None` only in malformed trees.
    pub fn token(&self) -> Option<SyntaxToken> {
        first_token(&self.0, |k| {
            matches!(k, SyntaxKind::StrLit | SyntaxKind::UnterminatedStr)
        })
    }

    pub fn is_terminated(&self) -> bool {
        self.token().is_some_and(|t| t.kind() == SyntaxKind::StrLit)
    }
}

impl Class {
    pub fn token(&self) -> Option<SyntaxToken> {
        first_token(&self.0, |k| {
            matches!(k, SyntaxKind::ClassLit | SyntaxKind::UnterminatedClass)
        })
    }

    pub fn is_terminated(&self) -> bool {
        self.token().is_some_and(|t| t.kind() == SyntaxKind::ClassLit)
    }
}
