//! Grammar source to lossless rowan CST.
//!
//! Parsing never fails on malformed input. Stray tokens are wrapped in
//! `Error` nodes, missing pieces are reported without consuming anything, and
//! a name followed by `<-` starts a fresh definition so one bad rule doesn't
//! spoil the next. Only the token and nesting limits abort with an [`Error`].
//!
//! [`Error`]: crate::Error

pub mod ast;
pub mod cst;
pub mod lexer;

mod core;
mod grammar;

#[cfg(test)]
mod lexer_tests;
#[cfg(test)]
mod tests;

pub use cst::{SyntaxKind, SyntaxNode, SyntaxToken};

pub use ast::{
    Any, Capture, Choice, Class, Def, Expr, Group, Literal, Prefix, Ref, Root, Seq, Suffix,
    SuffixOp,
};

pub use core::Parser;
pub use lexer::lex;

use crate::PassResult;

/// The green tree of one grammar source. Diagnostics travel separately.
#[derive(Debug, Clone)]
pub struct Parse {
    green: rowan::GreenNode,
    tokens_consumed: u32,
}

impl Parse {
    pub fn as_cst(&self) -> &rowan::GreenNode {
        &self.green
    }

    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn root(&self) -> Root {
        Root::cast(self.syntax()).expect("tree is rooted at Root")
    }

    /// Significant tokens the parser consumed, counted against the token limit.
    pub fn exec_fuel_consumed(&self) -> u32 {
        self.tokens_consumed
    }
}

/// Parses `source` without limits.
pub fn parse(source: &str) -> PassResult<Parse> {
    parse_with_parser(Parser::new(source, lex(source)))
}

pub(crate) fn parse_with_parser(mut parser: Parser) -> PassResult<Parse> {
    parser.parse_root();
    let (green, diagnostics, tokens_consumed) = parser.finish()?;
    let parse = Parse {
        green,
        tokens_consumed,
    };
    Ok((parse, diagnostics))
}
