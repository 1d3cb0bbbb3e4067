mod args;
mod commands;
mod dispatch;


use std::io::IsTerminal;

pub use commands::build_cli;
pub use dispatch::{AstParams, CheckParams, DumpParams, ExecParams, TraceParams};

/// Value of `--color`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Unknown values fall back to `Auto`; clap has already rejected them.
    fn from_flag(value: Option<&str>) -> Self {
        match value {
            Some("always") => Self::Always,
            Some("never") => Self::Never,
            _ => Self::Auto,
        }
    }

    /// `Auto` colors only when neither stdout nor stderr is redirected.
    pub fn should_colorize(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::stdout().is_terminal() && std::io::stderr().is_terminal(),
        }
    }
}
