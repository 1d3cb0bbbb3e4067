mod definitions_tests;
mod recovery_tests;

use crate::{AstPrinter, Compilation};

/// Parser diagnostics only, in emission order.
fn parse_errors(src: &str) -> String {
    let (_, diag) = super::parse(src).expect("no fuel exhaustion");
    diag.to_string()
}

fn cst(src: &str) -> String {
    let compiled = Compilation::new(src).exec().expect("no fuel exhaustion");
    AstPrinter::new(&compiled).raw(true).dump()
}
