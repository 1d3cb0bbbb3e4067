pub mod ast;
pub mod check;
pub mod dump;
pub mod exec;
pub mod input;
pub mod run_common;
pub mod trace;
