//! Command builders for the CLI.
//!
//! Every subcommand accepts the full flag set so invocations can be switched
//! between commands by changing only the subcommand name. Flags a command
//! ignores are hidden from its `--help`.

use clap::Command;

use super::args::*;

/// Add hidden input args (for commands that only read the grammar).
fn with_hidden_input_args(cmd: Command) -> Command {
    cmd.arg(input_path_arg().hide(true))
        .arg(input_text_arg().hide(true))
}

/// Add hidden parse option args (for commands that don't run the grammar).
fn with_hidden_parse_args(cmd: Command) -> Command {
    cmd.arg(no_packrat_arg().hide(true))
        .arg(partial_arg().hide(true))
        .arg(fuel_arg().hide(true))
        .arg(depth_arg().hide(true))
}

fn with_hidden_ast_args(cmd: Command) -> Command {
    cmd.arg(raw_arg().hide(true)).arg(spans_arg().hide(true))
}

/// Add hidden output args that belong to check/dump/exec/trace.
fn with_hidden_output_args(cmd: Command, keep: &[&str]) -> Command {
    let mut cmd = cmd;
    for arg in [strict_arg(), json_arg(), compact_arg(), verbose_arg()] {
        if !keep.contains(&arg.get_id().as_str()) {
            cmd = cmd.arg(arg.hide(true));
        }
    }
    cmd
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("peglet")
        .about("PEG grammars with packrat parsing")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(ast_command())
        .subcommand(check_command())
        .subcommand(dump_command())
        .subcommand(exec_command())
        .subcommand(trace_command())
}

/// Show the syntax tree of a grammar definition.
pub fn ast_command() -> Command {
    let cmd = Command::new("ast")
        .about("Show the syntax tree of a grammar")
        .override_usage(
            "\
  peglet ast <GRAMMAR>
  peglet ast -g <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  peglet ast calc.peg                  # typed AST
  peglet ast calc.peg --raw            # lossless CST
  peglet ast -g 'A <- "a"+' --spans    # inline grammar with positions"#,
        )
        .arg(grammar_path_arg())
        .arg(grammar_text_arg())
        .arg(raw_arg())
        .arg(spans_arg())
        .arg(color_arg());

    // Hidden unified flags
    let cmd = with_hidden_parse_args(with_hidden_input_args(cmd));
    with_hidden_output_args(cmd.arg(start_arg().hide(true)), &[])
}

/// Validate a grammar.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate a grammar")
        .override_usage(
            "\
  peglet check <GRAMMAR>
  peglet check -g <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  peglet check calc.peg                # errors only
  peglet check calc.peg --strict       # warnings fail too
  peglet check -g 'A <- A "a"'         # inline grammar"#,
        )
        .arg(grammar_path_arg())
        .arg(grammar_text_arg())
        .arg(start_arg())
        .arg(strict_arg())
        .arg(color_arg());

    // Hidden unified flags
    let cmd = with_hidden_ast_args(with_hidden_parse_args(with_hidden_input_args(cmd)));
    with_hidden_output_args(cmd, &["strict"])
}

/// Show the compiled grammar.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Show the compiled grammar")
        .override_usage(
            "\
  peglet dump <GRAMMAR>
  peglet dump -g <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  peglet dump calc.peg                 # normalized grammar text
  peglet dump calc.peg --json          # grammar model as JSON
  peglet dump calc.peg --start Expr    # with a different start rule"#,
        )
        .arg(grammar_path_arg())
        .arg(grammar_text_arg())
        .arg(start_arg())
        .arg(json_arg())
        .arg(color_arg());

    // Hidden unified flags
    let cmd = with_hidden_ast_args(with_hidden_parse_args(with_hidden_input_args(cmd)));
    with_hidden_output_args(cmd, &["json"])
}

/// Parse input and print its syntax tree as JSON.
pub fn exec_command() -> Command {
    let cmd = Command::new("exec")
        .about("Parse input and print the syntax tree as JSON")
        .override_usage(
            "\
  peglet exec <GRAMMAR> <INPUT>
  peglet exec <GRAMMAR> -i <TEXT>
  peglet exec -g <TEXT> <INPUT>
  peglet exec -g <TEXT> -i <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  peglet exec calc.peg expr.txt        # parse a file
  peglet exec calc.peg -i '1 + 2'      # inline input
  peglet exec -g 'N <- [0-9]+' -i 42   # everything inline
  peglet exec calc.peg - --compact     # stdin, one-line JSON"#,
        )
        .arg(grammar_path_arg())
        .arg(input_path_arg())
        .arg(grammar_text_arg())
        .arg(input_text_arg())
        .arg(start_arg())
        .arg(compact_arg())
        .arg(partial_arg())
        .arg(no_packrat_arg())
        .arg(fuel_arg())
        .arg(depth_arg())
        .arg(color_arg());

    // Hidden unified flags
    with_hidden_output_args(with_hidden_ast_args(cmd), &["compact"])
}

/// Trace rule invocations while parsing input.
pub fn trace_command() -> Command {
    let cmd = Command::new("trace")
        .about("Trace rule invocations while parsing input")
        .override_usage(
            "\
  peglet trace <GRAMMAR> <INPUT>
  peglet trace <GRAMMAR> -i <TEXT>
  peglet trace -g <TEXT> <INPUT>
  peglet trace -g <TEXT> -i <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  peglet trace calc.peg -i '1+2'       # rule enter/exit
  peglet trace calc.peg -i '1+2' -v    # with matched text and actions
  peglet trace calc.peg -i '1+2' -vv   # with backtracking
  peglet trace calc.peg -i '1+2' --no-packrat"#,
        )
        .arg(grammar_path_arg())
        .arg(input_path_arg())
        .arg(grammar_text_arg())
        .arg(input_text_arg())
        .arg(start_arg())
        .arg(verbose_arg())
        .arg(partial_arg())
        .arg(no_packrat_arg())
        .arg(fuel_arg())
        .arg(depth_arg())
        .arg(color_arg());

    // Hidden unified flags
    with_hidden_output_args(with_hidden_ast_args(cmd), &["verbose"])
}
