//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.

use clap::Command;

use super::args::*;

/// Add the args every command takes.
fn with_common_args(cmd: Command) -> Command {
    cmd.arg(view_path_arg()).arg(schema_arg()).arg(verbose_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("viewref")
        .about("Convert, render and inspect stored database view definitions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(convert_command())
        .subcommand(sql_command())
        .subcommand(deps_command())
}

/// Rewrite a stored view in the current format.
pub fn convert_command() -> Command {
    let cmd = Command::new("convert")
        .about("Rewrite a stored view in the current format")
        .override_usage(
            "\
  viewref convert <VIEW> --schema <FILE>
  viewref convert <VIEW> --schema <FILE> -o <FILE>",
        )
        .after_help(
            r#"EXAMPLES:
  viewref convert old.xml -S schema.json            # print upgraded XML
  viewref convert old.xml -S schema.json -o new.xml
  cat old.xml | viewref convert - -S schema.json

Views already in the current format are written back unchanged."#,
        )
        .arg(output_file_arg());

    with_common_args(cmd)
}

/// Generate SQL for a stored view.
pub fn sql_command() -> Command {
    let cmd = Command::new("sql")
        .about("Generate SQL for a stored view")
        .override_usage(
            "\
  viewref sql <VIEW> --schema <FILE>
  viewref sql <VIEW> --schema <FILE> --role <ROLE> [--ref <INDEX>]",
        )
        .after_help(
            r#"EXAMPLES:
  viewref sql view.xml -S schema.json                  # CREATE OR REPLACE VIEW ...
  viewref sql view.xml -S schema.json --role select    # one SELECT item per line
  viewref sql view.xml -S schema.json --role from --ref 0"#,
        )
        .arg(role_arg())
        .arg(ref_index_arg().requires("role"))
        .arg(output_file_arg());

    with_common_args(cmd)
}

/// List the schema objects a stored view depends on.
pub fn deps_command() -> Command {
    let cmd = Command::new("deps")
        .about("List schema objects a stored view depends on")
        .override_usage(
            "\
  viewref deps <VIEW> --schema <FILE> [--indirect] [--ref <INDEX>]",
        )
        .after_help(
            r#"EXAMPLES:
  viewref deps view.xml -S schema.json             # direct dependencies
  viewref deps view.xml -S schema.json --indirect  # follow foreign keys"#,
        )
        .arg(indirect_arg())
        .arg(ref_index_arg());

    with_common_args(cmd)
}
