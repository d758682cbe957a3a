//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Stored view XML (positional, `-` for stdin).
pub fn view_path_arg() -> Arg {
    Arg::new("view_path")
        .value_name("VIEW")
        .value_parser(value_parser!(PathBuf))
        .default_value("-")
        .help("View XML file, or - for stdin")
}

/// Schema description (--schema).
pub fn schema_arg() -> Arg {
    Arg::new("schema")
        .short('S')
        .long("schema")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Schema description (JSON)")
}

/// Write output to file (-o/--output).
pub fn output_file_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write output to file")
}

/// Clause role for fragments (--role).
pub fn role_arg() -> Arg {
    Arg::new("role")
        .long("role")
        .value_name("ROLE")
        .value_parser(["select", "from", "where", "end-expr", "view-def"])
        .help("Emit per-reference fragments for this clause instead of a full statement")
}

/// Restrict to one reference (--ref).
pub fn ref_index_arg() -> Arg {
    Arg::new("ref")
        .long("ref")
        .value_name("INDEX")
        .value_parser(value_parser!(usize))
        .help("Only the reference at this position (0-based)")
}

/// Follow dependencies transitively (--indirect).
pub fn indirect_arg() -> Arg {
    Arg::new("indirect")
        .long("indirect")
        .action(ArgAction::SetTrue)
        .help("Include indirect dependencies (foreign keys, owning schemas)")
}

/// Verbosity level (-v, -vv, -vvv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v info, -vv debug, -vvv trace); RUST_LOG applies otherwise")
}
