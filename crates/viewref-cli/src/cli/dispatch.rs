//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs that mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors
//! - `Into<*Args>` impls to bridge dispatch → command handlers

use std::path::PathBuf;

use clap::ArgMatches;
use viewref::SqlRole;

use crate::commands::convert::ConvertArgs;
use crate::commands::deps::DepsArgs;
use crate::commands::sql::SqlArgs;

pub struct ConvertParams {
    pub view_path: PathBuf,
    pub schema_path: PathBuf,
    pub output: Option<PathBuf>,
}

impl ConvertParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            view_path: parse_view_path(m),
            schema_path: parse_schema_path(m),
            output: m.get_one::<PathBuf>("output").cloned(),
        }
    }
}

impl From<ConvertParams> for ConvertArgs {
    fn from(p: ConvertParams) -> Self {
        Self {
            view_path: p.view_path,
            schema_path: p.schema_path,
            output: p.output,
        }
    }
}

pub struct SqlParams {
    pub view_path: PathBuf,
    pub schema_path: PathBuf,
    pub role: Option<SqlRole>,
    pub reference: Option<usize>,
    pub output: Option<PathBuf>,
}

impl SqlParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            view_path: parse_view_path(m),
            schema_path: parse_schema_path(m),
            role: m
                .get_one::<String>("role")
                .and_then(|name| SqlRole::parse(name)),
            reference: m.get_one::<usize>("ref").copied(),
            output: m.get_one::<PathBuf>("output").cloned(),
        }
    }
}

impl From<SqlParams> for SqlArgs {
    fn from(p: SqlParams) -> Self {
        Self {
            view_path: p.view_path,
            schema_path: p.schema_path,
            role: p.role,
            reference: p.reference,
            output: p.output,
        }
    }
}

pub struct DepsParams {
    pub view_path: PathBuf,
    pub schema_path: PathBuf,
    pub indirect: bool,
    pub reference: Option<usize>,
}

impl DepsParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            view_path: parse_view_path(m),
            schema_path: parse_schema_path(m),
            indirect: m.get_flag("indirect"),
            reference: m.get_one::<usize>("ref").copied(),
        }
    }
}

impl From<DepsParams> for DepsArgs {
    fn from(p: DepsParams) -> Self {
        Self {
            view_path: p.view_path,
            schema_path: p.schema_path,
            indirect: p.indirect,
            reference: p.reference,
        }
    }
}

/// Positional view path; defaults to stdin.
fn parse_view_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("view_path")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("-"))
}

/// `--schema` is required, clap rejects the command line before we get here.
fn parse_schema_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("schema").cloned().unwrap_or_default()
}
