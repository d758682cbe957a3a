mod cli;
mod commands;

use cli::{ConvertParams, DepsParams, SqlParams, build_cli, init_logging};

fn main() {
    let matches = build_cli().get_matches();

    if let Some((_, m)) = matches.subcommand() {
        init_logging(m.get_count("verbose"));
    }

    match matches.subcommand() {
        Some(("convert", m)) => {
            let params = ConvertParams::from_matches(m);
            commands::convert::run(params.into());
        }
        Some(("sql", m)) => {
            let params = SqlParams::from_matches(m);
            commands::sql::run(params.into());
        }
        Some(("deps", m)) => {
            let params = DepsParams::from_matches(m);
            commands::deps::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
