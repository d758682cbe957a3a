use std::path::PathBuf;

use viewref::compat::upgrade_xml;
use viewref_core::SchemaGraph;

use super::loader::{load_schema, load_text, write_output};
use super::{CliError, exit_with};

pub struct ConvertArgs {
    pub view_path: PathBuf,
    pub schema_path: PathBuf,
    pub output: Option<PathBuf>,
}

pub fn run(args: ConvertArgs) {
    if let Err(err) = execute(&args) {
        exit_with(err);
    }
}

fn execute(args: &ConvertArgs) -> Result<(), CliError> {
    let schema = load_schema(&args.schema_path)?;
    let xml = load_text(&args.view_path)?;
    let upgraded = render(&xml, &schema)?;
    write_output(args.output.as_deref(), &upgraded)
}

/// Upgraded XML for a stored view.
pub fn render(xml: &str, graph: &impl SchemaGraph) -> Result<String, CliError> {
    Ok(upgrade_xml(xml, graph)?)
}
