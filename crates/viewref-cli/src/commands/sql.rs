use std::path::PathBuf;

use viewref::SqlRole;
use viewref::compat::load_view;
use viewref_core::SchemaGraph;

use super::loader::{load_schema, load_text, select_reference, write_output};
use super::{CliError, exit_with};

pub struct SqlArgs {
    pub view_path: PathBuf,
    pub schema_path: PathBuf,
    pub role: Option<SqlRole>,
    pub reference: Option<usize>,
    pub output: Option<PathBuf>,
}

pub fn run(args: SqlArgs) {
    if let Err(err) = execute(&args) {
        exit_with(err);
    }
}

fn execute(args: &SqlArgs) -> Result<(), CliError> {
    let schema = load_schema(&args.schema_path)?;
    let xml = load_text(&args.view_path)?;
    let sql = render(&xml, &schema, args.role, args.reference)?;
    write_output(args.output.as_deref(), &sql)
}

/// Without a role, the full `CREATE OR REPLACE VIEW` statement. With one,
/// the fragment of each selected reference, one per line.
pub fn render(
    xml: &str,
    graph: &impl SchemaGraph,
    role: Option<SqlRole>,
    reference: Option<usize>,
) -> Result<String, CliError> {
    let view = load_view(xml, graph)?;

    let Some(role) = role else {
        return Ok(view.create_statement(graph)?);
    };

    let fragments = match reference {
        Some(index) => vec![select_reference(&view, index)?.sql_definition(role, graph)?],
        None => view
            .references()
            .iter()
            .map(|r| r.sql_definition(role, graph))
            .collect::<viewref::Result<_>>()?,
    };
    Ok(fragments.join("\n"))
}
