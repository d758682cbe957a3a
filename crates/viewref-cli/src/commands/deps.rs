use std::path::PathBuf;

use viewref::compat::load_view;
use viewref_core::{ObjectId, ObjectKind, SchemaGraph};

use super::loader::{load_schema, load_text, select_reference, write_output};
use super::{CliError, exit_with};

pub struct DepsArgs {
    pub view_path: PathBuf,
    pub schema_path: PathBuf,
    pub indirect: bool,
    pub reference: Option<usize>,
}

pub fn run(args: DepsArgs) {
    if let Err(err) = execute(&args) {
        exit_with(err);
    }
}

fn execute(args: &DepsArgs) -> Result<(), CliError> {
    let schema = load_schema(&args.schema_path)?;
    let xml = load_text(&args.view_path)?;
    let listing = render(&xml, &schema, args.indirect, args.reference)?;
    write_output(None, &listing)
}

/// One `kind<TAB>name` line per dependency, in schema creation order.
pub fn render(
    xml: &str,
    graph: &impl SchemaGraph,
    indirect: bool,
    reference: Option<usize>,
) -> Result<String, CliError> {
    let view = load_view(xml, graph)?;

    let mut deps = match reference {
        Some(index) => select_reference(&view, index)?.dependencies(graph, indirect),
        None => view.dependencies(graph, indirect),
    };
    deps.sort();

    let lines: Vec<String> = deps
        .into_iter()
        .filter_map(|id| {
            let kind = graph.kind(id)?;
            Some(format!("{kind}\t{}", display_name(graph, id)?))
        })
        .collect();
    Ok(lines.join("\n"))
}

/// Columns are listed under their table so same-named columns stay apart.
fn display_name(graph: &impl SchemaGraph, id: ObjectId) -> Option<String> {
    match graph.kind(id)? {
        ObjectKind::Column => {
            let table = graph.parent(id).and_then(|t| graph.qualified_name(t))?;
            Some(format!("{table}.{}", graph.name(id)?))
        }
        _ => graph.qualified_name(id),
    }
}
