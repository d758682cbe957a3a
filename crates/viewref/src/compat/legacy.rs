use viewref_core::{ObjectId, SchemaGraph};

use super::{LegacyBody, LegacyFragment, LegacyView};
use crate::Result;
use crate::xml::tree::Element;
use crate::xml::{resolve_column, resolve_table};

/// Decode a `<view>` root without a current format marker.
///
/// A `<definition>` child selects the raw SQL shape; its `<reftable>`
/// siblings are the manual table associations. Otherwise every
/// `<reference>` child is one fragment.
pub(super) fn read_legacy_view(root: &Element, graph: &impl SchemaGraph) -> Result<LegacyView> {
    let name = root.require("view", "name")?.to_string();

    let body = match root.child("definition") {
        Some(definition) => LegacyBody::Raw {
            sql: definition.text.clone(),
            tables: read_table_associations(root, graph),
        },
        None => LegacyBody::Fragments(
            root.children
                .iter()
                .map(|child| read_fragment(child, graph))
                .collect::<Result<_>>()?,
        ),
    };

    Ok(LegacyView { name, body })
}

/// Resolve `<reftable>` associations. Hand-maintained lists go stale, so a
/// name that no longer resolves is dropped rather than failing the load.
fn read_table_associations(root: &Element, graph: &impl SchemaGraph) -> Vec<ObjectId> {
    let mut tables = Vec::new();
    for child in root.children.iter().filter(|c| c.name == "reftable") {
        let Some(name) = child.attr("name") else {
            tracing::warn!(view = root.attr_or_empty("name"), "<reftable> without a name");
            continue;
        };
        match graph.find_table(name) {
            Some(table) => tables.push(table),
            None => tracing::warn!(
                view = root.attr_or_empty("name"),
                table = name,
                "dropping association with unknown table"
            ),
        }
    }
    tables
}

fn read_fragment(element: &Element, graph: &impl SchemaGraph) -> Result<LegacyFragment> {
    element.expect_name("reference")?;
    let ref_alias = element.attr_or_empty("ref-alias").to_string();

    if let Some(expression) = element.child("expression") {
        return Ok(LegacyFragment::Expression {
            expression: expression.text.clone(),
            alias: element.attr_or_empty("alias").to_string(),
            ref_alias,
        });
    }

    let table_name = element.require("reference", "table")?;
    let table = resolve_table(table_name, graph)?;
    let column = element
        .attr("column")
        .map(|name| resolve_column(table, table_name, name, graph))
        .transpose()?;

    Ok(LegacyFragment::Column {
        table,
        column,
        table_alias: element.attr_or_empty("alias").to_string(),
        column_alias: element.attr_or_empty("column-alias").to_string(),
        ref_alias,
    })
}
