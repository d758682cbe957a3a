use viewref_core::{ObjectId, SchemaGraph};

use super::tree::Element;
use crate::reference::{Reference, ReferenceType};
use crate::view::{FormatVersion, View};
use crate::{Error, Result};

/// Format marker carried by a `<view>` root; absent means legacy.
pub(crate) fn format_version(root: &Element) -> Result<FormatVersion> {
    let Some(raw) = root.attr("format-version") else {
        return Ok(FormatVersion::LEGACY);
    };
    match raw.parse::<u16>().map(FormatVersion::new) {
        Ok(version) if (FormatVersion::LEGACY..=FormatVersion::CURRENT).contains(&version) => {
            Ok(version)
        }
        _ => Err(Error::InvalidAttribute {
            element: "view",
            attribute: "format-version",
            value: raw.to_string(),
        }),
    }
}

pub(crate) fn read_view(root: &Element, graph: &impl SchemaGraph) -> Result<View> {
    root.expect_name("view")?;
    let version = format_version(root)?;
    if !version.is_current() {
        return Err(Error::InvalidAttribute {
            element: "view",
            attribute: "format-version",
            value: version.to_string(),
        });
    }

    let name = root.require("view", "name")?.to_string();
    let mut view = View::new(name);
    for child in &root.children {
        view.push(read_reference(child, graph)?)?;
    }
    Ok(view)
}

pub(crate) fn read_reference(element: &Element, graph: &impl SchemaGraph) -> Result<Reference> {
    element.expect_name("reference")?;
    let tag = element.require("reference", "type")?;
    let mut reference = match ReferenceType::parse(tag) {
        Some(ReferenceType::Column) => read_column_ref(element, graph)?,
        Some(ReferenceType::Expression) => read_expression_ref(element, graph)?,
        None => {
            return Err(Error::InvalidAttribute {
                element: "reference",
                attribute: "type",
                value: tag.to_string(),
            });
        }
    };
    reference.set_ref_alias(element.attr_or_empty("ref-alias"));
    Ok(reference)
}

fn read_column_ref(element: &Element, graph: &impl SchemaGraph) -> Result<Reference> {
    let table_name = element.require("reference", "table")?;
    let table = resolve_table(table_name, graph)?;
    let column = element
        .attr("column")
        .map(|name| resolve_column(table, table_name, name, graph))
        .transpose()?;

    Ok(Reference::new_column(
        table,
        column,
        element.attr_or_empty("alias"),
        element.attr_or_empty("column-alias"),
    ))
}

fn read_expression_ref(element: &Element, graph: &impl SchemaGraph) -> Result<Reference> {
    let expression = element.child("expression").ok_or(Error::MissingElement {
        parent: "reference",
        child: "expression",
    })?;

    let mut reference = Reference::new_expression(&expression.text, element.attr_or_empty("alias"));
    reference.set_definition_expression(element.flag("reference", "is-def-expr")?)?;

    for child in &element.children {
        match child.name.as_str() {
            "expression" => {}
            "column" => reference.add_column(
                child.require("column", "name")?,
                child.attr_or_empty("type"),
                child.attr_or_empty("alias"),
            )?,
            "ref-table" => {
                let table = resolve_table(child.require("ref-table", "name")?, graph)?;
                reference.add_referenced_table(table)?;
            }
            other => {
                return Err(Error::UnexpectedElement {
                    expected: "expression, column or ref-table",
                    found: other.to_string(),
                });
            }
        }
    }
    Ok(reference)
}

pub(crate) fn resolve_table(name: &str, graph: &impl SchemaGraph) -> Result<ObjectId> {
    graph
        .find_table(name)
        .ok_or_else(|| Error::UnknownTable(name.to_string()))
}

pub(crate) fn resolve_column(
    table: ObjectId,
    table_name: &str,
    name: &str,
    graph: &impl SchemaGraph,
) -> Result<ObjectId> {
    graph
        .find_column(table, name)
        .ok_or_else(|| Error::UnknownColumn {
            table: table_name.to_string(),
            column: name.to_string(),
        })
}
