use std::io::Write;

use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use viewref_core::SchemaGraph;

use crate::reference::{ColumnRef, ExpressionRef, Reference, ReferenceKind, ReferenceType};
use crate::view::View;
use crate::{Error, Result};

pub(crate) fn new_writer() -> Writer<Vec<u8>> {
    Writer::new_with_indent(Vec::new(), b' ', 2)
}

pub(crate) fn finish(writer: Writer<Vec<u8>>) -> String {
    String::from_utf8_lossy(&writer.into_inner()).into_owned()
}

pub(crate) fn write_view<W: Write>(
    writer: &mut Writer<W>,
    view: &View,
    graph: &impl SchemaGraph,
) -> Result<()> {
    let version = view.format().to_string();
    let start = BytesStart::new("view")
        .with_attributes([("name", view.name()), ("format-version", version.as_str())]);
    writer.write_event(Event::Start(start))?;
    for reference in view.references() {
        write_reference(writer, reference, graph)?;
    }
    writer.write_event(Event::End(BytesEnd::new("view")))?;
    Ok(())
}

pub(crate) fn write_reference<W: Write>(
    writer: &mut Writer<W>,
    reference: &Reference,
    graph: &impl SchemaGraph,
) -> Result<()> {
    match reference.kind() {
        ReferenceKind::Column(c) => write_column_ref(writer, c, reference.ref_alias(), graph),
        ReferenceKind::Expression(e) => {
            write_expression_ref(writer, e, reference.ref_alias(), graph)
        }
    }
}

fn write_column_ref<W: Write>(
    writer: &mut Writer<W>,
    c: &ColumnRef,
    ref_alias: &str,
    graph: &impl SchemaGraph,
) -> Result<()> {
    let table = graph
        .qualified_name(c.table)
        .ok_or(Error::DanglingHandle(c.table))?;
    let column = match c.column {
        Some(id) => Some(graph.name(id).ok_or(Error::DanglingHandle(id))?),
        None => None,
    };

    let mut start = BytesStart::new("reference");
    start.push_attribute(("type", ReferenceType::Column.as_str()));
    start.push_attribute(("table", table.as_str()));
    if let Some(column) = column {
        start.push_attribute(("column", column));
    }
    start.push_attribute(("alias", c.table_alias.as_str()));
    start.push_attribute(("column-alias", c.column_alias.as_str()));
    start.push_attribute(("ref-alias", ref_alias));
    writer.write_event(Event::Empty(start))?;
    Ok(())
}

fn write_expression_ref<W: Write>(
    writer: &mut Writer<W>,
    e: &ExpressionRef,
    ref_alias: &str,
    graph: &impl SchemaGraph,
) -> Result<()> {
    let start = BytesStart::new("reference").with_attributes([
        ("type", ReferenceType::Expression.as_str()),
        ("alias", e.alias.as_str()),
        ("is-def-expr", if e.is_def_expr { "true" } else { "false" }),
        ("ref-alias", ref_alias),
    ]);
    writer.write_event(Event::Start(start))?;

    writer.write_event(Event::Start(BytesStart::new("expression")))?;
    writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(
        &e.expression,
    ))))?;
    writer.write_event(Event::End(BytesEnd::new("expression")))?;

    for column in &e.columns {
        let elem = BytesStart::new("column").with_attributes([
            ("name", column.name.as_str()),
            ("type", column.type_name.as_str()),
            ("alias", column.alias.as_str()),
        ]);
        writer.write_event(Event::Empty(elem))?;
    }

    for &table in &e.ref_tables {
        let Some(name) = graph.qualified_name(table) else {
            tracing::trace!(%table, "not persisting removed referenced table");
            continue;
        };
        let elem = BytesStart::new("ref-table").with_attributes([("name", name.as_str())]);
        writer.write_event(Event::Empty(elem))?;
    }

    writer.write_event(Event::End(BytesEnd::new("reference")))?;
    Ok(())
}
