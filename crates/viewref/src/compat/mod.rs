//! One-shot migration of legacy view definitions.
//!
//! Before the reference model, a view was stored either as per-column
//! fragments or as one opaque SQL string plus a hand-maintained list of the
//! tables it reads. Conversion turns either shape into an ordered reference
//! list and stamps the result with [`FormatVersion::CURRENT`]. Converting a
//! view that already carries the marker is a no-op, so repeated
//! load/save cycles never migrate twice.

mod legacy;

#[cfg(test)]
mod compat_tests;

use indexmap::IndexSet;
use viewref_core::{ObjectId, SchemaGraph};

use crate::Result;
use crate::reference::{ColumnRef, ExpressionRef, Reference, ReferenceKind};
use crate::view::View;
use crate::xml::format_version;
use crate::xml::tree::{Element, parse_document};

/// One per-column fragment of a legacy view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegacyFragment {
    Column {
        table: ObjectId,
        column: Option<ObjectId>,
        table_alias: String,
        column_alias: String,
        ref_alias: String,
    },
    Expression {
        expression: String,
        alias: String,
        ref_alias: String,
    },
}

/// Body of a legacy view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegacyBody {
    Fragments(Vec<LegacyFragment>),
    /// Opaque SQL and the tables the user associated with it.
    Raw { sql: String, tables: Vec<ObjectId> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyView {
    pub name: String,
    pub body: LegacyBody,
}

/// A view as found in storage, before or after migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredView {
    Legacy(LegacyView),
    Current(View),
}

/// Bring a stored view to the current format.
pub fn convert(stored: StoredView) -> View {
    match stored {
        StoredView::Current(view) => {
            tracing::debug!(view = view.name(), "view already in current format");
            view
        }
        StoredView::Legacy(legacy) => convert_legacy(legacy),
    }
}

fn convert_legacy(legacy: LegacyView) -> View {
    let references = match legacy.body {
        LegacyBody::Fragments(fragments) => {
            tracing::debug!(
                view = %legacy.name,
                fragments = fragments.len(),
                "converting per-column legacy view"
            );
            fragments.into_iter().map(convert_fragment).collect()
        }
        LegacyBody::Raw { sql, tables } => {
            let ref_tables: IndexSet<ObjectId> = tables.into_iter().collect();
            tracing::debug!(
                view = %legacy.name,
                tables = ref_tables.len(),
                "converting raw SQL legacy view"
            );
            vec![Reference::from_kind(ReferenceKind::Expression(ExpressionRef {
                expression: sql,
                is_def_expr: true,
                ref_tables: ref_tables.into_iter().collect(),
                ..ExpressionRef::default()
            }))]
        }
    };
    View::from_parts(legacy.name, references)
}

fn convert_fragment(fragment: LegacyFragment) -> Reference {
    let (kind, ref_alias) = match fragment {
        LegacyFragment::Column {
            table,
            column,
            table_alias,
            column_alias,
            ref_alias,
        } => (
            ReferenceKind::Column(ColumnRef {
                table,
                column,
                table_alias,
                column_alias,
            }),
            ref_alias,
        ),
        LegacyFragment::Expression {
            expression,
            alias,
            ref_alias,
        } => (
            ReferenceKind::Expression(ExpressionRef {
                expression,
                alias,
                ..ExpressionRef::default()
            }),
            ref_alias,
        ),
    };
    let mut reference = Reference::from_kind(kind);
    reference.set_ref_alias(ref_alias);
    reference
}

/// Read a stored `<view>` in whichever format it was saved.
pub fn read_stored(xml: &str, graph: &impl SchemaGraph) -> Result<StoredView> {
    let root = parse_document(xml)?;
    read_stored_element(&root, graph)
}

fn read_stored_element(root: &Element, graph: &impl SchemaGraph) -> Result<StoredView> {
    root.expect_name("view")?;
    if format_version(root)?.is_current() {
        Ok(StoredView::Current(View::from_element(root, graph)?))
    } else {
        Ok(StoredView::Legacy(legacy::read_legacy_view(root, graph)?))
    }
}

/// Load a `<view>`, migrating it first when it predates the reference model.
pub fn load_view(xml: &str, graph: &impl SchemaGraph) -> Result<View> {
    read_stored(xml, graph).map(convert)
}

/// Rewrite a stored `<view>` in the current format.
///
/// Input that already carries the current marker comes back unchanged.
pub fn upgrade_xml(xml: &str, graph: &impl SchemaGraph) -> Result<String> {
    match read_stored(xml, graph)? {
        StoredView::Current(_) => Ok(xml.to_string()),
        legacy @ StoredView::Legacy(_) => convert(legacy).to_xml(graph),
    }
}
