//! XML persistence of references and views.
//!
//! Table and column identities are stored by qualified name and resolved
//! back through the [`SchemaGraph`] on load. A view root carries a
//! `format-version` marker; roots without one are legacy definitions and
//! go through [`crate::compat`] instead.

mod reader;
pub(crate) mod tree;
mod writer;


pub(crate) use reader::{format_version, resolve_column, resolve_table};

use viewref_core::SchemaGraph;

use crate::Result;
use crate::reference::Reference;
use crate::view::View;

impl Reference {
    /// Serialize to a `<reference>` element.
    pub fn xml_definition(&self, graph: &impl SchemaGraph) -> Result<String> {
        let mut writer = writer::new_writer();
        writer::write_reference(&mut writer, self, graph)?;
        Ok(writer::finish(writer))
    }

    /// Parse a `<reference>` element, resolving names through `graph`.
    pub fn from_xml(xml: &str, graph: &impl SchemaGraph) -> Result<Reference> {
        reader::read_reference(&tree::parse_document(xml)?, graph)
    }
}

impl View {
    /// Serialize to a `<view>` element in the current format.
    pub fn to_xml(&self, graph: &impl SchemaGraph) -> Result<String> {
        let mut writer = writer::new_writer();
        writer::write_view(&mut writer, self, graph)?;
        Ok(writer::finish(writer))
    }

    /// Parse a current-format `<view>` element.
    ///
    /// Legacy definitions are rejected here; load them with
    /// [`crate::compat::load_view`].
    pub fn from_xml(xml: &str, graph: &impl SchemaGraph) -> Result<View> {
        reader::read_view(&tree::parse_document(xml)?, graph)
    }

    pub(crate) fn from_element(root: &tree::Element, graph: &impl SchemaGraph) -> Result<View> {
        reader::read_view(root, graph)
    }
}
