//! View reference model for database views.
//!
//! A view is an ordered list of [`Reference`]s. Each reference is either a
//! column of a table or a free-text SQL expression. This crate provides:
//! - `reference` - the reference entity and its generated output columns
//! - `dependencies` - direct and transitive dependency resolution
//! - `sql` - per-clause SQL fragment emission
//! - `xml` - persistence format
//! - `view` - the owning view and statement assembly
//! - `compat` - one-shot migration of legacy view definitions
//!
//! Schema objects are never owned here. Tables and columns are addressed by
//! [`ObjectId`] handles and resolved through a [`SchemaGraph`].

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod compat;
pub mod dependencies;
pub mod reference;
pub mod sql;
pub mod view;
pub mod xml;

#[cfg(test)]
mod dependencies_tests;

#[cfg(test)]
pub mod test_utils;

pub use compat::{LegacyBody, LegacyFragment, LegacyView, StoredView};
pub use reference::{ColumnRef, ExpressionRef, Reference, ReferenceKind, ReferenceType, SimpleColumn};
pub use sql::{SqlRole, SqlRoles};
pub use view::{FormatVersion, View};
pub use viewref_core::{ObjectId, ObjectKind, Schema, SchemaGraph};

/// Errors raised by reference operations, emission and persistence.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Operation valid for one reference variant was called on the other.
    #[error("`{operation}` requires {required}")]
    IncompatibleType {
        operation: &'static str,
        required: &'static str,
    },

    #[error("generated column name cannot be empty")]
    EmptyColumnName,

    #[error("schema object {0} does not exist")]
    UnknownObject(ObjectId),

    /// A column reference points at a table or column that no longer exists.
    #[error("reference points at removed schema object {0}")]
    DanglingHandle(ObjectId),

    #[error("a definition expression must be the only reference of its view")]
    ConflictingDefinition,

    #[error("view `{0}` has no references")]
    EmptyView(String),

    #[error("unknown table `{0}`")]
    UnknownTable(String),

    #[error("unknown column `{column}` in table `{table}`")]
    UnknownColumn { table: String, column: String },

    #[error("<{element}> is missing attribute `{attribute}`")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("<{element}> has invalid {attribute}=\"{value}\"")]
    InvalidAttribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },

    #[error("<{parent}> is missing child <{child}>")]
    MissingElement {
        parent: &'static str,
        child: &'static str,
    },

    #[error("expected <{expected}>, found <{found}>")]
    UnexpectedElement {
        expected: &'static str,
        found: String,
    },

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for reference operations.
pub type Result<T> = std::result::Result<T, Error>;
