#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Read-only schema surface consumed by view references.
//!
//! Two layers:
//! - **Deserialization layer**: 1:1 mapping to a JSON schema description
//! - **Graph layer**: an arena of schema objects addressed by stable handles
//!
//! Everything outside this crate talks to the graph through [`SchemaGraph`],
//! so any external object model can stand in for the bundled [`Schema`].

use indexmap::IndexMap;

mod schema;
pub mod utils;

#[cfg(test)]
mod lib_tests;
#[cfg(test)]
mod schema_tests;

pub use schema::Schema;

/// Schema every unqualified table name resolves into.
pub const DEFAULT_SCHEMA: &str = "public";

// ============================================================================
// Deserialization Layer
// ============================================================================

/// Raw schema description.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct RawSchema {
    #[serde(default)]
    pub tables: Vec<RawTable>,
}

/// Raw table description.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawTable {
    #[serde(default = "default_schema_name")]
    pub schema: String,
    pub name: String,
    /// Column name to type name, in declaration order.
    #[serde(default)]
    pub columns: IndexMap<String, String>,
    /// Qualified names of tables this one holds foreign keys to.
    #[serde(default)]
    pub references: Vec<String>,
}

fn default_schema_name() -> String {
    DEFAULT_SCHEMA.to_string()
}

/// Parse a JSON schema description into raw tables.
pub fn parse_schema(json: &str) -> Result<RawSchema, SchemaError> {
    serde_json::from_str(json).map_err(SchemaError::Json)
}

// ============================================================================
// Common Types
// ============================================================================

/// Stable handle to an object in a schema graph.
///
/// A handle never gets reused: once its object is removed it resolves to
/// nothing, so stale handles are detectable instead of aliasing a newer object.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct ObjectId(u32);

impl ObjectId {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Create a handle from a raw index. Use only for deserialization.
    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of schema object behind a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Schema,
    Table,
    Column,
}

impl ObjectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Schema => "schema",
            ObjectKind::Table => "table",
            ObjectKind::Column => "column",
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while building a schema graph.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("invalid schema JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown table `{0}`")]
    UnknownTable(String),

    #[error("table `{0}` already exists")]
    DuplicateTable(String),

    #[error("object {0} does not exist")]
    UnknownObject(ObjectId),

    #[error("object {id} is not a live {expected}")]
    UnexpectedObject { id: ObjectId, expected: ObjectKind },
}

// ============================================================================
// SchemaGraph Trait
// ============================================================================

/// Identity-based queries over an externally owned schema object graph.
///
/// Every lookup tolerates handles to removed objects and answers with
/// `None` or an empty slice. The graph may contain dependency cycles
/// (tables with mutual foreign keys); callers walking [`dependencies`]
/// transitively must guard against revisiting objects.
///
/// [`dependencies`]: SchemaGraph::dependencies
pub trait SchemaGraph {
    fn contains(&self, id: ObjectId) -> bool;
    fn kind(&self, id: ObjectId) -> Option<ObjectKind>;
    fn name(&self, id: ObjectId) -> Option<&str>;

    /// Owning object: the schema of a table, the table of a column.
    fn parent(&self, id: ObjectId) -> Option<ObjectId>;

    /// Type name of a column.
    fn column_type(&self, id: ObjectId) -> Option<&str>;

    /// Look up a table by `schema.name`; a bare name resolves in [`DEFAULT_SCHEMA`].
    fn find_table(&self, qualified_name: &str) -> Option<ObjectId>;
    fn find_column(&self, table: ObjectId, name: &str) -> Option<ObjectId>;

    /// Objects `id` directly depends on. Entries may be stale.
    fn dependencies(&self, id: ObjectId) -> &[ObjectId];

    /// Unquoted `schema.name` for tables, plain name for everything else.
    fn qualified_name(&self, id: ObjectId) -> Option<String> {
        let name = self.name(id)?;
        match (self.kind(id)?, self.parent(id)) {
            (ObjectKind::Table, Some(schema)) => match self.name(schema) {
                Some(schema_name) => Some(format!("{schema_name}.{name}")),
                None => Some(name.to_string()),
            },
            _ => Some(name.to_string()),
        }
    }

    /// Quoted identifier as it appears in SQL.
    fn sql_name(&self, id: ObjectId) -> Option<String> {
        let name = self.name(id)?;
        match (self.kind(id)?, self.parent(id).and_then(|s| self.name(s))) {
            (ObjectKind::Table, Some(schema_name)) => Some(utils::qualify(schema_name, name)),
            _ => Some(utils::quote_ident(name)),
        }
    }
}

impl<T: SchemaGraph + ?Sized> SchemaGraph for &T {
    fn contains(&self, id: ObjectId) -> bool {
        (*self).contains(id)
    }
    fn kind(&self, id: ObjectId) -> Option<ObjectKind> {
        (*self).kind(id)
    }
    fn name(&self, id: ObjectId) -> Option<&str> {
        (*self).name(id)
    }
    fn parent(&self, id: ObjectId) -> Option<ObjectId> {
        (*self).parent(id)
    }
    fn column_type(&self, id: ObjectId) -> Option<&str> {
        (*self).column_type(id)
    }
    fn find_table(&self, qualified_name: &str) -> Option<ObjectId> {
        (*self).find_table(qualified_name)
    }
    fn find_column(&self, table: ObjectId, name: &str) -> Option<ObjectId> {
        (*self).find_column(table, name)
    }
    fn dependencies(&self, id: ObjectId) -> &[ObjectId] {
        (*self).dependencies(id)
    }
}
