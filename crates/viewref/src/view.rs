//! The view owning an ordered list of references.
//!
//! Order is significant: it is the column order of the generated SQL and
//! is preserved through conversion and persistence.

use indexmap::IndexSet;
use viewref_core::utils::{qualify, quote_ident};
use viewref_core::{ObjectId, SchemaGraph};

use crate::reference::{Reference, ReferenceKind};
use crate::sql::SqlRole;
use crate::{Error, Result};

/// Persisted format generation of a view definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FormatVersion(u16);

impl FormatVersion {
    /// Raw SQL string or per-column fragments, before the reference model.
    pub const LEGACY: FormatVersion = FormatVersion(1);
    /// Structured reference list.
    pub const CURRENT: FormatVersion = FormatVersion(2);

    pub fn new(version: u16) -> Self {
        Self(version)
    }

    pub fn as_u16(self) -> u16 {
        self.0
    }

    pub fn is_current(self) -> bool {
        self == Self::CURRENT
    }
}

impl std::fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    name: String,
    references: Vec<Reference>,
    format: FormatVersion,
}

impl View {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            references: Vec::new(),
            format: FormatVersion::CURRENT,
        }
    }

    /// Assemble a view from already validated references.
    pub(crate) fn from_parts(name: String, references: Vec<Reference>) -> Self {
        Self {
            name,
            references,
            format: FormatVersion::CURRENT,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format(&self) -> FormatVersion {
        self.format
    }

    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    /// Append a reference.
    ///
    /// A definition expression must be the only reference of its view, so
    /// it can't join a non-empty view and nothing can join it.
    pub fn push(&mut self, reference: Reference) -> Result<()> {
        let has_definition = self.definition_expression().is_some();
        if has_definition || (reference.is_definition_expression() && !self.is_empty()) {
            return Err(Error::ConflictingDefinition);
        }
        self.references.push(reference);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<Reference> {
        (index < self.references.len()).then(|| self.references.remove(index))
    }

    pub fn clear(&mut self) {
        self.references.clear();
    }

    /// The reference acting as the whole view body, if any.
    pub fn definition_expression(&self) -> Option<&Reference> {
        self.references
            .iter()
            .find(|r| r.is_definition_expression())
    }

    /// SQL body following `AS` in the view statement.
    ///
    /// A definition expression is emitted verbatim. Otherwise every
    /// reference adds a SELECT item and column references add their table
    /// to FROM, each table/alias pair once.
    pub fn sql_body(&self, graph: &impl SchemaGraph) -> Result<String> {
        if let Some(definition) = self.definition_expression() {
            return definition.sql_definition(SqlRole::ViewDefinition, graph);
        }
        if self.references.is_empty() {
            return Err(Error::EmptyView(self.name.clone()));
        }

        let select = self
            .references
            .iter()
            .map(|r| r.sql_definition(SqlRole::Select, graph))
            .collect::<Result<Vec<_>>>()?;

        let mut from = IndexSet::new();
        for r in &self.references {
            if matches!(r.kind(), ReferenceKind::Column(_)) {
                from.insert(r.sql_definition(SqlRole::From, graph)?);
            }
        }

        let mut sql = format!("SELECT {}", select.join(", "));
        if !from.is_empty() {
            let from: Vec<&str> = from.iter().map(String::as_str).collect();
            sql.push_str("\nFROM ");
            sql.push_str(&from.join(", "));
        }
        Ok(sql)
    }

    /// Full `CREATE OR REPLACE VIEW` statement.
    ///
    /// The terminator goes on its own line when the body ends in a `--`
    /// comment, which would otherwise swallow it.
    pub fn create_statement(&self, graph: &impl SchemaGraph) -> Result<String> {
        let body = self.sql_body(graph)?;
        let body = body.trim_end().trim_end_matches(';').trim_end();
        let name = match self.name.split_once('.') {
            Some((schema, name)) => qualify(schema, name),
            None => quote_ident(&self.name),
        };
        let terminator = match body.lines().last() {
            Some(line) if line.contains("--") => "\n;",
            _ => ";",
        };
        Ok(format!("CREATE OR REPLACE VIEW {name} AS\n{body}{terminator}"))
    }

    /// Union of the dependencies of every reference.
    pub fn dependencies(
        &self,
        graph: &impl SchemaGraph,
        include_indirect: bool,
    ) -> IndexSet<ObjectId> {
        self.references
            .iter()
            .flat_map(|r| r.dependencies(graph, include_indirect))
            .collect()
    }

    /// Live tables read by the view, from either reference variant.
    pub fn referenced_tables(&self, graph: &impl SchemaGraph) -> IndexSet<ObjectId> {
        self.references
            .iter()
            .flat_map(|r| r.table().into_iter().chain(r.referenced_tables().iter().copied()))
            .filter(|&id| graph.contains(id))
            .collect()
    }
}
