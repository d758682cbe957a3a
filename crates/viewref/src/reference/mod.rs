//! The reference entity.
//!
//! A [`Reference`] is one source of data inside a view: either a column of a
//! table ([`ColumnRef`]) or a free-text SQL expression ([`ExpressionRef`]).
//! The variant is fixed at construction. Operations that only make sense
//! for one variant return [`Error::IncompatibleType`] on the other.

mod column;


pub use column::SimpleColumn;

use viewref_core::{ObjectId, SchemaGraph};

use crate::{Error, Result};

/// Variant tag of a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceType {
    Column,
    Expression,
}

impl ReferenceType {
    /// Tag used in the persisted format.
    pub fn as_str(self) -> &'static str {
        match self {
            ReferenceType::Column => "column",
            ReferenceType::Expression => "expression",
        }
    }

    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "column" => Some(ReferenceType::Column),
            "expression" => Some(ReferenceType::Expression),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a table column.
///
/// A missing column means every column of the table (`alias.*`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    pub(crate) table: ObjectId,
    pub(crate) column: Option<ObjectId>,
    pub(crate) table_alias: String,
    pub(crate) column_alias: String,
}

impl ColumnRef {
    pub fn table(&self) -> ObjectId {
        self.table
    }

    pub fn column(&self) -> Option<ObjectId> {
        self.column
    }

    pub fn table_alias(&self) -> &str {
        &self.table_alias
    }

    pub fn column_alias(&self) -> &str {
        &self.column_alias
    }
}

/// Reference to a free-text SQL expression.
///
/// The expression is opaque: it is never parsed, so the tables it reads are
/// only known through the hints in `ref_tables`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpressionRef {
    pub(crate) expression: String,
    pub(crate) alias: String,
    /// The expression is the whole body of its view.
    pub(crate) is_def_expr: bool,
    /// Output columns; only populated while `is_def_expr` is set.
    pub(crate) columns: Vec<SimpleColumn>,
    /// Tables the expression reads. Hints only, entries may go stale.
    pub(crate) ref_tables: Vec<ObjectId>,
}

impl ExpressionRef {
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn is_definition_expression(&self) -> bool {
        self.is_def_expr
    }

    pub fn columns(&self) -> &[SimpleColumn] {
        &self.columns
    }

    pub fn referenced_tables(&self) -> &[ObjectId] {
        &self.ref_tables
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceKind {
    Column(ColumnRef),
    Expression(ExpressionRef),
}

/// One column or expression reference inside a view.
#[derive(Debug, Clone)]
pub struct Reference {
    kind: ReferenceKind,
    /// Display label, independent from the SQL aliases.
    ref_alias: String,
}

impl Reference {
    /// Create a reference to a table column, or to all columns when `column` is `None`.
    pub fn new_column(
        table: ObjectId,
        column: Option<ObjectId>,
        table_alias: impl Into<String>,
        column_alias: impl Into<String>,
    ) -> Self {
        Self::from_kind(ReferenceKind::Column(ColumnRef {
            table,
            column,
            table_alias: table_alias.into(),
            column_alias: column_alias.into(),
        }))
    }

    /// Create a reference to an SQL expression.
    pub fn new_expression(expression: impl Into<String>, alias: impl Into<String>) -> Self {
        Self::from_kind(ReferenceKind::Expression(ExpressionRef {
            expression: expression.into(),
            alias: alias.into(),
            ..ExpressionRef::default()
        }))
    }

    /// Create an expression reference that is the entire body of its view.
    pub fn definition(expression: impl Into<String>) -> Self {
        Self::from_kind(ReferenceKind::Expression(ExpressionRef {
            expression: expression.into(),
            is_def_expr: true,
            ..ExpressionRef::default()
        }))
    }

    pub fn from_kind(kind: ReferenceKind) -> Self {
        Self {
            kind,
            ref_alias: String::new(),
        }
    }

    pub fn kind(&self) -> &ReferenceKind {
        &self.kind
    }

    pub fn reference_type(&self) -> ReferenceType {
        match self.kind {
            ReferenceKind::Column(_) => ReferenceType::Column,
            ReferenceKind::Expression(_) => ReferenceType::Expression,
        }
    }

    pub fn as_column(&self) -> Option<&ColumnRef> {
        match &self.kind {
            ReferenceKind::Column(c) => Some(c),
            ReferenceKind::Expression(_) => None,
        }
    }

    pub fn as_expression(&self) -> Option<&ExpressionRef> {
        match &self.kind {
            ReferenceKind::Expression(e) => Some(e),
            ReferenceKind::Column(_) => None,
        }
    }

    /// Mark the expression as the entire view body. Clearing the flag drops
    /// the generated columns.
    pub fn set_definition_expression(&mut self, value: bool) -> Result<()> {
        let expr = self.expression_mut("set_definition_expression")?;
        expr.is_def_expr = value;
        if !value {
            expr.columns.clear();
        }
        Ok(())
    }

    pub fn is_definition_expression(&self) -> bool {
        self.as_expression().is_some_and(|e| e.is_def_expr)
    }

    /// Record a table the expression reads. Duplicates are ignored.
    pub fn add_referenced_table(&mut self, table: ObjectId) -> Result<()> {
        let expr = self.expression_mut("add_referenced_table")?;
        if !expr.ref_tables.contains(&table) {
            expr.ref_tables.push(table);
        }
        Ok(())
    }

    /// Position of `table` among the referenced tables.
    pub fn referenced_table_index(&self, table: ObjectId) -> Option<usize> {
        self.referenced_tables().iter().position(|&t| t == table)
    }

    pub fn clear_referenced_tables(&mut self) -> Result<()> {
        self.expression_mut("clear_referenced_tables")?
            .ref_tables
            .clear();
        Ok(())
    }

    pub fn referenced_tables(&self) -> &[ObjectId] {
        self.as_expression()
            .map(|e| e.ref_tables.as_slice())
            .unwrap_or(&[])
    }

    pub fn table(&self) -> Option<ObjectId> {
        self.as_column().map(|c| c.table)
    }

    pub fn column(&self) -> Option<ObjectId> {
        self.as_column().and_then(|c| c.column)
    }

    /// Expression text; empty for column references.
    pub fn expression(&self) -> &str {
        self.as_expression()
            .map(|e| e.expression.as_str())
            .unwrap_or("")
    }

    /// Column alias; empty for expression references.
    pub fn column_alias(&self) -> &str {
        self.as_column()
            .map(|c| c.column_alias.as_str())
            .unwrap_or("")
    }

    /// Table alias for column references, expression alias otherwise.
    pub fn alias(&self) -> &str {
        match &self.kind {
            ReferenceKind::Column(c) => &c.table_alias,
            ReferenceKind::Expression(e) => &e.alias,
        }
    }

    pub fn ref_alias(&self) -> &str {
        &self.ref_alias
    }

    pub fn set_ref_alias(&mut self, alias: impl Into<String>) {
        self.ref_alias = alias.into();
    }

    /// Add an output column generated by a definition expression.
    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        type_name: impl Into<String>,
        alias: impl Into<String>,
    ) -> Result<()> {
        let column = SimpleColumn::new(name, type_name, alias);
        if column.name.is_empty() {
            return Err(Error::EmptyColumnName);
        }
        self.definition_mut("add_column")?.columns.push(column);
        Ok(())
    }

    /// Add an output column copied from a schema column.
    pub fn add_schema_column(&mut self, column: ObjectId, graph: &impl SchemaGraph) -> Result<()> {
        let name = graph.name(column).ok_or(Error::UnknownObject(column))?;
        let type_name = graph.column_type(column).ok_or(Error::UnknownObject(column))?;
        self.add_column(name, type_name, "")
    }

    /// Drop all generated columns. No-op on column references.
    pub fn remove_columns(&mut self) {
        if let ReferenceKind::Expression(e) = &mut self.kind {
            e.columns.clear();
        }
    }

    pub fn columns(&self) -> &[SimpleColumn] {
        self.as_expression()
            .map(|e| e.columns.as_slice())
            .unwrap_or(&[])
    }

    fn expression_mut(&mut self, operation: &'static str) -> Result<&mut ExpressionRef> {
        match &mut self.kind {
            ReferenceKind::Expression(e) => Ok(e),
            ReferenceKind::Column(_) => Err(Error::IncompatibleType {
                operation,
                required: "an expression reference",
            }),
        }
    }

    fn definition_mut(&mut self, operation: &'static str) -> Result<&mut ExpressionRef> {
        match &mut self.kind {
            ReferenceKind::Expression(e) if e.is_def_expr => Ok(e),
            _ => Err(Error::IncompatibleType {
                operation,
                required: "a definition expression",
            }),
        }
    }
}

/// Structural equality over table, column, expression and the three aliases.
///
/// The definition flag, generated columns and referenced tables don't
/// take part.
impl PartialEq for Reference {
    fn eq(&self, other: &Self) -> bool {
        self.table() == other.table()
            && self.column() == other.column()
            && self.expression() == other.expression()
            && self.alias() == other.alias()
            && self.column_alias() == other.column_alias()
            && self.ref_alias == other.ref_alias
    }
}

impl Eq for Reference {}
