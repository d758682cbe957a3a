use viewref_core::SchemaGraph;
use viewref_core::utils::quote_ident;

use super::{SqlRole, SqlRoles};
use crate::reference::{ColumnRef, ExpressionRef, Reference, ReferenceKind};
use crate::{Error, Result};

impl Reference {
    /// Render the fragment for one clause role.
    ///
    /// Column references resolve table and column names through `graph`;
    /// a removed table or column is [`Error::DanglingHandle`]. Expression
    /// references never consult the graph.
    pub fn sql_definition(&self, role: SqlRole, graph: &impl SchemaGraph) -> Result<String> {
        match self.kind() {
            ReferenceKind::Column(c) => column_sql(c, role, graph),
            ReferenceKind::Expression(e) => Ok(expression_sql(e, role)),
        }
    }

    /// Render the fragment for a combined role request.
    ///
    /// See [`SqlRoles::resolve`] for precedence. An empty request renders
    /// an empty fragment.
    pub fn sql_definition_for(&self, roles: SqlRoles, graph: &impl SchemaGraph) -> Result<String> {
        match roles.resolve(self.is_definition_expression()) {
            Some(role) => self.sql_definition(role, graph),
            None => Ok(String::new()),
        }
    }
}

fn column_sql(c: &ColumnRef, role: SqlRole, graph: &impl SchemaGraph) -> Result<String> {
    let table = graph
        .sql_name(c.table)
        .ok_or(Error::DanglingHandle(c.table))?;
    let column = match c.column {
        Some(id) => Some(
            graph
                .name(id)
                .map(quote_ident)
                .ok_or(Error::DanglingHandle(id))?,
        ),
        None => None,
    };
    let qualifier = if c.table_alias.is_empty() {
        table.clone()
    } else {
        quote_ident(&c.table_alias)
    };

    let sql = match role {
        SqlRole::From => with_alias(table, &c.table_alias),
        SqlRole::Select | SqlRole::ViewDefinition => match column {
            Some(column) => with_alias(format!("{qualifier}.{column}"), &c.column_alias),
            None => format!("{qualifier}.*"),
        },
        SqlRole::Where => match column {
            Some(column) => format!("{qualifier}.{column}"),
            None => qualifier,
        },
    };
    Ok(sql)
}

fn expression_sql(e: &ExpressionRef, role: SqlRole) -> String {
    match role {
        SqlRole::ViewDefinition if e.is_def_expr => e.expression.clone(),
        SqlRole::From => with_alias(format!("({})", e.expression), &e.alias),
        SqlRole::Select | SqlRole::ViewDefinition if !e.columns.is_empty() => e
            .columns
            .iter()
            .map(|col| {
                let name = quote_ident(&col.name);
                let item = if e.alias.is_empty() {
                    name
                } else {
                    format!("{}.{name}", quote_ident(&e.alias))
                };
                with_alias(item, &col.alias)
            })
            .collect::<Vec<_>>()
            .join(", "),
        SqlRole::Select | SqlRole::ViewDefinition => {
            with_alias(format!("({})", e.expression), &e.alias)
        }
        SqlRole::Where => e.expression.clone(),
    }
}

fn with_alias(sql: String, alias: &str) -> String {
    if alias.is_empty() {
        sql
    } else {
        format!("{sql} AS {}", quote_ident(alias))
    }
}
