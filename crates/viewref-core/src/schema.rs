//! Arena-backed schema graph.
//!
//! Objects live in a `Vec` indexed by [`ObjectId`]. Removal leaves a
//! tombstone, so a handle held elsewhere keeps pointing at an empty slot
//! rather than at whatever gets added next.

use std::collections::HashMap;

use crate::{DEFAULT_SCHEMA, ObjectId, ObjectKind, RawSchema, SchemaError, SchemaGraph, parse_schema};

#[derive(Debug, Clone)]
struct Object {
    kind: ObjectKind,
    name: String,
    parent: Option<ObjectId>,
    type_name: Option<String>,
    deps: Vec<ObjectId>,
}

/// In-memory schema object graph.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    objects: Vec<Option<Object>>,
    /// Schema name to handle.
    schemas: HashMap<String, ObjectId>,
    /// Unquoted `schema.table` to handle.
    tables: HashMap<String, ObjectId>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a JSON description.
    ///
    /// Tables are created first; foreign-key targets are resolved afterwards
    /// so declaration order doesn't matter and mutual references are allowed.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Self::from_raw(parse_schema(json)?)
    }

    pub fn from_raw(raw: RawSchema) -> Result<Self, SchemaError> {
        let mut schema = Self::new();
        let mut pending = Vec::new();

        for table in raw.tables {
            let ns = schema.add_schema(&table.schema);
            let id = schema.add_table(ns, &table.name)?;
            for (column, type_name) in &table.columns {
                schema.add_column(id, column, type_name)?;
            }
            pending.push((id, table.references));
        }

        for (id, references) in pending {
            for target in references {
                let to = schema
                    .find_table(&target)
                    .ok_or_else(|| SchemaError::UnknownTable(target.clone()))?;
                schema.add_foreign_key(id, to)?;
            }
        }

        Ok(schema)
    }

    /// Add a schema namespace, returning the existing handle if the name is taken.
    pub fn add_schema(&mut self, name: &str) -> ObjectId {
        if let Some(&id) = self.schemas.get(name) {
            return id;
        }
        let id = self.push(Object {
            kind: ObjectKind::Schema,
            name: name.to_string(),
            parent: None,
            type_name: None,
            deps: Vec::new(),
        });
        self.schemas.insert(name.to_string(), id);
        id
    }

    /// Add a table to a schema. The table depends on its schema.
    pub fn add_table(&mut self, schema: ObjectId, name: &str) -> Result<ObjectId, SchemaError> {
        let schema_name = self.expect_kind(schema, ObjectKind::Schema)?.name.clone();
        let key = format!("{schema_name}.{name}");
        if self.tables.contains_key(&key) {
            return Err(SchemaError::DuplicateTable(key));
        }

        let id = self.push(Object {
            kind: ObjectKind::Table,
            name: name.to_string(),
            parent: Some(schema),
            type_name: None,
            deps: vec![schema],
        });
        self.tables.insert(key, id);
        Ok(id)
    }

    /// Add a column to a table. The column depends on its table.
    pub fn add_column(
        &mut self,
        table: ObjectId,
        name: &str,
        type_name: &str,
    ) -> Result<ObjectId, SchemaError> {
        self.expect_kind(table, ObjectKind::Table)?;
        Ok(self.push(Object {
            kind: ObjectKind::Column,
            name: name.to_string(),
            parent: Some(table),
            type_name: Some(type_name.to_string()),
            deps: vec![table],
        }))
    }

    /// Record that `from` holds a foreign key to `to`. Cycles are allowed.
    pub fn add_foreign_key(&mut self, from: ObjectId, to: ObjectId) -> Result<(), SchemaError> {
        self.expect_kind(to, ObjectKind::Table)?;
        self.expect_kind(from, ObjectKind::Table)?;
        self.add_dependency(from, to)
    }

    /// Add a dependency edge between two live objects.
    pub fn add_dependency(&mut self, from: ObjectId, to: ObjectId) -> Result<(), SchemaError> {
        if !self.contains(to) {
            return Err(SchemaError::UnknownObject(to));
        }
        let Some(Some(object)) = self.objects.get_mut(from.index()) else {
            return Err(SchemaError::UnknownObject(from));
        };
        if !object.deps.contains(&to) {
            object.deps.push(to);
        }
        Ok(())
    }

    /// Remove an object and everything it owns.
    ///
    /// Edges pointing at removed objects are left in place; consumers skip
    /// them through [`SchemaGraph::contains`].
    pub fn remove(&mut self, id: ObjectId) {
        let Some(object) = self.objects.get_mut(id.index()).and_then(Option::take) else {
            return;
        };

        match object.kind {
            ObjectKind::Schema => self.schemas.retain(|_, v| *v != id),
            ObjectKind::Table => self.tables.retain(|_, v| *v != id),
            ObjectKind::Column => {}
        }

        let children: Vec<ObjectId> = self
            .iter()
            .filter(|&child| self.parent(child) == Some(id))
            .collect();
        for child in children {
            self.remove(child);
        }
    }

    /// Columns of a table, in creation order.
    pub fn columns(&self, table: ObjectId) -> Vec<ObjectId> {
        self.iter()
            .filter(|&id| self.kind(id) == Some(ObjectKind::Column) && self.parent(id) == Some(table))
            .collect()
    }

    /// Live object handles, in creation order.
    pub fn iter(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| ObjectId(i as u32))
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, object: Object) -> ObjectId {
        let id = ObjectId(self.objects.len() as u32);
        self.objects.push(Some(object));
        id
    }

    fn get(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id.index()).and_then(Option::as_ref)
    }

    fn expect_kind(&self, id: ObjectId, expected: ObjectKind) -> Result<&Object, SchemaError> {
        self.get(id)
            .filter(|o| o.kind == expected)
            .ok_or(SchemaError::UnexpectedObject { id, expected })
    }
}

impl SchemaGraph for Schema {
    fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    fn kind(&self, id: ObjectId) -> Option<ObjectKind> {
        self.get(id).map(|o| o.kind)
    }

    fn name(&self, id: ObjectId) -> Option<&str> {
        self.get(id).map(|o| o.name.as_str())
    }

    fn parent(&self, id: ObjectId) -> Option<ObjectId> {
        self.get(id).and_then(|o| o.parent)
    }

    fn column_type(&self, id: ObjectId) -> Option<&str> {
        self.get(id)
            .filter(|o| o.kind == ObjectKind::Column)
            .and_then(|o| o.type_name.as_deref())
    }

    fn find_table(&self, qualified_name: &str) -> Option<ObjectId> {
        if qualified_name.contains('.') {
            self.tables.get(qualified_name).copied()
        } else {
            self.tables
                .get(&format!("{DEFAULT_SCHEMA}.{qualified_name}"))
                .copied()
        }
    }

    fn find_column(&self, table: ObjectId, name: &str) -> Option<ObjectId> {
        self.iter().find(|&id| {
            self.parent(id) == Some(table)
                && self.kind(id) == Some(ObjectKind::Column)
                && self.name(id) == Some(name)
        })
    }

    fn dependencies(&self, id: ObjectId) -> &[ObjectId] {
        self.get(id).map(|o| o.deps.as_slice()).unwrap_or(&[])
    }
}
