//! Dependency resolution over the schema graph.
//!
//! Direct dependencies come from the reference itself: the table and column
//! of a column reference, or the live `ref_tables` hints of an expression.
//! Indirect dependencies follow [`SchemaGraph::dependencies`] from there.
//!
//! The schema graph has cycles (mutual foreign keys), so the walk keeps an
//! explicit visited set and never expands an object twice.

use indexmap::IndexSet;
use viewref_core::{ObjectId, SchemaGraph};

use crate::reference::{Reference, ReferenceKind};

impl Reference {
    /// Schema objects this reference relies on.
    ///
    /// Handles to removed objects are skipped. Only set membership is
    /// meaningful, not order.
    pub fn dependencies(
        &self,
        graph: &impl SchemaGraph,
        include_indirect: bool,
    ) -> IndexSet<ObjectId> {
        let direct = self.direct_dependencies(graph);
        if include_indirect {
            expand_transitive(graph, direct)
        } else {
            direct
        }
    }

    fn direct_dependencies(&self, graph: &impl SchemaGraph) -> IndexSet<ObjectId> {
        let mut deps = IndexSet::new();
        match self.kind() {
            ReferenceKind::Column(c) => {
                deps.extend(
                    std::iter::once(c.table)
                        .chain(c.column)
                        .filter(|&id| graph.contains(id)),
                );
            }
            ReferenceKind::Expression(e) => {
                for &table in &e.ref_tables {
                    if graph.contains(table) {
                        deps.insert(table);
                    } else {
                        tracing::trace!(%table, "skipping removed referenced table");
                    }
                }
            }
        }
        deps
    }
}

/// Close `seeds` under the graph's dependency relation.
///
/// The result is the visited set itself, so it is a superset of `seeds`.
pub fn expand_transitive(
    graph: &impl SchemaGraph,
    seeds: IndexSet<ObjectId>,
) -> IndexSet<ObjectId> {
    let mut worklist: Vec<ObjectId> = seeds.iter().copied().collect();
    let mut visited = seeds;

    while let Some(id) = worklist.pop() {
        for &dep in graph.dependencies(id) {
            if graph.contains(dep) && visited.insert(dep) {
                worklist.push(dep);
            }
        }
    }

    visited
}
