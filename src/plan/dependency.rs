//! Table dependency graph from declared foreign keys.
//!
//! Only declared foreign keys count. Inferred relations are hypotheses and
//! never make one table wait for another.

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::diagnostic::Diagnostic;
use crate::schema::Schema;

/// Table → distinct referenced tables, in foreign-key order.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    tables: Vec<String>,
    dependencies: HashMap<String, Vec<String>>,
}

/// Tables in migration order, plus any dependency cycles found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationOrder {
    pub order: Vec<String>,
    pub cycles: Vec<Vec<String>>,
}

impl DependencyGraph {
    pub fn from_schema(schema: &Schema) -> Self {
        let mut dependencies: HashMap<String, Vec<String>> = HashMap::with_capacity(schema.len());

        for table in schema.tables() {
            let mut targets: Vec<String> = Vec::new();
            for fk in &table.foreign_keys {
                if !schema.contains(&fk.references.table) {
                    continue;
                }
                if !targets.contains(&fk.references.table) {
                    targets.push(fk.references.table.clone());
                }
            }
            dependencies.insert(table.name.clone(), targets);
        }

        Self {
            tables: schema.tables().iter().map(|t| t.name.clone()).collect(),
            dependencies,
        }
    }

    /// Tables this one references. Self-references are included.
    pub fn dependencies(&self, table: &str) -> &[String] {
        self.dependencies
            .get(table)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Referenced tables before the tables that reference them.
    ///
    /// Strongly connected components come out of `tarjan_scc` in reverse
    /// topological order, which for `table → dependency` edges puts
    /// dependencies first. Members of a cycle keep schema order.
    pub fn migration_order(&self) -> MigrationOrder {
        let mut graph: DiGraph<usize, ()> = DiGraph::new();
        let mut index: HashMap<&str, NodeIndex> = HashMap::with_capacity(self.tables.len());

        for (pos, table) in self.tables.iter().enumerate() {
            index.insert(table.as_str(), graph.add_node(pos));
        }

        for table in &self.tables {
            let Some(&from) = index.get(table.as_str()) else {
                continue;
            };
            for target in self.dependencies(table) {
                if target == table {
                    continue;
                }
                if let Some(&to) = index.get(target.as_str()) {
                    graph.add_edge(from, to, ());
                }
            }
        }

        let mut result = MigrationOrder::default();
        for component in tarjan_scc(&graph) {
            let mut positions: Vec<usize> = component.iter().map(|&idx| graph[idx]).collect();
            positions.sort_unstable();
            let members: Vec<String> = positions
                .into_iter()
                .map(|pos| self.tables[pos].clone())
                .collect();

            if members.len() > 1 {
                tracing::warn!(tables = ?members, "foreign key cycle");
                result.cycles.push(members.clone());
            }
            result.order.extend(members);
        }
        result
    }
}

impl MigrationOrder {
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.cycles
            .iter()
            .map(|cycle| {
                Diagnostic::warning(
                    cycle.join(", "),
                    format!("foreign key cycle: {}", cycle.join(" → ")),
                )
            })
            .collect()
    }
}
