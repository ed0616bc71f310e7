//! Graph construction from a schema and its relation list.
//!
//! Construction happens in three phases:
//! - Phase 1: classify every table and create its node
//! - Phase 2: create one edge per relation
//! - Phase 3: compute degrees on a petgraph `DiGraph`, derive centrality and
//!   sort nodes by it

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::inference::{thresholds, PolymorphicCandidate, Relation};
use crate::schema::{ExternalInputs, Schema, Table, TableRole};

use super::{EdgeKind, GraphEdge, GraphNode, NodeClassification, RelationalGraph};

/// Junction heuristic: at least two declared foreign keys, and more than one
/// foreign key per two columns.
pub fn is_junction(table: &Table) -> bool {
    let fk_count = table.foreign_keys.len();

    fk_count >= 2
        && !table.columns.is_empty()
        && fk_count as f64 / table.columns.len() as f64 > 0.5
}

/// Classify a table for the graph.
pub fn classify(
    table: &Table,
    polymorphic_owners: &HashSet<&str>,
    inputs: &ExternalInputs,
) -> NodeClassification {
    if polymorphic_owners.contains(table.name.as_str()) {
        NodeClassification::Polymorphic
    } else if is_junction(table) {
        NodeClassification::Junction
    } else if inputs.role(&table.name) == Some(TableRole::Technical) {
        NodeClassification::Technical
    } else {
        NodeClassification::Entity
    }
}

pub(super) fn edge_kind(relation: &Relation) -> EdgeKind {
    if relation.is_polymorphic {
        EdgeKind::Polymorphic
    } else if relation.confidence < thresholds::confidence::DIRECT_EDGE_MIN {
        EdgeKind::Implicit
    } else {
        EdgeKind::Direct
    }
}

impl RelationalGraph {
    /// Build the graph for one run.
    pub fn build(
        schema: &Schema,
        relations: &[Relation],
        candidates: &[PolymorphicCandidate],
        inputs: &ExternalInputs,
    ) -> Self {
        let polymorphic_owners: HashSet<&str> =
            candidates.iter().map(|c| c.table.as_str()).collect();

        // Phase 1: nodes
        let mut graph: DiGraph<&str, ()> = DiGraph::new();
        let mut index: HashMap<&str, NodeIndex> = HashMap::with_capacity(schema.len());
        let mut nodes: Vec<GraphNode> = Vec::with_capacity(schema.len());

        for table in schema.tables() {
            index.insert(table.name.as_str(), graph.add_node(table.name.as_str()));
            nodes.push(GraphNode {
                id: table.name.clone(),
                label: table.name.clone(),
                classification: classify(table, &polymorphic_owners, inputs),
                in_degree: 0,
                out_degree: 0,
                centrality: 0.0,
            });
        }

        // Phase 2: edges
        let mut edges: Vec<GraphEdge> = Vec::with_capacity(relations.len());
        for relation in relations {
            let (Some(&from), Some(&to)) = (
                index.get(relation.from_table.as_str()),
                index.get(relation.to_table.as_str()),
            ) else {
                continue;
            };
            graph.add_edge(from, to, ());
            edges.push(GraphEdge {
                source: relation.from_table.clone(),
                target: relation.to_table.clone(),
                label: format!("{} → {}", relation.from_column, relation.to_column),
                kind: edge_kind(relation),
                warning: relation.warning.is_some(),
            });
        }

        // Phase 3: degrees and centrality
        let total = graph.edge_count();
        for node in nodes.iter_mut() {
            let Some(&idx) = index.get(node.id.as_str()) else {
                continue;
            };
            node.in_degree = graph.edges_directed(idx, Direction::Incoming).count();
            node.out_degree = graph.edges_directed(idx, Direction::Outgoing).count();
            node.centrality = if total == 0 {
                0.0
            } else {
                (node.in_degree + node.out_degree) as f64 / total as f64
            };
        }

        // Stable: ties keep schema order
        nodes.sort_by(|a, b| b.centrality.total_cmp(&a.centrality));

        Self { nodes, edges }
    }
}
