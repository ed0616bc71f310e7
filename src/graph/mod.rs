//! Relational graph - tables as nodes, relations as edges.
//!
//! The graph is derived entirely from the schema and the relation list and is
//! rebuilt wholesale on every run. Centrality is relative to the run's edge
//! count, so values are only comparable within one graph.

mod builder;
pub mod types;

pub use builder::{classify, is_junction};
pub use types::*;

use serde::{Deserialize, Serialize};

/// Nodes sorted by descending centrality, and one edge per relation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationalGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl RelationalGraph {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn classification(&self, id: &str) -> Option<NodeClassification> {
        self.node(id).map(|n| n.classification)
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges leaving a table.
    pub fn outgoing<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges.iter().filter(move |e| e.source == id)
    }

    /// Edges entering a table.
    pub fn incoming<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges.iter().filter(move |e| e.target == id)
    }
}
