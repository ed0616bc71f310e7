//! Node and edge types for the relational graph.

use serde::{Deserialize, Serialize};

// ============================================================================
// Supporting Enums
// ============================================================================

/// Role of a table in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeClassification {
    /// Ordinary business table
    Entity,
    /// Exists to link two or more other tables
    Junction,
    /// Infrastructure table (logs, sessions, caches), from external hints
    Technical,
    /// Owns a polymorphic id/type pair
    Polymorphic,
}

impl std::fmt::Display for NodeClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeClassification::Entity => write!(f, "entity"),
            NodeClassification::Junction => write!(f, "junction"),
            NodeClassification::Technical => write!(f, "technical"),
            NodeClassification::Polymorphic => write!(f, "polymorphic"),
        }
    }
}

/// How an edge was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// High-confidence relation (declared foreign key)
    Direct,
    /// Naming-convention relation
    Implicit,
    /// One of several polymorphic targets
    Polymorphic,
}

// ============================================================================
// Nodes and edges
// ============================================================================

/// A table in the relational graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Table name
    pub id: String,
    /// Display label (the table name)
    pub label: String,
    pub classification: NodeClassification,
    pub in_degree: usize,
    pub out_degree: usize,
    /// (in + out) / total edges, in [0, 1]
    pub centrality: f64,
}

/// One relation, as a graph edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    /// `from_column → to_column`
    pub label: String,
    pub kind: EdgeKind,
    /// The relation carries a warning
    pub warning: bool,
}
