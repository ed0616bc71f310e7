//! # schemalens
//!
//! Relationship and type inference over relational schema metadata, with
//! per-table migration planning towards PostgreSQL and Prisma.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │          Schema (tables, columns, declared FKs)          │
//! │          + ExternalInputs (role hints, impact map)       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [inference]
//! ┌─────────────────────────────────────────────────────────┐
//! │   Relations: explicit (1.0) → implicit (0.7)             │
//! │              → polymorphic (0.5)                         │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [cascade]
//! ┌─────────────────────────────────────────────────────────┐
//! │   Cascade-risk and delete-policy warnings                │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [graph] + relation types
//! ┌─────────────────────────────────────────────────────────┐
//! │   RelationalGraph (classification, centrality)           │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [typemap] + [plan]
//! ┌─────────────────────────────────────────────────────────┐
//! │   Type mappings, MigrationPlans, migration order         │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! [`analyze::Analyzer`] runs the whole pipeline and returns one
//! [`analyze::AnalysisReport`].

pub mod analyze;
pub mod cascade;
pub mod config;
pub mod diagnostic;
pub mod graph;
pub mod inference;
pub mod plan;
pub mod schema;
pub mod typemap;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::analyze::{AnalysisOptions, AnalysisReport, Analyzer};
    pub use crate::cascade::CascadeChecker;
    pub use crate::diagnostic::{Diagnostic, Severity};
    pub use crate::graph::{EdgeKind, NodeClassification, RelationalGraph};
    pub use crate::inference::{
        InferenceConfig, PolymorphicCandidate, Relation, RelationEngine, RelationSource,
        RelationType, WarningKind,
    };
    pub use crate::plan::{MigrationPlan, PlanSynthesizer};
    pub use crate::schema::{
        Column, ExternalInputs, ForeignKey, Index, Schema, SchemaError, Table, TableRole,
    };
    pub use crate::typemap::{map_column, TypeMappingEntry};
}

pub use analyze::{AnalysisOptions, AnalysisReport, Analyzer};
pub use schema::{ExternalInputs, Schema, SchemaError};
