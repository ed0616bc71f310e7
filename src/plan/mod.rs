//! Migration plan synthesis.
//!
//! One [`MigrationPlan`] per table, built from the schema, the finished
//! relation list, the type mappings and the external hints/impact map.
//!
//! # Architecture
//!
//! ```text
//! Table ──► type changes, adaptations     (adaptations)
//!      ├──► ORM recommendations           (recommendations)
//!      ├──► Prisma model text             (prisma)
//!      ├──► relational optimizations      (optimizations)
//!      ├──► post-migration instructions   (instructions)
//!      ├──► functional summary            (summary)
//!      ├──► dependencies                  (dependency, declared FKs only)
//!      └──► readiness score               (readiness)
//! ```
//!
//! Plans are independent of each other; the dependency graph is computed
//! once per run.

mod adaptations;
mod dependency;
mod instructions;
mod optimizations;
mod prisma;
pub mod readiness;
mod recommendations;
mod summary;
mod synthesizer;

pub use adaptations::{adaptations, type_change};
pub use dependency::{DependencyGraph, MigrationOrder};
pub use instructions::post_migration_instructions;
pub use optimizations::relational_optimizations;
pub use prisma::render_model;
pub use readiness::{is_ready, ReadinessInputs, READY_THRESHOLD};
pub use recommendations::orm_recommendations;
pub use summary::summarize;
pub use synthesizer::PlanSynthesizer;

use serde::{Deserialize, Serialize};

/// Role and functional area of a table, in plain words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionalSummary {
    pub role: String,
    pub functional_area: String,
}

/// A column whose type name changes in the target dialect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeChange {
    pub field: String,
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// A PostgreSQL adaptation note for a column or for the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adaptation {
    pub element: String,
    pub recommendation: String,
}

/// Everything needed to migrate one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationPlan {
    pub table: String,
    pub model_name: String,
    pub summary: FunctionalSummary,
    pub type_changes: Vec<TypeChange>,
    pub adaptations: Vec<Adaptation>,
    pub orm_recommendations: Vec<String>,
    pub orm_model: String,
    pub relational_optimizations: Vec<String>,
    pub post_migration_instructions: Vec<String>,
    /// Source files using the table, from the impact map
    pub linked_files: Vec<String>,
    /// Tables referenced by declared foreign keys
    pub dependencies: Vec<String>,
    /// 0..=100
    pub readiness_score: u8,
    pub ready: bool,
}
