//! Relation inference over a loaded schema.
//!
//! Discovers relations between tables in three ordered passes, each appending
//! to one shared list:
//!
//! 1. **Explicit** - declared foreign keys, confidence 1.0
//! 2. **Implicit** - `<table>_id` / `<table>Id` naming conventions, confidence 0.7
//! 3. **Polymorphic** - `<base>_id` + `<base>_type` column pairs, confidence 0.5
//!
//! Later passes read earlier ones (the polymorphic pass resolves generic
//! bases against tables that are already relation targets), so the passes
//! always run to completion before anything downstream starts.
//!
//! # Example
//!
//! ```ignore
//! use schemalens::inference::{InferenceConfig, RelationEngine};
//!
//! let engine = RelationEngine::new(InferenceConfig::default());
//! let result = engine.infer(&schema);
//! ```

mod cardinality;
mod engine;
pub mod inflection;
pub mod naming;
mod polymorphic;

pub use cardinality::assign_relation_types;
pub use engine::{InferenceConfig, InferenceResult, RelationEngine};

use serde::{Deserialize, Serialize};

/// Centralized confidence values and thresholds.
pub mod thresholds {
    /// Confidence levels per relation source.
    pub mod confidence {
        /// Backed by a declared foreign key.
        pub const EXPLICIT: f64 = 1.0;
        /// Inferred from naming conventions.
        pub const IMPLICIT: f64 = 0.7;
        /// One of several possible targets of a polymorphic pair.
        pub const POLYMORPHIC: f64 = 0.5;
        /// Relations at or above this render as direct graph edges.
        pub const DIRECT_EDGE_MIN: f64 = 0.8;
    }

    /// Cascade checker limits.
    pub mod cascade {
        /// More dependents than this on an `ON DELETE CASCADE` target is risky.
        pub const DEFAULT_RISK_THRESHOLD: usize = 3;
    }
}

/// Base names that say nothing about the referenced table.
pub const DEFAULT_GENERIC_TOKENS: &[&str] = &[
    "entity", "item", "ref", "object", "target", "subject", "resource",
];

// ============================================================================
// Relation types
// ============================================================================

/// Where a relation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationSource {
    /// Declared foreign key.
    Explicit,
    /// Naming convention.
    Implicit,
    /// Id/type column pair.
    Polymorphic,
}

impl std::fmt::Display for RelationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Explicit => write!(f, "explicit"),
            Self::Implicit => write!(f, "implicit"),
            Self::Polymorphic => write!(f, "polymorphic"),
        }
    }
}

/// Relation multiplicity as seen from the source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationType {
    OneToOne,
    OneToMany,
    #[default]
    ManyToOne,
    ManyToMany,
}

impl std::fmt::Display for RelationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelationType::OneToOne => write!(f, "one-to-one"),
            RelationType::OneToMany => write!(f, "one-to-many"),
            RelationType::ManyToOne => write!(f, "many-to-one"),
            RelationType::ManyToMany => write!(f, "many-to-many"),
        }
    }
}

/// Category of a relation warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Inferred from naming only.
    NotSchemaDeclared,
    /// Polymorphic target that Prisma cannot express directly.
    Polymorphic,
    /// `ON DELETE CASCADE` onto a heavily referenced table.
    CascadeRisk,
    /// NOT NULL foreign key without SET NULL / CASCADE.
    MissingDeletePolicy,
}

/// A warning attached to a relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationWarning {
    pub kind: WarningKind,
    pub message: String,
}

impl RelationWarning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Prisma-facing view of a relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrmRelation {
    /// Field name on the source model
    pub relation_name: String,
    /// Prisma referential action (`Cascade`, `SetNull`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<String>,
    pub relation_type: RelationType,
    pub optional: bool,
}

/// A relation between two table columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub from_table: String,
    pub from_column: String,
    pub to_table: String,
    pub to_column: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_update: Option<String>,
    /// Confidence score (0.0 to 1.0)
    pub confidence: f64,
    pub source: RelationSource,
    pub is_polymorphic: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polymorphic_type_column: Option<String>,
    /// At most one warning; see [`Relation::attach_warning`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<RelationWarning>,
    pub orm: OrmRelation,
}

impl Relation {
    /// `from_table.from_column → to_table.to_column`
    pub fn key(&self) -> String {
        format!(
            "{}.{} → {}.{}",
            self.from_table, self.from_column, self.to_table, self.to_column
        )
    }

    pub fn is_explicit(&self) -> bool {
        self.source == RelationSource::Explicit
    }

    pub fn is_self_reference(&self) -> bool {
        self.from_table == self.to_table
    }

    /// Attach a warning, respecting the single-writer rule.
    ///
    /// The field is only written when empty, except that a cascade-risk
    /// warning replaces any other kind. Returns the warning that lost, so the
    /// caller can record it instead of dropping it.
    pub fn attach_warning(&mut self, warning: RelationWarning) -> Option<RelationWarning> {
        match &self.warning {
            None => {
                self.warning = Some(warning);
                None
            }
            Some(current)
                if warning.kind == WarningKind::CascadeRisk
                    && current.kind != WarningKind::CascadeRisk =>
            {
                self.warning.replace(warning)
            }
            Some(_) => Some(warning),
        }
    }
}

/// A detected `<base>_id` / `<base>_type` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolymorphicCandidate {
    pub table: String,
    pub id_column: String,
    pub type_column: String,
    /// Candidate target tables
    pub references: Vec<String>,
    pub warning: String,
    pub suggestion: String,
}
