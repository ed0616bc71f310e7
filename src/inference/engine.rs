//! Relation inference engine.
//!
//! Runs the explicit, implicit and polymorphic passes in order over a
//! schema. Per-item problems (a foreign key pointing at a missing table, a
//! column that resolves nowhere) never fail the run: they are logged and, when
//! they indicate malformed input, recorded as diagnostics.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::diagnostic::Diagnostic;
use crate::schema::{Schema, Table};

use super::{
    naming, polymorphic, thresholds, OrmRelation, PolymorphicCandidate, Relation, RelationSource,
    RelationType, RelationWarning, WarningKind, DEFAULT_GENERIC_TOKENS,
};

/// Configuration for the inference engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Run the naming-convention pass.
    pub detect_implicit: bool,
    /// Run the polymorphic pass.
    pub detect_polymorphism: bool,
    /// Base names resolved against every referenced table.
    pub generic_tokens: Vec<String>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            detect_implicit: true,
            detect_polymorphism: true,
            generic_tokens: DEFAULT_GENERIC_TOKENS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl InferenceConfig {
    /// Declared foreign keys only.
    pub fn explicit_only() -> Self {
        Self {
            detect_implicit: false,
            detect_polymorphism: false,
            ..Self::default()
        }
    }

    pub fn with_implicit(mut self, enabled: bool) -> Self {
        self.detect_implicit = enabled;
        self
    }

    pub fn with_polymorphism(mut self, enabled: bool) -> Self {
        self.detect_polymorphism = enabled;
        self
    }

    pub fn with_generic_tokens(mut self, tokens: Vec<String>) -> Self {
        self.generic_tokens = tokens;
        self
    }
}

/// Output of the three inference passes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InferenceResult {
    pub relations: Vec<Relation>,
    pub polymorphic_candidates: Vec<PolymorphicCandidate>,
    pub diagnostics: Vec<Diagnostic>,
}

impl InferenceResult {
    pub fn explicit(&self) -> impl Iterator<Item = &Relation> {
        self.relations.iter().filter(|r| r.is_explicit())
    }

    pub fn implicit(&self) -> impl Iterator<Item = &Relation> {
        self.relations
            .iter()
            .filter(|r| r.source == RelationSource::Implicit)
    }

    pub fn polymorphic(&self) -> impl Iterator<Item = &Relation> {
        self.relations.iter().filter(|r| r.is_polymorphic)
    }
}

/// The relation inference engine.
#[derive(Debug, Clone, Default)]
pub struct RelationEngine {
    config: InferenceConfig,
}

impl RelationEngine {
    pub fn new(config: InferenceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Run all enabled passes.
    pub fn infer(&self, schema: &Schema) -> InferenceResult {
        let mut result = InferenceResult::default();

        self.explicit_pass(schema, &mut result);
        let explicit = result.relations.len();
        tracing::info!(count = explicit, "explicit relations");

        if self.config.detect_implicit {
            self.implicit_pass(schema, &mut result);
            tracing::info!(count = result.relations.len() - explicit, "implicit relations");
        }

        if self.config.detect_polymorphism {
            let before = result.relations.len();
            polymorphic::polymorphic_pass(schema, &self.config.generic_tokens, &mut result);
            tracing::info!(
                candidates = result.polymorphic_candidates.len(),
                relations = result.relations.len() - before,
                "polymorphic candidates"
            );
        }

        result
    }

    // ========================================================================
    // Pass 1: declared foreign keys
    // ========================================================================

    fn explicit_pass(&self, schema: &Schema, result: &mut InferenceResult) {
        for table in schema.tables() {
            for fk in &table.foreign_keys {
                let subject = format!("{}.{}", table.name, fk.column);
                let target_table = &fk.references.table;
                let target_column = &fk.references.column;

                let Some(target) = schema.table(target_table) else {
                    tracing::warn!(fk = %subject, target = %target_table, "foreign key target table not found, skipping");
                    result.diagnostics.push(Diagnostic::warning(
                        subject,
                        format!("foreign key references missing table '{}'", target_table),
                    ));
                    continue;
                };

                if !target.has_column(target_column) {
                    tracing::warn!(fk = %subject, target = %target_table, column = %target_column, "foreign key target column not found, skipping");
                    result.diagnostics.push(Diagnostic::warning(
                        subject,
                        format!(
                            "foreign key references missing column '{}.{}'",
                            target_table, target_column
                        ),
                    ));
                    continue;
                }

                if !table.has_column(&fk.column) {
                    tracing::warn!(fk = %subject, "foreign key source column not found, skipping");
                    result.diagnostics.push(Diagnostic::warning(
                        subject,
                        "foreign key declared on a column the table does not have",
                    ));
                    continue;
                }

                let on_delete = fk
                    .on_delete
                    .as_deref()
                    .map(naming::normalize_action)
                    .unwrap_or_else(|| "NO ACTION".to_string());
                let on_update = fk
                    .on_update
                    .as_deref()
                    .map(naming::normalize_action)
                    .unwrap_or_else(|| "NO ACTION".to_string());

                let orm_on_delete = fk
                    .on_delete
                    .as_deref()
                    .and_then(naming::prisma_referential_action)
                    .map(str::to_string);

                result.relations.push(Relation {
                    from_table: table.name.clone(),
                    from_column: fk.column.clone(),
                    to_table: target.name.clone(),
                    to_column: target_column.clone(),
                    on_delete: Some(on_delete),
                    on_update: Some(on_update),
                    confidence: thresholds::confidence::EXPLICIT,
                    source: RelationSource::Explicit,
                    is_polymorphic: false,
                    polymorphic_type_column: None,
                    warning: None,
                    orm: OrmRelation {
                        relation_name: naming::relation_name(&fk.column, &target.name),
                        on_delete: orm_on_delete,
                        relation_type: RelationType::default(),
                        optional: true,
                    },
                });
            }
        }
    }

    // ========================================================================
    // Pass 2: naming conventions
    // ========================================================================

    fn implicit_pass(&self, schema: &Schema, result: &mut InferenceResult) {
        for table in schema.tables() {
            for column in &table.columns {
                if table.is_foreign_key_column(&column.name) {
                    continue;
                }
                // Left to the polymorphic pass
                if self.config.detect_polymorphism && has_type_sibling(table, &column.name) {
                    continue;
                }

                let Some(target) = resolve_implicit_target(schema, table, &column.name) else {
                    continue;
                };
                let Some(target_column) = target.identifier_column() else {
                    tracing::debug!(
                        column = %column.name,
                        target = %target.name,
                        "implicit target has no identifier column"
                    );
                    continue;
                };
                if target.name == table.name && target_column.name == column.name {
                    continue;
                }

                let message = format!(
                    "Implicit relation {}.{} → {}.{} is not schema-declared; verify it before adding a foreign key",
                    table.name, column.name, target.name, target_column.name
                );

                result.relations.push(Relation {
                    from_table: table.name.clone(),
                    from_column: column.name.clone(),
                    to_table: target.name.clone(),
                    to_column: target_column.name.clone(),
                    on_delete: None,
                    on_update: None,
                    confidence: thresholds::confidence::IMPLICIT,
                    source: RelationSource::Implicit,
                    is_polymorphic: false,
                    polymorphic_type_column: None,
                    warning: Some(RelationWarning::new(WarningKind::NotSchemaDeclared, message)),
                    orm: OrmRelation {
                        relation_name: naming::relation_name(&column.name, &target.name),
                        on_delete: Some("SetNull".to_string()),
                        relation_type: RelationType::default(),
                        optional: true,
                    },
                });
            }
        }
    }
}

/// Resolve the table an undeclared `<x>_id` column points at.
fn resolve_implicit_target<'a>(schema: &'a Schema, table: &'a Table, column: &str) -> Option<&'a Table> {
    if naming::is_parent_reference(column) {
        return Some(table);
    }

    let base = naming::strip_id_suffix(column)?;
    if base.is_empty() {
        return None;
    }

    naming::candidate_table_names(base).into_iter().find_map(|candidate| {
        schema
            .tables()
            .iter()
            .find(|t| t.name.to_lowercase() == candidate)
    })
}

fn has_type_sibling(table: &Table, column: &str) -> bool {
    let Some(base) = column.strip_suffix("_id") else {
        return false;
    };
    naming::type_column_names(base)
        .iter()
        .any(|name| table.has_column(name))
}

/// Tables that are the target of at least one relation.
pub(super) fn referenced_tables(relations: &[Relation]) -> HashSet<String> {
    relations.iter().map(|r| r.to_table.clone()).collect()
}
