//! Cascade and integrity checks over the relation list.
//!
//! Annotation only: no relations are added or removed. Two checks run per
//! relation:
//!
//! - **Cascade risk** - `ON DELETE CASCADE` onto a table that more than
//!   `risk_threshold` relations point at
//! - **Missing delete policy** - no action, `NO ACTION` or `RESTRICT` on a
//!   NOT NULL source column
//!
//! Warnings go through [`Relation::attach_warning`]: the field is written only
//! when empty, and a cascade-risk warning replaces anything else. Whatever
//! loses is returned as a diagnostic.

use std::collections::HashMap;

use crate::diagnostic::Diagnostic;
use crate::inference::{thresholds, Relation, RelationWarning, WarningKind};
use crate::schema::Schema;

/// The cascade and integrity checker.
#[derive(Debug, Clone, Copy)]
pub struct CascadeChecker {
    risk_threshold: usize,
}

impl Default for CascadeChecker {
    fn default() -> Self {
        Self {
            risk_threshold: thresholds::cascade::DEFAULT_RISK_THRESHOLD,
        }
    }
}

impl CascadeChecker {
    pub fn new(risk_threshold: usize) -> Self {
        Self { risk_threshold }
    }

    pub fn risk_threshold(&self) -> usize {
        self.risk_threshold
    }

    /// Annotate relations in place. Returns diagnostics for suppressed warnings.
    pub fn check(&self, schema: &Schema, relations: &mut [Relation]) -> Vec<Diagnostic> {
        let mut dependents: HashMap<String, usize> = HashMap::new();
        for rel in relations.iter() {
            *dependents.entry(rel.to_table.clone()).or_default() += 1;
        }

        let mut diagnostics = Vec::new();

        for rel in relations.iter_mut() {
            let action = rel.on_delete.as_deref().map(str::to_uppercase);

            let warning = match action.as_deref() {
                Some("CASCADE") => {
                    let count = dependents.get(&rel.to_table).copied().unwrap_or(0);
                    (count > self.risk_threshold).then(|| {
                        RelationWarning::new(
                            WarningKind::CascadeRisk,
                            format!(
                                "High-risk ON DELETE CASCADE: {} has {} dependent tables",
                                rel.to_table, count
                            ),
                        )
                    })
                }
                None | Some("NO ACTION") | Some("RESTRICT") => {
                    let not_null = schema
                        .column(&rel.from_table, &rel.from_column)
                        .is_some_and(|c| !c.nullable);
                    not_null.then(|| {
                        RelationWarning::new(
                            WarningKind::MissingDeletePolicy,
                            format!(
                                "NOT NULL foreign key {} has no ON DELETE SET NULL/CASCADE policy",
                                rel.from_column
                            ),
                        )
                    })
                }
                Some(_) => None,
            };

            let Some(warning) = warning else {
                continue;
            };

            if let Some(lost) = rel.attach_warning(warning) {
                tracing::debug!(relation = %rel.key(), kind = ?lost.kind, "warning suppressed");
                diagnostics.push(Diagnostic::info(
                    rel.key(),
                    format!("suppressed warning: {}", lost.message),
                ));
            }
        }

        diagnostics
    }
}
