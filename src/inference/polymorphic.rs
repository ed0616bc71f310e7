//! Polymorphic reference detection (`<base>_id` + `<base>_type`).
//!
//! A polymorphic pair can point at any of several tables. Candidate targets
//! are resolved by name; generic bases (`entity`, `item`, ...) carry no name
//! information and resolve to every table that is already referenced by
//! another relation.

use inflector::Inflector;

use crate::schema::{Schema, Table};

use super::engine::{referenced_tables, InferenceResult};
use super::inflection::{pluralize, singularize};
use super::{
    naming, thresholds, OrmRelation, PolymorphicCandidate, Relation, RelationSource,
    RelationType, RelationWarning, WarningKind,
};

const CANDIDATE_WARNING: &str = "Polymorphic reference detected; Prisma cannot model it directly";
const CANDIDATE_SUGGESTION: &str =
    "Consider restructuring into one explicit relation per referenced type";

pub(super) fn polymorphic_pass(schema: &Schema, generic_tokens: &[String], result: &mut InferenceResult) {
    let mut referenced = referenced_tables(&result.relations);

    for table in schema.tables() {
        for column in &table.columns {
            let Some(base) = column.name.strip_suffix("_id") else {
                continue;
            };
            if base.is_empty() || table.is_foreign_key_column(&column.name) {
                continue;
            }

            let Some(type_column) = naming::type_column_names(base)
                .into_iter()
                .find(|name| table.has_column(name))
            else {
                continue;
            };

            let targets: Vec<&Table> = if is_generic(base, generic_tokens) {
                schema
                    .tables()
                    .iter()
                    .filter(|t| t.identifier_column().is_some() && referenced.contains(&t.name))
                    .collect()
            } else {
                resolve_by_name(schema, base)
            };

            if targets.is_empty() {
                tracing::debug!(
                    table = %table.name,
                    column = %column.name,
                    "polymorphic pair resolved to no target tables"
                );
                continue;
            }

            let relation_base = naming::relation_name(&column.name, &table.name);
            let mut references = Vec::with_capacity(targets.len());

            for target in targets {
                let Some(target_column) = target.identifier_column() else {
                    continue;
                };
                references.push(target.name.clone());
                referenced.insert(target.name.clone());

                result.relations.push(Relation {
                    from_table: table.name.clone(),
                    from_column: column.name.clone(),
                    to_table: target.name.clone(),
                    to_column: target_column.name.clone(),
                    on_delete: None,
                    on_update: None,
                    confidence: thresholds::confidence::POLYMORPHIC,
                    source: RelationSource::Polymorphic,
                    is_polymorphic: true,
                    polymorphic_type_column: Some(type_column.clone()),
                    warning: Some(RelationWarning::new(
                        WarningKind::Polymorphic,
                        format!(
                            "Polymorphic relation via {}; limited support in Prisma",
                            type_column
                        ),
                    )),
                    orm: OrmRelation {
                        relation_name: format!(
                            "{}On{}",
                            relation_base,
                            target.name.to_pascal_case()
                        ),
                        on_delete: Some("SetNull".to_string()),
                        relation_type: RelationType::default(),
                        optional: true,
                    },
                });
            }

            result.polymorphic_candidates.push(PolymorphicCandidate {
                table: table.name.clone(),
                id_column: column.name.clone(),
                type_column,
                references,
                warning: CANDIDATE_WARNING.to_string(),
                suggestion: CANDIDATE_SUGGESTION.to_string(),
            });
        }
    }
}

fn is_generic(base: &str, generic_tokens: &[String]) -> bool {
    let lower = base.to_lowercase();
    generic_tokens.iter().any(|t| t.eq_ignore_ascii_case(&lower))
}

/// Tables whose name equals, pluralizes to, or contains the singular base.
fn resolve_by_name<'a>(schema: &'a Schema, base: &str) -> Vec<&'a Table> {
    let singular = singularize(base);
    let plural = pluralize(&singular);

    schema
        .tables()
        .iter()
        .filter(|t| {
            let name = t.name.to_lowercase();
            name == singular || name == plural || name.contains(&singular)
        })
        .filter(|t| t.identifier_column().is_some())
        .collect()
}
