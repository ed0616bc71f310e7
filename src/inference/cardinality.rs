//! Relation-type and optionality assignment.
//!
//! Runs after the graph is built. Rules, first match wins:
//!
//! | Condition                                                    | Type         |
//! |--------------------------------------------------------------|--------------|
//! | source table is a junction                                   | many-to-many |
//! | target is an identifier, >1 distinct source table targets it | many-to-one  |
//! | target is an identifier, source column unique or primary     | one-to-one   |
//! | target is an identifier                                      | many-to-one  |
//! | otherwise                                                    | one-to-many  |

use std::collections::{HashMap, HashSet};

use crate::graph::is_junction;
use crate::schema::Schema;

use super::{Relation, RelationType};

/// Assign `relation_type`, `optional` and a default Prisma `onDelete`.
pub fn assign_relation_types(schema: &Schema, relations: &mut [Relation]) {
    let mut sources_per_target: HashMap<&str, HashSet<&str>> = HashMap::new();
    for rel in relations.iter() {
        sources_per_target
            .entry(rel.to_table.as_str())
            .or_default()
            .insert(rel.from_table.as_str());
    }
    let shared_targets: HashSet<String> = sources_per_target
        .into_iter()
        .filter(|(_, sources)| sources.len() > 1)
        .map(|(target, _)| target.to_string())
        .collect();

    for rel in relations.iter_mut() {
        let relation_type = infer_type(schema, rel, &shared_targets);
        let optional = rel.is_polymorphic
            || schema
                .column(&rel.from_table, &rel.from_column)
                .map(|c| c.nullable)
                .unwrap_or(true);

        rel.orm.relation_type = relation_type;
        rel.orm.optional = optional;
        if rel.orm.on_delete.is_none() {
            let action = if optional { "SetNull" } else { "Cascade" };
            rel.orm.on_delete = Some(action.to_string());
        }
    }
}

fn infer_type(schema: &Schema, rel: &Relation, shared_targets: &HashSet<String>) -> RelationType {
    if schema.table(&rel.from_table).is_some_and(is_junction) {
        return RelationType::ManyToMany;
    }

    let target_is_identifier = schema
        .column(&rel.to_table, &rel.to_column)
        .is_some_and(|c| c.is_identifier());
    if !target_is_identifier {
        return RelationType::OneToMany;
    }

    if shared_targets.contains(&rel.to_table) {
        return RelationType::ManyToOne;
    }

    let source_is_unique = schema
        .column(&rel.from_table, &rel.from_column)
        .is_some_and(|c| c.is_unique());
    if source_is_unique {
        RelationType::OneToOne
    } else {
        RelationType::ManyToOne
    }
}
