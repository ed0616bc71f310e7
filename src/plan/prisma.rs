//! Prisma model text for one table.
//!
//! Layout:
//!
//! ```text
//! model Orders {
//!   <one scalar field per column, in column order>
//!   <forward relation fields>
//!   <inverse relation fields>
//!
//!   <@@id / @@index directives>
//!   @@map("orders")
//! }
//! ```
//!
//! Polymorphic relations are left out: Prisma has no way to express a
//! reference whose target depends on another column.

use std::collections::HashSet;

use inflector::Inflector;

use crate::inference::naming::{collection_field_name, model_name, single_field_name};
use crate::inference::{Relation, RelationType};
use crate::schema::Table;
use crate::typemap::TypeMappingEntry;

const INDENT: &str = "  ";

/// Render the model. `entries` holds one mapping per column, in column order.
pub fn render_model(table: &Table, entries: &[TypeMappingEntry], relations: &[Relation]) -> String {
    let composite_key = table.primary_key_columns().count() > 1;
    let mut used: HashSet<String> = table.columns.iter().map(|c| c.name.clone()).collect();
    let mut lines = vec![format!("model {} {{", model_name(&table.name))];

    // Scalars
    for (column, entry) in table.columns.iter().zip(entries) {
        let declaration = if composite_key {
            scalar_without_id(entry)
        } else {
            entry.orm_declaration()
        };
        lines.push(format!("{}{} {}", INDENT, column.name, declaration));
    }

    let rendered: Vec<&Relation> = relations.iter().filter(|r| !r.is_polymorphic).collect();

    // Forward relations
    for rel in rendered.iter().filter(|r| r.from_table == table.name) {
        let field = claim_field(&mut used, &rel.orm.relation_name, "Relation");

        let mut args = Vec::with_capacity(4);
        if let Some(label) = relation_label(rel, &rendered) {
            args.push(format!("\"{}\"", label));
        }
        args.push(format!("fields: [{}]", rel.from_column));
        args.push(format!("references: [{}]", rel.to_column));
        if rel.is_explicit() {
            if let Some(action) = &rel.orm.on_delete {
                args.push(format!("onDelete: {}", action));
            }
        }

        lines.push(format!(
            "{}{} {}{} @relation({})",
            INDENT,
            field,
            model_name(&rel.to_table),
            if rel.orm.optional { "?" } else { "" },
            args.join(", ")
        ));
    }

    // Inverse relations
    for rel in rendered.iter().filter(|r| r.to_table == table.name) {
        let (base, suffix) = match rel.orm.relation_type {
            RelationType::OneToOne => (single_field_name(&rel.from_table), "?"),
            _ => (collection_field_name(&rel.from_table), "[]"),
        };
        let field = claim_field(&mut used, &base, &rel.orm.relation_name.to_pascal_case());

        let mut line = format!("{}{} {}{}", INDENT, field, model_name(&rel.from_table), suffix);
        if let Some(label) = relation_label(rel, &rendered) {
            line.push_str(&format!(" @relation(\"{}\")", label));
        }
        lines.push(line);
    }

    // Block attributes
    lines.push(String::new());
    if composite_key {
        let keys: Vec<&str> = table.primary_key_columns().map(|c| c.name.as_str()).collect();
        lines.push(format!("{}@@id([{}])", INDENT, keys.join(", ")));
    }
    for index in table.indexes.iter().filter(|i| !i.unique && !i.columns.is_empty()) {
        lines.push(format!("{}@@index([{}])", INDENT, index.columns.join(", ")));
    }
    lines.push(format!("{}@@map(\"{}\")", INDENT, table.name));
    lines.push("}".to_string());

    lines.join("\n")
}

/// Field type and attributes with `@id` removed, for composite keys.
fn scalar_without_id(entry: &TypeMappingEntry) -> String {
    let mut entry = entry.clone();
    entry.orm_attributes.retain(|a| a != "@id");
    entry.orm_declaration()
}

/// Take `base` if free, else `base` + `disambiguator`, else a numbered name.
fn claim_field(used: &mut HashSet<String>, base: &str, disambiguator: &str) -> String {
    let mut candidate = base.to_string();
    if used.contains(&candidate) {
        candidate = format!("{}{}", base, disambiguator);
    }
    let mut n = 2;
    while used.contains(&candidate) {
        candidate = format!("{}{}{}", base, disambiguator, n);
        n += 1;
    }
    used.insert(candidate.clone());
    candidate
}

/// Relation name, needed when the relation points at its own table or the
/// two models are linked more than once.
fn relation_label(rel: &Relation, rendered: &[&Relation]) -> Option<String> {
    let links = rendered
        .iter()
        .filter(|other| {
            (other.from_table == rel.from_table && other.to_table == rel.to_table)
                || (other.from_table == rel.to_table && other.to_table == rel.from_table)
        })
        .count();

    (rel.is_self_reference() || links > 1).then(|| {
        format!(
            "{}{}",
            model_name(&rel.from_table),
            rel.orm.relation_name.to_pascal_case()
        )
    })
}
