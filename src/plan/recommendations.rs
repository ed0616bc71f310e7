//! Prisma schema recommendations for a table.

use crate::inference::naming::model_name;
use crate::inference::{PolymorphicCandidate, Relation, RelationSource};
use crate::schema::Table;
use crate::typemap::NativeType;

pub fn orm_recommendations(
    table: &Table,
    relations: &[&Relation],
    candidates: &[&PolymorphicCandidate],
) -> Vec<String> {
    let mut recs = Vec::new();

    for column in table.columns.iter().filter(|c| c.unique && !c.primary_key) {
        recs.push(format!("Add @unique on {}", column.name));
    }

    for rel in relations.iter().filter(|r| !r.is_polymorphic) {
        let mut rec = format!(
            "Declare {} relation `{}` to {}",
            rel.orm.relation_type,
            rel.orm.relation_name,
            model_name(&rel.to_table)
        );
        if rel.source == RelationSource::Implicit {
            rec.push_str(" (inferred from naming, confirm before relying on it)");
        }
        recs.push(rec);
    }

    for candidate in candidates {
        recs.push(format!(
            "Replace polymorphic {}/{} with one optional relation per target: {}",
            candidate.id_column,
            candidate.type_column,
            candidate.references.join(", ")
        ));
    }

    let enums: Vec<&str> = table
        .columns
        .iter()
        .filter(|c| NativeType::parse(&c.native_type).base == "ENUM")
        .map(|c| c.name.as_str())
        .collect();
    if !enums.is_empty() {
        recs.push(format!("Define Prisma enums for {}", enums.join(", ")));
    }

    if model_name(&table.name) != table.name {
        recs.push(format!(
            "Keep the physical table name with @@map(\"{}\")",
            table.name
        ));
    }

    let snake: Vec<&str> = table
        .columns
        .iter()
        .filter(|c| c.name.contains('_'))
        .map(|c| c.name.as_str())
        .collect();
    if !snake.is_empty() {
        recs.push(format!(
            "Use camelCase field names with @map for {}",
            snake.join(", ")
        ));
    }

    recs
}
