//! Relational optimization suggestions.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::inference::naming::strip_id_suffix;
use crate::inference::{Relation, RelationSource};
use crate::schema::{Table, TableRole};
use crate::typemap::NativeType;

/// Detail tables at or below this many columns are merge candidates.
pub const SMALL_DETAIL_TABLE_COLUMNS: usize = 5;

static STRUCTURED_CONTENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(config|settings|data|json|metadata|options)").expect("structured content regex")
});

pub fn relational_optimizations(
    table: &Table,
    relations: &[&Relation],
    role: Option<TableRole>,
    main_table: Option<&str>,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    // Missing indexes on reference columns
    for column in &table.columns {
        if column.primary_key || column.unique || table.is_indexed(&column.name) {
            continue;
        }
        let references = table.is_foreign_key_column(&column.name)
            || relations.iter().any(|r| r.from_column == column.name)
            || strip_id_suffix(&column.name).is_some_and(|base| !base.is_empty());
        if references {
            suggestions.push(format!(
                "Add an index on {}.{} to speed up joins",
                table.name, column.name
            ));
        }
    }

    // Undeclared foreign keys
    for rel in relations.iter().filter(|r| r.source == RelationSource::Implicit) {
        suggestions.push(format!(
            "Declare the foreign key explicitly: ALTER TABLE {t} ADD CONSTRAINT fk_{t}_{c} FOREIGN KEY ({c}) REFERENCES {to}({tc});",
            t = rel.from_table,
            c = rel.from_column,
            to = rel.to_table,
            tc = rel.to_column,
        ));
    }

    // Small detail tables
    if role == Some(TableRole::Detail) && table.columns.len() <= SMALL_DETAIL_TABLE_COLUMNS {
        if let Some(main) = main_table {
            suggestions.push(format!(
                "Consider merging {} into {} ({} columns)",
                table.name,
                main,
                table.columns.len()
            ));
        }
    }

    // Structured text
    for column in &table.columns {
        let textual = NativeType::parse(&column.native_type).base.contains("TEXT");
        if textual && STRUCTURED_CONTENT.is_match(&column.name) {
            suggestions.push(format!(
                "Store {} as JSONB instead of text for structured content",
                column.name
            ));
        }
    }

    suggestions
}
