//! Type changes and PostgreSQL adaptation notes.

use inflector::Inflector;

use crate::schema::{Column, Table};
use crate::typemap::patterns::is_financial_name;
use crate::typemap::{is_uuid_shaped, strip_size, NativeType, TypeMappingEntry};

use super::{Adaptation, TypeChange};

/// Element name used for the table-level primary key note.
pub const PRIMARY_KEY_ELEMENT: &str = "PRIMARY KEY";

/// A column whose type name changes, ignoring size and precision.
pub fn type_change(column: &Column, mapping: &TypeMappingEntry) -> Option<TypeChange> {
    if strip_size(&mapping.source_type) == strip_size(&mapping.target_type) {
        return None;
    }
    Some(TypeChange {
        field: column.name.clone(),
        from: mapping.source_type.clone(),
        to: mapping.target_type.clone(),
        reason: mapping.warning.clone(),
    })
}

type AdaptationRule = fn(&Column, &NativeType) -> Option<String>;

/// Column rules. Every matching rule contributes a note.
const COLUMN_RULES: &[AdaptationRule] = &[
    boolean_flag,
    auto_increment,
    uuid_column,
    timestamp,
    enumeration,
    float_money,
];

fn boolean_flag(column: &Column, native: &NativeType) -> Option<String> {
    native.is_boolean_flag().then(|| {
        format!(
            "{}: {} → BOOLEAN, convert 0/1 values to false/true",
            column.name, column.native_type
        )
    })
}

fn auto_increment(column: &Column, _: &NativeType) -> Option<String> {
    column.auto_increment.then(|| {
        format!(
            "{}: use SERIAL/IDENTITY in PostgreSQL and @default(autoincrement()) in Prisma",
            column.name
        )
    })
}

fn uuid_column(column: &Column, native: &NativeType) -> Option<String> {
    let textual = matches!(native.base.as_str(), "CHAR" | "VARCHAR");
    (textual && is_uuid_shaped(column, native)).then(|| {
        format!(
            "{}: use the native UUID type and @default(uuid()) in Prisma",
            column.name
        )
    })
}

fn timestamp(column: &Column, native: &NativeType) -> Option<String> {
    matches!(native.base.as_str(), "TIMESTAMP" | "DATETIME").then(|| {
        format!(
            "{}: store {} as TIMESTAMP WITH TIME ZONE",
            column.name, column.native_type
        )
    })
}

fn enumeration(column: &Column, native: &NativeType) -> Option<String> {
    (native.base == "ENUM").then(|| {
        format!(
            "{}: create a Prisma enum {}",
            column.name,
            column.name.to_pascal_case()
        )
    })
}

fn float_money(column: &Column, native: &NativeType) -> Option<String> {
    let float = matches!(
        native.base.as_str(),
        "FLOAT" | "DOUBLE" | "DOUBLE PRECISION" | "REAL"
    );
    (float && is_financial_name(&column.name)).then(|| {
        format!(
            "{}: use DECIMAL instead of {} to avoid rounding errors",
            column.name, column.native_type
        )
    })
}

/// Adaptation notes for a table, column rules first in column order.
pub fn adaptations(table: &Table) -> Vec<Adaptation> {
    let mut notes = Vec::new();

    for column in &table.columns {
        let native = NativeType::parse(&column.native_type);
        for rule in COLUMN_RULES {
            if let Some(recommendation) = rule(column, &native) {
                notes.push(Adaptation {
                    element: column.name.clone(),
                    recommendation,
                });
            }
        }
    }

    let names: Vec<&str> = table.primary_key_columns().map(|c| c.name.as_str()).collect();
    if !names.is_empty() {
        let recommendation = if names.len() > 1 {
            format!("Composite key ({}): declare @@id([{}])", names.join(", "), names.join(", "))
        } else {
            format!(
                "{}: keep @id with @default(autoincrement()) or switch to @default(cuid()) depending on the key strategy",
                names[0]
            )
        };
        notes.push(Adaptation {
            element: PRIMARY_KEY_ELEMENT.to_string(),
            recommendation,
        });
    }

    notes
}
