//! Naming conventions used by the inference passes and the model generator.
//!
//! Suffix handling is an ordered list checked top to bottom; the first
//! suffix that matches decides the base name.

use inflector::Inflector;

use super::inflection::{pluralize_last_segment, singularize_last_segment};

/// Identifier suffixes, checked in order.
pub const ID_SUFFIXES: &[&str] = &["_id", "_ID", "Id", "ID"];

/// Suffixes that mark the type half of a polymorphic pair.
pub const TYPE_SUFFIXES: &[&str] = &["_type", "Type"];

/// Self-referencing column names.
pub const PARENT_COLUMNS: &[&str] = &["parent_id", "parentId"];

/// Strip the first matching identifier suffix. The result may be empty
/// (a column named `ID`).
pub fn strip_id_suffix(column: &str) -> Option<&str> {
    ID_SUFFIXES
        .iter()
        .find_map(|suffix| column.strip_suffix(suffix))
}

/// `parent_id` / `parentId`.
pub fn is_parent_reference(column: &str) -> bool {
    PARENT_COLUMNS.contains(&column)
}

/// Sibling column names that would hold the type of a polymorphic reference.
pub fn type_column_names(base: &str) -> Vec<String> {
    TYPE_SUFFIXES
        .iter()
        .map(|suffix| format!("{}{}", base, suffix))
        .collect()
}

/// Relation field name for a foreign-key column.
///
/// `customer_id` → `customer`, `billingAddressId` → `billingAddress`. When
/// nothing is left after stripping, the singular target table name is used.
pub fn relation_name(column: &str, target_table: &str) -> String {
    let base = strip_id_suffix(column).unwrap_or(column);
    if base.is_empty() {
        singularize_last_segment(target_table).to_camel_case()
    } else {
        base.to_camel_case()
    }
}

/// Table names a base name may refer to, most specific first.
///
/// `orderItem` → `orderitem`, `order_item`, `orderitems`, `order_items`.
pub fn candidate_table_names(base: &str) -> Vec<String> {
    let lower = base.to_lowercase();
    let snake = base.to_snake_case();

    let mut names: Vec<String> = Vec::with_capacity(5);
    for name in [
        lower.clone(),
        snake.clone(),
        pluralize_last_segment(&lower),
        pluralize_last_segment(&snake),
        format!("{}s", lower),
    ] {
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// Prisma model name for a table (`order_items` → `OrderItems`).
pub fn model_name(table: &str) -> String {
    table.to_pascal_case()
}

/// Field name for an inverse collection (`order_items` → `orderItems`).
pub fn collection_field_name(table: &str) -> String {
    pluralize_last_segment(&singularize_last_segment(table)).to_camel_case()
}

/// Field name for an inverse one-to-one (`user_profiles` → `userProfile`).
pub fn single_field_name(table: &str) -> String {
    singularize_last_segment(table).to_camel_case()
}

/// Upper-case a referential action and collapse separators (`set_null` → `SET NULL`).
pub fn normalize_action(action: &str) -> String {
    action
        .split(|c: char| c.is_whitespace() || c == '_')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Map a SQL referential action to its Prisma spelling.
pub fn prisma_referential_action(action: &str) -> Option<&'static str> {
    match normalize_action(action).as_str() {
        "CASCADE" => Some("Cascade"),
        "SET NULL" => Some("SetNull"),
        "RESTRICT" => Some("Restrict"),
        "NO ACTION" => Some("NoAction"),
        "SET DEFAULT" => Some("SetDefault"),
        _ => None,
    }
}
