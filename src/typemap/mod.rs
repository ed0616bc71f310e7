//! Type mapping engine: native (MySQL-family) column types to PostgreSQL
//! and to Prisma schema types.
//!
//! # Architecture
//!
//! Mapping a column runs in four steps:
//!
//! 1. **Parse** the native type into base name, argument list and modifiers
//! 2. **Special cases** - single-bit booleans, auto-increment primary keys
//! 3. **Lookup** the base name in the static tables ([`tables`]), re-applying
//!    size/precision only for resizable types
//! 4. **Annotate** - Prisma attributes (`@id`, `@default`, `@unique`, `@db.*`)
//!    and the first matching problematic pattern ([`patterns`])
//!
//! Mapping never fails. Unknown types fall back to `TEXT` / `String` and the
//! entry is marked as a fallback.

pub mod patterns;
pub mod tables;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schema::{Column, Schema};

use tables::{
    is_integer, is_resizable, serial_type, POSTGRES_TYPES, PRISMA_NATIVE_ATTRIBUTES, PRISMA_TYPES,
};

/// Target type used when a native type is not in the lookup tables.
pub const FALLBACK_TARGET_TYPE: &str = "TEXT";
/// Prisma type used when a native type is not in the lookup tables.
pub const FALLBACK_ORM_TYPE: &str = "String";

// ============================================================================
// Native type parsing
// ============================================================================

/// A parsed native type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeType {
    /// Upper-cased base name without arguments or modifiers (`VARCHAR`, `DOUBLE PRECISION`)
    pub base: String,
    /// Raw argument list between the parentheses, case preserved
    pub args: Option<String>,
    /// `UNSIGNED` modifier present
    pub unsigned: bool,
}

impl NativeType {
    pub fn parse(native: &str) -> Self {
        let trimmed = native.trim();

        let (head, args, tail) = match (trimmed.find('('), trimmed.rfind(')')) {
            (Some(open), Some(close)) if close > open => (
                &trimmed[..open],
                Some(trimmed[open + 1..close].trim().to_string()),
                &trimmed[close + 1..],
            ),
            _ => (trimmed, None, ""),
        };

        let mut unsigned = false;
        let mut words: Vec<String> = Vec::new();
        for word in head.split_whitespace().chain(tail.split_whitespace()) {
            match word.to_uppercase().as_str() {
                "UNSIGNED" => unsigned = true,
                "ZEROFILL" | "SIGNED" => {}
                other => words.push(other.to_string()),
            }
        }

        Self {
            base: words.join(" "),
            args,
            unsigned,
        }
    }

    /// Arguments as a comma-separated list with whitespace removed (`10,2`).
    pub fn compact_args(&self) -> Option<String> {
        self.args.as_ref().map(|a| {
            a.split(',')
                .map(str::trim)
                .collect::<Vec<_>>()
                .join(",")
        })
    }

    /// `TINYINT(1)`, `BIT(1)` or bare `BIT`.
    pub fn is_boolean_flag(&self) -> bool {
        match self.base.as_str() {
            "TINYINT" => self.compact_args().as_deref() == Some("1"),
            "BIT" => matches!(self.compact_args().as_deref(), None | Some("1")),
            _ => false,
        }
    }
}

/// Strip any `(...)` suffix and upper-case, for size-insensitive comparison.
pub fn strip_size(type_name: &str) -> String {
    let head = match type_name.find('(') {
        Some(pos) => &type_name[..pos],
        None => type_name,
    };
    head.trim().to_uppercase()
}

// ============================================================================
// Mapping entry
// ============================================================================

/// Mapping result for a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeMappingEntry {
    /// Native type as declared
    pub source_type: String,
    /// PostgreSQL type
    pub target_type: String,
    /// Prisma scalar type
    pub orm_type: String,
    /// Prisma field attributes in emission order
    pub orm_attributes: Vec<String>,
    /// Rendered with `?` in Prisma
    pub optional: bool,
    /// Problematic-pattern warning, or the unrecognized-type notice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Identifier of the matched pattern rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// The native type was not found in the lookup tables
    #[serde(default)]
    pub fallback: bool,
}

impl TypeMappingEntry {
    /// Prisma field type plus attributes, e.g. `String? @db.VarChar(255)`.
    pub fn orm_declaration(&self) -> String {
        let mut decl = self.orm_type.clone();
        if self.optional {
            decl.push('?');
        }
        for attr in &self.orm_attributes {
            decl.push(' ');
            decl.push_str(attr);
        }
        decl
    }

    pub fn has_attribute(&self, prefix: &str) -> bool {
        self.orm_attributes.iter().any(|a| a.starts_with(prefix))
    }
}

// ============================================================================
// Mapping
// ============================================================================

/// Map one column to its PostgreSQL and Prisma representation.
pub fn map_column(column: &Column) -> TypeMappingEntry {
    let native = NativeType::parse(&column.native_type);
    let base = native.base.as_str();

    let boolean_flag = native.is_boolean_flag();
    let serial = column.auto_increment && column.primary_key && is_integer(base);

    let (target_type, orm_type, fallback) = if boolean_flag {
        ("BOOLEAN".to_string(), "Boolean".to_string(), false)
    } else if serial {
        let orm = PRISMA_TYPES.get(base).copied().unwrap_or("Int");
        (serial_type(base).to_string(), orm.to_string(), false)
    } else {
        match (POSTGRES_TYPES.get(base), PRISMA_TYPES.get(base)) {
            (Some(pg), Some(prisma)) => (resize(pg, base, &native), prisma.to_string(), false),
            _ => {
                tracing::warn!(
                    column = %column.name,
                    native_type = %column.native_type,
                    "unrecognized native type, falling back to {}",
                    FALLBACK_TARGET_TYPE
                );
                (
                    FALLBACK_TARGET_TYPE.to_string(),
                    FALLBACK_ORM_TYPE.to_string(),
                    true,
                )
            }
        }
    };

    let mut attributes = Vec::new();
    if column.primary_key {
        attributes.push("@id".to_string());
    }
    if let Some(default) = default_attribute(column, &native, &orm_type) {
        attributes.push(default);
    }
    if column.unique && !column.primary_key {
        attributes.push("@unique".to_string());
    }
    if !boolean_flag && !serial && !fallback {
        if let Some(attr) = native_attribute(base, &native) {
            attributes.push(attr);
        }
    }

    let optional = column.nullable && !column.primary_key && !orm_type.ends_with("[]");

    let (warning, suggestion, pattern) =
        match patterns::detect(&column.native_type, &column.name, column.primary_key) {
            Some(rule) => (
                Some(rule.warning.to_string()),
                Some(rule.suggestion.to_string()),
                Some(rule.name.to_string()),
            ),
            None if fallback => (
                Some(format!(
                    "Unrecognized native type '{}', mapped to {}",
                    column.native_type, FALLBACK_TARGET_TYPE
                )),
                Some("Review the column and pick an explicit PostgreSQL type".to_string()),
                None,
            ),
            None => (None, None, None),
        };

    TypeMappingEntry {
        source_type: column.native_type.clone(),
        target_type,
        orm_type,
        orm_attributes: attributes,
        optional,
        warning,
        suggestion,
        pattern,
        fallback,
    }
}

/// Map every column of a schema, keyed by `table.column`.
pub fn map_schema(schema: &Schema) -> BTreeMap<String, TypeMappingEntry> {
    let mut mappings = BTreeMap::new();
    for table in schema.tables() {
        for column in &table.columns {
            mappings.insert(mapping_key(&table.name, &column.name), map_column(column));
        }
    }
    mappings
}

/// Key used in type mapping maps.
pub fn mapping_key(table: &str, column: &str) -> String {
    format!("{}.{}", table, column)
}

/// Re-apply size/precision for resizable types.
fn resize(target: &str, base: &str, native: &NativeType) -> String {
    match native.compact_args() {
        Some(args) if is_resizable(base) && !args.is_empty() => format!("{}({})", target, args),
        _ => target.to_string(),
    }
}

/// `@db.*` attribute, with arguments for sized types.
fn native_attribute(base: &str, native: &NativeType) -> Option<String> {
    let attr = PRISMA_NATIVE_ATTRIBUTES.get(base)?;
    let args = native.compact_args().filter(|a| !a.is_empty());

    Some(match args {
        Some(args) if is_resizable(base) => format!("{}({})", attr, args.replace(',', ", ")),
        // Fractional-second precision on temporal types
        Some(args) if matches!(base, "DATETIME" | "TIMESTAMP" | "TIME") => {
            format!("{}({})", attr, args)
        }
        _ => attr.to_string(),
    })
}

/// The `@default(...)` attribute for a column, if any.
fn default_attribute(column: &Column, native: &NativeType, orm_type: &str) -> Option<String> {
    if column.auto_increment {
        return Some("@default(autoincrement())".to_string());
    }

    if column.primary_key && orm_type == "String" && is_uuid_shaped(column, native) {
        return Some("@default(uuid())".to_string());
    }

    column
        .default_value
        .as_deref()
        .and_then(|raw| render_default(raw, orm_type))
}

/// `CHAR(36)` columns and string columns named like a UUID.
pub fn is_uuid_shaped(column: &Column, native: &NativeType) -> bool {
    (native.base == "CHAR" && native.compact_args().as_deref() == Some("36"))
        || native.base == "UUID"
        || column.name.to_lowercase().contains("uuid")
}

/// Render a raw default value as a Prisma `@default(...)` attribute.
///
/// Returns `None` for `NULL` and for values Prisma cannot express on the
/// given type (non-boolean values on a Boolean, literal dates).
pub fn render_default(raw: &str, orm_type: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("NULL") {
        return None;
    }

    let upper = trimmed.to_uppercase();
    if upper.starts_with("CURRENT_TIMESTAMP") || upper == "NOW()" {
        return Some("@default(now())".to_string());
    }

    let value = unquote(trimmed);

    match orm_type {
        "Boolean" => match value.to_lowercase().as_str() {
            "1" | "true" | "b'1'" => Some("@default(true)".to_string()),
            "0" | "false" | "b'0'" => Some("@default(false)".to_string()),
            _ => None,
        },
        "Int" | "BigInt" | "Float" | "Decimal" => {
            if value.parse::<f64>().is_ok() {
                Some(format!("@default({})", value))
            } else {
                Some(format!("@default(dbgenerated(\"{}\"))", escape(value)))
            }
        }
        "String" => Some(format!("@default(\"{}\")", escape(value))),
        "DateTime" => None,
        _ => Some(format!("@default(dbgenerated(\"{}\"))", escape(value))),
    }
}

fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'\'' && last == b'\'') || (first == b'"' && last == b'"') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
