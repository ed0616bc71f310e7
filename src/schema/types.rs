//! Core schema types: columns, foreign keys, indexes, tables.
//!
//! These mirror the structural metadata an extractor pulls out of a source
//! database. They are read-only for every downstream component.

use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Column
// ============================================================================

/// A column as declared in the source database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,

    /// Native type string, including any size suffix (e.g. `VARCHAR(255)`).
    #[serde(rename = "type", alias = "native_type", alias = "nativeType")]
    pub native_type: String,

    /// Whether the column accepts NULL.
    #[serde(default = "default_nullable")]
    pub nullable: bool,

    /// Part of the primary key.
    #[serde(default, alias = "isPrimary", alias = "primaryKey")]
    pub primary_key: bool,

    /// Carries a unique constraint.
    #[serde(default, alias = "isUnique")]
    pub unique: bool,

    /// Auto-increment / identity column.
    #[serde(default, alias = "autoIncrement")]
    pub auto_increment: bool,

    /// Raw default expression, exactly as the source reports it.
    #[serde(
        default,
        alias = "default",
        alias = "defaultValue",
        deserialize_with = "deserialize_raw_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<String>,

    /// Column comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

fn default_nullable() -> bool {
    true
}

/// Accept string, number or boolean defaults and keep them as raw text.
fn deserialize_raw_default<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

impl Column {
    /// Create a nullable column with the given native type.
    pub fn new(name: impl Into<String>, native_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            native_type: native_type.into(),
            nullable: true,
            primary_key: false,
            unique: false,
            auto_increment: false,
            default_value: None,
            comment: None,
        }
    }

    /// Mark the column NOT NULL.
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Mark the column as (part of) the primary key. Implies NOT NULL.
    pub fn with_primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    pub fn with_unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn with_auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// A primary key, or a column literally named `id`/`ID`.
    pub fn is_identifier(&self) -> bool {
        self.primary_key || self.name == "id" || self.name == "ID"
    }

    /// Unique or primary key.
    pub fn is_unique(&self) -> bool {
        self.unique || self.primary_key
    }
}

// ============================================================================
// Foreign keys and indexes
// ============================================================================

/// A declared foreign-key constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Source column in the owning table.
    pub column: String,

    /// Referenced table and column.
    pub references: ForeignKeyTarget,

    /// ON DELETE action, if declared.
    #[serde(default, alias = "onDelete", skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<String>,

    /// ON UPDATE action, if declared.
    #[serde(default, alias = "onUpdate", skip_serializing_if = "Option::is_none")]
    pub on_update: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyTarget {
    pub table: String,
    pub column: String,
}

impl ForeignKey {
    pub fn new(
        column: impl Into<String>,
        table: impl Into<String>,
        target_column: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            references: ForeignKeyTarget {
                table: table.into(),
                column: target_column.into(),
            },
            on_delete: None,
            on_update: None,
        }
    }

    pub fn with_on_delete(mut self, action: impl Into<String>) -> Self {
        self.on_delete = Some(action.into());
        self
    }

    pub fn with_on_update(mut self, action: impl Into<String>) -> Self {
        self.on_update = Some(action.into());
        self
    }
}

/// A secondary index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub unique: bool,
}

impl Index {
    pub fn new(name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            unique: false,
        }
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

// ============================================================================
// Table
// ============================================================================

/// A table with its ordered columns and declared constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Table name. May be omitted when the table is keyed by name in the input.
    #[serde(default)]
    pub name: String,

    /// Columns in declaration order.
    pub columns: Vec<Column>,

    /// Declared foreign keys.
    #[serde(default, alias = "foreignKeys")]
    pub foreign_keys: Vec<ForeignKey>,

    /// Secondary indexes.
    #[serde(default)]
    pub indexes: Vec<Index>,

    /// Table comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            foreign_keys: Vec::new(),
            indexes: Vec::new(),
            comment: None,
        }
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn with_foreign_key(mut self, fk: ForeignKey) -> Self {
        self.foreign_keys.push(fk);
        self
    }

    pub fn with_index(mut self, index: Index) -> Self {
        self.indexes.push(index);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Look up a column by exact name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// The column other tables should reference: the first primary-key
    /// column, else a column named `id`/`ID`.
    pub fn identifier_column(&self) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.primary_key)
            .or_else(|| self.columns.iter().find(|c| c.is_identifier()))
    }

    pub fn primary_key_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.primary_key)
    }

    /// The declared foreign key whose source is `column`, if any.
    pub fn foreign_key_for(&self, column: &str) -> Option<&ForeignKey> {
        self.foreign_keys.iter().find(|fk| fk.column == column)
    }

    /// True if `column` is covered by a declared foreign key.
    pub fn is_foreign_key_column(&self, column: &str) -> bool {
        self.foreign_key_for(column).is_some()
    }

    /// True if some index (of any kind) starts with `column`.
    pub fn is_indexed(&self, column: &str) -> bool {
        self.indexes
            .iter()
            .any(|idx| idx.columns.first().map(String::as_str) == Some(column))
    }
}
