//! Schema model shared by every analysis stage.
//!
//! A [`Schema`] is an ordered, validated set of [`Table`]s. Table order is the
//! order of the input document and drives every deterministic ordering
//! downstream (relation lists, graph tie-breaks, plan iteration).
//!
//! Construction is the only place a run can hard-fail: duplicate table names,
//! a table without columns, or duplicate column names within a table.

mod hints;
mod loader;
mod types;

pub use hints::{ExternalInputs, ImpactInfo, TableHint, TableRole};
pub use types::{Column, ForeignKey, ForeignKeyTarget, Index, Table};

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use serde::Serialize;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that make a schema unusable.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Failed to parse schema document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Duplicate table name: {0}")]
    DuplicateTable(String),

    #[error("Table '{0}' has no columns")]
    EmptyTable(String),

    #[error("Duplicate column '{column}' in table '{table}'")]
    DuplicateColumn { table: String, column: String },

    #[error("Table at position {0} has no name")]
    UnnamedTable(usize),
}

pub type SchemaResult<T> = Result<T, SchemaError>;

// ============================================================================
// Schema
// ============================================================================

/// A validated, immutable collection of tables.
#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    tables: Vec<Table>,

    /// Index: table name → position in `tables`
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Schema {
    /// Validate and index a list of tables.
    pub fn new(tables: Vec<Table>) -> SchemaResult<Self> {
        let mut index = HashMap::with_capacity(tables.len());

        for (pos, table) in tables.iter().enumerate() {
            if table.name.is_empty() {
                return Err(SchemaError::UnnamedTable(pos));
            }
            if index.insert(table.name.clone(), pos).is_some() {
                return Err(SchemaError::DuplicateTable(table.name.clone()));
            }
            if table.columns.is_empty() {
                return Err(SchemaError::EmptyTable(table.name.clone()));
            }

            let mut seen = HashSet::new();
            for column in &table.columns {
                if !seen.insert(column.name.as_str()) {
                    return Err(SchemaError::DuplicateColumn {
                        table: table.name.clone(),
                        column: column.name.clone(),
                    });
                }
            }
        }

        Ok(Self { tables, index })
    }

    /// Tables in input order.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.index.get(name).map(|&pos| &self.tables[pos])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Position of a table in input order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Look up a column by table and column name.
    pub fn column(&self, table: &str, column: &str) -> Option<&Column> {
        self.table(table).and_then(|t| t.column(column))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
