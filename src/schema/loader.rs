//! JSON loading for schema documents.
//!
//! Accepted shapes:
//!
//! ```text
//! {"tables": [ {"name": "users", "columns": [...]}, ... ]}
//! {"tables": { "users": {"columns": [...]}, ... }}
//! [ {"name": "users", "columns": [...]}, ... ]
//! ```
//!
//! In the keyed form the map key supplies the table name and tables are
//! ordered by key.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::{Schema, SchemaError, SchemaResult, Table};

#[derive(Deserialize)]
#[serde(untagged)]
enum SchemaDocument {
    Wrapped { tables: TableCollection },
    Bare(TableCollection),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TableCollection {
    List(Vec<Table>),
    Keyed(BTreeMap<String, Table>),
}

impl TableCollection {
    fn into_tables(self) -> Vec<Table> {
        match self {
            TableCollection::List(tables) => tables,
            TableCollection::Keyed(map) => map
                .into_iter()
                .map(|(key, mut table)| {
                    if table.name.is_empty() {
                        table.name = key;
                    }
                    table
                })
                .collect(),
        }
    }
}

impl Schema {
    /// Parse and validate a schema document.
    pub fn from_json(json: &str) -> SchemaResult<Self> {
        let doc: SchemaDocument = serde_json::from_str(json)?;
        let collection = match doc {
            SchemaDocument::Wrapped { tables } => tables,
            SchemaDocument::Bare(tables) => tables,
        };
        let tables = collection.into_tables();
        tracing::debug!(tables = tables.len(), "parsed schema document");
        Schema::new(tables)
    }

    /// Read, parse and validate a schema document from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> SchemaResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }
}
