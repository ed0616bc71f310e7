//! External per-table inputs: role hints and the impact map.
//!
//! Both are optional. A table missing from either map contributes nothing:
//! no role (purely heuristic classification) and zero impacted files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{SchemaError, SchemaResult};

/// Role tag assigned to a table by an upstream classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableRole {
    #[serde(
        rename = "core entity",
        alias = "core_entity",
        alias = "BUSINESS_CORE",
        alias = "core"
    )]
    CoreEntity,
    #[serde(rename = "detail", alias = "BUSINESS_DETAIL")]
    Detail,
    #[serde(rename = "junction", alias = "JUNCTION")]
    Junction,
    #[serde(rename = "technical", alias = "TECHNICAL")]
    Technical,
}

impl TableRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableRole::CoreEntity => "core entity",
            TableRole::Detail => "detail",
            TableRole::Junction => "junction",
            TableRole::Technical => "technical",
        }
    }
}

impl std::fmt::Display for TableRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification hint for one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableHint {
    #[serde(default, alias = "tableType", skip_serializing_if = "Option::is_none")]
    pub role: Option<TableRole>,

    /// Free-text reason; replaces the derived role text in summaries.
    #[serde(
        default,
        alias = "classificationReason",
        skip_serializing_if = "Option::is_none"
    )]
    pub classification_reason: Option<String>,
}

/// Source files known to reference a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactInfo {
    #[serde(default, alias = "impactedFiles")]
    pub impacted_files: Vec<String>,
}

/// Everything supplied from outside the schema itself.
#[derive(Debug, Clone, Default)]
pub struct ExternalInputs {
    hints: BTreeMap<String, TableHint>,
    impact: BTreeMap<String, ImpactInfo>,
}

impl ExternalInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hint(mut self, table: impl Into<String>, hint: TableHint) -> Self {
        self.hints.insert(table.into(), hint);
        self
    }

    pub fn with_role(self, table: impl Into<String>, role: TableRole) -> Self {
        self.with_hint(
            table,
            TableHint {
                role: Some(role),
                classification_reason: None,
            },
        )
    }

    pub fn with_impacted_files(mut self, table: impl Into<String>, files: Vec<String>) -> Self {
        self.impact.insert(
            table.into(),
            ImpactInfo {
                impacted_files: files,
            },
        );
        self
    }

    /// Merge a hints document (`{"table": {"role": ..., "classification_reason": ...}}`).
    pub fn with_hints_json(mut self, json: &str) -> SchemaResult<Self> {
        let parsed: BTreeMap<String, TableHint> = serde_json::from_str(json)?;
        self.hints.extend(parsed);
        Ok(self)
    }

    /// Merge an impact document (`{"table": {"impacted_files": [...]}}`).
    pub fn with_impact_json(mut self, json: &str) -> SchemaResult<Self> {
        let parsed: BTreeMap<String, ImpactInfo> = serde_json::from_str(json)?;
        self.impact.extend(parsed);
        Ok(self)
    }

    pub fn with_hints_file<P: AsRef<Path>>(self, path: P) -> SchemaResult<Self> {
        let content = read(path.as_ref())?;
        self.with_hints_json(&content)
    }

    pub fn with_impact_file<P: AsRef<Path>>(self, path: P) -> SchemaResult<Self> {
        let content = read(path.as_ref())?;
        self.with_impact_json(&content)
    }

    pub fn role(&self, table: &str) -> Option<TableRole> {
        self.hints.get(table).and_then(|h| h.role)
    }

    pub fn classification_reason(&self, table: &str) -> Option<&str> {
        self.hints
            .get(table)
            .and_then(|h| h.classification_reason.as_deref())
    }

    /// Impacted files for a table; empty when the impact map has no entry.
    pub fn impacted_files(&self, table: &str) -> &[String] {
        self.impact
            .get(table)
            .map(|i| i.impacted_files.as_slice())
            .unwrap_or(&[])
    }
}

fn read(path: &Path) -> SchemaResult<String> {
    fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: path.to_path_buf(),
        source,
    })
}
