//! The analysis pipeline.
//!
//! Stages run strictly in order; each reads the finished output of the ones
//! before it:
//!
//! 1. relation inference (explicit, then implicit and polymorphic if enabled)
//! 2. cascade and integrity check (optional)
//! 3. relational graph
//! 4. relation types and optionality
//! 5. type mapping for every column
//! 6. migration plans and migration order
//!
//! Everything is computed in memory; the report is returned whole.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cascade::CascadeChecker;
use crate::diagnostic::Diagnostic;
use crate::graph::RelationalGraph;
use crate::inference::{
    assign_relation_types, thresholds, InferenceConfig, InferenceResult, PolymorphicCandidate,
    Relation, RelationEngine,
};
use crate::plan::{MigrationPlan, PlanSynthesizer};
use crate::schema::{ExternalInputs, Schema};
use crate::typemap::{map_schema, TypeMappingEntry};

/// Pipeline switches.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub inference: InferenceConfig,
    pub check_cascade_risks: bool,
    /// Dependents above which `ON DELETE CASCADE` is flagged
    pub cascade_risk_threshold: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            inference: InferenceConfig::default(),
            check_cascade_risks: true,
            cascade_risk_threshold: thresholds::cascade::DEFAULT_RISK_THRESHOLD,
        }
    }
}

impl AnalysisOptions {
    pub fn with_inference(mut self, inference: InferenceConfig) -> Self {
        self.inference = inference;
        self
    }

    pub fn with_cascade_check(mut self, enabled: bool) -> Self {
        self.check_cascade_risks = enabled;
        self
    }

    pub fn with_cascade_risk_threshold(mut self, threshold: usize) -> Self {
        self.cascade_risk_threshold = threshold;
        self
    }
}

/// Output of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub relations: Vec<Relation>,
    pub polymorphic_candidates: Vec<PolymorphicCandidate>,
    pub graph: RelationalGraph,
    /// Keyed by `table.column`
    pub type_mappings: BTreeMap<String, TypeMappingEntry>,
    /// One per table, in schema order
    pub plans: Vec<MigrationPlan>,
    /// Referenced tables first
    pub migration_order: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl AnalysisReport {
    pub fn plan(&self, table: &str) -> Option<&MigrationPlan> {
        self.plans.iter().find(|p| p.table == table)
    }

    pub fn relations_from<'a>(&'a self, table: &'a str) -> impl Iterator<Item = &'a Relation> + 'a {
        self.relations.iter().filter(move |r| r.from_table == table)
    }

    pub fn type_mapping(&self, table: &str, column: &str) -> Option<&TypeMappingEntry> {
        self.type_mappings
            .get(&crate::typemap::mapping_key(table, column))
    }
}

/// Runs the pipeline.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    options: AnalysisOptions,
}

impl Analyzer {
    pub fn new(options: AnalysisOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    pub fn run(&self, schema: &Schema, inputs: &ExternalInputs) -> AnalysisReport {
        tracing::info!(tables = schema.len(), "starting analysis");

        let InferenceResult {
            mut relations,
            polymorphic_candidates,
            mut diagnostics,
        } = RelationEngine::new(self.options.inference.clone()).infer(schema);

        if self.options.check_cascade_risks {
            let checker = CascadeChecker::new(self.options.cascade_risk_threshold);
            diagnostics.extend(checker.check(schema, &mut relations));
        }

        let graph = RelationalGraph::build(schema, &relations, &polymorphic_candidates, inputs);
        assign_relation_types(schema, &mut relations);

        let type_mappings = map_schema(schema);
        for (key, entry) in type_mappings.iter().filter(|(_, e)| e.fallback) {
            diagnostics.push(Diagnostic::warning(
                key.clone(),
                entry
                    .warning
                    .clone()
                    .unwrap_or_else(|| format!("unmapped type {}", entry.source_type)),
            ));
        }

        let synthesizer =
            PlanSynthesizer::new(schema, &relations, &polymorphic_candidates, &type_mappings, inputs);
        let plans = synthesizer.plan_all();
        let order = synthesizer.dependency_graph().migration_order();
        diagnostics.extend(order.diagnostics());

        tracing::info!(
            relations = relations.len(),
            edges = graph.edge_count(),
            diagnostics = diagnostics.len(),
            "analysis complete"
        );

        AnalysisReport {
            relations,
            polymorphic_candidates,
            graph,
            type_mappings,
            plans,
            migration_order: order.order,
            diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Severity;
    use crate::schema::{Column, ForeignKey, Table};

    fn schema() -> Schema {
        Schema::new(vec![
            Table::new("customers")
                .with_column(Column::new("id", "INT").with_primary_key())
                .with_column(Column::new("location", "GEOGRAPHY")),
            Table::new("orders")
                .with_column(Column::new("id", "INT").with_primary_key())
                .with_column(Column::new("customer_id", "INT"))
                .with_foreign_key(ForeignKey::new("customer_id", "customers", "id"))
                .with_foreign_key(ForeignKey::new("warehouse_id", "warehouses", "id")),
        ])
        .unwrap()
    }

    #[test]
    fn test_run_collects_everything() {
        let report = Analyzer::default().run(&schema(), &ExternalInputs::default());

        assert_eq!(report.relations.len(), 1);
        assert_eq!(report.plans.len(), 2);
        assert_eq!(report.type_mappings.len(), 4);
        assert_eq!(report.migration_order, vec!["customers".to_string(), "orders".to_string()]);
        assert!(report.type_mapping("customers", "location").unwrap().fallback);
    }

    #[test]
    fn test_problems_become_diagnostics() {
        let report = Analyzer::default().run(&schema(), &ExternalInputs::default());

        let subjects: Vec<&str> = report
            .diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| d.subject.as_str())
            .collect();
        assert!(subjects.contains(&"customers.location"));
        assert!(subjects.iter().any(|s| s.starts_with("orders")));
    }

    #[test]
    fn test_cascade_check_can_be_disabled() {
        let schema = Schema::new(vec![
            Table::new("customers").with_column(Column::new("id", "INT").with_primary_key()),
            Table::new("orders")
                .with_column(Column::new("id", "INT").with_primary_key())
                .with_column(Column::new("customer_id", "INT").not_null())
                .with_foreign_key(ForeignKey::new("customer_id", "customers", "id")),
        ])
        .unwrap();

        let options = AnalysisOptions::default().with_cascade_check(false);
        let report = Analyzer::new(options).run(&schema, &ExternalInputs::default());
        assert!(report.relations[0].warning.is_none());

        let report = Analyzer::default().run(&schema, &ExternalInputs::default());
        assert!(report.relations[0].warning.is_some());
    }
}
