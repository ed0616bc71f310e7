//! Per-table plan assembly.

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::graph::is_junction;
use crate::inference::naming::model_name;
use crate::inference::{PolymorphicCandidate, Relation};
use crate::schema::{Column, ExternalInputs, Schema, Table, TableRole};
use crate::typemap::{map_column, mapping_key, NativeType, TypeMappingEntry};

use super::{
    adaptations, orm_recommendations, post_migration_instructions, relational_optimizations,
    render_model, summarize, type_change, DependencyGraph, MigrationPlan, ReadinessInputs,
};

/// Builds migration plans for one analysis run.
pub struct PlanSynthesizer<'a> {
    schema: &'a Schema,
    relations: &'a [Relation],
    candidates: &'a [PolymorphicCandidate],
    mappings: &'a BTreeMap<String, TypeMappingEntry>,
    inputs: &'a ExternalInputs,
    dependencies: DependencyGraph,
}

impl<'a> PlanSynthesizer<'a> {
    pub fn new(
        schema: &'a Schema,
        relations: &'a [Relation],
        candidates: &'a [PolymorphicCandidate],
        mappings: &'a BTreeMap<String, TypeMappingEntry>,
        inputs: &'a ExternalInputs,
    ) -> Self {
        Self {
            schema,
            relations,
            candidates,
            mappings,
            inputs,
            dependencies: DependencyGraph::from_schema(schema),
        }
    }

    pub fn dependency_graph(&self) -> &DependencyGraph {
        &self.dependencies
    }

    /// Plans for every table, in schema order.
    pub fn plan_all(&self) -> Vec<MigrationPlan> {
        self.schema.tables().iter().map(|t| self.plan(t)).collect()
    }

    pub fn plan(&self, table: &Table) -> MigrationPlan {
        let model = model_name(&table.name);
        let role = self.role(table);

        let entries: Vec<TypeMappingEntry> = table
            .columns
            .iter()
            .map(|c| self.mapping(table, c).into_owned())
            .collect();

        let outgoing: Vec<&Relation> = self
            .relations
            .iter()
            .filter(|r| r.from_table == table.name)
            .collect();
        let owned_candidates: Vec<&PolymorphicCandidate> = self
            .candidates
            .iter()
            .filter(|c| c.table == table.name)
            .collect();
        let main_table = outgoing
            .iter()
            .find(|r| !r.is_polymorphic && !r.is_self_reference())
            .map(|r| r.to_table.as_str());

        let type_changes = table
            .columns
            .iter()
            .zip(&entries)
            .filter_map(|(column, entry)| type_change(column, entry))
            .collect::<Vec<_>>();

        let has_enums = table
            .columns
            .iter()
            .any(|c| matches!(NativeType::parse(&c.native_type).base.as_str(), "ENUM" | "SET"));
        let linked_files = self.inputs.impacted_files(&table.name).to_vec();
        let instructions =
            post_migration_instructions(&model, role, has_enums, linked_files.len());
        let dependencies = self.dependencies.dependencies(&table.name).to_vec();

        let readiness_score = ReadinessInputs {
            dependencies: dependencies.len(),
            instructions: instructions.len(),
            linked_files: linked_files.len(),
            type_changes: type_changes.len(),
        }
        .score();

        tracing::debug!(table = %table.name, readiness_score, "migration plan built");

        MigrationPlan {
            table: table.name.clone(),
            model_name: model,
            summary: summarize(
                &table.name,
                role,
                self.inputs.classification_reason(&table.name),
                main_table,
            ),
            type_changes,
            adaptations: adaptations(table),
            orm_recommendations: orm_recommendations(table, &outgoing, &owned_candidates),
            orm_model: render_model(table, &entries, self.relations),
            relational_optimizations: relational_optimizations(table, &outgoing, role, main_table),
            post_migration_instructions: instructions,
            linked_files,
            dependencies,
            readiness_score,
            ready: super::is_ready(readiness_score),
        }
    }

    /// Hinted role, or junction when the structure says so.
    fn role(&self, table: &Table) -> Option<TableRole> {
        self.inputs
            .role(&table.name)
            .or_else(|| is_junction(table).then_some(TableRole::Junction))
    }

    fn mapping(&self, table: &Table, column: &Column) -> Cow<'a, TypeMappingEntry> {
        match self.mappings.get(&mapping_key(&table.name, &column.name)) {
            Some(entry) => Cow::Borrowed(entry),
            None => Cow::Owned(map_column(column)),
        }
    }
}
