//! Readiness score properties across whole runs.

use schemalens::plan::readiness::{weights, ReadinessInputs, READY_THRESHOLD};
use schemalens::schema::{Column, ForeignKey, Schema, Table};
use schemalens::{Analyzer, ExternalInputs};

fn entity(name: &str) -> Table {
    Table::new(name).with_column(Column::new("id", "INT").with_primary_key())
}

#[test]
fn test_scores_bounded_and_ready_flag_consistent() {
    let files: Vec<String> = (0..60).map(|i| format!("src/file_{}.ts", i)).collect();
    let schema = Schema::new(vec![
        entity("users"),
        entity("teams"),
        entity("projects")
            .with_column(Column::new("owner_id", "INT"))
            .with_column(Column::new("team_id", "INT"))
            .with_foreign_key(ForeignKey::new("owner_id", "users", "id"))
            .with_foreign_key(ForeignKey::new("team_id", "teams", "id")),
    ])
    .unwrap();
    let inputs = ExternalInputs::new().with_impacted_files("users", files);

    let report = Analyzer::default().run(&schema, &inputs);
    for plan in &report.plans {
        assert!(plan.readiness_score <= 100);
        assert_eq!(plan.ready, plan.readiness_score >= READY_THRESHOLD);
    }

    // 60 linked files alone exceed the budget
    assert_eq!(report.plan("users").unwrap().readiness_score, 0);
    assert!(!report.plan("users").unwrap().ready);
}

#[test]
fn test_missing_impact_map_contributes_nothing() {
    let schema = Schema::new(vec![entity("tags")]).unwrap();
    let report = Analyzer::default().run(&schema, &ExternalInputs::default());
    let plan = report.plan("tags").unwrap();

    assert!(plan.linked_files.is_empty());
    // DTO instruction and INT → INTEGER
    assert_eq!(
        i64::from(plan.readiness_score),
        100 - weights::INSTRUCTION - weights::TYPE_CHANGE
    );
}

#[test]
fn test_score_matches_plan_contents() {
    let schema = Schema::new(vec![
        entity("users"),
        entity("teams"),
        entity("projects")
            .with_column(Column::new("owner_id", "INT"))
            .with_column(Column::new("team_id", "INT"))
            .with_foreign_key(ForeignKey::new("owner_id", "users", "id"))
            .with_foreign_key(ForeignKey::new("team_id", "teams", "id")),
    ])
    .unwrap();
    let inputs = ExternalInputs::new().with_impacted_files("projects", vec!["a.ts".into()]);

    let report = Analyzer::default().run(&schema, &inputs);
    for plan in &report.plans {
        let expected = ReadinessInputs {
            dependencies: plan.dependencies.len(),
            instructions: plan.post_migration_instructions.len(),
            linked_files: plan.linked_files.len(),
            type_changes: plan.type_changes.len(),
        }
        .score();
        assert_eq!(plan.readiness_score, expected);
    }

    let projects = report.plan("projects").unwrap();
    assert_eq!(projects.dependencies.len(), 2);
    // 100 - 10 (deps) - 6 (DTO + call sites) - 2 (file) - 3 (INT → INTEGER x3)
    assert_eq!(projects.readiness_score, 79);
}
