//! Integration tests for relation inference.

use schemalens::diagnostic::Severity;
use schemalens::inference::{
    thresholds, InferenceConfig, RelationEngine, RelationSource, WarningKind,
};
use schemalens::schema::{Column, ForeignKey, Schema, Table};

fn entity(name: &str) -> Table {
    Table::new(name).with_column(Column::new("id", "INT").with_primary_key())
}

#[test]
fn test_explicit_relations_have_full_confidence() {
    let schema = Schema::new(vec![
        entity("customers"),
        entity("orders")
            .with_column(Column::new("customer_id", "INT"))
            .with_foreign_key(
                ForeignKey::new("customer_id", "customers", "id").with_on_delete("set null"),
            ),
    ])
    .unwrap();

    let result = RelationEngine::new(InferenceConfig::default()).infer(&schema);
    assert_eq!(result.relations.len(), 1);

    let rel = &result.relations[0];
    assert_eq!(rel.source, RelationSource::Explicit);
    assert_eq!(rel.confidence, thresholds::confidence::EXPLICIT);
    assert_eq!(rel.on_delete.as_deref(), Some("SET NULL"));
    assert_eq!(rel.orm.on_delete.as_deref(), Some("SetNull"));
    assert!(rel.warning.is_none());
}

#[test]
fn test_malformed_foreign_keys_are_skipped_with_diagnostics() {
    let schema = Schema::new(vec![
        entity("customers"),
        entity("orders")
            .with_column(Column::new("customer_id", "INT"))
            .with_column(Column::new("store_id", "INT"))
            .with_foreign_key(ForeignKey::new("customer_id", "customers", "uuid"))
            .with_foreign_key(ForeignKey::new("store_id", "stores", "id"))
            .with_foreign_key(ForeignKey::new("ghost_id", "customers", "id")),
    ])
    .unwrap();

    let result = RelationEngine::new(InferenceConfig::explicit_only()).infer(&schema);
    assert!(result.relations.is_empty());
    assert_eq!(result.diagnostics.len(), 3);
    assert!(result
        .diagnostics
        .iter()
        .all(|d| d.severity == Severity::Warning && d.subject.starts_with("orders.")));
}

#[test]
fn test_implicit_relation_from_naming() {
    let schema = Schema::new(vec![
        entity("categories"),
        entity("products").with_column(Column::new("category_id", "INT")),
    ])
    .unwrap();

    let result = RelationEngine::new(InferenceConfig::default()).infer(&schema);
    let rel = result.implicit().next().unwrap();

    assert_eq!(rel.key(), "products.category_id → categories.id");
    assert_eq!(rel.confidence, thresholds::confidence::IMPLICIT);
    assert_eq!(
        rel.warning.as_ref().map(|w| w.kind),
        Some(WarningKind::NotSchemaDeclared)
    );
}

#[test]
fn test_implicit_camel_case_and_case_insensitive_table() {
    let schema = Schema::new(vec![
        entity("OrderItems"),
        entity("shipments").with_column(Column::new("orderItemId", "INT")),
    ])
    .unwrap();

    let result = RelationEngine::new(InferenceConfig::default()).infer(&schema);
    let rel = result.implicit().next().unwrap();
    assert_eq!(rel.to_table, "OrderItems");
    assert_eq!(rel.orm.relation_name, "orderItem");
}

#[test]
fn test_parent_id_is_self_reference() {
    let schema = Schema::new(vec![entity("categories").with_column(Column::new("parent_id", "INT"))])
        .unwrap();

    let result = RelationEngine::new(InferenceConfig::default()).infer(&schema);
    let rel = &result.relations[0];
    assert!(rel.is_self_reference());
    assert_eq!(rel.source, RelationSource::Implicit);
}

#[test]
fn test_implicit_pass_can_be_disabled() {
    let schema = Schema::new(vec![
        entity("categories"),
        entity("products").with_column(Column::new("category_id", "INT")),
    ])
    .unwrap();

    let result = RelationEngine::new(InferenceConfig::explicit_only()).infer(&schema);
    assert!(result.relations.is_empty());
}

#[test]
fn test_unresolvable_name_is_silently_skipped() {
    let schema = Schema::new(vec![
        entity("products").with_column(Column::new("legacy_id", "INT")),
    ])
    .unwrap();

    let result = RelationEngine::new(InferenceConfig::default()).infer(&schema);
    assert!(result.relations.is_empty());
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_declared_foreign_key_is_not_duplicated_implicitly() {
    let schema = Schema::new(vec![
        entity("customers"),
        entity("orders")
            .with_column(Column::new("customer_id", "INT"))
            .with_foreign_key(ForeignKey::new("customer_id", "customers", "id")),
    ])
    .unwrap();

    let result = RelationEngine::new(InferenceConfig::default()).infer(&schema);
    assert_eq!(result.relations.len(), 1);
    assert_eq!(result.implicit().count(), 0);
}

#[test]
fn test_named_polymorphic_pair() {
    let schema = Schema::new(vec![
        entity("posts"),
        entity("videos"),
        entity("comments")
            .with_column(Column::new("post_id", "INT"))
            .with_column(Column::new("post_type", "VARCHAR(20)")),
    ])
    .unwrap();

    let result = RelationEngine::new(InferenceConfig::default()).infer(&schema);
    assert_eq!(result.polymorphic_candidates.len(), 1);
    assert_eq!(result.polymorphic_candidates[0].references, vec!["posts".to_string()]);

    let rel = result.polymorphic().next().unwrap();
    assert_eq!(rel.confidence, thresholds::confidence::POLYMORPHIC);
    assert_eq!(rel.polymorphic_type_column.as_deref(), Some("post_type"));
    // The pair is not also reported as an implicit relation
    assert_eq!(result.implicit().count(), 0);
}
