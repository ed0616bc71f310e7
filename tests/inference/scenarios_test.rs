//! End-to-end scenarios through the full pipeline.

use schemalens::graph::NodeClassification;
use schemalens::inference::{RelationSource, RelationType, WarningKind};
use schemalens::schema::{Column, ForeignKey, Schema, Table};
use schemalens::{Analyzer, ExternalInputs};

fn entity(name: &str) -> Table {
    Table::new(name).with_column(Column::new("id", "INT").with_primary_key())
}

fn dependent(name: &str) -> Table {
    entity(name)
        .with_column(Column::new("customer_id", "INT"))
        .with_foreign_key(ForeignKey::new("customer_id", "customers", "id"))
}

#[test]
fn test_cascade_onto_heavily_referenced_table() {
    let schema = Schema::new(vec![
        entity("customers"),
        entity("orders")
            .with_column(Column::new("customer_id", "INT"))
            .with_foreign_key(
                ForeignKey::new("customer_id", "customers", "id").with_on_delete("CASCADE"),
            ),
        dependent("invoices"),
        dependent("addresses"),
        dependent("carts"),
    ])
    .unwrap();

    let report = Analyzer::default().run(&schema, &ExternalInputs::default());
    let rel = report.relations_from("orders").next().unwrap();

    assert_eq!(rel.confidence, 1.0);
    assert_eq!(rel.orm.relation_type, RelationType::ManyToOne);

    let warning = rel.warning.as_ref().unwrap();
    assert_eq!(warning.kind, WarningKind::CascadeRisk);
    assert!(warning.message.contains("4 dependent tables"));
}

#[test]
fn test_undeclared_reference_without_type_column() {
    let schema = Schema::new(vec![
        entity("owners"),
        entity("comments").with_column(Column::new("owner_id", "INT")),
    ])
    .unwrap();

    let report = Analyzer::default().run(&schema, &ExternalInputs::default());
    assert_eq!(report.relations.len(), 1);

    let rel = &report.relations[0];
    assert_eq!(rel.key(), "comments.owner_id → owners.id");
    assert_eq!(rel.source, RelationSource::Implicit);
    assert_eq!(rel.confidence, 0.7);
    assert_eq!(
        rel.warning.as_ref().map(|w| w.kind),
        Some(WarningKind::NotSchemaDeclared)
    );
    assert!(report.polymorphic_candidates.is_empty());
}

#[test]
fn test_generic_polymorphic_pair() {
    let schema = Schema::new(vec![
        entity("posts"),
        entity("users"),
        entity("products"),
        entity("reviews")
            .with_column(Column::new("post_id", "INT"))
            .with_column(Column::new("user_id", "INT"))
            .with_column(Column::new("product_id", "INT"))
            .with_foreign_key(ForeignKey::new("post_id", "posts", "id"))
            .with_foreign_key(ForeignKey::new("user_id", "users", "id"))
            .with_foreign_key(ForeignKey::new("product_id", "products", "id")),
        entity("attachments")
            .with_column(Column::new("entity_id", "INT"))
            .with_column(Column::new("entity_type", "VARCHAR(50)")),
    ])
    .unwrap();

    let report = Analyzer::default().run(&schema, &ExternalInputs::default());

    assert_eq!(report.polymorphic_candidates.len(), 1);
    let candidate = &report.polymorphic_candidates[0];
    assert_eq!(candidate.table, "attachments");
    assert_eq!(candidate.references, vec!["posts", "users", "products"]);

    let polymorphic: Vec<_> = report.relations_from("attachments").collect();
    assert_eq!(polymorphic.len(), 3);
    for rel in polymorphic {
        assert_eq!(rel.confidence, 0.5);
        assert!(rel.is_polymorphic);
        assert!(rel.orm.optional);
        assert_eq!(rel.warning.as_ref().map(|w| w.kind), Some(WarningKind::Polymorphic));
    }

    assert_eq!(
        report.graph.classification("attachments"),
        Some(NodeClassification::Polymorphic)
    );
}

#[test]
fn test_float_price_column() {
    let schema = Schema::new(vec![entity("products").with_column(Column::new("price", "FLOAT"))])
        .unwrap();

    let report = Analyzer::default().run(&schema, &ExternalInputs::default());
    let entry = report.type_mapping("products", "price").unwrap();

    assert!(entry.warning.as_ref().unwrap().contains("Floating-point"));
    assert!(entry.suggestion.as_ref().unwrap().contains("DECIMAL"));
}

#[test]
fn test_junction_table() {
    let schema = Schema::new(vec![
        entity("orders"),
        entity("products"),
        Table::new("order_products")
            .with_column(Column::new("order_id", "INT"))
            .with_column(Column::new("product_id", "INT"))
            .with_foreign_key(ForeignKey::new("order_id", "orders", "id"))
            .with_foreign_key(ForeignKey::new("product_id", "products", "id")),
    ])
    .unwrap();

    let report = Analyzer::default().run(&schema, &ExternalInputs::default());

    assert_eq!(
        report.graph.classification("order_products"),
        Some(NodeClassification::Junction)
    );
    let from_junction: Vec<_> = report.relations_from("order_products").collect();
    assert_eq!(from_junction.len(), 2);
    assert!(from_junction
        .iter()
        .all(|r| r.orm.relation_type == RelationType::ManyToMany));
}
