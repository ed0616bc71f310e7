//! Integration tests for the relational graph.

use schemalens::graph::{EdgeKind, NodeClassification, RelationalGraph};
use schemalens::inference::{InferenceConfig, RelationEngine};
use schemalens::schema::{Column, ExternalInputs, ForeignKey, Schema, Table, TableRole};

fn entity(name: &str) -> Table {
    Table::new(name).with_column(Column::new("id", "INT").with_primary_key())
}

fn shop() -> Schema {
    Schema::new(vec![
        entity("customers"),
        entity("products"),
        entity("orders")
            .with_column(Column::new("customer_id", "INT"))
            .with_foreign_key(ForeignKey::new("customer_id", "customers", "id")),
        Table::new("order_products")
            .with_column(Column::new("order_id", "INT"))
            .with_column(Column::new("product_id", "INT"))
            .with_foreign_key(ForeignKey::new("order_id", "orders", "id"))
            .with_foreign_key(ForeignKey::new("product_id", "products", "id")),
        entity("reviews").with_column(Column::new("product_id", "INT")),
        entity("categories").with_column(Column::new("parent_id", "INT")),
        entity("audit_log"),
    ])
    .unwrap()
}

fn build(schema: &Schema, inputs: &ExternalInputs) -> RelationalGraph {
    let result = RelationEngine::new(InferenceConfig::default()).infer(schema);
    RelationalGraph::build(
        schema,
        &result.relations,
        &result.polymorphic_candidates,
        inputs,
    )
}

#[test]
fn test_centrality_sums_to_twice_edge_count() {
    let graph = build(&shop(), &ExternalInputs::default());
    let edges = graph.edge_count() as f64;
    assert_eq!(graph.edge_count(), 5);

    let weighted: f64 = graph.nodes.iter().map(|n| n.centrality * edges).sum();
    assert!((weighted - 2.0 * edges).abs() < 1e-9);
}

#[test]
fn test_nodes_sorted_by_centrality() {
    let graph = build(&shop(), &ExternalInputs::default());

    assert_eq!(graph.nodes.len(), 7);
    assert!(graph
        .nodes
        .windows(2)
        .all(|w| w[0].centrality >= w[1].centrality));

    // Ties keep schema order
    let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "products",
            "orders",
            "order_products",
            "categories",
            "customers",
            "reviews",
            "audit_log",
        ]
    );

    // Isolated tables keep zero centrality
    assert_eq!(graph.node("audit_log").unwrap().centrality, 0.0);
}

#[test]
fn test_degrees() {
    let graph = build(&shop(), &ExternalInputs::default());

    let products = graph.node("products").unwrap();
    assert_eq!(products.in_degree, 2);
    assert_eq!(products.out_degree, 0);

    // A self-reference counts once in each direction
    let categories = graph.node("categories").unwrap();
    assert_eq!(categories.in_degree, 1);
    assert_eq!(categories.out_degree, 1);
}

#[test]
fn test_edge_kinds_and_labels() {
    let graph = build(&shop(), &ExternalInputs::default());

    let direct = graph.outgoing("orders").next().unwrap();
    assert_eq!(direct.kind, EdgeKind::Direct);
    assert_eq!(direct.label, "customer_id → id");
    assert!(!direct.warning);

    let implicit = graph.outgoing("reviews").next().unwrap();
    assert_eq!(implicit.kind, EdgeKind::Implicit);
    assert!(implicit.warning);

    assert_eq!(graph.incoming("customers").count(), 1);
}

#[test]
fn test_classifications() {
    let inputs = ExternalInputs::new().with_role("audit_log", TableRole::Technical);
    let graph = build(&shop(), &inputs);

    assert_eq!(
        graph.classification("order_products"),
        Some(NodeClassification::Junction)
    );
    assert_eq!(
        graph.classification("audit_log"),
        Some(NodeClassification::Technical)
    );
    assert_eq!(
        graph.classification("customers"),
        Some(NodeClassification::Entity)
    );
}

#[test]
fn test_empty_relation_list() {
    let schema = Schema::new(vec![entity("a"), entity("b")]).unwrap();
    let graph = RelationalGraph::build(&schema, &[], &[], &ExternalInputs::default());

    assert_eq!(graph.edge_count(), 0);
    assert!(graph.nodes.iter().all(|n| n.centrality == 0.0));
}
