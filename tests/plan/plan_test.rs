//! Integration tests for migration plans.

use schemalens::schema::{Column, ForeignKey, Index, Schema, Table};
use schemalens::{Analyzer, ExternalInputs};

const HINTS: &str = r#"{
    "customers": {"role": "BUSINESS_CORE"},
    "customer_addresses": {"tableType": "BUSINESS_DETAIL"},
    "sessions": {"role": "technical", "classificationReason": "short-lived login sessions"}
}"#;

const IMPACT: &str = r#"{
    "customers": {"impactedFiles": ["src/customers/service.ts", "src/customers/dto.ts", "src/auth/login.ts"]},
    "orders": {"impacted_files": ["src/orders/service.ts"]}
}"#;

fn schema() -> Schema {
    Schema::new(vec![
        Table::new("customers")
            .with_column(Column::new("id", "INT").with_primary_key().with_auto_increment())
            .with_column(Column::new("email", "VARCHAR(255)").not_null().with_unique())
            .with_column(Column::new("status", "ENUM('active','banned')")),
        Table::new("customer_addresses")
            .with_column(Column::new("id", "INT").with_primary_key())
            .with_column(Column::new("customer_id", "INT").not_null())
            .with_column(Column::new("city", "VARCHAR(80)"))
            .with_foreign_key(ForeignKey::new("customer_id", "customers", "id").with_on_delete("CASCADE")),
        Table::new("orders")
            .with_column(Column::new("id", "INT").with_primary_key().with_auto_increment())
            .with_column(Column::new("customer_id", "INT"))
            .with_column(Column::new("total", "DOUBLE"))
            .with_column(Column::new("metadata", "TEXT"))
            .with_index(Index::new("idx_orders_customer", &["customer_id"])),
        Table::new("sessions")
            .with_column(Column::new("token", "CHAR(64)").with_primary_key())
            .with_column(Column::new("payload", "LONGTEXT")),
    ])
    .unwrap()
}

fn inputs() -> ExternalInputs {
    ExternalInputs::new()
        .with_hints_json(HINTS)
        .unwrap()
        .with_impact_json(IMPACT)
        .unwrap()
}

#[test]
fn test_core_entity_plan() {
    let report = Analyzer::default().run(&schema(), &inputs());
    let plan = report.plan("customers").unwrap();

    assert_eq!(plan.model_name, "Customers");
    assert_eq!(plan.summary.role, "stores core business entities");
    assert_eq!(plan.summary.functional_area, "users / authentication");
    assert_eq!(plan.linked_files.len(), 3);
    assert!(plan.dependencies.is_empty());
    assert_eq!(
        plan.post_migration_instructions,
        vec![
            "Update DTOs: CustomersDto",
            "Update services that use Customers",
            "Check business validations in CustomersService",
            "Sync application enums with the Prisma enums",
            "Update call sites in 3 linked files",
        ]
    );
    // SERIAL key and ENUM → TEXT
    assert_eq!(plan.type_changes.len(), 2);
    // 100 - 5*3 - 2*3 - 2
    assert_eq!(plan.readiness_score, 77);
    assert!(plan.ready);

    assert!(plan.orm_model.contains("customerAddresses CustomerAddresses[]"));
    assert!(plan.orm_model.contains("orders Orders[]"));
    assert!(plan
        .orm_recommendations
        .contains(&"Add @unique on email".to_string()));
}

#[test]
fn test_detail_plan() {
    let report = Analyzer::default().run(&schema(), &inputs());
    let plan = report.plan("customer_addresses").unwrap();

    assert_eq!(plan.summary.functional_area, "user profiles");
    assert_eq!(plan.dependencies, vec!["customers"]);
    assert!(plan
        .relational_optimizations
        .iter()
        .any(|s| s == "Consider merging customer_addresses into customers (3 columns)"));
    assert!(plan
        .relational_optimizations
        .iter()
        .any(|s| s.starts_with("Add an index on customer_addresses.customer_id")));
    assert!(plan.orm_model.contains(
        "customer Customers @relation(fields: [customer_id], references: [id], onDelete: Cascade)"
    ));
}

#[test]
fn test_implicit_relation_plan() {
    let report = Analyzer::default().run(&schema(), &inputs());
    let plan = report.plan("orders").unwrap();

    // Implicit relations do not count as dependencies
    assert!(plan.dependencies.is_empty());
    assert!(plan.relational_optimizations.iter().any(|s| s.ends_with(
        "ALTER TABLE orders ADD CONSTRAINT fk_orders_customer_id FOREIGN KEY (customer_id) REFERENCES customers(id);"
    )));
    assert!(plan
        .relational_optimizations
        .iter()
        .any(|s| s.starts_with("Store metadata as JSONB")));
    // Already indexed
    assert!(!plan
        .relational_optimizations
        .iter()
        .any(|s| s.starts_with("Add an index")));
    assert!(plan
        .adaptations
        .iter()
        .any(|a| a.element == "total" && a.recommendation.contains("DECIMAL")));
    assert_eq!(plan.summary.role, "stores data");
}

#[test]
fn test_classification_reason_overrides_role() {
    let report = Analyzer::default().run(&schema(), &inputs());
    let plan = report.plan("sessions").unwrap();

    assert_eq!(plan.summary.role, "short-lived login sessions");
    assert_eq!(plan.summary.functional_area, "sessions / authentication");
    assert!(plan
        .post_migration_instructions
        .contains(&"Check compatibility with external tools".to_string()));
}

#[test]
fn test_every_model_ends_with_one_map_directive() {
    let report = Analyzer::default().run(&schema(), &inputs());

    for plan in &report.plans {
        let lines: Vec<&str> = plan.orm_model.lines().collect();
        assert_eq!(lines.last(), Some(&"}"));
        assert_eq!(
            lines[lines.len() - 2].trim(),
            format!("@@map(\"{}\")", plan.table)
        );
        assert_eq!(plan.orm_model.matches("@@map(").count(), 1);
    }
}

#[test]
fn test_migration_order() {
    let report = Analyzer::default().run(&schema(), &inputs());
    let pos = |t: &str| report.migration_order.iter().position(|x| x == t).unwrap();

    assert_eq!(report.migration_order.len(), 4);
    assert!(pos("customers") < pos("customer_addresses"));
}
