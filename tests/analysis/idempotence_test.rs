//! Repeated runs over the same schema produce identical output.

use schemalens::schema::Schema;
use schemalens::{Analyzer, ExternalInputs};

const SCHEMA: &str = r#"{
    "tables": [
        {"name": "users", "columns": [
            {"name": "id", "type": "INT", "isPrimary": true, "autoIncrement": true, "nullable": false},
            {"name": "email", "type": "VARCHAR(190)", "isUnique": true, "nullable": false}
        ]},
        {"name": "posts", "columns": [
            {"name": "id", "type": "INT", "isPrimary": true},
            {"name": "user_id", "type": "INT", "nullable": false},
            {"name": "published", "type": "TINYINT(1)", "default": 0}
        ], "foreignKeys": [
            {"column": "user_id", "references": {"table": "users", "column": "id"}, "onDelete": "CASCADE"}
        ]},
        {"name": "comments", "columns": [
            {"name": "id", "type": "INT", "isPrimary": true},
            {"name": "post_id", "type": "INT"},
            {"name": "commentable_id", "type": "INT"},
            {"name": "commentable_type", "type": "VARCHAR(40)"}
        ]},
        {"name": "tags", "columns": [
            {"name": "id", "type": "INT", "isPrimary": true},
            {"name": "parent_id", "type": "INT"}
        ]}
    ]
}"#;

#[test]
fn test_runs_are_byte_identical() {
    let schema = Schema::from_json(SCHEMA).unwrap();
    let inputs = ExternalInputs::new()
        .with_hints_json(r#"{"users": {"role": "core entity"}}"#)
        .unwrap();
    let analyzer = Analyzer::default();

    let first = serde_json::to_string(&analyzer.run(&schema, &inputs)).unwrap();
    let second = serde_json::to_string(&analyzer.run(&schema, &inputs)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_reloaded_schema_gives_same_report() {
    let analyzer = Analyzer::default();
    let inputs = ExternalInputs::default();

    let a = analyzer.run(&Schema::from_json(SCHEMA).unwrap(), &inputs);
    let b = analyzer.run(&Schema::from_json(SCHEMA).unwrap(), &inputs);
    assert_eq!(a, b);
    assert_eq!(a.plans.len(), 4);
    assert_eq!(a.relations.len(), 3);
}
