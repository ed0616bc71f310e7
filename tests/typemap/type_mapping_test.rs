//! Integration tests for the type mapping engine.

use schemalens::schema::Column;
use schemalens::typemap::patterns::{detect, PATTERN_RULES};
use schemalens::typemap::{map_column, strip_size, FALLBACK_ORM_TYPE, FALLBACK_TARGET_TYPE};

#[test]
fn test_float_price_is_flagged() {
    let entry = map_column(&Column::new("price", "FLOAT"));

    assert_eq!(entry.target_type, "REAL");
    assert_eq!(entry.pattern.as_deref(), Some("float_money"));
    assert!(entry.warning.unwrap().contains("Floating-point"));
    assert!(entry.suggestion.unwrap().contains("DECIMAL"));
}

#[test]
fn test_float_outside_financial_vocabulary_is_fine() {
    let entry = map_column(&Column::new("latitude", "DOUBLE"));
    assert_eq!(entry.target_type, "DOUBLE PRECISION");
    assert!(entry.warning.is_none());
}

#[test]
fn test_sizes_carry_over_for_resizable_types() {
    let entry = map_column(&Column::new("name", "varchar(120)").not_null());
    assert_eq!(entry.target_type, "VARCHAR(120)");
    assert_eq!(entry.orm_declaration(), "String @db.VarChar(120)");

    let entry = map_column(&Column::new("total", "DECIMAL(10, 2)"));
    assert_eq!(entry.target_type, "DECIMAL(10,2)");
    assert_eq!(entry.orm_declaration(), "Decimal? @db.Decimal(10, 2)");
}

#[test]
fn test_display_width_is_dropped() {
    let entry = map_column(&Column::new("quantity", "INT(11)"));
    assert_eq!(entry.target_type, "INTEGER");
    assert_eq!(entry.orm_type, "Int");
}

#[test]
fn test_boolean_flag() {
    let entry = map_column(&Column::new("is_active", "TINYINT(1)").with_default("1"));
    assert_eq!(entry.target_type, "BOOLEAN");
    assert_eq!(entry.orm_declaration(), "Boolean? @default(true)");
}

#[test]
fn test_serial_primary_key() {
    let entry = map_column(
        &Column::new("id", "BIGINT")
            .with_primary_key()
            .with_auto_increment(),
    );
    assert_eq!(entry.target_type, "BIGSERIAL");
    assert_eq!(entry.orm_declaration(), "BigInt @id @default(autoincrement())");
}

#[test]
fn test_uuid_primary_key() {
    let entry = map_column(&Column::new("id", "CHAR(36)").with_primary_key());
    assert_eq!(
        entry.orm_declaration(),
        "String @id @default(uuid()) @db.Char(36)"
    );
}

#[test]
fn test_current_timestamp_default() {
    let entry = map_column(
        &Column::new("created_at", "TIMESTAMP")
            .not_null()
            .with_default("CURRENT_TIMESTAMP"),
    );
    assert_eq!(entry.orm_declaration(), "DateTime @default(now()) @db.Timestamp");
}

#[test]
fn test_unknown_type_falls_back() {
    let entry = map_column(&Column::new("shape", "HIERARCHYID"));
    assert!(entry.fallback);
    assert_eq!(entry.target_type, FALLBACK_TARGET_TYPE);
    assert_eq!(entry.orm_type, FALLBACK_ORM_TYPE);
    assert!(entry.warning.unwrap().contains("HIERARCHYID"));
}

#[test]
fn test_unsigned_is_flagged() {
    let entry = map_column(&Column::new("views", "INT UNSIGNED"));
    assert_eq!(entry.pattern.as_deref(), Some("unsigned"));
}

#[test]
fn test_unflagged_targets_round_trip_without_warning() {
    let natives = [
        "INT",
        "BIGINT",
        "VARCHAR(50)",
        "CHAR(2)",
        "TEXT",
        "DATE",
        "DATETIME",
        "TIMESTAMP",
        "DECIMAL(10,2)",
        "JSON",
        "BOOLEAN",
        "DOUBLE",
    ];

    for native in natives {
        let entry = map_column(&Column::new("value", native));
        let target = strip_size(&entry.target_type);
        let flagged = PATTERN_RULES
            .iter()
            .any(|rule| rule.matches(&target, "value", false));
        if !flagged {
            assert!(entry.warning.is_none(), "{} produced a warning", native);
            assert!(detect(&entry.target_type, "value", false).is_none());
        }
    }
}
