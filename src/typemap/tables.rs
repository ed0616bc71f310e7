//! Static type lookup tables.
//!
//! Three maps keyed by the upper-cased native base type (no size suffix):
//! native → PostgreSQL base type, native → Prisma scalar type, and
//! native → Prisma `@db.*` native-type attribute. Built once, read-only.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Native base type → PostgreSQL base type.
pub static POSTGRES_TYPES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Integers
        ("TINYINT", "SMALLINT"),
        ("SMALLINT", "SMALLINT"),
        ("MEDIUMINT", "INTEGER"),
        ("INT", "INTEGER"),
        ("INTEGER", "INTEGER"),
        ("BIGINT", "BIGINT"),
        // Approximate and exact numerics
        ("FLOAT", "REAL"),
        ("REAL", "REAL"),
        ("DOUBLE", "DOUBLE PRECISION"),
        ("DOUBLE PRECISION", "DOUBLE PRECISION"),
        ("DECIMAL", "DECIMAL"),
        ("NUMERIC", "NUMERIC"),
        ("DEC", "DECIMAL"),
        // Bits and booleans
        ("BIT", "BIT"),
        ("BOOL", "BOOLEAN"),
        ("BOOLEAN", "BOOLEAN"),
        // Character
        ("CHAR", "CHAR"),
        ("VARCHAR", "VARCHAR"),
        ("TINYTEXT", "TEXT"),
        ("TEXT", "TEXT"),
        ("MEDIUMTEXT", "TEXT"),
        ("LONGTEXT", "TEXT"),
        // Binary
        ("BINARY", "BYTEA"),
        ("VARBINARY", "BYTEA"),
        ("TINYBLOB", "BYTEA"),
        ("BLOB", "BYTEA"),
        ("MEDIUMBLOB", "BYTEA"),
        ("LONGBLOB", "BYTEA"),
        // Temporal
        ("DATE", "DATE"),
        ("TIME", "TIME"),
        ("DATETIME", "TIMESTAMP"),
        ("TIMESTAMP", "TIMESTAMP"),
        ("YEAR", "SMALLINT"),
        // Structured
        ("JSON", "JSONB"),
        ("ENUM", "TEXT"),
        ("SET", "TEXT[]"),
        ("UUID", "UUID"),
        // Spatial
        ("GEOMETRY", "GEOMETRY"),
        ("POINT", "GEOMETRY"),
        ("LINESTRING", "GEOMETRY"),
        ("POLYGON", "GEOMETRY"),
        ("MULTIPOINT", "GEOMETRY"),
        ("MULTILINESTRING", "GEOMETRY"),
        ("MULTIPOLYGON", "GEOMETRY"),
        ("GEOMETRYCOLLECTION", "GEOMETRY"),
    ])
});

/// Native base type → Prisma scalar type.
pub static PRISMA_TYPES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("TINYINT", "Int"),
        ("SMALLINT", "Int"),
        ("MEDIUMINT", "Int"),
        ("INT", "Int"),
        ("INTEGER", "Int"),
        ("BIGINT", "BigInt"),
        ("FLOAT", "Float"),
        ("REAL", "Float"),
        ("DOUBLE", "Float"),
        ("DOUBLE PRECISION", "Float"),
        ("DECIMAL", "Decimal"),
        ("NUMERIC", "Decimal"),
        ("DEC", "Decimal"),
        ("BIT", "Int"),
        ("BOOL", "Boolean"),
        ("BOOLEAN", "Boolean"),
        ("CHAR", "String"),
        ("VARCHAR", "String"),
        ("TINYTEXT", "String"),
        ("TEXT", "String"),
        ("MEDIUMTEXT", "String"),
        ("LONGTEXT", "String"),
        ("BINARY", "Bytes"),
        ("VARBINARY", "Bytes"),
        ("TINYBLOB", "Bytes"),
        ("BLOB", "Bytes"),
        ("MEDIUMBLOB", "Bytes"),
        ("LONGBLOB", "Bytes"),
        ("DATE", "DateTime"),
        ("TIME", "DateTime"),
        ("DATETIME", "DateTime"),
        ("TIMESTAMP", "DateTime"),
        ("YEAR", "Int"),
        ("JSON", "Json"),
        ("ENUM", "String"),
        ("SET", "String[]"),
        ("UUID", "String"),
        ("GEOMETRY", "Unsupported(\"geometry\")"),
        ("POINT", "Unsupported(\"geometry\")"),
        ("LINESTRING", "Unsupported(\"geometry\")"),
        ("POLYGON", "Unsupported(\"geometry\")"),
        ("MULTIPOINT", "Unsupported(\"geometry\")"),
        ("MULTILINESTRING", "Unsupported(\"geometry\")"),
        ("MULTIPOLYGON", "Unsupported(\"geometry\")"),
        ("GEOMETRYCOLLECTION", "Unsupported(\"geometry\")"),
    ])
});

/// Native base type → Prisma native-type attribute (without arguments).
pub static PRISMA_NATIVE_ATTRIBUTES: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| {
        HashMap::from([
            ("TINYINT", "@db.SmallInt"),
            ("SMALLINT", "@db.SmallInt"),
            ("FLOAT", "@db.Real"),
            ("REAL", "@db.Real"),
            ("DOUBLE", "@db.DoublePrecision"),
            ("DOUBLE PRECISION", "@db.DoublePrecision"),
            ("DECIMAL", "@db.Decimal"),
            ("NUMERIC", "@db.Decimal"),
            ("DEC", "@db.Decimal"),
            ("CHAR", "@db.Char"),
            ("VARCHAR", "@db.VarChar"),
            ("DATE", "@db.Date"),
            ("TIME", "@db.Time"),
            ("DATETIME", "@db.Timestamp"),
            ("TIMESTAMP", "@db.Timestamp"),
            ("YEAR", "@db.SmallInt"),
            ("UUID", "@db.Uuid"),
        ])
    });

/// Types whose size or precision is carried over to the target.
pub const RESIZABLE_TYPES: &[&str] = &["CHAR", "VARCHAR", "BIT", "DECIMAL", "NUMERIC", "DEC"];

/// Integer family members, used for identity handling.
pub const INTEGER_TYPES: &[&str] = &["TINYINT", "SMALLINT", "MEDIUMINT", "INT", "INTEGER", "BIGINT"];

pub fn is_resizable(base: &str) -> bool {
    RESIZABLE_TYPES.contains(&base)
}

pub fn is_integer(base: &str) -> bool {
    INTEGER_TYPES.contains(&base)
}

/// PostgreSQL identity type for an auto-increment primary key.
pub fn serial_type(base: &str) -> &'static str {
    match base {
        "BIGINT" => "BIGSERIAL",
        "TINYINT" | "SMALLINT" => "SMALLSERIAL",
        _ => "SERIAL",
    }
}
