//! Problematic-pattern detection for native column types.
//!
//! Rules are evaluated in declaration order against the upper-cased native
//! type string. The first rule whose regex matches and whose guards pass
//! wins; a column never carries more than one pattern warning.

use once_cell::sync::Lazy;
use regex::Regex;

/// Column names that suggest monetary values.
///
/// `rate` is left out on purpose: it matches `created`, `updated` and
/// friends as a substring.
static FINANCIAL_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(price|amount|cost|fee|total|balance|salary|tax|payment|discount|credit|debit|revenue|wage|money)",
    )
    .expect("financial vocabulary regex")
});

/// True if a column name belongs to the financial vocabulary.
pub fn is_financial_name(name: &str) -> bool {
    FINANCIAL_NAME.is_match(name)
}

/// A single problematic-pattern rule.
#[derive(Debug)]
pub struct PatternRule {
    /// Rule identifier
    pub name: &'static str,
    /// Warning attached to the mapping entry
    pub warning: &'static str,
    /// Suggested remedy
    pub suggestion: &'static str,
    /// Only applies to primary-key columns
    pub primary_key_only: bool,
    /// Only applies when the column name looks monetary
    pub financial_only: bool,
    pattern: Regex,
}

impl PatternRule {
    fn new(name: &'static str, pattern: &str, warning: &'static str, suggestion: &'static str) -> Self {
        Self {
            name,
            warning,
            suggestion,
            primary_key_only: false,
            financial_only: false,
            pattern: Regex::new(pattern).expect("pattern rule regex"),
        }
    }

    fn primary_key_only(mut self) -> Self {
        self.primary_key_only = true;
        self
    }

    fn financial_only(mut self) -> Self {
        self.financial_only = true;
        self
    }

    /// Check the rule against an upper-cased native type.
    pub fn matches(&self, native_upper: &str, column_name: &str, primary_key: bool) -> bool {
        if self.primary_key_only && !primary_key {
            return false;
        }
        if self.financial_only && !is_financial_name(column_name) {
            return false;
        }
        self.pattern.is_match(native_upper)
    }
}

/// The ordered rule list.
pub static PATTERN_RULES: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        PatternRule::new(
            "float_money",
            r"^(FLOAT|DOUBLE|REAL)\b",
            "Floating-point type used for a financial column",
            "Use an exact-precision decimal type: DECIMAL(19,4) in PostgreSQL, Decimal @db.Decimal(19, 4) in Prisma",
        )
        .financial_only(),
        PatternRule::new(
            "unsigned",
            r"\bUNSIGNED\b",
            "PostgreSQL has no unsigned integer types",
            "Widen to the next signed type or add a CHECK (value >= 0) constraint",
        ),
        PatternRule::new(
            "small_integer_key",
            r"^(TINYINT|SMALLINT|MEDIUMINT)\b",
            "Small integer primary key may overflow after migration",
            "Use INTEGER or BIGINT for primary keys",
        )
        .primary_key_only(),
        PatternRule::new(
            "enum",
            r"^ENUM\s*\(",
            "ENUM maps to TEXT and loses its value constraint",
            "Declare a Prisma enum, or a PostgreSQL enum type / CHECK constraint",
        ),
        PatternRule::new(
            "set",
            r"^SET\s*\(",
            "SET has no PostgreSQL equivalent",
            "Use a TEXT[] array or a junction table",
        ),
        PatternRule::new(
            "year",
            r"^YEAR\b",
            "YEAR maps to SMALLINT without range checking",
            "Add a CHECK constraint on the year range or store a DATE",
        ),
        PatternRule::new(
            "sized_text",
            r"^(TINYTEXT|MEDIUMTEXT|LONGTEXT)\b",
            "Sized TEXT variant collapses to TEXT",
            "Use TEXT and add a length CHECK if the limit matters",
        ),
        PatternRule::new(
            "blob",
            r"^(TINYBLOB|BLOB|MEDIUMBLOB|LONGBLOB)\b",
            "Binary large object stored inline",
            "Use BYTEA, or move the payload to external object storage",
        ),
        PatternRule::new(
            "spatial",
            r"^(GEOMETRY|POINT|LINESTRING|POLYGON|MULTIPOINT|MULTILINESTRING|MULTIPOLYGON|GEOMETRYCOLLECTION)\b",
            "Spatial type requires the PostGIS extension",
            "Enable PostGIS; Prisma exposes the column as Unsupported(\"geometry\")",
        ),
    ]
});

/// Find the first rule matching a column, if any.
pub fn detect(native_type: &str, column_name: &str, primary_key: bool) -> Option<&'static PatternRule> {
    let upper = native_type.trim().to_uppercase();
    PATTERN_RULES
        .iter()
        .find(|rule| rule.matches(&upper, column_name, primary_key))
}
