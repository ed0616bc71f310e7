//! Functional summary: what a table is for, in plain words.
//!
//! The role comes from the external role tag; the functional area from an
//! ordered list of name-substring predicates per role. The first predicate
//! whose keywords occur in the table name wins.

use crate::schema::TableRole;

use super::FunctionalSummary;

const DEFAULT_ROLE: &str = "stores data";
const DEFAULT_AREA: &str = "general";

struct AreaRule {
    keywords: &'static [&'static str],
    area: &'static str,
}

const CORE_AREAS: &[AreaRule] = &[
    AreaRule { keywords: &["user", "customer", "account"], area: "users / authentication" },
    AreaRule { keywords: &["product", "item", "catalog"], area: "catalog / products" },
    AreaRule { keywords: &["order", "invoice", "payment"], area: "orders / payments" },
    AreaRule { keywords: &["post", "comment", "content"], area: "content / CMS" },
];

const DETAIL_AREAS: &[AreaRule] = &[
    AreaRule { keywords: &["user", "customer", "account"], area: "user profiles" },
    AreaRule { keywords: &["product", "item"], area: "product details" },
    AreaRule { keywords: &["order"], area: "order details" },
];

const TECHNICAL_AREAS: &[AreaRule] = &[
    AreaRule { keywords: &["log", "audit"], area: "logging / audit" },
    AreaRule { keywords: &["session", "token"], area: "sessions / authentication" },
    AreaRule { keywords: &["cache"], area: "caching" },
    AreaRule { keywords: &["job", "queue"], area: "async jobs" },
];

fn first_area(rules: &[AreaRule], name: &str) -> Option<&'static str> {
    let name = name.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| name.contains(k)))
        .map(|rule| rule.area)
}

/// Summarize a table.
///
/// `main_table` is the first table the given one points at; detail tables
/// take their area from it. A classification reason replaces the role text.
pub fn summarize(
    table: &str,
    role: Option<TableRole>,
    reason: Option<&str>,
    main_table: Option<&str>,
) -> FunctionalSummary {
    let (role_text, area) = match role {
        Some(TableRole::CoreEntity) => (
            "stores core business entities",
            first_area(CORE_AREAS, table).map(str::to_string),
        ),
        Some(TableRole::Detail) => (
            "stores details attached to core entities",
            main_table
                .and_then(|main| first_area(DETAIL_AREAS, main))
                .map(str::to_string),
        ),
        Some(TableRole::Junction) => {
            let parts: Vec<&str> = table.split('_').filter(|p| !p.is_empty()).collect();
            let area = (parts.len() >= 2).then(|| format!("relation {}", parts.join(" / ")));
            ("manages a many-to-many relation", area)
        }
        Some(TableRole::Technical) => (
            "stores technical data",
            first_area(TECHNICAL_AREAS, table).map(str::to_string),
        ),
        None => (DEFAULT_ROLE, None),
    };

    FunctionalSummary {
        role: reason
            .filter(|r| !r.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| role_text.to_string()),
        functional_area: area.unwrap_or_else(|| DEFAULT_AREA.to_string()),
    }
}
