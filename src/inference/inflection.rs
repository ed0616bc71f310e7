//! Pluralization and singularization for table-name matching.
//!
//! Wraps the `inflector` crate with a table of irregular nouns that turn up
//! in schemas and that `inflector` gets wrong or leaves untouched.

use std::collections::HashMap;

use inflector::Inflector;
use once_cell::sync::Lazy;

/// Irregular (singular, plural) pairs.
static IRREGULARS: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("mouse", "mice"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("half", "halves"),
    ("analysis", "analyses"),
    ("basis", "bases"),
    ("crisis", "crises"),
    ("criterion", "criteria"),
    ("datum", "data"),
    ("medium", "media"),
    ("index", "indices"),
    ("matrix", "matrices"),
    ("vertex", "vertices"),
    ("status", "statuses"),
    ("address", "addresses"),
];

static TO_PLURAL: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| IRREGULARS.iter().copied().collect());

static TO_SINGULAR: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| IRREGULARS.iter().map(|&(s, p)| (p, s)).collect());

/// Plural form of a lower-case word.
///
/// Words already in plural irregular form are returned unchanged.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    let lower = word.to_lowercase();
    if let Some(plural) = TO_PLURAL.get(lower.as_str()) {
        return plural.to_string();
    }
    if TO_SINGULAR.contains_key(lower.as_str()) {
        return lower;
    }
    lower.to_plural()
}

/// Singular form of a lower-case word.
pub fn singularize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    let lower = word.to_lowercase();
    if let Some(singular) = TO_SINGULAR.get(lower.as_str()) {
        return singular.to_string();
    }
    if TO_PLURAL.contains_key(lower.as_str()) {
        return lower;
    }
    lower.to_singular()
}

/// Singularize only the last `_`-separated segment (`order_items` → `order_item`).
pub fn singularize_last_segment(name: &str) -> String {
    match name.rsplit_once('_') {
        Some((head, last)) => format!("{}_{}", head.to_lowercase(), singularize(last)),
        None => singularize(name),
    }
}

/// Pluralize only the last `_`-separated segment (`order_item` → `order_items`).
pub fn pluralize_last_segment(name: &str) -> String {
    match name.rsplit_once('_') {
        Some((head, last)) => format!("{}_{}", head.to_lowercase(), pluralize(last)),
        None => pluralize(name),
    }
}
