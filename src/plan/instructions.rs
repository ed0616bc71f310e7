//! Post-migration instructions for application code.

use crate::schema::TableRole;

pub fn post_migration_instructions(
    model: &str,
    role: Option<TableRole>,
    has_enums: bool,
    linked_files: usize,
) -> Vec<String> {
    let mut steps = vec![format!("Update DTOs: {}Dto", model)];

    match role {
        Some(TableRole::CoreEntity) => {
            steps.push(format!("Update services that use {}", model));
            steps.push(format!("Check business validations in {}Service", model));
        }
        Some(TableRole::Technical) => {
            steps.push("Check compatibility with external tools".to_string());
        }
        _ => {}
    }

    if has_enums {
        steps.push("Sync application enums with the Prisma enums".to_string());
    }

    if linked_files > 0 {
        steps.push(format!("Update call sites in {} linked files", linked_files));
    }

    steps
}
