use jsonschema::JSONSchema;
use jsonschema::error::ValidationErrorKind;
use serde_json::Value;

use crate::errors::{ConfigError, ValidationIssue, ValidationReport};
use crate::schema::config_json_schema;

/// Older key for the group list, read as `groups`.
pub const LEGACY_GROUPS_KEY: &str = "columns_to_swap";

/// Rewrite legacy keys in place before structural validation.
///
/// `columns_to_swap` is moved to `groups`; a document carrying both is
/// rejected rather than silently preferring one.
pub fn normalize_config_json(document: &mut Value) -> ValidationReport {
    let mut report = ValidationReport::default();
    let Value::Object(map) = document else {
        return report;
    };
    let Some(legacy) = map.remove(LEGACY_GROUPS_KEY) else {
        return report;
    };

    if map.contains_key("groups") {
        report.push_error(
            ValidationIssue::new(
                "conflicting_keys",
                format!("/{LEGACY_GROUPS_KEY}"),
                format!("both groups and {LEGACY_GROUPS_KEY} are set"),
            )
            .with_hint("keep only groups"),
        );
    } else {
        map.insert("groups".to_string(), legacy);
    }
    report
}

/// Validate a configuration document against the config JSON Schema.
///
/// Unknown keys and out-of-range enum values get their own codes; every
/// other structural problem is a `schema_violation`.
pub fn validate_config_json(config_json: &Value) -> Result<ValidationReport, ConfigError> {
    let config_schema = serde_json::to_value(config_json_schema())?;
    let compiled =
        JSONSchema::compile(&config_schema).map_err(|err| ConfigError::Schema(err.to_string()))?;

    let mut report = ValidationReport::default();

    if let Err(errors) = compiled.validate(config_json) {
        for error in errors {
            let pointer = error.instance_path.to_string();
            let issue = match &error.kind {
                ValidationErrorKind::AdditionalProperties { unexpected } => {
                    for key in unexpected {
                        report.push_error(
                            ValidationIssue::new(
                                "unknown_key",
                                format!("{pointer}/{key}"),
                                format!("unknown key '{key}'"),
                            )
                            .with_hint("keys use snake_case, e.g. force_swap, output_file"),
                        );
                    }
                    continue;
                }
                ValidationErrorKind::Enum { .. } => ValidationIssue::new(
                    "invalid_value",
                    normalized_json_pointer(&pointer),
                    error.to_string(),
                ),
                _ => ValidationIssue::new(
                    "schema_violation",
                    normalized_json_pointer(&pointer),
                    error.to_string(),
                ),
            };
            report.push_error(issue);
        }
    }

    Ok(report)
}

fn normalized_json_pointer(pointer: &str) -> String {
    if pointer.is_empty() {
        "/".to_string()
    } else {
        pointer.to_string()
    }
}
