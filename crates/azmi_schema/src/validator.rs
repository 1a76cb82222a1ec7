//! Configuration validation against a schema descriptor.
//!
//! Validation never stops at the first problem: every diagnostic is collected
//! into a [`ValidationReport`] addressed by attribute path
//! (`identity.0.identity_ids.1`).

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::schema::{Attribute, AttributeType, BlockSchema, Presence};

/// A single problem found in a configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub path: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Validation result with details.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(Diagnostic::new(path, message));
    }

    pub fn add_warning(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(Diagnostic::new(path, message));
    }
}

/// Validate a block value (a JSON object) against its schema.
pub fn validate_block(schema: &BlockSchema, value: &Value) -> ValidationReport {
    let mut report = ValidationReport::new();
    check_block(schema, value, "", &mut report);
    debug!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "Validated block"
    );
    report
}

/// Validate a single named attribute. `None` means the attribute is absent.
pub fn validate_attribute(name: &str, attribute: &Attribute, value: Option<&Value>) -> ValidationReport {
    let mut report = ValidationReport::new();
    check_attribute(attribute, value, name, &mut report);
    debug!(
        attribute = name,
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "Validated attribute"
    );
    report
}

fn join(path: &str, segment: impl fmt::Display) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{path}.{segment}")
    }
}

fn check_block(schema: &BlockSchema, value: &Value, path: &str, report: &mut ValidationReport) {
    let map = match value {
        Value::Object(map) => map,
        other => {
            report.add_error(path, format!("expected block, got {}", value_kind(other)));
            return;
        }
    };

    for key in map.keys() {
        if !schema.contains(key) {
            report.add_error(join(path, key), "unsupported attribute");
        }
    }

    for (name, attribute) in &schema.attributes {
        check_attribute(attribute, map.get(name), &join(path, name), report);
    }
}

fn check_attribute(attribute: &Attribute, value: Option<&Value>, path: &str, report: &mut ValidationReport) {
    let present = value.filter(|v| !v.is_null());

    match attribute.presence {
        Presence::Required if present.is_none() => {
            report.add_error(path, "is required");
            return;
        }
        Presence::Computed => {
            // Flattened state carries computed fields as empty strings.
            if present.is_some_and(|v| !is_empty_value(v)) {
                report.add_error(path, "is computed and cannot be set");
            }
            return;
        }
        _ => {}
    }

    if let Some(value) = present {
        check_value(&attribute.ty, attribute, value, path, report);
    }
}

fn check_value(ty: &AttributeType, attribute: &Attribute, value: &Value, path: &str, report: &mut ValidationReport) {
    match (ty, value) {
        (AttributeType::String, Value::String(s)) => {
            for validator in &attribute.validators {
                if let Err(message) = validator.validate(s) {
                    report.add_error(path, message);
                }
            }
        }
        (AttributeType::Bool, Value::Bool(_)) | (AttributeType::Number, Value::Number(_)) => {}
        (AttributeType::List(element) | AttributeType::Set(element), Value::Array(items)) => {
            if let Some(max) = attribute.max_items {
                if items.len() > max {
                    report.add_error(
                        path,
                        format!("expected at most {max} item(s), got {}", items.len()),
                    );
                }
            }

            let is_set = matches!(ty, AttributeType::Set(_));
            for (index, item) in items.iter().enumerate() {
                let item_path = join(path, index);
                if is_set && items[..index].contains(item) {
                    report.add_warning(&item_path, format!("duplicate element {item} is ignored"));
                    continue;
                }
                check_element(element, attribute, item, &item_path, report);
            }
        }
        (AttributeType::Block(schema), Value::Object(_)) => check_block(schema, value, path, report),
        (expected, other) => {
            report.add_error(
                path,
                format!("expected {}, got {}", expected.name(), value_kind(other)),
            );
        }
    }
}

fn check_element(element: &AttributeType, attribute: &Attribute, item: &Value, path: &str, report: &mut ValidationReport) {
    match (element, item) {
        // An unset nested block arrives as a null element.
        (AttributeType::Block(_), Value::Null) => {}
        (_, Value::Null) => report.add_error(path, "null element is not allowed"),
        _ => check_value(element, attribute, item, path, report),
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "block",
    }
}
