//! Declarative schema descriptors.
//!
//! A [`BlockSchema`] describes the attributes a configuration block accepts.
//! Descriptors are plain data: they can be printed as JSON and handed to
//! [`crate::validator`] to check a configuration value before it is expanded
//! into a typed model.

use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::{SchemaError, SchemaResult};

/// Whether an attribute must, may, or must not be supplied by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    Required,
    Optional,
    /// Output-only; populated by the remote system.
    Computed,
}

/// Value type of an attribute.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Bool,
    Number,
    List(Box<AttributeType>),
    Set(Box<AttributeType>),
    Block(BlockSchema),
}

impl AttributeType {
    pub fn list_of(element: AttributeType) -> Self {
        AttributeType::List(Box::new(element))
    }

    pub fn set_of(element: AttributeType) -> Self {
        AttributeType::Set(Box::new(element))
    }

    /// Short name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Bool => "bool",
            AttributeType::Number => "number",
            AttributeType::List(_) => "list",
            AttributeType::Set(_) => "set",
            AttributeType::Block(_) => "block",
        }
    }
}

/// Signature of a named string check.
pub type CheckFn = fn(&str) -> Result<(), String>;

/// A constraint applied to every string value an attribute holds.
#[derive(Clone)]
pub enum StringValidator {
    /// Value must equal one of the literals exactly.
    OneOf(Vec<String>),
    Pattern(Regex),
    /// Named check implemented elsewhere, e.g. a resource ID parser.
    Check { name: &'static str, check: CheckFn },
}

impl StringValidator {
    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StringValidator::OneOf(values.into_iter().map(Into::into).collect())
    }

    pub fn pattern(pattern: &str) -> SchemaResult<Self> {
        Regex::new(pattern)
            .map(StringValidator::Pattern)
            .map_err(|source| SchemaError::Pattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    pub fn check(name: &'static str, check: CheckFn) -> Self {
        StringValidator::Check { name, check }
    }

    /// Apply the constraint, returning a human-readable reason on failure.
    pub fn validate(&self, value: &str) -> Result<(), String> {
        match self {
            StringValidator::OneOf(allowed) => {
                if allowed.iter().any(|a| a == value) {
                    Ok(())
                } else {
                    let expected = allowed
                        .iter()
                        .map(|a| format!("{a:?}"))
                        .collect::<Vec<_>>()
                        .join(", ");
                    Err(format!("expected one of [{expected}], got {value:?}"))
                }
            }
            StringValidator::Pattern(regex) => {
                if regex.is_match(value) {
                    Ok(())
                } else {
                    Err(format!("{value:?} does not match {}", regex.as_str()))
                }
            }
            StringValidator::Check { check, .. } => check(value),
        }
    }
}

impl fmt::Debug for StringValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StringValidator::OneOf(values) => f.debug_tuple("OneOf").field(values).finish(),
            StringValidator::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            StringValidator::Check { name, .. } => f.debug_struct("Check").field("name", name).finish(),
        }
    }
}

impl Serialize for StringValidator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            StringValidator::OneOf(values) => map.serialize_entry("one_of", values)?,
            StringValidator::Pattern(regex) => map.serialize_entry("pattern", regex.as_str())?,
            StringValidator::Check { name, .. } => map.serialize_entry("check", name)?,
        }
        map.end()
    }
}

/// A single attribute of a block.
#[derive(Debug, Clone, Serialize)]
pub struct Attribute {
    #[serde(rename = "type")]
    pub ty: AttributeType,
    pub presence: Presence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<StringValidator>,
}

impl Attribute {
    pub fn new(ty: AttributeType, presence: Presence) -> Self {
        Self {
            ty,
            presence,
            max_items: None,
            description: String::new(),
            validators: Vec::new(),
        }
    }

    pub fn required(ty: AttributeType) -> Self {
        Self::new(ty, Presence::Required)
    }

    pub fn optional(ty: AttributeType) -> Self {
        Self::new(ty, Presence::Optional)
    }

    pub fn computed(ty: AttributeType) -> Self {
        Self::new(ty, Presence::Computed)
    }

    pub fn with_max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_validator(mut self, validator: StringValidator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }

    pub fn is_computed(&self) -> bool {
        self.presence == Presence::Computed
    }
}

/// The attributes of a nested configuration block, keyed by name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BlockSchema {
    pub attributes: BTreeMap<String, Attribute>,
}

impl BlockSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }
}
