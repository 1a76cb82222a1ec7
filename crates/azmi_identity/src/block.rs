//! The `identity` configuration block.
//!
//! [`IdentityBlock`] owns the three directions of the mapping for one
//! capability set:
//!
//! - [`IdentityBlock::schema`] describes the accepted block,
//! - [`IdentityBlock::expand`] reads a block into a [`ManagedIdentityConfig`],
//! - [`IdentityBlock::flatten`] writes a [`ManagedIdentityConfig`] back.
//!
//! Blocks are passed around as they appear in configuration: a list holding
//! at most one map.

use std::collections::BTreeSet;

use serde_json::{Map, Value};
use tracing::debug;

use azmi_resource_id::validate_user_assigned_identity_id;
use azmi_schema::{
    validate_attribute, Attribute, AttributeType, BlockSchema, SchemaError, StringValidator,
    ValidationReport,
};

use crate::config::ManagedIdentityConfig;
use crate::error::{IdentityError, IdentityResult};
use crate::kind::{IdentityCapabilities, IdentityKind};

pub const BLOCK_NAME: &str = "identity";
pub const FIELD_TYPE: &str = "type";
pub const FIELD_IDENTITY_IDS: &str = "identity_ids";
pub const FIELD_PRINCIPAL_ID: &str = "principal_id";
pub const FIELD_TENANT_ID: &str = "tenant_id";

/// A flattened identity block.
pub type FlattenedBlock = Map<String, Value>;

/// Schema and mapping for the `identity` block of one resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityBlock {
    capabilities: IdentityCapabilities,
}

impl IdentityBlock {
    pub fn new(capabilities: IdentityCapabilities) -> Self {
        Self { capabilities }
    }

    pub fn system_assigned() -> Self {
        Self::new(IdentityCapabilities::SYSTEM_ASSIGNED_ONLY)
    }

    pub fn user_assigned() -> Self {
        Self::new(IdentityCapabilities::USER_ASSIGNED_ONLY)
    }

    pub fn system_assigned_user_assigned() -> Self {
        Self::new(IdentityCapabilities::SYSTEM_ASSIGNED_OR_USER_ASSIGNED)
    }

    pub fn capabilities(&self) -> IdentityCapabilities {
        self.capabilities
    }

    /// The attribute hosting the block: an optional list of at most one.
    pub fn schema(&self) -> Attribute {
        Attribute::optional(AttributeType::list_of(AttributeType::Block(self.block_schema())))
            .with_max_items(1)
            .with_description("Managed identity assigned to the resource")
    }

    /// Attributes of the single block element.
    pub fn block_schema(&self) -> BlockSchema {
        let allows_user = self.capabilities.allows_user_assigned();

        let type_attribute = if allows_user {
            Attribute::required(AttributeType::String)
        } else {
            Attribute::optional(AttributeType::String)
        };
        let type_attribute = type_attribute
            .with_validator(StringValidator::one_of(self.capabilities.allowed_literals()))
            .with_description("Type of managed identity");

        let mut schema = BlockSchema::new()
            .with_attribute(FIELD_TYPE, type_attribute)
            .with_attribute(
                FIELD_PRINCIPAL_ID,
                Attribute::computed(AttributeType::String)
                    .with_description("Principal ID of the system-assigned identity"),
            )
            .with_attribute(
                FIELD_TENANT_ID,
                Attribute::computed(AttributeType::String)
                    .with_description("Tenant ID of the system-assigned identity"),
            );

        if allows_user {
            // Only mandatory when no other kind is available.
            let ids = if self.capabilities.allows_system_assigned() {
                Attribute::optional(AttributeType::set_of(AttributeType::String))
            } else {
                Attribute::required(AttributeType::set_of(AttributeType::String))
            };
            schema = schema.with_attribute(
                FIELD_IDENTITY_IDS,
                ids.with_validator(StringValidator::check(
                    "user_assigned_identity_id",
                    validate_user_assigned_identity_id,
                ))
                .with_description("User-assigned identity resource IDs"),
            );
        }

        schema
    }

    /// Check raw configuration against the schema and the cross-field rules
    /// applied by [`IdentityBlock::expand`], collecting every problem.
    pub fn validate(&self, input: &[Value]) -> ValidationReport {
        let value = Value::Array(input.to_vec());
        let mut report = validate_attribute(BLOCK_NAME, &self.schema(), Some(&value));

        if report.valid {
            if let Err(e) = self.expand(input) {
                report.add_error(format!("{BLOCK_NAME}.0"), e.to_string());
            }
        }
        report
    }

    /// Validate, then expand. Fails with every schema error at once.
    pub fn expand_validated(&self, input: &[Value]) -> IdentityResult<ManagedIdentityConfig> {
        let report = self.validate(input);
        if !report.valid {
            return Err(SchemaError::Invalid(report.errors).into());
        }
        self.expand(input)
    }

    /// Read a configuration block.
    ///
    /// Shape errors (a non-map element, a non-string `type`) are normally
    /// caught by [`IdentityBlock::validate`] first; they are reported here
    /// rather than panicking when a caller skips it.
    pub fn expand(&self, input: &[Value]) -> IdentityResult<ManagedIdentityConfig> {
        if input.len() > 1 {
            return Err(IdentityError::TooManyBlocks(input.len()));
        }

        let block = match input.first() {
            None | Some(Value::Null) => {
                debug!("No identity block configured");
                return Ok(ManagedIdentityConfig::none());
            }
            Some(Value::Object(block)) => block,
            Some(_) => {
                return Err(IdentityError::InvalidField {
                    field: BLOCK_NAME,
                    expected: "a block",
                })
            }
        };

        let kind = if self.capabilities.allows_user_assigned() {
            self.read_kind(block)?
        } else {
            IdentityKind::SystemAssigned
        };

        let ids = read_string_set(block, FIELD_IDENTITY_IDS)?;
        if !ids.is_empty() && !kind.includes_user_assigned() {
            return Err(IdentityError::IdentityIdsRequireUserAssigned);
        }

        let config = ManagedIdentityConfig::new(kind, ids.into_iter().collect())?;
        debug!(
            kind = %config.kind(),
            identity_ids = config.user_assigned_identity_ids().len(),
            "Expanded identity block"
        );
        Ok(config)
    }

    fn read_kind(&self, block: &Map<String, Value>) -> IdentityResult<IdentityKind> {
        let raw = match block.get(FIELD_TYPE) {
            None | Some(Value::Null) => return Err(IdentityError::MissingField(FIELD_TYPE)),
            Some(Value::String(raw)) => raw,
            Some(_) => {
                return Err(IdentityError::InvalidField {
                    field: FIELD_TYPE,
                    expected: "a string",
                })
            }
        };

        IdentityKind::from_config_str(raw)
            .filter(|kind| self.capabilities.allows(*kind))
            .ok_or_else(|| IdentityError::UnsupportedType {
                value: raw.clone(),
                allowed: self
                    .capabilities
                    .allowed_literals()
                    .iter()
                    .map(|l| format!("{l:?}"))
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// Write a config back as a block list. Absent or `None` yields an empty
    /// list, never a block of empty strings.
    pub fn flatten(&self, config: Option<&ManagedIdentityConfig>) -> Vec<FlattenedBlock> {
        let Some(config) = config.filter(|c| !c.is_none()) else {
            return Vec::new();
        };

        let mut block = Map::new();
        block.insert(FIELD_TYPE.to_string(), Value::from(config.kind().as_str()));

        if self.capabilities.allows_user_assigned() {
            let ids: BTreeSet<&str> = config
                .user_assigned_identity_ids()
                .iter()
                .map(String::as_str)
                .collect();
            block.insert(
                FIELD_IDENTITY_IDS.to_string(),
                Value::Array(ids.into_iter().map(Value::from).collect()),
            );
        }

        block.insert(FIELD_PRINCIPAL_ID.to_string(), Value::from(config.principal_id()));
        block.insert(FIELD_TENANT_ID.to_string(), Value::from(config.tenant_id()));

        vec![block]
    }

    /// [`IdentityBlock::flatten`] as a JSON list, for embedding in a document.
    pub fn flatten_value(&self, config: Option<&ManagedIdentityConfig>) -> Value {
        Value::Array(self.flatten(config).into_iter().map(Value::Object).collect())
    }
}

/// Absent and null read as empty. Sets are sorted so output is stable.
fn read_string_set(block: &Map<String, Value>, field: &'static str) -> IdentityResult<BTreeSet<String>> {
    let items = match block.get(field) {
        None | Some(Value::Null) => return Ok(BTreeSet::new()),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(IdentityError::InvalidField {
                field,
                expected: "a set of strings",
            })
        }
    };

    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.clone()),
            _ => Err(IdentityError::InvalidField {
                field,
                expected: "a set of strings",
            }),
        })
        .collect()
}
