//! Attribute Schemas
//!
//! Describes the attributes of a data source and validates read configs
//! against them.

use crate::error::ProviderError;
use crate::types::AttributeMap;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Value type of an attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    String,
    Int,
    List(Box<AttributeType>),
}

impl AttributeType {
    pub fn list_of(element: AttributeType) -> Self {
        AttributeType::List(Box::new(element))
    }

    /// Check a JSON value against this type
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            AttributeType::String => value.is_string(),
            AttributeType::Int => value.is_i64() || value.is_u64(),
            AttributeType::List(element) => value
                .as_array()
                .is_some_and(|items| items.iter().all(|v| element.accepts(v))),
        }
    }
}

/// Who sets an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    /// Set by the caller, must be present
    Required,
    /// Set by the caller, may be omitted
    Optional,
    /// Set by the read
    Computed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    #[serde(rename = "type")]
    pub ty: AttributeType,
    pub presence: Presence,
    /// Changing the value replaces the object
    pub force_new: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

impl Attribute {
    fn new(ty: AttributeType, presence: Presence) -> Self {
        Self {
            ty,
            presence,
            force_new: false,
            default: None,
            description: None,
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

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

/// Attributes of one data source, ordered by name
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DataSourceSchema {
    pub attributes: BTreeMap<&'static str, Attribute>,
}

impl DataSourceSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: &'static str, attribute: Attribute) -> Self {
        self.attributes.insert(name, attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Validate a read config and fill in defaults
    ///
    /// `null` values count as unset. Returns the caller-settable attributes only.
    ///
    /// # Errors
    /// - ProviderError::InvalidConfig for unknown, computed, mistyped or missing attributes
    pub fn resolve(&self, config: &AttributeMap) -> Result<AttributeMap, ProviderError> {
        let mut resolved = AttributeMap::new();

        for (name, value) in config {
            if value.is_null() {
                continue;
            }

            let attribute = self
                .attribute(name)
                .ok_or_else(|| ProviderError::invalid(name, "unsupported attribute"))?;

            if attribute.presence == Presence::Computed {
                return Err(ProviderError::invalid(
                    name,
                    "attribute is computed and cannot be set",
                ));
            }

            if !attribute.ty.accepts(value) {
                return Err(ProviderError::invalid(
                    name,
                    format!("expected {:?}, got {}", attribute.ty, value),
                ));
            }

            resolved.insert(name.clone(), value.clone());
        }

        for (name, attribute) in &self.attributes {
            if resolved.contains_key(*name) {
                continue;
            }
            match attribute.presence {
                Presence::Required => {
                    return Err(ProviderError::invalid(*name, "attribute is required"));
                }
                Presence::Optional => {
                    if let Some(default) = &attribute.default {
                        resolved.insert(name.to_string(), default.clone());
                    }
                }
                Presence::Computed => {}
            }
        }

        Ok(resolved)
    }
}
