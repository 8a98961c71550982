//! Serde shapes of the Structurizr workspace JSON export.
//!
//! These mirror the export loosely; [`super::Normalizer`] validates them and
//! turns them into the typed arena.

use crate::error::SchemaError;
use serde::Deserialize;
use serde_json::{Map, Number, Value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawNode {
    pub id: Option<RawId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub technology: Option<String>,
    pub environment: Option<String>,
    pub tags: Option<RawTags>,
    pub properties: Option<RawProperties>,
    pub children: Option<Vec<Value>>,
    pub infrastructure_nodes: Option<Vec<Value>>,
    pub software_system_instances: Option<Vec<Value>>,
    pub container_instances: Option<Vec<Value>>,
    pub software_system_id: Option<RawId>,
    pub container_id: Option<RawId>,
}

/// Structurizr writes ids as strings, older exports as numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum RawId {
    Text(String),
    Number(Number),
}

impl RawId {
    pub fn into_string(self) -> String {
        match self {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum RawTags {
    /// Export format: `"Element,Deployment Node,Web"`.
    Joined(String),
    List(Vec<String>),
}

impl RawTags {
    /// Trimmed, non-empty, first occurrence wins.
    pub fn normalize(self) -> Vec<String> {
        let raw: Vec<String> = match self {
            RawTags::Joined(s) => s.split(',').map(str::to_string).collect(),
            RawTags::List(list) => list,
        };

        let mut tags: Vec<String> = Vec::new();
        for tag in raw {
            let tag = tag.trim();
            if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }
        tags
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct RawProperty {
    pub name: String,
    pub value: Value,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum RawProperties {
    /// Export format: `[{"name": "ansible_host", "value": "10.0.1.10"}]`.
    List(Vec<RawProperty>),
    Map(Map<String, Value>),
}

impl RawProperties {
    pub fn normalize(self, path: &str) -> Result<Vec<(String, String)>, SchemaError> {
        let entries: Vec<(String, Value)> = match self {
            RawProperties::List(list) => list.into_iter().map(|p| (p.name, p.value)).collect(),
            RawProperties::Map(map) => map.into_iter().collect(),
        };

        entries
            .into_iter()
            .map(|(key, value)| {
                let value = scalar_to_string(&value).ok_or_else(|| {
                    SchemaError::new(
                        format!("{}.properties.{}", path, key),
                        "property values must be strings, numbers or booleans",
                    )
                })?;
                Ok((key, value))
            })
            .collect()
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Software systems and containers referenced by deployment instances.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawElement {
    pub id: RawId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub technology: Option<String>,
    #[serde(default)]
    pub containers: Vec<RawElement>,
}
