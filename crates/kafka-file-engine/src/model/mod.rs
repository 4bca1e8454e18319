//! Tables of recognized property names per block type.
//!
//! The parser only asks whether a producer property name is known; the
//! descriptions and value enumerations are for completion and hover layers.

use serde::{Deserialize, Serialize};

use crate::parsing::ast::BlockType;

/// One recognized property and the values it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Accepted values; empty means free text.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

impl PropertyDefinition {
    pub fn new(name: &str, description: &str, values: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// Whether `value` is acceptable. Free-text properties accept anything.
    pub fn accepts(&self, value: &str) -> bool {
        self.values.is_empty() || self.values.iter().any(|v| v == value)
    }
}

/// Recognized properties for producer and consumer blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyCatalog {
    pub producer: Vec<PropertyDefinition>,
    pub consumer: Vec<PropertyDefinition>,
}

const FORMATS: &[&str] = &["none", "string", "double", "float", "integer", "long", "short"];

impl PropertyCatalog {
    pub fn new(producer: Vec<PropertyDefinition>, consumer: Vec<PropertyDefinition>) -> Self {
        Self { producer, consumer }
    }

    pub fn properties(&self, block_type: BlockType) -> &[PropertyDefinition] {
        match block_type {
            BlockType::Producer => &self.producer,
            BlockType::Consumer => &self.consumer,
        }
    }

    pub fn definition(&self, block_type: BlockType, name: &str) -> Option<&PropertyDefinition> {
        self.properties(block_type).iter().find(|d| d.name == name)
    }

    pub fn is_known(&self, block_type: BlockType, name: &str) -> bool {
        self.definition(block_type, name).is_some()
    }

    fn default_producer() -> Vec<PropertyDefinition> {
        let value_formats = value_formats();
        vec![
            PropertyDefinition::new("topic", "The topic the record is sent to.", &[]),
            PropertyDefinition::new("key", "The record key. May embed `{{ }}` expressions.", &[]),
            PropertyDefinition::new(
                "headers",
                "Record headers as comma-separated `name=value` pairs.",
                &[],
            ),
            PropertyDefinition::new("key-format", "Serializer for the key.", FORMATS),
            PropertyDefinition::new(
                "value-format",
                "Serializer for the value.",
                &value_formats,
            ),
            PropertyDefinition::new("every", "Repeat the send on an interval such as `5s` or `1m`.", &[]),
        ]
    }

    fn default_consumer() -> Vec<PropertyDefinition> {
        let value_formats = value_formats();
        vec![
            PropertyDefinition::new("topic", "The topic to consume from.", &[]),
            PropertyDefinition::new(
                "from",
                "Offset to start from: `earliest`, `latest` or an explicit offset.",
                &["earliest", "latest", "0"],
            ),
            PropertyDefinition::new("key-format", "Deserializer for the key.", FORMATS),
            PropertyDefinition::new(
                "value-format",
                "Deserializer for the value.",
                &value_formats,
            ),
            PropertyDefinition::new(
                "partitions",
                "Partitions to read, such as `0,1,2` or `0-2`.",
                &[],
            ),
        ]
    }
}

fn value_formats() -> Vec<&'static str> {
    let mut formats = FORMATS.to_vec();
    formats.push("json");
    formats
}

impl Default for PropertyCatalog {
    fn default() -> Self {
        Self::new(Self::default_producer(), Self::default_consumer())
    }
}
