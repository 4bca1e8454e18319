use std::fmt;

use serde::{Deserialize, Serialize};

use crate::parsing::text::{Position, Range};

use super::chunk::{DynamicChunk, TextChunk};
use super::property::Property;

/// The two kinds of top-level declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Producer,
    Consumer,
}

impl BlockType {
    pub const PRODUCER_KEYWORD: &'static str = "PRODUCER";
    pub const CONSUMER_KEYWORD: &'static str = "CONSUMER";

    /// Detects a block opener by literal prefix.
    pub fn of_line(text: &str) -> Option<Self> {
        if text.starts_with(Self::PRODUCER_KEYWORD) {
            Some(Self::Producer)
        } else if text.starts_with(Self::CONSUMER_KEYWORD) {
            Some(Self::Consumer)
        } else {
            None
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Producer => Self::PRODUCER_KEYWORD,
            Self::Consumer => Self::CONSUMER_KEYWORD,
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A `PRODUCER` declaration: recognized properties followed by a value body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProducerBlock {
    range: Range,
    properties: Vec<Property>,
    value: Option<DynamicChunk>,
}

impl ProducerBlock {
    pub(crate) fn new(range: Range, properties: Vec<Property>, value: Option<DynamicChunk>) -> Self {
        Self {
            range,
            properties,
            value,
        }
    }

    pub fn range(&self) -> Range {
        self.range
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// The record body, trimmed.
    pub fn value(&self) -> Option<&DynamicChunk> {
        self.value.as_ref()
    }

    pub fn get_property(&self, name: &str) -> Option<&Property> {
        find_property(&self.properties, name)
    }

    pub fn get_property_value(&self, name: &str) -> Option<&str> {
        self.get_property(name)?.property_value()
    }
}

/// A `CONSUMER <group-id>` declaration followed by properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsumerBlock {
    range: Range,
    consumer_group_id: TextChunk,
    properties: Vec<Property>,
}

impl ConsumerBlock {
    pub(crate) fn new(range: Range, consumer_group_id: TextChunk, properties: Vec<Property>) -> Self {
        Self {
            range,
            consumer_group_id,
            properties,
        }
    }

    pub fn range(&self) -> Range {
        self.range
    }

    /// The trimmed remainder of the header line; may be empty.
    pub fn consumer_group_id(&self) -> &TextChunk {
        &self.consumer_group_id
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn get_property(&self, name: &str) -> Option<&Property> {
        find_property(&self.properties, name)
    }

    pub fn get_property_value(&self, name: &str) -> Option<&str> {
        self.get_property(name)?.property_value()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Block {
    Producer(ProducerBlock),
    Consumer(ConsumerBlock),
}

impl Block {
    pub fn block_type(&self) -> BlockType {
        match self {
            Block::Producer(_) => BlockType::Producer,
            Block::Consumer(_) => BlockType::Consumer,
        }
    }

    pub fn range(&self) -> Range {
        match self {
            Block::Producer(b) => b.range(),
            Block::Consumer(b) => b.range(),
        }
    }

    pub fn start(&self) -> Position {
        self.range().start
    }

    pub fn end(&self) -> Position {
        self.range().end
    }

    pub fn properties(&self) -> &[Property] {
        match self {
            Block::Producer(b) => b.properties(),
            Block::Consumer(b) => b.properties(),
        }
    }

    /// First property whose trimmed key equals `name`.
    pub fn get_property(&self, name: &str) -> Option<&Property> {
        find_property(self.properties(), name)
    }

    pub fn get_property_value(&self, name: &str) -> Option<&str> {
        self.get_property(name)?.property_value()
    }
}

fn find_property<'a>(properties: &'a [Property], name: &str) -> Option<&'a Property> {
    properties
        .iter()
        .find(|p| p.property_name() == Some(name))
}
