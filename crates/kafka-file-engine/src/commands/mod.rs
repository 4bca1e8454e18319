//! Parameter objects assembled from parsed blocks.
//!
//! These only read the tree through `get_property_value`; sending records or
//! starting consumers is left to whatever client receives them.

use serde::Serialize;

use crate::parsing::ast::{Block, ConsumerBlock, ProducerBlock};

/// Everything needed to send one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProduceRecordCommand {
    pub topic: Option<String>,
    pub key: Option<String>,
    pub value: Option<String>,
    pub key_format: Option<String>,
    pub value_format: Option<String>,
    /// `name=value` pairs in source order.
    pub headers: Vec<(String, String)>,
    /// Raw repeat interval, e.g. `5s`.
    pub every: Option<String>,
}

impl ProduceRecordCommand {
    pub fn from_block(block: &ProducerBlock) -> Self {
        let text = |name: &str| non_empty(block.get_property_value(name));
        Self {
            topic: text("topic"),
            key: text("key"),
            value: block.value().map(|v| v.content().to_string()),
            key_format: text("key-format"),
            value_format: text("value-format"),
            headers: block
                .get_property_value("headers")
                .map(parse_headers)
                .unwrap_or_default(),
            every: text("every"),
        }
    }
}

/// Everything needed to start one consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchConsumerCommand {
    pub consumer_group_id: String,
    pub topic: Option<String>,
    pub from_offset: Option<String>,
    /// Sorted and de-duplicated; empty means every partition.
    pub partitions: Vec<u32>,
    pub key_format: Option<String>,
    pub value_format: Option<String>,
}

impl LaunchConsumerCommand {
    pub fn from_block(block: &ConsumerBlock) -> Self {
        let text = |name: &str| non_empty(block.get_property_value(name));
        Self {
            consumer_group_id: block.consumer_group_id().content().to_string(),
            topic: text("topic"),
            from_offset: text("from"),
            partitions: block
                .get_property_value("partitions")
                .map(parse_partitions)
                .unwrap_or_default(),
            key_format: text("key-format"),
            value_format: text("value-format"),
        }
    }
}

/// A command for either kind of block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum BlockCommand {
    ProduceRecord(ProduceRecordCommand),
    LaunchConsumer(LaunchConsumerCommand),
}

impl From<&Block> for BlockCommand {
    fn from(block: &Block) -> Self {
        match block {
            Block::Producer(b) => BlockCommand::ProduceRecord(ProduceRecordCommand::from_block(b)),
            Block::Consumer(b) => BlockCommand::LaunchConsumer(LaunchConsumerCommand::from_block(b)),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Parses `k1=v1,k2=v2`. Pairs without `=` or with an empty name are skipped.
pub fn parse_headers(text: &str) -> Vec<(String, String)> {
    text.split(',')
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            let name = name.trim();
            (!name.is_empty()).then(|| (name.to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Widest `from-to` range [`parse_partitions`] expands.
pub const MAX_PARTITION_SPAN: u32 = 4096;

/// Parses `0,2-4` into `[0, 2, 3, 4]`. Invalid parts, and ranges covering
/// more than [`MAX_PARTITION_SPAN`] partitions, are ignored.
pub fn parse_partitions(text: &str) -> Vec<u32> {
    let mut partitions: Vec<u32> = text
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .flat_map(|part| match part.split_once('-') {
            Some((from, to)) => match (from.trim().parse::<u32>(), to.trim().parse::<u32>()) {
                (Ok(from), Ok(to)) if from <= to && to - from < MAX_PARTITION_SPAN => {
                    (from..=to).collect()
                }
                _ => Vec::new(),
            },
            None => part.parse::<u32>().map(|p| vec![p]).unwrap_or_default(),
        })
        .collect();
    partitions.sort_unstable();
    partitions.dedup();
    partitions
}
