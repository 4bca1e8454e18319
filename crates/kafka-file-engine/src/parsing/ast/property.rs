use serde::Serialize;

use crate::model::{PropertyCatalog, PropertyDefinition};
use crate::parsing::text::{Position, Range};

use super::block::BlockType;
use super::chunk::{Chunk, TextChunk};

/// A `key: value` line inside a block.
///
/// Either side may be missing while the user is typing; a property without
/// an assigner is how a missing `:` shows up in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    key: Option<TextChunk>,
    assigner_character: Option<usize>,
    value: Option<Chunk>,
    range: Range,
}

impl Property {
    /// `line_range` is used as the node range when neither key nor value exists.
    pub(crate) fn new(
        key: Option<TextChunk>,
        assigner_character: Option<usize>,
        value: Option<Chunk>,
        line_range: Range,
    ) -> Self {
        let start = key
            .as_ref()
            .map(TextChunk::start)
            .or_else(|| value.as_ref().map(Chunk::start));
        let end = value
            .as_ref()
            .map(Chunk::end)
            .or_else(|| key.as_ref().map(TextChunk::end));
        let range = match (start, end) {
            (Some(start), Some(end)) => Range::new(start, end),
            _ => line_range,
        };
        Self {
            key,
            assigner_character,
            value,
            range,
        }
    }

    pub fn key(&self) -> Option<&TextChunk> {
        self.key.as_ref()
    }

    pub fn value(&self) -> Option<&Chunk> {
        self.value.as_ref()
    }

    /// Character offset of the `:` within the source line.
    pub fn assigner_character(&self) -> Option<usize> {
        self.assigner_character
    }

    /// Trimmed key text.
    pub fn property_name(&self) -> Option<&str> {
        self.key.as_ref().map(|k| k.content().trim())
    }

    /// Trimmed value text.
    pub fn property_value(&self) -> Option<&str> {
        self.value.as_ref().map(|v| v.content().trim())
    }

    pub fn range(&self) -> Range {
        self.range
    }

    pub fn start(&self) -> Position {
        self.range.start
    }

    pub fn end(&self) -> Position {
        self.range.end
    }

    /// Range of the trimmed value, if any.
    pub fn property_value_range(&self) -> Option<Range> {
        let value = self.value.as_ref()?;
        let content = value.content();
        let leading = content.chars().take_while(|c| c.is_whitespace()).count();
        let trimmed = content.trim().chars().count();
        let start = value.start().translate(0, leading);
        Some(Range::new(start, start.translate(0, trimmed)))
    }

    /// Looks the key up in the catalog; `None` means an unknown property.
    pub fn definition<'c>(
        &self,
        catalog: &'c PropertyCatalog,
        block_type: BlockType,
    ) -> Option<&'c PropertyDefinition> {
        catalog.definition(block_type, self.property_name()?)
    }
}
