use serde::Serialize;

use crate::parsing::text::{Position, Range};

use super::block::Block;
use super::node::{Node, NodePath};

/// Root of a parsed kafka file.
///
/// Immutable once built; an edit produces a new document from a fresh parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KafkaFileDocument {
    range: Range,
    blocks: Vec<Block>,
}

impl KafkaFileDocument {
    pub(crate) fn new(range: Range, blocks: Vec<Block>) -> Self {
        Self { range, blocks }
    }

    /// Spans the whole text.
    pub fn range(&self) -> Range {
        self.range
    }

    pub fn start(&self) -> Position {
        self.range.start
    }

    pub fn end(&self) -> Position {
        self.range.end
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn as_node(&self) -> Node<'_> {
        Node::Document(self)
    }

    /// Innermost node enclosing or immediately preceding `pos`.
    pub fn find_node_before(&self, pos: Position) -> NodePath<'_> {
        self.as_node().find_node_before(pos)
    }

    /// The block whose lines contain `pos`.
    pub fn block_at(&self, pos: Position) -> Option<&Block> {
        self.blocks
            .iter()
            .find(|b| b.start() <= pos && pos <= b.end())
    }
}
