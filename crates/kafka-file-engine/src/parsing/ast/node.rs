use std::fmt;

use serde::Serialize;

use crate::parsing::text::{Position, Range};

use super::block::{Block, BlockType};
use super::chunk::{Chunk, ChunkKind, DynamicChunk, MustacheExpression, TextChunk};
use super::document::KafkaFileDocument;
use super::property::Property;

/// The closed set of node kinds in a parsed kafka file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    Document,
    ProducerBlock,
    ConsumerBlock,
    Property,
    PropertyKey,
    PropertyValue,
    ProducerValue,
    ConsumerGroupId,
    MustacheExpression,
}

impl From<ChunkKind> for NodeKind {
    fn from(kind: ChunkKind) -> Self {
        match kind {
            ChunkKind::PropertyKey => NodeKind::PropertyKey,
            ChunkKind::PropertyValue => NodeKind::PropertyValue,
            ChunkKind::ProducerValue => NodeKind::ProducerValue,
            ChunkKind::ConsumerGroupId => NodeKind::ConsumerGroupId,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Document => "Document",
            NodeKind::ProducerBlock => "ProducerBlock",
            NodeKind::ConsumerBlock => "ConsumerBlock",
            NodeKind::Property => "Property",
            NodeKind::PropertyKey => "PropertyKey",
            NodeKind::PropertyValue => "PropertyValue",
            NodeKind::ProducerValue => "ProducerValue",
            NodeKind::ConsumerGroupId => "ConsumerGroupId",
            NodeKind::MustacheExpression => "MustacheExpression",
        };
        f.write_str(name)
    }
}

/// Borrowed view over any node in the tree.
///
/// Children are owned by their containers; a `Node` never owns anything.
/// Equality is identity: two views are equal when they point at the same node.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Document(&'a KafkaFileDocument),
    Block(&'a Block),
    Property(&'a Property),
    Chunk(&'a TextChunk),
    DynamicChunk(&'a DynamicChunk),
    MustacheExpression(&'a MustacheExpression),
}

impl<'a> Node<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Document(_) => NodeKind::Document,
            Node::Block(b) => match b.block_type() {
                BlockType::Producer => NodeKind::ProducerBlock,
                BlockType::Consumer => NodeKind::ConsumerBlock,
            },
            Node::Property(_) => NodeKind::Property,
            Node::Chunk(c) => c.kind().into(),
            Node::DynamicChunk(c) => c.kind().into(),
            Node::MustacheExpression(_) => NodeKind::MustacheExpression,
        }
    }

    pub fn range(&self) -> Range {
        match self {
            Node::Document(d) => d.range(),
            Node::Block(b) => b.range(),
            Node::Property(p) => p.range(),
            Node::Chunk(c) => c.range(),
            Node::DynamicChunk(c) => c.range(),
            Node::MustacheExpression(e) => e.range(),
        }
    }

    pub fn start(&self) -> Position {
        self.range().start
    }

    pub fn end(&self) -> Position {
        self.range().end
    }

    /// Text content for leaf chunks.
    pub fn content(&self) -> Option<&'a str> {
        match *self {
            Node::Chunk(c) => Some(c.content()),
            Node::DynamicChunk(c) => Some(c.content()),
            _ => None,
        }
    }

    /// Children in document order.
    pub fn children(&self) -> Vec<Node<'a>> {
        match *self {
            Node::Document(d) => d.blocks().iter().map(Node::Block).collect(),
            Node::Block(Block::Producer(b)) => {
                let mut children: Vec<Node<'a>> =
                    b.properties().iter().map(Node::Property).collect();
                children.extend(b.value().map(Node::DynamicChunk));
                children
            }
            Node::Block(Block::Consumer(b)) => {
                std::iter::once(Node::Chunk(b.consumer_group_id()))
                    .chain(b.properties().iter().map(Node::Property))
                    .collect()
            }
            Node::Property(p) => p
                .key()
                .map(Node::Chunk)
                .into_iter()
                .chain(p.value().map(Node::from))
                .collect(),
            Node::DynamicChunk(c) => c.expressions().iter().map(Node::MustacheExpression).collect(),
            Node::Chunk(_) | Node::MustacheExpression(_) => Vec::new(),
        }
    }

    pub fn last_child(&self) -> Option<Node<'a>> {
        self.children().pop()
    }

    /// Innermost node enclosing or immediately preceding `pos`.
    ///
    /// Descends into the last child starting strictly before `pos` when `pos`
    /// lies inside it, or when that child's own last child reaches its end
    /// (so a cursor right after `key: value` still lands on the value).
    pub fn find_node_before(self, pos: Position) -> NodePath<'a> {
        let mut path = vec![self];
        let mut current = self;
        loop {
            let Some(child) = current
                .children()
                .into_iter()
                .take_while(|c| c.start() < pos)
                .last()
            else {
                break;
            };
            path.push(child);
            let descend = pos < child.end()
                || child
                    .last_child()
                    .is_some_and(|last| last.end() == child.end());
            if !descend {
                break;
            }
            current = child;
        }
        NodePath { nodes: path }
    }
}

impl<'a> From<&'a Chunk> for Node<'a> {
    fn from(chunk: &'a Chunk) -> Self {
        match chunk {
            Chunk::Literal(c) => Node::Chunk(c),
            Chunk::Dynamic(c) => Node::DynamicChunk(c),
        }
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Document(a), Node::Document(b)) => std::ptr::eq(*a, *b),
            (Node::Block(a), Node::Block(b)) => std::ptr::eq(*a, *b),
            (Node::Property(a), Node::Property(b)) => std::ptr::eq(*a, *b),
            (Node::Chunk(a), Node::Chunk(b)) => std::ptr::eq(*a, *b),
            (Node::DynamicChunk(a), Node::DynamicChunk(b)) => std::ptr::eq(*a, *b),
            (Node::MustacheExpression(a), Node::MustacheExpression(b)) => std::ptr::eq(*a, *b),
            _ => false,
        }
    }
}

impl Eq for Node<'_> {}

/// Result of [`Node::find_node_before`]: the found node plus its ancestry.
///
/// Stands in for parent back-references; the root is always first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePath<'a> {
    nodes: Vec<Node<'a>>,
}

impl<'a> NodePath<'a> {
    /// The innermost node found.
    pub fn node(&self) -> Node<'a> {
        // Never empty: the search root is pushed first.
        self.nodes[self.nodes.len() - 1]
    }

    pub fn kind(&self) -> NodeKind {
        self.node().kind()
    }

    pub fn parent(&self) -> Option<Node<'a>> {
        self.nodes.len().checked_sub(2).map(|i| self.nodes[i])
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = Node<'a>> + '_ {
        self.nodes.iter().rev().skip(1).copied()
    }

    /// Root-first path, the found node last.
    pub fn nodes(&self) -> &[Node<'a>] {
        &self.nodes
    }

    pub fn depth(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Nearest enclosing block, the node itself included.
    pub fn block(&self) -> Option<&'a Block> {
        self.nodes.iter().rev().find_map(|n| match *n {
            Node::Block(b) => Some(b),
            _ => None,
        })
    }

    /// Nearest enclosing property, the node itself included.
    pub fn property(&self) -> Option<&'a Property> {
        self.nodes.iter().rev().find_map(|n| match *n {
            Node::Property(p) => Some(p),
            _ => None,
        })
    }
}

impl fmt::Display for NodePath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str(" > ")?;
            }
            write!(f, "{} {}", node.kind(), node.range())?;
        }
        Ok(())
    }
}
