use serde::Serialize;

use crate::parsing::text::{Position, Range};

/// The role a chunk plays inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChunkKind {
    PropertyKey,
    PropertyValue,
    ProducerValue,
    ConsumerGroupId,
}

/// A leaf text span with its position range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextChunk {
    content: String,
    range: Range,
    kind: ChunkKind,
}

impl TextChunk {
    pub(crate) fn new(content: impl Into<String>, range: Range, kind: ChunkKind) -> Self {
        Self {
            content: content.into(),
            range,
            kind,
        }
    }

    /// Raw text, surrounding whitespace preserved.
    pub fn content(&self) -> &str {
        &self.content
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

    pub fn kind(&self) -> ChunkKind {
        self.kind
    }
}

/// A `{{ ... }}` expression embedded in a dynamic chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MustacheExpression {
    range: Range,
    expression_range: Range,
    opened: bool,
    closed: bool,
}

impl MustacheExpression {
    pub(crate) fn new(range: Range, expression_range: Range, opened: bool, closed: bool) -> Self {
        Self {
            range,
            expression_range,
            opened,
            closed,
        }
    }

    /// Full range, delimiters included.
    pub fn range(&self) -> Range {
        self.range
    }

    /// Inner range, excluding the `{{` and `}}` delimiters.
    pub fn expression_range(&self) -> Range {
        self.expression_range
    }

    pub fn opened(&self) -> bool {
        self.opened
    }

    pub fn closed(&self) -> bool {
        self.closed
    }

    pub fn start(&self) -> Position {
        self.range.start
    }

    pub fn end(&self) -> Position {
        self.range.end
    }
}

/// A chunk whose content may embed mustache expressions.
///
/// Expressions are discovered once, when the chunk is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DynamicChunk {
    chunk: TextChunk,
    expressions: Vec<MustacheExpression>,
    unclosed_expression: Option<MustacheExpression>,
}

impl DynamicChunk {
    pub(crate) fn new(content: impl Into<String>, range: Range, kind: ChunkKind) -> Self {
        let chunk = TextChunk::new(content, range, kind);
        let scan = crate::parsing::mustache::scan_expressions(chunk.content(), chunk.start());
        Self {
            chunk,
            expressions: scan.expressions,
            unclosed_expression: scan.unclosed,
        }
    }

    pub fn content(&self) -> &str {
        self.chunk.content()
    }

    pub fn range(&self) -> Range {
        self.chunk.range()
    }

    pub fn start(&self) -> Position {
        self.chunk.start()
    }

    pub fn end(&self) -> Position {
        self.chunk.end()
    }

    pub fn kind(&self) -> ChunkKind {
        self.chunk.kind()
    }

    /// Closed expressions in source order.
    pub fn expressions(&self) -> &[MustacheExpression] {
        &self.expressions
    }

    /// A trailing `{{` that never closed before the end of the chunk.
    ///
    /// Not a child node: only closed expressions are children.
    pub fn unclosed_expression(&self) -> Option<&MustacheExpression> {
        self.unclosed_expression.as_ref()
    }

    pub fn as_text(&self) -> &TextChunk {
        &self.chunk
    }
}

/// A property value: literal text, or dynamic text eligible for expressions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Chunk {
    Literal(TextChunk),
    Dynamic(DynamicChunk),
}

impl Chunk {
    pub fn content(&self) -> &str {
        match self {
            Chunk::Literal(c) => c.content(),
            Chunk::Dynamic(c) => c.content(),
        }
    }

    pub fn range(&self) -> Range {
        match self {
            Chunk::Literal(c) => c.range(),
            Chunk::Dynamic(c) => c.range(),
        }
    }

    pub fn start(&self) -> Position {
        self.range().start
    }

    pub fn end(&self) -> Position {
        self.range().end
    }

    pub fn kind(&self) -> ChunkKind {
        match self {
            Chunk::Literal(c) => c.kind(),
            Chunk::Dynamic(c) => c.kind(),
        }
    }

    /// Embedded expressions; always empty for literal chunks.
    pub fn expressions(&self) -> &[MustacheExpression] {
        match self {
            Chunk::Literal(_) => &[],
            Chunk::Dynamic(c) => c.expressions(),
        }
    }

    pub fn as_dynamic(&self) -> Option<&DynamicChunk> {
        match self {
            Chunk::Literal(_) => None,
            Chunk::Dynamic(c) => Some(c),
        }
    }
}
