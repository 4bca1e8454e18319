//! Immutable node model of a parsed kafka file.

pub mod block;
pub mod chunk;
pub mod document;
pub mod node;
pub mod property;

pub use block::{Block, BlockType, ConsumerBlock, ProducerBlock};
pub use chunk::{Chunk, ChunkKind, DynamicChunk, MustacheExpression, TextChunk};
pub use document::KafkaFileDocument;
pub use node::{Node, NodeKind, NodePath};
pub use property::Property;
