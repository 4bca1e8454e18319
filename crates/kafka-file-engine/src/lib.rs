pub mod cache;
pub mod commands;
pub mod io;
pub mod model;
pub mod parsing;


// Re-export key types for easier usage
pub use cache::{CacheOptions, DocumentCache, LanguageModelCache};
pub use commands::{BlockCommand, LaunchConsumerCommand, ProduceRecordCommand};
pub use io::{IoError, read_document, scan_kafka_files};
pub use model::{PropertyCatalog, PropertyDefinition};
pub use parsing::ast::{
    Block, BlockType, Chunk, ChunkKind, ConsumerBlock, DynamicChunk, KafkaFileDocument,
    MustacheExpression, Node, NodeKind, NodePath, ProducerBlock, Property, TextChunk,
};
pub use parsing::parse_kafka_file;
pub use parsing::text::{Position, Range, RopeDocument, TextDocument, TextLine};
