pub mod ast;
pub mod blocks;
pub mod mustache;
pub mod property;
pub mod snapshot;
pub mod text;

#[cfg(test)]
mod tests;

use log::trace;

use crate::model::PropertyCatalog;

use ast::{Block, BlockType, KafkaFileDocument};
use blocks::{BlockBuilder, BlockSpan, KafkaLineClassifier, LineClass, parse_consumer, parse_producer};
use text::{Position, Range, TextDocument};

/// Parses a whole document into its tree.
///
/// Total: every input yields a document, malformed lines become partial nodes.
pub fn parse_kafka_file(doc: &dyn TextDocument, catalog: &PropertyCatalog) -> KafkaFileDocument {
    let classifier = KafkaLineClassifier;
    let mut builder = BlockBuilder::new();
    let mut lines = Vec::with_capacity(doc.line_count());

    for line in 0..doc.line_count() {
        let Some(tl) = doc.line_at(line) else {
            break;
        };
        let lc = classifier.classify(line, tl);
        builder.push(&lc);
        lines.push(lc);
    }

    let blocks: Vec<Block> = builder
        .finish()
        .into_iter()
        .map(|span| build_block(doc, &lines, span, catalog))
        .collect();

    trace!(
        "parsed {} (v{}): {} lines, {} blocks",
        doc.uri(),
        doc.version(),
        lines.len(),
        blocks.len()
    );

    KafkaFileDocument::new(document_range(&lines), blocks)
}

fn build_block(
    doc: &dyn TextDocument,
    lines: &[LineClass],
    span: BlockSpan,
    catalog: &PropertyCatalog,
) -> Block {
    let block_lines = &lines[span.start_line..=span.end_line];
    let range = Range::new(
        Position::new(span.start_line, 0),
        lines[span.end_line].range.end,
    );
    match span.block_type {
        BlockType::Producer => Block::Producer(parse_producer(doc, block_lines, range, catalog)),
        BlockType::Consumer => Block::Consumer(parse_consumer(block_lines, range)),
    }
}

fn document_range(lines: &[LineClass]) -> Range {
    let end = lines.last().map(|c| c.range.end).unwrap_or_default();
    Range::new(Position::default(), end)
}
