use crate::model::PropertyCatalog;
use crate::parsing::ast::{BlockType, ChunkKind, DynamicChunk, ProducerBlock};
use crate::parsing::mustache::cursor::Cursor;
use crate::parsing::property::{parse_property, property_name_of};
use crate::parsing::text::{Position, Range, TextDocument};

use super::classify::LineClass;

/// Builds a producer block from its lines, header first.
///
/// Recognized property lines come first; the first line that is neither
/// ignored nor a recognized property starts the value, which runs to the end
/// of the block. Later lines are never read as properties.
pub fn parse_producer(
    doc: &dyn TextDocument,
    lines: &[LineClass],
    range: Range,
    catalog: &PropertyCatalog,
) -> ProducerBlock {
    let mut properties = Vec::new();
    let mut value = None;

    for c in lines.iter().skip(1) {
        if c.is_ignored() {
            continue;
        }
        let known = property_name_of(&c.text)
            .is_some_and(|name| catalog.is_known(BlockType::Producer, name));
        if known {
            properties.push(parse_property(&c.text, c.line));
            continue;
        }
        let origin = Position::new(c.line, 0);
        let raw = doc.get_text(Range::new(origin, range.end));
        value = trimmed_value(&raw, origin);
        break;
    }

    ProducerBlock::new(range, properties, value)
}

/// Trims `raw` and anchors the remaining text at its real position.
fn trimmed_value(raw: &str, origin: Position) -> Option<DynamicChunk> {
    let content = raw.trim();
    if content.is_empty() {
        return None;
    }
    let leading = raw.len() - raw.trim_start().len();
    let mut cur = Cursor::new(raw, origin);
    while cur.i < leading {
        cur.bump();
    }
    let start = cur.pos();
    while cur.i < leading + content.len() {
        cur.bump();
    }
    Some(DynamicChunk::new(
        content,
        Range::new(start, cur.pos()),
        ChunkKind::ProducerValue,
    ))
}
