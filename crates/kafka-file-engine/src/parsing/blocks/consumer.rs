use crate::parsing::ast::{BlockType, ChunkKind, ConsumerBlock, TextChunk};
use crate::parsing::property::parse_property;
use crate::parsing::text::Range;

use super::classify::LineClass;

/// Builds a consumer block from its lines, header first.
///
/// Every non-ignored line after the header is a property, known or not.
pub fn parse_consumer(lines: &[LineClass], range: Range) -> ConsumerBlock {
    let consumer_group_id = match lines.first() {
        Some(header) => group_id(header),
        None => TextChunk::new("", Range::new(range.start, range.start), ChunkKind::ConsumerGroupId),
    };
    let properties = lines
        .iter()
        .skip(1)
        .filter(|c| !c.is_ignored())
        .map(|c| parse_property(&c.text, c.line))
        .collect();
    ConsumerBlock::new(range, consumer_group_id, properties)
}

/// The header text after `CONSUMER`, trimmed, with its exact range.
fn group_id(header: &LineClass) -> TextChunk {
    let keyword = BlockType::CONSUMER_KEYWORD;
    let rest = header.text.get(keyword.len()..).unwrap_or_default();
    let leading = rest.chars().take_while(|c| c.is_whitespace()).count();
    let content = rest.trim();
    let start = keyword.chars().count() + leading;
    let end = start + content.chars().count();
    TextChunk::new(
        content,
        Range::on_line(header.line, start, end),
        ChunkKind::ConsumerGroupId,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::blocks::classify::KafkaLineClassifier;
    use crate::parsing::text::TextLine;
    use pretty_assertions::assert_eq;

    fn header(text: &str) -> LineClass {
        let tl = TextLine {
            text: text.to_string(),
            range: Range::on_line(2, 0, text.chars().count()),
        };
        KafkaLineClassifier.classify(2, tl)
    }

    #[test]
    fn group_id_spans_trimmed_text() {
        let chunk = group_id(&header("CONSUMER   group-a  "));
        assert_eq!(chunk.content(), "group-a");
        assert_eq!(chunk.range(), Range::on_line(2, 11, 18));
    }

    #[test]
    fn missing_group_id_is_empty_after_whitespace() {
        let chunk = group_id(&header("CONSUMER  "));
        assert_eq!(chunk.content(), "");
        assert_eq!(chunk.range(), Range::on_line(2, 10, 10));
    }

    #[test]
    fn bare_keyword() {
        let chunk = group_id(&header("CONSUMER"));
        assert_eq!(chunk.range(), Range::on_line(2, 8, 8));
    }
}
