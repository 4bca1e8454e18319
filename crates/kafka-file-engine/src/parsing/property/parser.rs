use crate::parsing::ast::{Chunk, ChunkKind, DynamicChunk, Property, TextChunk};
use crate::parsing::text::Range;

/// Separator between a property key and its value.
pub const ASSIGNER: char = ':';

/// Name of the property whose value may embed mustache expressions.
pub const DYNAMIC_KEY_NAME: &str = "key";

/// Scanner state threaded through one line.
#[derive(Debug, Clone, Default)]
struct PropertyScan {
    /// Character where the current chunk began.
    start: Option<usize>,
    /// Set once the first `:` has been seen.
    within_value: bool,
    key: Option<TextChunk>,
    assigner_character: Option<usize>,
}

impl PropertyScan {
    fn step(mut self, chars: &[char], line: usize, i: usize, c: char) -> Self {
        match c {
            ' ' | '\t' if self.start.is_none() => {}
            ASSIGNER if !self.within_value => {
                if let Some(start) = self.start {
                    self.key = Some(chunk(chars, line, start, i, ChunkKind::PropertyKey));
                }
                self.assigner_character = Some(i);
                self.within_value = true;
                self.start = Some(i + 1);
            }
            _ => {
                if self.start.is_none() {
                    self.start = Some(i);
                }
            }
        }
        self
    }

    fn finish(mut self, chars: &[char], line: usize) -> Property {
        let end = chars.len();
        let mut value = None;
        if let Some(start) = self.start {
            if self.within_value {
                let is_dynamic = self
                    .key
                    .as_ref()
                    .is_some_and(|k| k.content().trim() == DYNAMIC_KEY_NAME);
                let text = chunk(chars, line, start, end, ChunkKind::PropertyValue);
                value = Some(if is_dynamic {
                    Chunk::Dynamic(DynamicChunk::new(text.content(), text.range(), text.kind()))
                } else {
                    Chunk::Literal(text)
                });
            } else {
                self.key = Some(chunk(chars, line, start, end, ChunkKind::PropertyKey));
            }
        }
        Property::new(
            self.key,
            self.assigner_character,
            value,
            Range::on_line(line, 0, end),
        )
    }
}

fn chunk(chars: &[char], line: usize, start: usize, end: usize, kind: ChunkKind) -> TextChunk {
    let content: String = chars[start..end].iter().collect();
    TextChunk::new(content, Range::on_line(line, start, end), kind)
}

/// Splits one property line into key, assigner and value.
///
/// Never fails: a line without `:` yields a key-only property, and a blank
/// line yields a property with neither key nor value.
pub fn parse_property(text: &str, line: usize) -> Property {
    let chars: Vec<char> = text.chars().collect();
    chars
        .iter()
        .enumerate()
        .fold(PropertyScan::default(), |scan, (i, &c)| {
            scan.step(&chars, line, i, c)
        })
        .finish(&chars, line)
}

/// Text before the first `:`, trimmed; `None` when the line has no assigner.
pub fn property_name_of(text: &str) -> Option<&str> {
    text.split_once(ASSIGNER).map(|(name, _)| name.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::text::Position;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn splits_key_and_value() {
        let p = parse_property("topic:  abcd  ", 3);
        assert_eq!(p.property_name(), Some("topic"));
        assert_eq!(p.property_value(), Some("abcd"));
        assert_eq!(p.value().unwrap().content(), "  abcd  ");
        assert_eq!(p.assigner_character(), Some(5));
        assert_eq!(p.key().unwrap().range(), Range::on_line(3, 0, 5));
        assert_eq!(p.value().unwrap().range(), Range::on_line(3, 6, 14));
        assert_eq!(p.range(), Range::on_line(3, 0, 14));
    }

    #[test]
    fn leading_whitespace_is_skipped() {
        let p = parse_property("   topic : a", 0);
        assert_eq!(p.key().unwrap().content(), "topic ");
        assert_eq!(p.key().unwrap().start(), Position::new(0, 3));
        assert_eq!(p.assigner_character(), Some(9));
    }

    #[test]
    fn missing_assigner_yields_key_only() {
        let p = parse_property("topic abcd", 1);
        assert_eq!(p.property_name(), Some("topic abcd"));
        assert_eq!(p.assigner_character(), None);
        assert!(p.value().is_none());
        assert_eq!(p.range(), Range::on_line(1, 0, 10));
    }

    #[test]
    fn colons_after_the_first_belong_to_the_value() {
        let p = parse_property("headers: a=b:c", 0);
        assert_eq!(p.property_value(), Some("a=b:c"));
        assert_eq!(p.assigner_character(), Some(7));
    }

    #[test]
    fn missing_key() {
        let p = parse_property(": value", 2);
        assert!(p.key().is_none());
        assert_eq!(p.assigner_character(), Some(0));
        assert_eq!(p.property_value(), Some("value"));
        assert_eq!(p.range(), Range::on_line(2, 1, 7));
    }

    #[test]
    fn empty_value_after_assigner() {
        let p = parse_property("topic:", 0);
        assert_eq!(p.property_value(), Some(""));
        assert_eq!(p.value().unwrap().range(), Range::on_line(0, 6, 6));
    }

    #[test]
    fn key_value_is_dynamic() {
        let p = parse_property("key: id-{{$random.uuid}}", 4);
        let value = p.value().unwrap().as_dynamic().unwrap();
        assert_eq!(value.expressions().len(), 1);
        assert_eq!(value.expressions()[0].range(), Range::on_line(4, 8, 24));
    }

    #[rstest]
    #[case("topic: {{x}}")]
    #[case("keys: {{x}}")]
    #[case("key-format: {{x}}")]
    fn other_values_are_literal(#[case] line: &str) {
        let p = parse_property(line, 0);
        assert!(p.value().unwrap().as_dynamic().is_none());
        assert!(p.value().unwrap().expressions().is_empty());
    }

    #[rstest]
    #[case("topic: a", Some("topic"))]
    #[case("  key-format :json", Some("key-format"))]
    #[case("no assigner", None)]
    #[case("{\"a\": 1}", Some("{\"a\""))]
    fn property_name_before_first_assigner(#[case] line: &str, #[case] expected: Option<&str>) {
        assert_eq!(property_name_of(line), expected);
    }

    #[test]
    fn characters_not_bytes() {
        let p = parse_property("clé: välue", 0);
        assert_eq!(p.assigner_character(), Some(3));
        assert_eq!(p.value().unwrap().range(), Range::on_line(0, 4, 10));
    }
}
