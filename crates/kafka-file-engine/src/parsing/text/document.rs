use std::fmt;

use xi_rope::Rope;

use super::position::{Position, Range};

/// Language id reported by documents read from `.kafka` files.
pub const KAFKA_LANGUAGE_ID: &str = "kafka";

/// One line of a text document, without its line terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub text: String,
    /// Range of the line content; `range.end` sits before the terminator.
    pub range: Range,
}

/// The read-only view of an editor document that the parser and the cache consume.
pub trait TextDocument {
    /// Stable identity of the document (its URI).
    fn uri(&self) -> &str;
    /// Content version, bumped by the host on every edit.
    fn version(&self) -> i64;
    fn language_id(&self) -> &str;
    fn line_count(&self) -> usize;
    /// Returns `None` when `line >= line_count()`.
    fn line_at(&self, line: usize) -> Option<TextLine>;
    /// Raw text covered by `range`, line terminators included.
    fn get_text(&self, range: Range) -> String;
}

/// Byte offsets of one line in the rope.
#[derive(Debug, Clone, Copy)]
struct LineSpan {
    start: usize,
    /// End of the content, before `\r\n` or `\n`.
    content_end: usize,
}

/// A [`TextDocument`] stored in an `xi_rope::Rope`.
///
/// Follows the editor convention for line counting: empty text has one empty
/// line, and text ending with a newline has a trailing empty line.
#[derive(Clone)]
pub struct RopeDocument {
    uri: String,
    version: i64,
    language_id: String,
    buffer: Rope,
    lines: Vec<LineSpan>,
}

impl RopeDocument {
    pub fn new(uri: impl Into<String>, version: i64, language_id: impl Into<String>, text: &str) -> Self {
        let buffer = Rope::from(text);
        let lines = line_spans(&buffer);
        Self {
            uri: uri.into(),
            version,
            language_id: language_id.into(),
            buffer,
            lines,
        }
    }

    /// A kafka-file document at version 1.
    pub fn kafka(uri: impl Into<String>, text: &str) -> Self {
        Self::new(uri, 1, KAFKA_LANGUAGE_ID, text)
    }

    /// Replaces the whole content and bumps the version.
    pub fn set_text(&mut self, text: &str) {
        self.buffer = Rope::from(text);
        self.lines = line_spans(&self.buffer);
        self.version += 1;
    }

    /// Returns a copy of this document reporting a different version.
    #[must_use]
    pub fn with_version(&self, version: i64) -> Self {
        Self {
            version,
            ..self.clone()
        }
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// Converts a position into a byte offset, clamping to the line content.
    pub fn offset_at(&self, pos: Position) -> usize {
        let Some(span) = self.lines.get(pos.line) else {
            return self.buffer.len();
        };
        let content = self.buffer.slice_to_cow(span.start..span.content_end);
        let within = content
            .char_indices()
            .nth(pos.character)
            .map(|(i, _)| i)
            .unwrap_or(content.len());
        span.start + within
    }
}

impl fmt::Debug for RopeDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RopeDocument")
            .field("uri", &self.uri)
            .field("version", &self.version)
            .field("language_id", &self.language_id)
            .field("lines", &self.lines.len())
            .finish()
    }
}

impl TextDocument for RopeDocument {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn language_id(&self) -> &str {
        &self.language_id
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_at(&self, line: usize) -> Option<TextLine> {
        let span = self.lines.get(line)?;
        let text = self
            .buffer
            .slice_to_cow(span.start..span.content_end)
            .into_owned();
        let range = Range::on_line(line, 0, text.chars().count());
        Some(TextLine { text, range })
    }

    fn get_text(&self, range: Range) -> String {
        let start = self.offset_at(range.start);
        let end = self.offset_at(range.end).max(start);
        self.buffer.slice_to_cow(start..end).into_owned()
    }
}

/// Splits the rope into lines using `lines_raw`, which keeps terminators so
/// byte offsets stay exact.
fn line_spans(rope: &Rope) -> Vec<LineSpan> {
    let mut out = Vec::new();
    let mut offset = 0usize;
    let mut ends_with_newline = true;
    for line in rope.lines_raw(..) {
        let start = offset;
        offset += line.len();
        let content = match line.strip_suffix('\n') {
            Some(rest) => rest.strip_suffix('\r').unwrap_or(rest),
            None => &line,
        };
        ends_with_newline = line.ends_with('\n');
        out.push(LineSpan {
            start,
            content_end: start + content.len(),
        });
    }
    if ends_with_newline {
        out.push(LineSpan {
            start: offset,
            content_end: offset,
        });
    }
    out
}
