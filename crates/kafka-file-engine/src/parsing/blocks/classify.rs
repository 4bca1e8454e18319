use crate::parsing::ast::BlockType;
use crate::parsing::text::{Range, TextLine};

/// Prefix of a line that separates blocks.
pub const SEPARATOR_PREFIX: &str = "###";
/// Prefix of a comment line.
pub const COMMENT_PREFIX: &str = "--";

/// Classification of a single line containing only local facts.
///
/// Each line is classified independently; the builder decides what the
/// facts mean given the current block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClass {
    /// Zero-based line number.
    pub line: usize,
    pub text: String,
    /// Range of the line content, terminator excluded.
    pub range: Range,
    pub is_blank: bool,
    pub is_comment: bool,
    /// `###` at column 0.
    pub is_separator: bool,
    /// `PRODUCER` or `CONSUMER` at column 0.
    pub opener: Option<BlockType>,
}

impl LineClass {
    /// Blank and comment lines carry nothing inside a block.
    pub fn is_ignored(&self) -> bool {
        self.is_blank || self.is_comment
    }
}

/// Classifies individual lines for the block parsing phase.
pub struct KafkaLineClassifier;

impl KafkaLineClassifier {
    pub fn classify(&self, line: usize, tl: TextLine) -> LineClass {
        let trimmed = tl.text.trim_start();
        LineClass {
            line,
            is_blank: trimmed.is_empty(),
            is_comment: trimmed.starts_with(COMMENT_PREFIX),
            is_separator: tl.text.starts_with(SEPARATOR_PREFIX),
            opener: BlockType::of_line(&tl.text),
            range: tl.range,
            text: tl.text,
        }
    }
}
