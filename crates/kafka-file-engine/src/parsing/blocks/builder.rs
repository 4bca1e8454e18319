use crate::parsing::ast::BlockType;

use super::classify::LineClass;

/// Where the builder is relative to blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    Outside,
    Inside { block_type: BlockType, start_line: usize },
}

/// Inclusive line span of one block, header included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpan {
    pub block_type: BlockType,
    pub start_line: usize,
    pub end_line: usize,
}

/// Advances the block state machine by one line.
///
/// A producer block ends at a separator. A consumer block ends at a separator
/// or at any block opener, and that opener line starts the next block.
///
/// This holds for `PRODUCER` openers too: ending a consumer block on one does
/// not fall back to [`BlockState::Outside`], which would drop the producer
/// and every line up to the next opener.
pub fn step(state: BlockState, c: &LineClass) -> (BlockState, Option<BlockSpan>) {
    match state {
        BlockState::Outside => match c.opener {
            Some(block_type) => (
                BlockState::Inside {
                    block_type,
                    start_line: c.line,
                },
                None,
            ),
            None => (state, None),
        },
        BlockState::Inside {
            block_type,
            start_line,
        } => {
            let ends = c.is_separator
                || (block_type == BlockType::Consumer && c.opener.is_some());
            if !ends {
                return (state, None);
            }
            let span = BlockSpan {
                block_type,
                start_line,
                end_line: c.line.saturating_sub(1).max(start_line),
            };
            let next = match c.opener {
                Some(block_type) => BlockState::Inside {
                    block_type,
                    start_line: c.line,
                },
                None => BlockState::Outside,
            };
            (next, Some(span))
        }
    }
}

/// Closes a block still open at end of input.
pub fn finish(state: BlockState, last_line: usize) -> Option<BlockSpan> {
    match state {
        BlockState::Outside => None,
        BlockState::Inside {
            block_type,
            start_line,
        } => Some(BlockSpan {
            block_type,
            start_line,
            end_line: last_line.max(start_line),
        }),
    }
}

/// Collects block spans from classified lines.
pub struct BlockBuilder {
    state: BlockState,
    last_line: Option<usize>,
    out: Vec<BlockSpan>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            state: BlockState::Outside,
            last_line: None,
            out: vec![],
        }
    }

    pub fn push(&mut self, c: &LineClass) {
        let (state, closed) = step(self.state, c);
        self.state = state;
        self.last_line = Some(c.line);
        self.out.extend(closed);
    }

    pub fn finish(mut self) -> Vec<BlockSpan> {
        // EOF flush
        if let Some(last_line) = self.last_line {
            self.out.extend(finish(self.state, last_line));
        }
        self.out
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}
