//! # Block Parsing
//!
//! Two phases, as for any line-oriented format:
//!
//! 1. **Line Classification** (`classify`): each line becomes a `LineClass`
//!    holding local facts (blank, comment, separator, block opener).
//! 2. **Block Construction** (`builder`): a state machine folds the classified
//!    lines into inclusive `BlockSpan`s.
//!
//! Each span is then handed to the `producer` or `consumer` sub-parser.

pub mod builder;
pub mod classify;
pub mod consumer;
pub mod producer;

pub use builder::{BlockBuilder, BlockSpan, BlockState};
pub use classify::{KafkaLineClassifier, LineClass};
pub use consumer::parse_consumer;
pub use producer::parse_producer;
