pub mod document;
pub mod position;

pub use document::{KAFKA_LANGUAGE_ID, RopeDocument, TextDocument, TextLine};
pub use position::{Position, Range};
