//! Discovery of `{{ ... }}` expressions inside dynamic chunks.

pub mod cursor;
pub mod scanner;

pub use scanner::{MustacheScan, scan_expressions};
