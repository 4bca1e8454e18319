//! Line-level `key: value` splitting.

pub mod parser;

pub use parser::{ASSIGNER, DYNAMIC_KEY_NAME, parse_property, property_name_of};
