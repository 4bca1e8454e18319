//! # Snapshot Testing Support
//!
//! Utilities for testing the parser via snapshot assertions and invariant checks.
//!
//! - **`outline`**: renders a parsed tree as an indented, stable text outline,
//!   one node per line, for `insta` snapshots and the CLI
//! - **`invariants`**: runtime checks that child ranges are ordered, disjoint
//!   and contained in their parents

pub mod invariants;
pub mod outline;

pub use invariants::check as invariants;
pub use outline::render;
