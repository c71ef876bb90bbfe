//! Pattern matching for TRON addresses.
//!
//! Supports multiple matching strategies:
//! - Prefix / suffix: exact text at either end of the address
//! - Repeated suffix: a run of one character at the tail
//! - Similarity: cosine score against a reference address
//! - Unconditional: every address qualifies (batch generation)
//! - Never: no address qualifies (throughput benchmark)

mod pattern;
pub mod similarity;

pub use pattern::{MatchResult, Pattern};
