//! Pattern matching implementation.

use std::fmt;

use crate::crypto::Address;

use super::similarity;

/// Size of the base58 alphabet; each free character multiplies the search
/// space by this much.
const BASE58_RADIX: u64 = 58;

/// Result of a pattern match operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchResult {
    /// Full match found
    Match,
    /// Scored candidate; whether it is emitted depends on the running best
    Scored(f64),
    /// No match
    NoMatch,
}

impl MatchResult {
    #[inline]
    pub fn is_match(self) -> bool {
        !matches!(self, MatchResult::NoMatch)
    }

    #[inline]
    pub fn score(self) -> Option<f64> {
        match self {
            MatchResult::Scored(score) => Some(score),
            _ => None,
        }
    }
}

/// What a search is looking for in a derived address.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// Address starts with `prefix` and ends with `suffix`; an empty side is
    /// ignored.
    PrefixSuffix { prefix: String, suffix: String },
    /// The last `len` characters are one repeated character.
    RepeatedSuffix(usize),
    /// Cosine similarity against a reference address.
    Similarity { reference: String },
    /// Every address qualifies.
    Unconditional,
    /// No address qualifies; the throughput benchmark only counts attempts.
    Never,
}

impl Pattern {
    pub fn prefix_suffix(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Pattern::PrefixSuffix {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    pub fn similarity(reference: impl Into<String>) -> Self {
        Pattern::Similarity {
            reference: reference.into(),
        }
    }

    /// Matches an address against this pattern.
    #[inline]
    pub fn matches(&self, address: &Address) -> MatchResult {
        self.evaluate(address.as_str())
    }

    /// Matches a textual address against this pattern.
    pub fn evaluate(&self, text: &str) -> MatchResult {
        let matched = match self {
            Pattern::PrefixSuffix { prefix, suffix } => {
                text.starts_with(prefix.as_str()) && text.ends_with(suffix.as_str())
            }
            Pattern::RepeatedSuffix(len) => has_repeated_tail(text, *len),
            Pattern::Similarity { reference } => {
                return MatchResult::Scored(similarity::cosine(reference, text));
            }
            Pattern::Unconditional => true,
            Pattern::Never => false,
        };

        if matched {
            MatchResult::Match
        } else {
            MatchResult::NoMatch
        }
    }

    /// Returns the estimated number of attempts to find one match, or `None`
    /// when the pattern has no fixed target.
    ///
    /// Every address starts with `T`, so a leading `T` in the prefix is free.
    pub fn estimated_difficulty(&self) -> Option<u64> {
        let free_chars = match self {
            Pattern::PrefixSuffix { prefix, suffix } => {
                let free_prefix = prefix.strip_prefix('T').unwrap_or(prefix.as_str());
                free_prefix.chars().count() + suffix.chars().count()
            }
            Pattern::RepeatedSuffix(len) => len.saturating_sub(1),
            Pattern::Similarity { .. } | Pattern::Unconditional | Pattern::Never => {
                return None
            }
        };
        Some(BASE58_RADIX.saturating_pow(free_chars as u32))
    }

    /// Returns a human-readable difficulty estimate.
    pub fn difficulty_description(&self) -> String {
        match self.estimated_difficulty() {
            None => "Unbounded".into(),
            Some(0..=1_000) => "Very Easy (< 1 second)".into(),
            Some(1_001..=100_000) => "Easy (seconds)".into(),
            Some(100_001..=10_000_000) => "Medium (minutes)".into(),
            Some(10_000_001..=1_000_000_000) => "Hard (hours)".into(),
            Some(_) => "Very Hard (days or more)".into(),
        }
    }
}

/// True when the last `len` characters of `text` are all the same.
fn has_repeated_tail(text: &str, len: usize) -> bool {
    if len == 0 {
        return false;
    }
    let mut tail = text.chars().rev().take(len);
    let Some(last) = tail.next() else {
        return false;
    };
    let mut run = 1;
    for c in tail {
        if c != last {
            return false;
        }
        run += 1;
    }
    run == len
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::PrefixSuffix { prefix, suffix } => {
                match (prefix.is_empty(), suffix.is_empty()) {
                    (false, true) => write!(f, "prefix {}", prefix),
                    (true, false) => write!(f, "suffix {}", suffix),
                    _ => write!(f, "{} ... {}", prefix, suffix),
                }
            }
            Pattern::RepeatedSuffix(len) => write!(f, "{} repeated trailing characters", len),
            Pattern::Similarity { reference } => write!(f, "similar to {}", reference),
            Pattern::Unconditional => write!(f, "any address"),
            Pattern::Never => write!(f, "none (throughput only)"),
        }
    }
}
