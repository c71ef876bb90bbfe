//! Runtime configuration for the vanity address generator.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

use crate::crypto::{Address, AddressError, ADDRESS_VERSION};
use crate::matcher::Pattern;
use crate::worker::{Limit, SearchGoal};

/// Characters a base58 address can contain.
const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Length of a textual TRON address.
const ADDRESS_TEXT_LEN: usize = 34;

/// What the tool should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Measure key generation throughput
    Bench,
    /// Search for a prefix and/or suffix
    Brute,
    /// Search for addresses similar to a reference address
    Similar,
    /// Write a batch of fresh addresses to a file
    Batch,
    /// Search for a run of one repeated character at the end
    Valuable,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1" | "bench" | "benchmark" => Ok(Mode::Bench),
            "2" | "brute" | "pattern" => Ok(Mode::Brute),
            "3" | "similar" | "similarity" => Ok(Mode::Similar),
            "4" | "batch" | "generate" => Ok(Mode::Batch),
            "5" | "valuable" | "repeat" => Ok(Mode::Valuable),
            _ => Err(format!("Unknown mode: {}", s)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Bench => write!(f, "throughput benchmark"),
            Mode::Brute => write!(f, "prefix/suffix search"),
            Mode::Similar => write!(f, "similarity search"),
            Mode::Batch => write!(f, "batch generation"),
            Mode::Valuable => write!(f, "repeated-suffix search"),
        }
    }
}

/// Offline TRON vanity address generator
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Mode: bench (1), brute (2), similar (3), batch (4), valuable (5)
    #[arg(short, long)]
    pub mode: Mode,

    /// Address prefix for brute mode (must start with T)
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Address suffix for brute mode
    #[arg(short, long)]
    pub suffix: Option<String>,

    /// Reference address for similar mode
    #[arg(short = 'a', long)]
    pub source: Option<String>,

    /// Output file for batch mode
    #[arg(short, long, default_value = "addresses.txt")]
    pub output: PathBuf,

    /// Number of addresses to find (brute, valuable) or generate (batch)
    #[arg(short = 'n', long, default_value = "1")]
    pub count: u64,

    /// Length of the repeated suffix for valuable mode
    #[arg(short, long, default_value = "5")]
    pub length: usize,

    /// Number of worker threads (default: number of CPU cores)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Progress report interval in seconds (0 disables reporting)
    #[arg(short = 't', long, default_value = "1")]
    pub interval: u64,

    /// Number of keys generated by bench mode
    #[arg(long, default_value = "10000000")]
    pub bench_count: u64,
}

impl Config {
    /// Returns the number of workers, defaulting to CPU count
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == Some(0) {
            return Err(ConfigError::InvalidWorkers);
        }

        match self.mode {
            Mode::Bench => {
                if self.bench_count == 0 {
                    return Err(ConfigError::InvalidCount);
                }
            }
            Mode::Brute => {
                let prefix = self.prefix();
                let suffix = self.suffix();

                if prefix.is_empty() && suffix.is_empty() {
                    return Err(ConfigError::MissingPattern);
                }
                if !prefix.is_empty() && !prefix.starts_with('T') {
                    return Err(ConfigError::InvalidPattern(
                        "Prefix must start with 'T'".into(),
                    ));
                }
                if let Some(c) = prefix.chars().chain(suffix.chars()).find(|c| !is_base58(*c)) {
                    return Err(ConfigError::InvalidPattern(format!(
                        "'{}' is not a base58 character",
                        c
                    )));
                }
                if prefix.len() + suffix.len() > ADDRESS_TEXT_LEN {
                    return Err(ConfigError::InvalidPattern(format!(
                        "Combined prefix + suffix cannot be longer than {} characters",
                        ADDRESS_TEXT_LEN
                    )));
                }
                if !prefix_reachable(prefix) {
                    return Err(ConfigError::InvalidPattern(format!(
                        "No address can start with '{}'",
                        prefix
                    )));
                }
                if self.count == 0 {
                    return Err(ConfigError::InvalidCount);
                }
            }
            Mode::Similar => {
                let source = self.source.as_deref().ok_or(ConfigError::MissingSource)?;
                Address::from_base58(source)?;
            }
            Mode::Batch => {
                if self.count == 0 {
                    return Err(ConfigError::InvalidCount);
                }
            }
            Mode::Valuable => {
                if self.length == 0 || self.length > ADDRESS_TEXT_LEN {
                    return Err(ConfigError::InvalidLength(self.length));
                }
                if self.count == 0 {
                    return Err(ConfigError::InvalidCount);
                }
            }
        }

        Ok(())
    }

    /// Validates the configuration and builds the search goal for the
    /// selected mode.
    pub fn search_goal(&self) -> Result<SearchGoal, ConfigError> {
        self.validate()?;

        let goal = match self.mode {
            Mode::Bench => {
                SearchGoal::new(Pattern::Never, Limit::Attempts(self.bench_count))
            }
            Mode::Brute => SearchGoal::new(
                Pattern::prefix_suffix(self.prefix(), self.suffix()),
                Limit::Matches(self.count),
            ),
            Mode::Similar => SearchGoal::new(
                Pattern::similarity(self.source.clone().unwrap_or_default()),
                Limit::Unbounded,
            ),
            Mode::Batch => SearchGoal::new(Pattern::Unconditional, Limit::Attempts(self.count)),
            Mode::Valuable => {
                SearchGoal::new(Pattern::RepeatedSuffix(self.length), Limit::Matches(self.count))
            }
        };
        Ok(goal)
    }

    fn prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or("")
    }

    fn suffix(&self) -> &str {
        self.suffix.as_deref().unwrap_or("")
    }
}

fn is_base58(c: char) -> bool {
    BASE58_ALPHABET.contains(c)
}

/// Every address text lies between the encodings of the smallest and the
/// largest `0x41` payload. Base58 characters sort in alphabet order as ASCII,
/// so a prefix outside that range can never match.
fn prefix_reachable(prefix: &str) -> bool {
    let mut lowest = [0x00u8; 25];
    let mut highest = [0xffu8; 25];
    lowest[0] = ADDRESS_VERSION;
    highest[0] = ADDRESS_VERSION;
    let lowest = bs58::encode(lowest).into_string();
    let highest = bs58::encode(highest).into_string();

    let n = prefix.len().min(lowest.len());
    prefix[..n] >= lowest[..n] && prefix[..n] <= highest[..n]
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Brute mode needs a --prefix or a --suffix")]
    MissingPattern,

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Similar mode needs a reference address (--source)")]
    MissingSource,

    #[error("Invalid reference address: {0}")]
    InvalidSource(#[from] AddressError),

    #[error("Repeated suffix length must be between 1 and 34, got {0}")]
    InvalidLength(usize),

    #[error("Count must be at least 1")]
    InvalidCount,

    #[error("Worker count must be at least 1")]
    InvalidWorkers,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_config(mode: Mode) -> Config {
        Config {
            mode,
            prefix: None,
            suffix: None,
            source: None,
            output: PathBuf::from("addresses.txt"),
            count: 1,
            length: 5,
            workers: None,
            interval: 1,
            bench_count: 10_000_000,
        }
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("2".parse::<Mode>(), Ok(Mode::Brute));
        assert_eq!("Similar".parse::<Mode>(), Ok(Mode::Similar));
        assert!("7".parse::<Mode>().is_err());
    }

    #[test]
    fn test_cli_parsing() {
        let config =
            Config::try_parse_from(["tron_vanity", "-m", "brute", "-p", "TAB", "-n", "3"]).unwrap();
        assert_eq!(config.mode, Mode::Brute);
        assert_eq!(config.prefix.as_deref(), Some("TAB"));
        assert_eq!(config.count, 3);
        assert_eq!(config.interval, 1);
        assert_eq!(config.length, 5);
    }

    #[test]
    fn test_valid_prefix() {
        let mut config = make_test_config(Mode::Brute);
        config.prefix = Some("TAB".into());
        let goal = config.search_goal().unwrap();
        assert_eq!(goal.pattern, Pattern::prefix_suffix("TAB", ""));
        assert_eq!(goal.limit, Limit::Matches(1));
    }

    #[test]
    fn test_brute_requires_pattern() {
        let config = make_test_config(Mode::Brute);
        assert!(matches!(config.validate(), Err(ConfigError::MissingPattern)));
    }

    #[test]
    fn test_invalid_pattern() {
        let mut config = make_test_config(Mode::Brute);
        config.suffix = Some("0OIl".into());
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPattern(_))));

        let mut config = make_test_config(Mode::Brute);
        config.prefix = Some("AB".into());
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPattern(_))));
    }

    #[test]
    fn test_unreachable_prefix() {
        // addresses span T9yD14Nj9j7xAB4dbGeiX9h8unkKDDv9ZR ..= TZJozAg1ruapycCicgz31GxvYJ1FvTVysk
        for prefix in ["Tz", "T1", "T8", "Ta", "T9x", "TZK"] {
            let mut config = make_test_config(Mode::Brute);
            config.prefix = Some(prefix.into());
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidPattern(_))),
                "{} should be rejected",
                prefix
            );
        }

        for prefix in ["T", "T9", "T9y", "TA", "TZ", "TZJ", "TMVQGm1qAQYVdetCeGRRkTWYYrLXuHK2HC"] {
            let mut config = make_test_config(Mode::Brute);
            config.prefix = Some(prefix.into());
            assert!(config.validate().is_ok(), "{} should be accepted", prefix);
        }
    }

    #[test]
    fn test_bench_goal_never_matches() {
        let mut config = make_test_config(Mode::Bench);
        config.bench_count = 100;
        let goal = config.search_goal().unwrap();
        assert_eq!(goal.pattern, Pattern::Never);
        assert_eq!(goal.limit, Limit::Attempts(100));
    }

    #[test]
    fn test_similar_requires_valid_source() {
        let mut config = make_test_config(Mode::Similar);
        assert!(matches!(config.validate(), Err(ConfigError::MissingSource)));

        config.source = Some("TMVQGm1qAQYVdetCeGRRkTWYYrLXuHK2HD".into());
        assert!(matches!(config.validate(), Err(ConfigError::InvalidSource(_))));

        config.source = Some("TMVQGm1qAQYVdetCeGRRkTWYYrLXuHK2HC".into());
        let goal = config.search_goal().unwrap();
        assert_eq!(goal.limit, Limit::Unbounded);
    }

    #[test]
    fn test_valuable_length_bounds() {
        let mut config = make_test_config(Mode::Valuable);
        config.length = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidLength(0))));
        config.length = 35;
        assert!(config.validate().is_err());
        config.length = 4;
        assert_eq!(
            config.search_goal().unwrap().pattern,
            Pattern::RepeatedSuffix(4)
        );
    }

    #[test]
    fn test_batch_goal_counts_attempts() {
        let mut config = make_test_config(Mode::Batch);
        config.count = 10;
        let goal = config.search_goal().unwrap();
        assert_eq!(goal.pattern, Pattern::Unconditional);
        assert_eq!(goal.limit, Limit::Attempts(10));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut config = make_test_config(Mode::Batch);
        config.workers = Some(0);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidWorkers)));
    }
}
