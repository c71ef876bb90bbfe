//! # tron_vanity
//!
//! Offline TRON vanity address generator.
//!
//! ## Architecture
//!
//! - `crypto`: Key generation and address derivation
//! - `matcher`: Pattern matching strategies
//! - `worker`: Parallel search, shared state and termination
//! - `sink`: Console and file output for results
//! - `report`: Periodic throughput reporting
//! - `config`: Runtime configuration

pub mod config;
pub mod crypto;
pub mod matcher;
pub mod report;
pub mod sink;
pub mod worker;

pub use config::{Config, ConfigError, Mode};
pub use crypto::{Address, Keypair};
pub use matcher::{MatchResult, Pattern};
pub use sink::{ConsoleSink, FileSink, NullSink, ResultSink};
pub use worker::{Limit, SearchError, SearchGoal, SearchSummary, VanityResult, WorkerPool};
