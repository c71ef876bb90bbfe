//! Worker pool for parallel vanity address search.
//!
//! This module provides:
//! - Multi-threaded CPU workers looping generate → derive → evaluate
//! - Shared search state with admission control and termination policy
//! - Progress counters read by the reporter

mod cpu;
mod pool;
mod state;

use std::io;
use std::path::PathBuf;

use crate::crypto::KeyError;

pub use cpu::CpuWorker;
pub use pool::{SearchSummary, VanityResult, WorkerPool};
pub use state::{Limit, SearchGoal, SearchState};

/// Fatal errors that end a search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("key generation failed: {0}")]
    Key(#[from] KeyError),

    #[error("failed to write result: {0}")]
    Sink(#[source] io::Error),

    #[error("cannot open output file {}: {source}", path.display())]
    Output { path: PathBuf, source: io::Error },

    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] io::Error),

    #[error("worker thread panicked")]
    WorkerPanicked,

    #[error("failed to install interrupt handler: {0}")]
    Signal(#[from] ctrlc::Error),
}
