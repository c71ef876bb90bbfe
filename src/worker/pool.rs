//! Worker pool management.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::crypto::Keypair;
use crate::matcher::Pattern;
use crate::sink::ResultSink;

use super::cpu::CpuWorker;
use super::{SearchError, SearchGoal, SearchState};

/// Result of a successful vanity address search.
#[derive(Debug, Clone, PartialEq)]
pub struct VanityResult {
    /// The private key (hex encoded, no 0x prefix)
    pub private_key: String,
    /// The TRON address (base58check)
    pub address: String,
    /// Similarity score, for similarity searches
    pub score: Option<f64>,
    /// The ID of the worker that found this result
    pub worker_id: usize,
}

impl VanityResult {
    pub fn new(keypair: &Keypair, score: Option<f64>, worker_id: usize) -> Self {
        Self {
            private_key: keypair.private_key_hex(),
            address: keypair.address().to_string(),
            score,
            worker_id,
        }
    }
}

/// Final counters of a finished search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchSummary {
    pub attempts: u64,
    pub matches: u64,
    pub best_score: f64,
    pub elapsed: Duration,
}

impl SearchSummary {
    /// Average attempts per second over the whole run.
    pub fn keys_per_second(&self) -> f64 {
        let elapsed = self.elapsed.as_secs_f64();
        if elapsed > 0.0 {
            self.attempts as f64 / elapsed
        } else {
            0.0
        }
    }
}

/// Manages a pool of workers for parallel vanity address search.
pub struct WorkerPool {
    /// Number of workers
    num_workers: usize,
    /// Worker thread handles (Option to allow taking during join)
    handles: Option<Vec<JoinHandle<()>>>,
    /// Shared counters and stop flag
    state: Arc<SearchState>,
    /// Start time
    start_time: Instant,
}

impl WorkerPool {
    /// Creates a new worker pool and starts `num_workers` workers.
    pub fn new(
        num_workers: usize,
        goal: SearchGoal,
        sink: Box<dyn ResultSink>,
    ) -> Result<Self, SearchError> {
        let state = Arc::new(SearchState::new(goal.limit, sink));
        let pattern = Arc::new(goal.pattern);

        let handles = Self::spawn_workers(num_workers, &pattern, &state)?;
        tracing::debug!(workers = num_workers, "worker pool started");

        Ok(Self {
            num_workers,
            handles: Some(handles),
            state,
            start_time: Instant::now(),
        })
    }

    /// Spawns worker threads. If any spawn fails the ones already running are
    /// stopped and joined.
    fn spawn_workers(
        num_workers: usize,
        pattern: &Arc<Pattern>,
        state: &Arc<SearchState>,
    ) -> Result<Vec<JoinHandle<()>>, SearchError> {
        let mut handles = Vec::with_capacity(num_workers);

        for id in 0..num_workers {
            let pattern = pattern.clone();
            let worker_state = state.clone();

            let spawned = thread::Builder::new()
                .name(format!("vanity-worker-{}", id))
                .spawn(move || {
                    let worker = CpuWorker::new(id, pattern, worker_state);
                    worker.run();
                });

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    state.stop();
                    for handle in handles {
                        let _ = handle.join();
                    }
                    return Err(SearchError::Spawn(e));
                }
            }
        }

        Ok(handles)
    }

    /// Waits until every worker has finished and returns the final counters.
    ///
    /// Workers finish on their own when the goal is reached; unbounded
    /// searches finish once the stop flag is set (e.g. by Ctrl+C).
    pub fn join(mut self) -> Result<SearchSummary, SearchError> {
        let mut panicked = false;
        if let Some(handles) = self.handles.take() {
            for handle in handles {
                if handle.join().is_err() {
                    panicked = true;
                }
            }
        }

        if let Some(error) = self.state.take_error() {
            return Err(error);
        }
        if panicked {
            return Err(SearchError::WorkerPanicked);
        }

        Ok(SearchSummary {
            attempts: self.state.attempts(),
            matches: self.state.matches(),
            best_score: self.state.best_score(),
            elapsed: self.elapsed(),
        })
    }

    /// Signals all workers to stop.
    pub fn stop(&self) {
        self.state.stop();
    }

    /// Returns the number of workers.
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Returns the shared state, for progress reporting.
    pub fn state(&self) -> Arc<SearchState> {
        self.state.clone()
    }

    /// Returns the elapsed time since the pool was created.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Returns a clone of the stop flag for external use (e.g., signal handlers).
    pub fn stop_flag_clone(&self) -> Arc<AtomicBool> {
        self.state.stop_flag_clone()
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.stop();
        // Wait for workers to finish if they haven't been joined
        if let Some(handles) = self.handles.take() {
            for handle in handles {
                let _ = handle.join();
            }
        }
    }
}
