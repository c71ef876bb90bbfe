//! Shared search state.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::matcher::Pattern;
use crate::sink::ResultSink;

use super::{SearchError, VanityResult};

/// When a search is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// Stop once this many results have been emitted.
    Matches(u64),
    /// Run exactly this many attempts.
    Attempts(u64),
    /// Run until interrupted.
    Unbounded,
}

/// The pattern to search for and the termination policy.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchGoal {
    pub pattern: Pattern,
    pub limit: Limit,
}

impl SearchGoal {
    pub fn new(pattern: Pattern, limit: Limit) -> Self {
        Self { pattern, limit }
    }
}

struct Progress {
    matches: u64,
    best_score: f64,
    error: Option<SearchError>,
    sink: Box<dyn ResultSink>,
}

/// Counters and termination flag shared by every worker.
///
/// `attempts` is a lock-free counter so the reporter can sample it at any
/// time. Match admission, the best similarity score and sink emission all
/// happen under one mutex, which keeps `matches` at or below the goal and
/// serializes writes to the sink.
pub struct SearchState {
    limit: Limit,
    attempts: AtomicU64,
    /// Attempt slots handed out under `Limit::Attempts`.
    issued: AtomicU64,
    stop_flag: Arc<AtomicBool>,
    progress: Mutex<Progress>,
}

impl SearchState {
    pub fn new(limit: Limit, sink: Box<dyn ResultSink>) -> Self {
        Self {
            limit,
            attempts: AtomicU64::new(0),
            issued: AtomicU64::new(0),
            stop_flag: Arc::new(AtomicBool::new(false)),
            progress: Mutex::new(Progress {
                matches: 0,
                best_score: 0.0,
                error: None,
                sink,
            }),
        }
    }

    fn progress(&self) -> MutexGuard<'_, Progress> {
        self.progress.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claims the next attempt. Returns `false` once the search is over.
    #[inline]
    pub fn begin_attempt(&self) -> bool {
        if self.is_stopped() {
            return false;
        }
        if let Limit::Attempts(total) = self.limit {
            if self.issued.fetch_add(1, Ordering::Relaxed) >= total {
                self.stop();
                return false;
            }
        }
        true
    }

    /// Records a completed attempt, matched or not.
    #[inline]
    pub fn finish_attempt(&self) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
    }

    /// Offers a qualifying result for emission.
    ///
    /// A scored result is only admitted when it strictly beats the best score
    /// so far. Under `Limit::Matches` nothing is admitted once the goal is
    /// reached. `make` is only called for admitted results. Returns whether
    /// the result was emitted.
    pub fn admit<F>(&self, score: Option<f64>, make: F) -> bool
    where
        F: FnOnce() -> VanityResult,
    {
        let mut progress = self.progress();

        if progress.error.is_some() {
            return false;
        }
        if let Limit::Matches(goal) = self.limit {
            if progress.matches >= goal {
                return false;
            }
        }
        if let Some(score) = score {
            if score <= progress.best_score {
                return false;
            }
            progress.best_score = score;
        }

        let result = make();
        if let Err(e) = progress.sink.emit(&result) {
            progress.error = Some(SearchError::Sink(e));
            self.stop();
            return false;
        }

        progress.matches += 1;
        if let Limit::Matches(goal) = self.limit {
            if progress.matches >= goal {
                self.stop();
            }
        }
        true
    }

    /// Records a fatal error and stops the search. Only the first error is
    /// kept.
    pub fn fail(&self, error: SearchError) {
        let mut progress = self.progress();
        if progress.error.is_none() {
            progress.error = Some(error);
        }
        self.stop();
    }

    pub(crate) fn take_error(&self) -> Option<SearchError> {
        self.progress().error.take()
    }

    /// Signals all workers to stop at the top of their next iteration.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stop_flag.load(Ordering::Relaxed)
    }

    /// Returns a clone of the stop flag for external use (e.g., signal handlers).
    pub fn stop_flag_clone(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    /// Total completed attempts.
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    /// Total emitted results.
    pub fn matches(&self) -> u64 {
        self.progress().matches
    }

    /// Best similarity score seen so far (0.0 until something is scored).
    pub fn best_score(&self) -> f64 {
        self.progress().best_score
    }
}
