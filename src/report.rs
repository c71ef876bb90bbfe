//! Periodic throughput reporting.
//!
//! The reporter only reads the attempt counter; it has no influence on the
//! search itself.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, RecvTimeoutError, Sender};

use crate::worker::SearchState;

/// One throughput sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Throughput {
    pub attempts: u64,
    pub per_second: f64,
    pub elapsed: Duration,
}

/// Turns successive counter readings into rates.
#[derive(Debug)]
pub struct Meter {
    start: Instant,
    last_attempts: u64,
    last_at: Instant,
}

impl Meter {
    pub fn new(start: Instant) -> Self {
        Self {
            start,
            last_attempts: 0,
            last_at: start,
        }
    }

    /// Rate since the previous sample.
    pub fn sample(&mut self, attempts: u64, now: Instant) -> Throughput {
        let window = now.saturating_duration_since(self.last_at).as_secs_f64();
        let delta = attempts.saturating_sub(self.last_attempts);
        let per_second = if window > 0.0 {
            delta as f64 / window
        } else {
            0.0
        };

        self.last_attempts = attempts;
        self.last_at = now;

        Throughput {
            attempts,
            per_second,
            elapsed: now.saturating_duration_since(self.start),
        }
    }
}

/// Background thread logging throughput every `interval`.
pub struct ProgressReporter {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ProgressReporter {
    /// Starts reporting. Returns `Ok(None)` when `interval` is zero.
    pub fn spawn(
        state: Arc<SearchState>,
        interval: Duration,
    ) -> std::io::Result<Option<Self>> {
        if interval.is_zero() {
            return Ok(None);
        }

        let (stop_tx, stop_rx) = bounded::<()>(1);
        let handle = thread::Builder::new()
            .name("vanity-progress".into())
            .spawn(move || {
                let mut meter = Meter::new(Instant::now());
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {
                            let sample = meter.sample(state.attempts(), Instant::now());
                            tracing::info!(
                                "[{:>4}s] Generated {} keys ({}/s)",
                                sample.elapsed.as_secs(),
                                format_number(sample.attempts),
                                format_number(sample.per_second as u64)
                            );
                        }
                        _ => break,
                    }
                }
            })?;

        Ok(Some(Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }))
    }

    /// Stops the reporter and waits for its thread.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // dropping the sender disconnects the channel
        self.stop_tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Formats a count with a K/M/B suffix.
pub fn format_number(n: u64) -> String {
    if n >= 1_000_000_000 {
        format!("{:.2}B", n as f64 / 1_000_000_000.0)
    } else if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.2}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::NullSink;
    use crate::worker::Limit;

    #[test]
    fn test_meter_rate_since_last_sample() {
        let start = Instant::now();
        let mut meter = Meter::new(start);

        let first = meter.sample(1_000, start + Duration::from_secs(1));
        assert_eq!(first.per_second, 1_000.0);

        let second = meter.sample(4_000, start + Duration::from_secs(3));
        assert_eq!(second.per_second, 1_500.0);
        assert_eq!(second.elapsed, Duration::from_secs(3));
        assert_eq!(second.attempts, 4_000);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_500), "1.50K");
        assert_eq!(format_number(2_000_000), "2.00M");
        assert_eq!(format_number(3_100_000_000), "3.10B");
    }

    #[test]
    fn test_zero_interval_disables_reporting() {
        let state = Arc::new(SearchState::new(Limit::Unbounded, Box::new(NullSink)));
        assert!(ProgressReporter::spawn(state, Duration::ZERO).unwrap().is_none());
    }

    #[test]
    fn test_reporter_stops_promptly() {
        let state = Arc::new(SearchState::new(Limit::Unbounded, Box::new(NullSink)));
        let reporter = ProgressReporter::spawn(state, Duration::from_secs(60))
            .unwrap()
            .unwrap();
        let begun = Instant::now();
        reporter.stop();
        assert!(begun.elapsed() < Duration::from_secs(5));
    }
}
