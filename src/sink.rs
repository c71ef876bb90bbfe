//! Destinations for qualifying results.
//!
//! Sinks are only ever called while the search state's lock is held, so an
//! implementation never sees two results at once.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::worker::{SearchError, VanityResult};

/// Receives results admitted by the search.
pub trait ResultSink: Send {
    fn emit(&mut self, result: &VanityResult) -> io::Result<()>;
}

/// Prints each result to stdout.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    emitted: usize,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultSink for ConsoleSink {
    fn emit(&mut self, result: &VanityResult) -> io::Result<()> {
        self.emitted += 1;

        let stdout = io::stdout();
        let mut out = stdout.lock();
        writeln!(out, "=== Match #{} ===", self.emitted)?;
        if let Some(score) = result.score {
            writeln!(out, "Similarity:  {:.2}%", score * 100.0)?;
        }
        writeln!(out, "Address:     {}", result.address)?;
        writeln!(out, "Private Key: {}", result.private_key)?;
        writeln!(out, "Worker:      {}", result.worker_id)?;
        writeln!(out)?;
        out.flush()
    }
}

/// Appends two-line records to a text file, flushing after each one.
#[derive(Debug)]
pub struct FileSink {
    file: File,
}

impl FileSink {
    /// Opens `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SearchError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| SearchError::Output {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self { file })
    }
}

impl ResultSink for FileSink {
    fn emit(&mut self, result: &VanityResult) -> io::Result<()> {
        let record = format!(
            "address: {}\nprivate key: {}\n",
            result.address, result.private_key
        );
        self.file.write_all(record.as_bytes())?;
        self.file.flush()
    }
}

/// Discards results; used by the throughput benchmark.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ResultSink for NullSink {
    fn emit(&mut self, _result: &VanityResult) -> io::Result<()> {
        Ok(())
    }
}
