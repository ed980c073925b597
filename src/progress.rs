//! Progress reporting for long-running parses.
//!
//! Parsing reports progress as an integer percentage of the input bytes
//! consumed so far. Reports happen on the first line, every
//! [`yield_interval`](crate::config::ParserConfig::yield_interval) lines,
//! and exactly once with `100` when the parse completes, including for an
//! empty input.
//!
//! # Example
//!
//! ```rust
//! use linechat::progress::{Progress, ProgressCallback};
//! use std::sync::Arc;
//!
//! let callback: ProgressCallback = Arc::new(|pct| {
//!     eprintln!("Progress: {pct}%");
//! });
//!
//! let progress = Progress::new(500, 1000, 12);
//! callback(progress.percent());
//! ```

use std::sync::Arc;

/// Snapshot of parse progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    /// Number of input bytes consumed so far.
    pub bytes_processed: usize,

    /// Total input size in bytes.
    pub total_bytes: usize,

    /// Number of physical lines read so far.
    pub lines_processed: usize,
}

impl Progress {
    /// Creates a new progress snapshot.
    pub fn new(bytes_processed: usize, total_bytes: usize, lines_processed: usize) -> Self {
        Self {
            bytes_processed,
            total_bytes,
            lines_processed,
        }
    }

    /// Returns the rounded percentage in `0..=100`.
    ///
    /// An empty input counts as complete.
    ///
    /// ```rust
    /// use linechat::progress::Progress;
    ///
    /// assert_eq!(Progress::new(1, 3, 1).percent(), 33);
    /// assert_eq!(Progress::new(0, 0, 0).percent(), 100);
    /// ```
    pub fn percent(&self) -> u8 {
        if self.total_bytes == 0 {
            return 100;
        }
        let pct = (self.bytes_processed as f64 / self.total_bytes as f64 * 100.0).round();
        pct.clamp(0.0, 100.0) as u8
    }

    /// Returns whether all input bytes have been consumed.
    pub fn is_complete(&self) -> bool {
        self.bytes_processed >= self.total_bytes
    }

    /// Returns the number of bytes still to be read.
    pub fn remaining_bytes(&self) -> usize {
        self.total_bytes.saturating_sub(self.bytes_processed)
    }
}

/// Shareable callback receiving integer percentages in `0..=100`.
pub type ProgressCallback = Arc<dyn Fn(u8) + Send + Sync>;

/// Creates a progress callback that prints to stderr.
pub fn stderr_progress() -> ProgressCallback {
    Arc::new(|pct| {
        eprintln!("Progress: {pct}%");
    })
}
