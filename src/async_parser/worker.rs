//! Background parse worker.
//!
//! [`spawn_parse`] runs one parse on tokio's blocking pool. Progress is
//! published on a [`watch`] channel; the returned [`ParseHandle`] owns the
//! receiving end. Dropping the handle (and every receiver cloned from it)
//! abandons the parse at the worker's next checkpoint.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::ChatRecord;
use crate::config::ParserConfig;
use crate::error::{LineChatError, Result};
use crate::parser::{ChatScanner, Lines};

/// Handle to a parse running on a background worker.
///
/// # Example
///
/// ```rust
/// use linechat::async_parser::spawn_parse;
/// use linechat::config::ParserConfig;
///
/// # #[tokio::main]
/// # async fn main() -> linechat::Result<()> {
/// let content = "2022/03/31（四）\n上午09:46\tUserA\tHello\n".to_string();
/// let handle = spawn_parse(content, ParserConfig::default());
///
/// let record = handle.join().await?;
/// assert_eq!(record.speakers, vec!["UserA"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ParseHandle {
    task: JoinHandle<Result<ChatRecord>>,
    progress: watch::Receiver<u8>,
}

impl ParseHandle {
    /// Returns a receiver for progress updates.
    ///
    /// A cloned receiver keeps the parse alive even after the handle is
    /// dropped.
    pub fn progress(&self) -> watch::Receiver<u8> {
        self.progress.clone()
    }

    /// Latest percentage published by the worker.
    pub fn current_progress(&self) -> u8 {
        *self.progress.borrow()
    }

    /// Returns `true` once the worker has stopped.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the parse to complete.
    ///
    /// # Errors
    ///
    /// Returns [`LineChatError::Worker`] if the worker panicked.
    pub async fn join(self) -> Result<ChatRecord> {
        // The receiver must outlive the task or the worker sees a closed
        // channel and stops.
        let Self {
            task,
            progress: _progress,
        } = self;

        task.await.map_err(|err| LineChatError::worker(err.to_string()))?
    }
}

/// Starts parsing `content` on tokio's blocking pool.
///
/// Must be called from within a tokio runtime.
pub fn spawn_parse(content: String, config: ParserConfig) -> ParseHandle {
    let (tx, rx) = watch::channel(0);
    let task = tokio::task::spawn_blocking(move || run(&content, &config, &tx));

    ParseHandle { task, progress: rx }
}

fn run(content: &str, config: &ParserConfig, progress: &watch::Sender<u8>) -> Result<ChatRecord> {
    let mut scanner = ChatScanner::with_config(config.clone());

    for line in Lines::new(content) {
        if config.is_checkpoint(line.index) && progress.send(line.progress().percent()).is_err() {
            warn!(
                line = line.index + 1,
                remaining_bytes = line.progress().remaining_bytes(),
                "progress receiver dropped, abandoning background parse"
            );
            return Err(LineChatError::Cancelled);
        }
        scanner.feed_line(line.text);
    }

    progress.send_replace(100);
    Ok(scanner.finish())
}
