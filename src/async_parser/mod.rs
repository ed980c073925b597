//! Async parser support for linechat.
//!
//! Two ways to keep a tokio runtime responsive while a large export is
//! parsed:
//!
//! - [`parse_async`] runs on the calling task and yields to the scheduler
//!   every [`yield_interval`](crate::config::ParserConfig::yield_interval)
//!   lines.
//! - [`spawn_parse`] moves the whole parse onto a blocking worker and
//!   publishes progress through a [`tokio::sync::watch`] channel.
//!
//! # Example
//!
//! ```rust,no_run
//! use linechat::async_parser::{AsyncChatParser, AsyncParser};
//!
//! # async fn example() -> Result<(), linechat::LineChatError> {
//! let parser = AsyncChatParser::new();
//! let record = parser.parse("line_chat.txt").await?;
//!
//! for msg in &record.messages {
//!     println!("{}: {}", msg.author, msg.content);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! This module requires the `async` feature to be enabled:
//!
//! ```toml
//! [dependencies]
//! linechat = { version = "0.1", features = ["async"] }
//! ```

use std::path::Path;

use async_trait::async_trait;
use tokio::fs;

use crate::ChatRecord;
use crate::config::ParserConfig;
use crate::error::LineChatError;
use crate::parser::{ChatScanner, Lines};

mod chat;
mod worker;

pub use chat::AsyncChatParser;
pub use worker::{ParseHandle, spawn_parse};

/// Trait for async parsers.
///
/// This is the async equivalent of [`ChatParser`](crate::parser::ChatParser).
///
/// # Example
///
/// ```rust,no_run
/// use linechat::async_parser::{AsyncChatParser, AsyncParser};
///
/// # async fn example() -> Result<(), linechat::LineChatError> {
/// let parser = AsyncChatParser::new();
/// let record = parser.parse("export.txt").await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait AsyncParser: Send + Sync {
    /// Returns the name of the parser.
    fn name(&self) -> &'static str;

    /// Parses a file asynchronously.
    ///
    /// Reads the file using tokio's async I/O and parses its contents.
    async fn parse(&self, path: impl AsRef<Path> + Send) -> Result<ChatRecord, LineChatError>;

    /// Parses content already in memory, yielding periodically.
    async fn parse_str(&self, content: &str) -> ChatRecord;
}

/// Parses export content on the current task, yielding to the runtime at
/// every progress checkpoint.
///
/// `on_progress` receives the same percentages as
/// [`ChatParser::parse_str_with_progress`](crate::parser::ChatParser::parse_str_with_progress),
/// ending with `100`.
///
/// ```rust
/// use linechat::async_parser::parse_async;
/// use linechat::config::ParserConfig;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut last = 0;
/// let record = parse_async("2022/03/31（四）\n上午09:46\tA\tHi\n", &ParserConfig::default(), |pct| last = pct).await;
/// assert_eq!(record.len(), 1);
/// assert_eq!(last, 100);
/// # }
/// ```
pub async fn parse_async(content: &str, config: &ParserConfig, mut on_progress: impl FnMut(u8) + Send) -> ChatRecord {
    let mut scanner = ChatScanner::with_config(config.clone());

    for line in Lines::new(content) {
        if config.is_checkpoint(line.index) {
            on_progress(line.progress().percent());
            tokio::task::yield_now().await;
        }
        scanner.feed_line(line.text);
    }

    on_progress(100);
    scanner.finish()
}

/// Helper function to read a file asynchronously.
pub(crate) async fn read_file_async(path: impl AsRef<Path>) -> Result<String, LineChatError> {
    let content = fs::read_to_string(path).await?;
    Ok(content)
}
