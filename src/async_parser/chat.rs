//! Async LINE export parser.

use std::path::Path;

use async_trait::async_trait;

use crate::ChatRecord;
use crate::config::ParserConfig;
use crate::error::LineChatError;

use super::{AsyncParser, parse_async, read_file_async};

/// Async parser for LINE text exports.
///
/// # Example
///
/// ```rust,no_run
/// use linechat::async_parser::{AsyncChatParser, AsyncParser};
///
/// # async fn example() -> Result<(), linechat::LineChatError> {
/// let parser = AsyncChatParser::new();
/// let record = parser.parse("line_chat.txt").await?;
///
/// println!("{}: {} messages", record.group_name, record.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct AsyncChatParser {
    config: ParserConfig,
}

impl AsyncChatParser {
    /// Creates a new async parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }
}

#[async_trait]
impl AsyncParser for AsyncChatParser {
    fn name(&self) -> &'static str {
        "LINE (Async)"
    }

    async fn parse(&self, path: impl AsRef<Path> + Send) -> Result<ChatRecord, LineChatError> {
        let content = read_file_async(path).await?;
        Ok(self.parse_str(&content).await)
    }

    async fn parse_str(&self, content: &str) -> ChatRecord {
        parse_async(content, &self.config, |_| {}).await
    }
}
