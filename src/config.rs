//! Parser configuration.
//!
//! [`ParserConfig`] controls how often the parser reports progress and
//! yields, how many leading lines are searched for metadata, and which
//! group name is used when the export has none.
//!
//! # Example
//!
//! ```rust
//! use linechat::config::ParserConfig;
//! use linechat::parser::ChatParser;
//!
//! let config = ParserConfig::new()
//!     .with_yield_interval(500)
//!     .with_default_group_name("Untitled");
//!
//! let parser = ChatParser::with_config(config);
//! let record = parser.parse_str("");
//! assert_eq!(record.group_name, "Untitled");
//! ```

use serde::{Deserialize, Serialize};

use crate::record::DEFAULT_GROUP_NAME;

/// Configuration for the LINE export parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Report progress (and, for async parsing, yield) every N lines
    /// (default: 2000). Zero is treated as one.
    pub yield_interval: usize,

    /// Number of leading physical lines searched for the group-name and
    /// export-date metadata (default: 5).
    pub metadata_lines: usize,

    /// Group name used when no `[LINE]` line is found.
    pub default_group_name: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            yield_interval: 2000,
            metadata_lines: 5,
            default_group_name: DEFAULT_GROUP_NAME.to_string(),
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the progress / yield interval in lines.
    #[must_use]
    pub fn with_yield_interval(mut self, lines: usize) -> Self {
        self.yield_interval = lines;
        self
    }

    /// Sets how many leading lines may hold metadata.
    #[must_use]
    pub fn with_metadata_lines(mut self, lines: usize) -> Self {
        self.metadata_lines = lines;
        self
    }

    /// Sets the placeholder group name.
    #[must_use]
    pub fn with_default_group_name(mut self, name: impl Into<String>) -> Self {
        self.default_group_name = name.into();
        self
    }

    /// Returns `true` if line `index` (zero-based) is a progress checkpoint.
    pub fn is_checkpoint(&self, index: usize) -> bool {
        index % self.yield_interval.max(1) == 0
    }
}
