//! Rendering options for message output.

use serde::{Deserialize, Serialize};

/// Configuration for output format.
/// Controls which metadata fields and which messages are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Include timestamps in output
    pub include_timestamps: bool,
    /// Include message IDs in output
    pub include_ids: bool,
    /// Render system notices (joins, leaves, unsent messages)
    pub include_system_messages: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            include_timestamps: true,
            include_ids: false,
            include_system_messages: true,
        }
    }
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_ids(mut self) -> Self {
        self.include_ids = true;
        self
    }

    #[must_use]
    pub fn without_timestamps(mut self) -> Self {
        self.include_timestamps = false;
        self
    }

    #[must_use]
    pub fn without_system_messages(mut self) -> Self {
        self.include_system_messages = false;
        self
    }
}
