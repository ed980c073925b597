//! Output format renderers.
//!
//! Every renderer comes in two flavours: `write_*` streams into any
//! [`std::io::Write`] and `to_*` returns a `String`. Nothing here touches
//! the filesystem.
//!
//! - [`write_text`] / [`to_text`] - one human-readable line per message
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array of messages - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines (one JSON per line) - requires `json-output` feature
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> linechat::Result<()> {
//! use linechat::core::output::{to_csv, to_jsonl, to_text};
//! use linechat::core::models::OutputConfig;
//! use linechat::parse_str;
//!
//! let record = parse_str("2022/03/31（四）\n上午09:46\tUserA\tHello\n");
//! let config = OutputConfig::new();
//!
//! assert_eq!(to_text(&record.messages, &config), "[2022-03-31 09:46] UserA: Hello\n");
//! assert!(to_csv(&record.messages, &config)?.starts_with("Timestamp;Author;Content"));
//! assert!(to_jsonl(&record.messages, &config)?.contains("\"author\":\"UserA\""));
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(any(feature = "csv-output", feature = "json-output"))]
use serde::Serialize;

use crate::Message;
use crate::core::models::OutputConfig;

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;
mod text_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
pub use text_writer::{to_text, write_text};

const DISPLAY_TIMESTAMP: &str = "%Y-%m-%d %H:%M";
#[cfg(feature = "json-output")]
const ISO_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%S";

/// Flattened message as the structured writers see it.
/// Only includes fields enabled in `OutputConfig`.
#[cfg(any(feature = "csv-output", feature = "json-output"))]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Row<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
    author: &'a str,
    content: &'a str,
    is_system_message: bool,
}

#[cfg(any(feature = "csv-output", feature = "json-output"))]
impl<'a> Row<'a> {
    fn new(msg: &'a Message, config: &OutputConfig, timestamp_format: &str) -> Self {
        Self {
            id: config.include_ids.then_some(msg.id),
            timestamp: config
                .include_timestamps
                .then(|| msg.timestamp.format(timestamp_format).to_string()),
            author: &msg.author,
            content: &msg.content,
            is_system_message: msg.is_system_message,
        }
    }
}

/// Messages that survive `config`, in order.
fn visible<'a>(
    messages: impl IntoIterator<Item = &'a Message>,
    config: &OutputConfig,
) -> impl Iterator<Item = &'a Message> {
    let keep_system = config.include_system_messages;
    messages
        .into_iter()
        .filter(move |msg| keep_system || !msg.is_system_message)
}

/// Builds structured rows for the CSV and JSON writers.
#[cfg(any(feature = "csv-output", feature = "json-output"))]
fn rows<'a>(
    messages: impl IntoIterator<Item = &'a Message>,
    config: &OutputConfig,
    timestamp_format: &str,
) -> Vec<Row<'a>> {
    visible(messages, config)
        .map(|msg| Row::new(msg, config, timestamp_format))
        .collect()
}
