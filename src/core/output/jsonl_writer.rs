//! JSON Lines (JSONL) output writer.
//!
//! JSONL suits line-oriented tooling such as `jq -c`, `grep` and
//! log shippers: every message is one self-contained JSON object.

use std::io::Write;

use crate::Message;
use crate::core::models::OutputConfig;
use crate::error::Result;

use super::{ISO_TIMESTAMP, rows};

/// Writes messages to JSONL (JSON Lines) format.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"timestamp":"2022-03-31T09:46:00","author":"UserA","content":"Hello","isSystemMessage":false}
/// {"timestamp":"2022-03-31T11:09:00","author":"UserB unsent a message","content":"","isSystemMessage":true}
/// ```
pub fn write_jsonl<'a, W: Write>(
    messages: impl IntoIterator<Item = &'a Message>,
    mut writer: W,
    config: &OutputConfig,
) -> Result<()> {
    for row in rows(messages, config, ISO_TIMESTAMP) {
        serde_json::to_writer(&mut writer, &row)?;
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

/// Converts messages to a JSONL string.
pub fn to_jsonl<'a>(messages: impl IntoIterator<Item = &'a Message>, config: &OutputConfig) -> Result<String> {
    let mut output = String::new();

    for row in rows(messages, config, ISO_TIMESTAMP) {
        output.push_str(&serde_json::to_string(&row)?);
        output.push('\n');
    }

    Ok(output)
}
