//! CSV output writer.

use std::io::Write;

use crate::Message;
use crate::core::models::OutputConfig;
use crate::error::Result;

use super::{DISPLAY_TIMESTAMP, Row, rows};

/// Writes messages as CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: Depends on OutputConfig
///   - Basic: `Author`, `Content`, `System`
///   - With IDs: `ID` first
///   - With timestamps: `Timestamp` before `Author`
/// - Multi-line content is quoted, newlines preserved
/// - Encoding: UTF-8
pub fn write_csv<'a, W: Write>(
    messages: impl IntoIterator<Item = &'a Message>,
    writer: W,
    config: &OutputConfig,
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(writer);

    writer.write_record(build_header(config))?;
    for row in rows(messages, config, DISPLAY_TIMESTAMP) {
        writer.write_record(build_record(&row))?;
    }

    writer.flush()?;
    Ok(())
}

/// Converts messages to a CSV string.
pub fn to_csv<'a>(messages: impl IntoIterator<Item = &'a Message>, config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(messages, &mut buffer, config)?;
    Ok(String::from_utf8(buffer)?)
}

/// Build CSV header based on output configuration.
fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = Vec::new();

    if config.include_ids {
        header.push("ID");
    }
    if config.include_timestamps {
        header.push("Timestamp");
    }

    header.push("Author");
    header.push("Content");
    header.push("System");

    header
}

/// Build CSV record for a single row.
fn build_record(row: &Row<'_>) -> Vec<String> {
    let mut record = Vec::new();

    if let Some(id) = row.id {
        record.push(id.to_string());
    }
    if let Some(timestamp) = &row.timestamp {
        record.push(timestamp.clone());
    }

    record.push(row.author.to_string());
    record.push(row.content.to_string());
    record.push(row.is_system_message.to_string());

    record
}
