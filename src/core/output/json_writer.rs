//! JSON output writer.

use std::io::Write;

use crate::Message;
use crate::core::models::OutputConfig;
use crate::error::Result;

use super::{ISO_TIMESTAMP, rows};

/// Writes messages as a pretty-printed JSON array.
///
/// # Format
/// ```json
/// [
///   {
///     "timestamp": "2022-03-31T09:46:00",
///     "author": "UserA",
///     "content": "Hello",
///     "isSystemMessage": false
///   }
/// ]
/// ```
pub fn write_json<'a, W: Write>(
    messages: impl IntoIterator<Item = &'a Message>,
    mut writer: W,
    config: &OutputConfig,
) -> Result<()> {
    let rows = rows(messages, config, ISO_TIMESTAMP);
    serde_json::to_writer_pretty(&mut writer, &rows)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Converts messages to a JSON array string.
pub fn to_json<'a>(messages: impl IntoIterator<Item = &'a Message>, config: &OutputConfig) -> Result<String> {
    let rows = rows(messages, config, ISO_TIMESTAMP);
    Ok(serde_json::to_string_pretty(&rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, 3, 31)
            .unwrap()
            .and_hms_opt(9, 46, 0)
            .unwrap()
    }

    #[test]
    fn test_json_basic() {
        let messages = vec![
            Message::new(1, ts(), "UserA", "Hello"),
            Message::system(2, ts(), "UserB left"),
        ];

        let json = to_json(&messages, &OutputConfig::new()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let array = parsed.as_array().unwrap();

        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["author"], "UserA");
        assert_eq!(array[0]["timestamp"], "2022-03-31T09:46:00");
        assert_eq!(array[1]["isSystemMessage"], true);
        assert!(array[0].get("id").is_none());
    }

    #[test]
    fn test_json_with_ids_without_timestamps() {
        let messages = vec![Message::new(3, ts(), "UserA", "Hello")];
        let config = OutputConfig::new().with_ids().without_timestamps();

        let json = to_json(&messages, &config).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed[0]["id"], 3);
        assert!(parsed[0].get("timestamp").is_none());
    }

    #[test]
    fn test_json_empty() {
        let json = to_json(&Vec::<Message>::new(), &OutputConfig::new()).unwrap();
        assert_eq!(json, "[]");
    }

    #[test]
    fn test_write_json_to_buffer() {
        let messages = vec![Message::new(1, ts(), "UserA", "Hello")];
        let mut buffer = Vec::new();
        write_json(&messages, &mut buffer, &OutputConfig::new()).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.ends_with("]\n"));
        assert!(text.contains("\"content\": \"Hello\""));
    }
}
