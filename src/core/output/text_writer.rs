//! Plain-text output writer.

use std::io::{self, Write};

use crate::Message;
use crate::core::models::OutputConfig;

use super::{DISPLAY_TIMESTAMP, visible};

/// Writes one line per message.
///
/// # Format
/// - Regular: `[2022-03-31 09:46] UserA: Hello`
/// - System: `[2022-03-31 11:09] * UserB unsent a message`
/// - With IDs the line starts with `#<id> `
/// - Continuation lines of multi-line messages are indented by two spaces
pub fn write_text<'a, W: Write>(
    messages: impl IntoIterator<Item = &'a Message>,
    mut writer: W,
    config: &OutputConfig,
) -> io::Result<()> {
    for msg in visible(messages, config) {
        writeln!(writer, "{}", render_line(msg, config))?;
    }
    writer.flush()
}

/// Renders messages to a `String`, one line per message.
pub fn to_text<'a>(messages: impl IntoIterator<Item = &'a Message>, config: &OutputConfig) -> String {
    let mut output = String::new();
    for msg in visible(messages, config) {
        output.push_str(&render_line(msg, config));
        output.push('\n');
    }
    output
}

fn render_line(msg: &Message, config: &OutputConfig) -> String {
    let mut line = String::new();

    if config.include_ids {
        line.push_str(&format!("#{} ", msg.id));
    }
    if config.include_timestamps {
        line.push_str(&format!("[{}] ", msg.timestamp.format(DISPLAY_TIMESTAMP)));
    }

    match msg.system_text() {
        Some(text) => {
            line.push_str("* ");
            line.push_str(text);
        }
        None => {
            line.push_str(&msg.author);
            line.push_str(": ");
            if msg.is_multiline() {
                line.push_str(&msg.content.replace('\n', "\n  "));
            } else {
                line.push_str(&msg.content);
            }
        }
    }

    line
}
