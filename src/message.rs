//! A single normalized chat message.
//!
//! Every message line of a LINE export (or a quoted block spanning several
//! physical lines) becomes one [`Message`]. Messages carry a parser-assigned
//! id that strictly increases in file order.
//!
//! # System notices
//!
//! LINE writes notices such as "X unsent a message" or "X joined the group"
//! without an author column. For output compatibility with existing viewers
//! the notice text is carried in [`author`](Message::author) and
//! [`content`](Message::content) is left empty:
//!
//! ```
//! use linechat::Message;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2022, 3, 31).unwrap().and_hms_opt(11, 9, 0).unwrap();
//! let notice = Message::system(5, ts, "Alice unsent a message");
//!
//! assert!(notice.is_system_message());
//! assert_eq!(notice.author(), "Alice unsent a message");
//! assert_eq!(notice.content(), "");
//! ```
//!
//! # Serialization
//!
//! Field names are camelCase so a record can be handed to a web front end
//! as-is:
//!
//! ```
//! use linechat::Message;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2022, 3, 31).unwrap().and_hms_opt(9, 46, 0).unwrap();
//! let msg = Message::new(1, ts, "UserA", "Hello");
//! let json = serde_json::to_string(&msg)?;
//!
//! assert!(json.contains("\"isSystemMessage\":false"));
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One chat line or assembled multi-line message.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `id` | `u64` | Unique, strictly increasing in file order, starting at 1 |
/// | `timestamp` | `NaiveDateTime` | Active date header + the line's time of day |
/// | `author` | `String` | Speaker name, or the notice text for system messages |
/// | `content` | `String` | Message body, empty for system messages |
/// | `is_system_message` | `bool` | `true` when the line had no author column |
///
/// Timestamps are wall-clock values as written in the export; LINE does not
/// record a time zone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Parser-assigned identifier, unique within one [`ChatRecord`](crate::ChatRecord).
    pub id: u64,

    /// When the message was sent.
    pub timestamp: NaiveDateTime,

    /// Display name of the speaker.
    ///
    /// For system notices this is the notice text itself.
    pub author: String,

    /// Message body.
    ///
    /// Multi-line quoted messages are joined with `\n` and have their
    /// surrounding quotes removed.
    pub content: String,

    /// Whether this is a system notice rather than an authored message.
    pub is_system_message: bool,
}

impl Message {
    /// Creates an authored (non-system) message.
    pub fn new(
        id: u64,
        timestamp: NaiveDateTime,
        author: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id,
            timestamp,
            author: author.into(),
            content: content.into(),
            is_system_message: false,
        }
    }

    /// Creates a system notice. The notice text goes into `author`.
    pub fn system(id: u64, timestamp: NaiveDateTime, text: impl Into<String>) -> Self {
        Self {
            id,
            timestamp,
            author: text.into(),
            content: String::new(),
            is_system_message: true,
        }
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the message id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the author (or notice text for system messages).
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns `true` for system notices.
    pub fn is_system_message(&self) -> bool {
        self.is_system_message
    }

    /// Returns the notice text of a system message, `None` for authored ones.
    pub fn system_text(&self) -> Option<&str> {
        self.is_system_message.then_some(self.author.as_str())
    }

    /// Returns `true` if the content spans several lines.
    pub fn is_multiline(&self) -> bool {
        self.content.contains('\n')
    }
}
