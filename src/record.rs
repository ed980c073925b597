//! The assembled result of parsing one export file.
//!
//! A [`ChatRecord`] is built once per load by the parser and is never
//! mutated afterwards. Re-loading a file produces a brand new record.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::Message;

/// Group name used when the export carries no `[LINE]` title line.
pub const DEFAULT_GROUP_NAME: &str = "未命名聊天室";

/// An optional `[start, end]` pair of date-times.
///
/// Used both for the span of a [`ChatRecord`] and for the date constraint of
/// a [`FilterSpec`](crate::core::filter::FilterSpec).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Lower bound, `None` when unbounded or unknown.
    pub start: Option<NaiveDateTime>,
    /// Upper bound, `None` when unbounded or unknown.
    pub end: Option<NaiveDateTime>,
}

impl DateRange {
    /// Creates a range from two optional bounds.
    pub fn new(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Self {
        Self { start, end }
    }

    /// Returns `true` when neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Normalized, queryable contents of a chat export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRecord {
    /// Chat room title from the `[LINE]` line, or [`DEFAULT_GROUP_NAME`].
    pub group_name: String,

    /// When the export was saved, if the header said so.
    pub export_date: Option<NaiveDateTime>,

    /// All messages in file order.
    pub messages: Vec<Message>,

    /// Authors of non-system messages, deduplicated and sorted.
    pub speakers: Vec<String>,

    /// Timestamps of the first and last message.
    pub date_range: DateRange,
}

impl ChatRecord {
    /// Assembles a record from the parser's output.
    ///
    /// `speakers` is the set the parser accumulated while scanning; it is
    /// sorted here. The date range is taken from the first and last message,
    /// in file order, without re-sorting.
    pub fn assemble(
        group_name: impl Into<String>,
        export_date: Option<NaiveDateTime>,
        messages: Vec<Message>,
        speakers: BTreeSet<String>,
    ) -> Self {
        let date_range = date_span(&messages);
        Self {
            group_name: group_name.into(),
            export_date,
            messages,
            speakers: sort_speakers(speakers),
            date_range,
        }
    }

    /// Assembles a record from a materialized message list, deriving the
    /// speaker set from the messages themselves.
    pub fn from_messages(
        group_name: impl Into<String>,
        export_date: Option<NaiveDateTime>,
        messages: Vec<Message>,
    ) -> Self {
        let speakers = speakers_of(&messages).into_iter().collect();
        Self::assemble(group_name, export_date, messages, speakers)
    }

    /// Returns the number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if no message was recognized.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the number of system notices.
    pub fn system_message_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_system_message).count()
    }

    /// Counts authored messages per speaker.
    pub fn message_count_by_speaker(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for msg in self.messages.iter().filter(|m| !m.is_system_message) {
            *counts.entry(msg.author.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

impl Default for ChatRecord {
    fn default() -> Self {
        Self::assemble(DEFAULT_GROUP_NAME, None, Vec::new(), BTreeSet::new())
    }
}

/// Returns the sorted, deduplicated authors of non-system messages.
pub fn speakers_of(messages: &[Message]) -> Vec<String> {
    let unique: BTreeSet<String> = messages
        .iter()
        .filter(|m| !m.is_system_message && !m.author.is_empty())
        .map(|m| m.author.clone())
        .collect();
    sort_speakers(unique)
}

/// Orders speakers by UTF-16 code units, the order the LINE viewer uses.
/// It differs from byte order only for characters outside the BMP, which
/// sort before the upper BMP (U+E000 and above).
fn sort_speakers(unique: BTreeSet<String>) -> Vec<String> {
    let mut speakers: Vec<String> = unique.into_iter().collect();
    speakers.sort_by(|a, b| a.encode_utf16().cmp(b.encode_utf16()));
    speakers
}

/// Returns the timestamps of the first and last message.
pub fn date_span(messages: &[Message]) -> DateRange {
    DateRange {
        start: messages.first().map(|m| m.timestamp),
        end: messages.last().map(|m| m.timestamp),
    }
}
