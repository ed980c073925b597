//! Filter messages by keyword, speaker and date range.
//!
//! This module provides [`FilterSpec`] for defining filter criteria,
//! [`filter_messages`] for borrowing matches out of a record, and
//! [`apply_filters`] for owning pipelines.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Keyword | [`with_keyword`](FilterSpec::with_keyword) | Case-insensitive substring of the content |
//! | Speaker | [`with_speaker`](FilterSpec::with_speaker) | Author is one of the selected speakers |
//! | Date from | [`with_date_from`](FilterSpec::with_date_from) | Messages on or after date |
//! | Date to | [`with_date_to`](FilterSpec::with_date_to) | Messages on or before the end of date |
//!
//! # Examples
//!
//! ```
//! use linechat::core::filter::{FilterSpec, filter_messages};
//! use linechat::parse_str;
//!
//! # fn main() -> linechat::Result<()> {
//! let record = parse_str(
//!     "2022/04/01（五）\n\
//!      上午09:00\tAlice\tGood morning\n\
//!      2022/04/02（六）\n\
//!      下午11:59\tBob\tgood night\n\
//!      下午11:59\tAlice\tnight\n",
//! );
//!
//! let spec = FilterSpec::new()
//!     .with_keyword("GOOD")
//!     .with_date_from("2022-04-02")?
//!     .with_date_to("2022-04-02")?;
//!
//! let result = filter_messages(&record.messages, &spec);
//! assert_eq!(result.count, 1);
//! assert_eq!(result.matches[0].author, "Bob");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - A keyword made only of whitespace does not constrain anything
//! - Speaker matching is exact; messages with an empty author never match
//! - The end bound covers the whole calendar day of `end`
//! - Multiple filters are combined with AND logic

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::error::LineChatError;
use crate::record::DateRange;

/// Criteria for filtering messages.
///
/// Filters are combined with AND logic: a message must match all active
/// filters to be included in the result.
///
/// # Examples
///
/// ```
/// use linechat::core::filter::FilterSpec;
///
/// # fn main() -> linechat::Result<()> {
/// // Keyword only
/// let by_keyword = FilterSpec::new().with_keyword("lunch");
///
/// // Two speakers within April
/// let combined = FilterSpec::new()
///     .with_speakers(["Alice", "Bob"])
///     .with_date_from("2022-04-01")?
///     .with_date_to("2022-04-30")?;
///
/// assert!(combined.has_speakers() && combined.has_date_range());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    /// Case-insensitive substring searched in message content.
    pub keyword: String,

    /// Speakers to keep. Empty means no speaker constraint.
    pub selected_speakers: BTreeSet<String>,

    /// Inclusive date bounds. The end bound extends to the end of its day.
    pub date_range: DateRange,
}

impl FilterSpec {
    /// Creates a new empty filter.
    ///
    /// No filters are active by default; all messages pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the keyword.
    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self
    }

    /// Adds one speaker to the selection.
    #[must_use]
    pub fn with_speaker(mut self, speaker: impl Into<String>) -> Self {
        self.selected_speakers.insert(speaker.into());
        self
    }

    /// Adds several speakers to the selection.
    #[must_use]
    pub fn with_speakers<I, S>(mut self, speakers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_speakers.extend(speakers.into_iter().map(Into::into));
        self
    }

    /// Sets the start bound directly.
    #[must_use]
    pub fn with_start(mut self, start: NaiveDateTime) -> Self {
        self.date_range.start = Some(start);
        self
    }

    /// Sets the end bound directly. Only its calendar date matters.
    #[must_use]
    pub fn with_end(mut self, end: NaiveDateTime) -> Self {
        self.date_range.end = Some(end);
        self
    }

    /// Sets the start bound to midnight of a `YYYY-MM-DD` date.
    ///
    /// # Errors
    ///
    /// Returns [`LineChatError::InvalidDate`] if the format is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use linechat::core::filter::FilterSpec;
    ///
    /// assert!(FilterSpec::new().with_date_from("2024-01-01").is_ok());
    /// assert!(FilterSpec::new().with_date_from("01/01/2024").is_err());
    /// ```
    pub fn with_date_from(self, date_str: &str) -> Result<Self, LineChatError> {
        let date = parse_date(date_str)?;
        Ok(self.with_start(date.and_time(NaiveTime::MIN)))
    }

    /// Sets the end bound to a `YYYY-MM-DD` date, covering the whole day.
    ///
    /// # Errors
    ///
    /// Returns [`LineChatError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(self, date_str: &str) -> Result<Self, LineChatError> {
        let date = parse_date(date_str)?;
        Ok(self.with_end(date.and_time(NaiveTime::MIN)))
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.has_keyword() || self.has_speakers() || self.has_date_range()
    }

    /// Returns `true` if the keyword holds anything besides whitespace.
    pub fn has_keyword(&self) -> bool {
        !self.keyword.trim().is_empty()
    }

    /// Returns `true` if a speaker selection is active.
    pub fn has_speakers(&self) -> bool {
        !self.selected_speakers.is_empty()
    }

    /// Returns `true` if either date bound is set.
    pub fn has_date_range(&self) -> bool {
        !self.date_range.is_unbounded()
    }
}

/// Matches produced by [`filter_messages`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterResult<'a> {
    /// Matching messages in their original order.
    pub matches: Vec<&'a Message>,
    /// Number of matches.
    pub count: usize,
}

impl FilterResult<'_> {
    /// Returns `true` if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Compiled form of a [`FilterSpec`], built once per filter call.
struct Predicate<'s> {
    keyword: Option<String>,
    speakers: Option<&'s BTreeSet<String>>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
}

impl<'s> Predicate<'s> {
    fn new(spec: &'s FilterSpec) -> Self {
        Self {
            // Matching uses the keyword as typed, surrounding spaces included.
            keyword: spec.has_keyword().then(|| spec.keyword.to_lowercase()),
            speakers: spec.has_speakers().then_some(&spec.selected_speakers),
            start: spec.date_range.start,
            end: spec.date_range.end.and_then(end_of_day),
        }
    }

    fn matches(&self, msg: &Message) -> bool {
        if let Some(keyword) = &self.keyword {
            if !msg.content.to_lowercase().contains(keyword.as_str()) {
                return false;
            }
        }

        if let Some(speakers) = self.speakers {
            if msg.author.is_empty() || !speakers.contains(&msg.author) {
                return false;
            }
        }

        if self.start.is_some_and(|start| msg.timestamp < start) {
            return false;
        }
        if self.end.is_some_and(|end| msg.timestamp > end) {
            return false;
        }

        true
    }
}

/// Returns the messages satisfying every active constraint of `spec`.
///
/// With no active constraint every message is returned, in order.
///
/// # Examples
///
/// ```
/// use linechat::core::filter::{FilterSpec, filter_messages};
/// use linechat::parse_str;
///
/// let record = parse_str("2022/03/31（四）\n上午09:46\tUserA\tHello\n上午09:47\tUserB\tHi\n");
///
/// let all = filter_messages(&record.messages, &FilterSpec::new());
/// assert_eq!(all.count, 2);
///
/// let only_b = filter_messages(&record.messages, &FilterSpec::new().with_speaker("UserB"));
/// assert_eq!(only_b.matches[0].content, "Hi");
/// ```
pub fn filter_messages<'a>(messages: &'a [Message], spec: &FilterSpec) -> FilterResult<'a> {
    let matches: Vec<&Message> = if spec.is_active() {
        let predicate = Predicate::new(spec);
        messages.iter().filter(|msg| predicate.matches(msg)).collect()
    } else {
        messages.iter().collect()
    };

    FilterResult {
        count: matches.len(),
        matches,
    }
}

/// Owning variant of [`filter_messages`].
///
/// If no filters are active, returns the original messages unchanged.
pub fn apply_filters(messages: Vec<Message>, spec: &FilterSpec) -> Vec<Message> {
    if !spec.is_active() {
        return messages;
    }

    let predicate = Predicate::new(spec);
    messages
        .into_iter()
        .filter(|msg| predicate.matches(msg))
        .collect()
}

/// Parse a date string in YYYY-MM-DD format.
fn parse_date(date_str: &str) -> Result<NaiveDate, LineChatError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| LineChatError::invalid_date(date_str))
}

/// 23:59:59.999 on the calendar day of `end`.
fn end_of_day(end: NaiveDateTime) -> Option<NaiveDateTime> {
    end.date().and_hms_milli_opt(23, 59, 59, 999)
}
