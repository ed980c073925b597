//! Line grammars for LINE chat exports.
//!
//! Two dialects exist. The mobile app writes:
//!
//! ```text
//! [LINE] 測試群組
//! 儲存日期： 2026/01/03 01:14
//!
//! 2022/03/31（四）
//! 上午09:46	UserA	Hello
//! 上午11:09		UserB unsent a message
//! ```
//!
//! The desktop app writes dotted dates, a spelled-out weekday and a 24-hour
//! clock, and its lines sometimes arrive with tabs converted to spaces:
//!
//! ```text
//! 2025.02.15 星期六
//! 17:22 UserPC1 測試訊息1
//! 08:26 系統訊息測試
//! ```
//!
//! Every grammar here is a pure function returning `Some(match)` or `None`.
//! Message lines are tried against an ordered list of layouts, tab-delimited
//! first, and the first match wins.

use std::sync::LazyLock;

use chrono::{Months, NaiveDate, NaiveDateTime, TimeDelta};
use regex::{Captures, Regex};

use super::timestamp::{Meridiem, resolve};

// 2022/03/31（四）  |  2025.02.15 星期六  |  2022/03/31
static DATE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})[/.]([0-9]{2})[/.]([0-9]{2})(?:（[一二三四五六日]）|\s+星期[一二三四五六日])?\s*$")
        .expect("date header pattern is valid")
});

// 儲存日期： 2026/01/03 01:14
static EXPORT_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^儲存日期[：:]\s*([0-9]{4})[/.]([0-9]{2})[/.]([0-9]{2})\s+([0-9]{2}):([0-9]{2})\s*$")
        .expect("export date pattern is valid")
});

// 上午09:46<TAB>Sender<TAB>Content  |  08:26<TAB>System text
static TAB_MESSAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(上午|下午))?([0-9]{1,2}):([0-9]{2})\t(?:([^\t]*)\t)?(.*)$")
        .expect("tab message pattern is valid")
});

// 17:22 Sender Content  |  08:26 System text
static SPACE_MESSAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(上午|下午))?([0-9]{1,2}):([0-9]{2})\s+(?:(\S+)\s+)?(.*)$")
        .expect("space message pattern is valid")
});

const GROUP_NAME_MARKER: &str = "[LINE]";

/// Column layout of a message line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Columns separated by tabs (mobile, and desktop when tabs survive).
    Tab,
    /// Columns separated by runs of whitespace (desktop fallback).
    Space,
}

impl Layout {
    /// Layouts in the order they are attempted.
    pub const PRIORITY: [Layout; 2] = [Layout::Tab, Layout::Space];

    fn regex(self) -> &'static Regex {
        match self {
            Layout::Tab => &*TAB_MESSAGE,
            Layout::Space => &*SPACE_MESSAGE,
        }
    }
}

/// The pieces of a recognized message line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageLine<'a> {
    /// Meridiem marker, present on 12-hour clocks only.
    pub meridiem: Option<Meridiem>,
    /// Hour as written (not range checked).
    pub hour: u32,
    /// Minute as written (not range checked).
    pub minute: u32,
    /// Author column. `None` when the column is absent, `Some("")` when it is
    /// present but empty (two adjacent tabs).
    pub author: Option<&'a str>,
    /// Everything after the author column.
    pub content: &'a str,
    /// Which layout matched.
    pub layout: Layout,
}

impl MessageLine<'_> {
    /// A line without a usable author column is a system notice.
    pub fn is_system(&self) -> bool {
        self.author.is_none_or(str::is_empty)
    }
}

/// Classification of one physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `[LINE] <name>` title line.
    GroupName(&'a str),
    /// "Saved on" metadata line.
    ExportDate(NaiveDateTime),
    /// Date section header.
    DateHeader(NaiveDate),
    /// Timestamped message line.
    Message(MessageLine<'a>),
    /// Empty or whitespace-only line.
    Blank,
    /// Nothing matched.
    Unrecognized,
}

/// Classifies a line.
///
/// `in_header` enables the metadata grammars (group name, export date),
/// which only apply to the first few lines of a file. `date_known` tells
/// whether a date header has been seen; message lines before the first
/// header are [`LineKind::Unrecognized`].
pub fn classify(line: &str, in_header: bool, date_known: bool) -> LineKind<'_> {
    if in_header {
        if let Some(name) = match_group_name(line) {
            return LineKind::GroupName(name);
        }
        if let Some(saved) = match_export_date(line) {
            return LineKind::ExportDate(saved);
        }
    }

    if line.trim().is_empty() {
        return LineKind::Blank;
    }

    if let Some(date) = match_date_header(line) {
        return LineKind::DateHeader(date);
    }

    if date_known {
        if let Some(message) = match_message_line(line) {
            return LineKind::Message(message);
        }
    }

    LineKind::Unrecognized
}

/// Matches `[LINE] <name>` and returns the trimmed name.
pub fn match_group_name(line: &str) -> Option<&str> {
    line.strip_prefix(GROUP_NAME_MARKER).map(str::trim)
}

/// Matches the "saved on" metadata line.
///
/// Out-of-range fields roll over like the clock values of message lines:
/// `2026/02/30 24:00` is 2026-03-03 00:00.
pub fn match_export_date(line: &str) -> Option<NaiveDateTime> {
    let caps = EXPORT_DATE.captures(line)?;
    let date = date_from_captures(&caps)?;
    Some(resolve(date, None, number(&caps, 4)?, number(&caps, 5)?))
}

/// Matches a date section header.
///
/// Impossible calendar days roll over: `2022/02/30` is 2022-03-02.
pub fn match_date_header(line: &str) -> Option<NaiveDate> {
    let caps = DATE_HEADER.captures(line)?;
    date_from_captures(&caps)
}

/// Matches a message line, trying each [`Layout`] in priority order.
pub fn match_message_line(line: &str) -> Option<MessageLine<'_>> {
    Layout::PRIORITY
        .iter()
        .find_map(|&layout| match_layout(line, layout))
}

fn match_layout(line: &str, layout: Layout) -> Option<MessageLine<'_>> {
    let caps = layout.regex().captures(line)?;
    Some(MessageLine {
        meridiem: caps.get(1).and_then(|m| Meridiem::from_marker(m.as_str())),
        hour: number(&caps, 2)?,
        minute: number(&caps, 3)?,
        author: caps.get(4).map(|m| m.as_str()),
        content: caps.get(5).map_or("", |m| m.as_str()),
        layout,
    })
}

fn date_from_captures(caps: &Captures<'_>) -> Option<NaiveDate> {
    let year = caps.get(1)?.as_str().parse().ok()?;
    rolled_date(year, number(caps, 2)?, number(caps, 3)?)
}

/// Builds a date by offsetting from January 1st, so month 13 or day 30 of
/// February carry into the following month or year. Month 0 and day 0 step
/// back one month or one day.
fn rolled_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let january = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let first_of_month = match month.checked_sub(1) {
        Some(offset) => january.checked_add_months(Months::new(offset))?,
        None => january.checked_sub_months(Months::new(1))?,
    };
    first_of_month.checked_add_signed(TimeDelta::days(i64::from(day) - 1))
}

fn number(caps: &Captures<'_>, group: usize) -> Option<u32> {
    caps.get(group)?.as_str().parse().ok()
}
