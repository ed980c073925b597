//! Parser for LINE chat-history exports.
//!
//! The heart of this module is [`ChatScanner`], a single-pass state machine
//! that is fed one physical line at a time and turns the export into a
//! [`ChatRecord`]. [`ChatParser`] and the free functions drive a scanner
//! over a whole string or file and report progress along the way.
//!
//! # Example
//!
//! ```rust
//! use linechat::parser::ChatParser;
//!
//! let export = "[LINE] 測試群組\n\
//!               2022/03/31（四）\n\
//!               上午09:46\tUserA\tHello\n\
//!               上午10:38\tUserB\t\"two\n\
//!               lines\"\n";
//!
//! let record = ChatParser::new().parse_str(export);
//!
//! assert_eq!(record.group_name, "測試群組");
//! assert_eq!(record.messages.len(), 2);
//! assert_eq!(record.messages[1].content, "two\nlines");
//! assert_eq!(record.speakers, vec!["UserA", "UserB"]);
//! ```
//!
//! # Recovery rules
//!
//! - Lines matching no grammar are skipped.
//! - A quoted block that never closes is emitted as-is when the next message
//!   line starts, or at end of input.
//! - Missing metadata falls back to the configured group name and no export
//!   date.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, trace};

use crate::config::ParserConfig;
use crate::error::Result;
use crate::parsing::{LineKind, MessageLine, classify, resolve};
use crate::progress::Progress;
use crate::{ChatRecord, Message};

/// One physical line of the input, without its line terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannedLine<'a> {
    /// Zero-based line number.
    pub index: usize,
    /// Line text with `\n` and an optional trailing `\r` removed.
    pub text: &'a str,
    /// Input bytes consumed up to and including this line's terminator.
    pub consumed: usize,
    /// Total input size in bytes.
    pub total: usize,
}

impl ScannedLine<'_> {
    /// Progress snapshot after reading this line.
    pub fn progress(&self) -> Progress {
        Progress::new(self.consumed, self.total, self.index + 1)
    }
}

/// Iterator over the physical lines of an export.
///
/// Accepts both `\n` and `\r\n` line endings. A trailing newline does not
/// produce an extra empty line. A leading byte-order mark is skipped.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    content: &'a str,
    consumed: usize,
    index: usize,
}

impl<'a> Lines<'a> {
    /// Creates a line iterator over `content`.
    pub fn new(content: &'a str) -> Self {
        Self {
            content: content.strip_prefix('\u{FEFF}').unwrap_or(content),
            consumed: 0,
            index: 0,
        }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = ScannedLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.content[self.consumed..];
        if rest.is_empty() {
            return None;
        }

        let (raw, advance) = match rest.find('\n') {
            Some(pos) => (&rest[..pos], pos + 1),
            None => (rest, rest.len()),
        };
        self.consumed += advance;

        let line = ScannedLine {
            index: self.index,
            text: raw.strip_suffix('\r').unwrap_or(raw),
            consumed: self.consumed,
            total: self.content.len(),
        };
        self.index += 1;
        Some(line)
    }
}

/// A quoted message whose closing quote has not been seen yet.
#[derive(Debug)]
struct PendingMessage {
    id: u64,
    timestamp: NaiveDateTime,
    author: String,
    content: String,
}

impl PendingMessage {
    fn into_message(self) -> Message {
        Message::new(self.id, self.timestamp, self.author, self.content)
    }
}

/// Everything the scanner carries from one line to the next.
#[derive(Debug)]
struct ScanState {
    group_name: Option<String>,
    export_date: Option<NaiveDateTime>,
    current_date: Option<NaiveDate>,
    pending: Option<PendingMessage>,
    next_id: u64,
    messages: Vec<Message>,
    speakers: BTreeSet<String>,
}

impl ScanState {
    fn new() -> Self {
        Self {
            group_name: None,
            export_date: None,
            current_date: None,
            pending: None,
            next_id: 1,
            messages: Vec::new(),
            speakers: BTreeSet::new(),
        }
    }

    fn take_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Line-at-a-time state machine for LINE exports.
///
/// Each scanner parses exactly one export. Feed it every physical line in
/// order with [`feed_line`](Self::feed_line), then call
/// [`finish`](Self::finish) to obtain the record.
///
/// ```rust
/// use linechat::parser::ChatScanner;
///
/// let mut scanner = ChatScanner::new();
/// scanner.feed_line("2025.02.15 星期六");
/// scanner.feed_line("17:22 UserPC1 \"first");
/// assert!(scanner.has_pending());
/// scanner.feed_line("second\"");
/// assert!(!scanner.has_pending());
///
/// let record = scanner.finish();
/// assert_eq!(record.messages[0].content, "first\nsecond");
/// ```
#[derive(Debug)]
pub struct ChatScanner {
    config: ParserConfig,
    state: ScanState,
    lines_read: usize,
    skipped_lines: usize,
}

impl ChatScanner {
    /// Creates a scanner with default configuration.
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Creates a scanner with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            state: ScanState::new(),
            lines_read: 0,
            skipped_lines: 0,
        }
    }

    /// Processes one physical line.
    ///
    /// The line must not include its terminator. [`Lines`] already removes
    /// `\n` and one `\r`; any further `\r` is part of the line.
    pub fn feed_line(&mut self, line: &str) {
        let index = self.lines_read;
        self.lines_read += 1;

        let in_header = index < self.config.metadata_lines;
        match classify(line, in_header, self.state.current_date.is_some()) {
            LineKind::GroupName(name) => self.state.group_name = Some(name.to_string()),
            LineKind::ExportDate(saved) => self.state.export_date = Some(saved),
            LineKind::Blank => {}
            LineKind::DateHeader(date) => self.state.current_date = Some(date),
            LineKind::Message(message) => self.start_message(&message),
            LineKind::Unrecognized => self.continue_or_skip(index, line),
        }
    }

    /// Closes the scan and assembles the record.
    ///
    /// A quoted block still open at this point is emitted as-is.
    pub fn finish(mut self) -> ChatRecord {
        if self.state.pending.is_some() {
            trace!("flushing unterminated quoted message at end of input");
            self.flush_pending();
        }

        let state = self.state;
        debug!(
            lines = self.lines_read,
            messages = state.messages.len(),
            skipped = self.skipped_lines,
            speakers = state.speakers.len(),
            "parsed LINE export"
        );

        ChatRecord::assemble(
            state.group_name.unwrap_or(self.config.default_group_name),
            state.export_date,
            state.messages,
            state.speakers,
        )
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Messages completed so far.
    pub fn messages(&self) -> &[Message] {
        &self.state.messages
    }

    /// Returns `true` while a quoted multi-line message is open.
    pub fn has_pending(&self) -> bool {
        self.state.pending.is_some()
    }

    /// The active date header, if one has been seen.
    pub fn current_date(&self) -> Option<NaiveDate> {
        self.state.current_date
    }

    /// Number of physical lines fed so far.
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Number of lines skipped as unrecognized.
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    fn start_message(&mut self, line: &MessageLine<'_>) {
        let Some(date) = self.state.current_date else {
            return;
        };

        self.flush_pending();

        let timestamp = resolve(date, line.meridiem, line.hour, line.minute);
        let id = self.state.take_id();
        trace!(id, layout = ?line.layout, "message line");

        // System notices carry their text in the author slot.
        let author = match line.author {
            Some(author) if !author.is_empty() => author,
            _ => {
                self.state
                    .messages
                    .push(Message::system(id, timestamp, line.content));
                return;
            }
        };

        self.state.speakers.insert(author.to_string());

        let content = line.content;
        if let Some(opened) = content.strip_prefix('"').filter(|_| !content.ends_with('"')) {
            self.state.pending = Some(PendingMessage {
                id,
                timestamp,
                author: author.to_string(),
                content: opened.to_string(),
            });
        } else {
            self.state
                .messages
                .push(Message::new(id, timestamp, author, unquote(content)));
        }
    }

    fn continue_or_skip(&mut self, index: usize, line: &str) {
        let Some(pending) = self.state.pending.as_mut() else {
            self.skipped_lines += 1;
            trace!(line = index + 1, "skipping unrecognized line");
            return;
        };

        pending.content.push('\n');
        match line.strip_suffix('"') {
            Some(closing) => {
                pending.content.push_str(closing);
                self.flush_pending();
            }
            None => pending.content.push_str(line),
        }
    }

    fn flush_pending(&mut self) {
        if let Some(pending) = self.state.pending.take() {
            self.state.messages.push(pending.into_message());
        }
    }
}

impl Default for ChatScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Strips one leading and one trailing quote from `"…"` content.
fn unquote(content: &str) -> &str {
    match content.strip_prefix('"') {
        Some(inner) if content.ends_with('"') => inner.strip_suffix('"').unwrap_or(inner),
        _ => content,
    }
}

/// Parser for LINE chat-history text exports.
///
/// # Example
///
/// ```rust,no_run
/// use linechat::parser::ChatParser;
///
/// let parser = ChatParser::new();
/// let record = parser.parse("line_chat.txt".as_ref())?;
/// println!("{} messages from {} speakers", record.len(), record.speakers.len());
/// # Ok::<(), linechat::LineChatError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChatParser {
    config: ParserConfig,
}

impl ChatParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Reads and parses an export file.
    ///
    /// # Errors
    ///
    /// Returns [`LineChatError::Io`](crate::LineChatError::Io) if the file
    /// cannot be read or is not valid UTF-8. Parsing itself never fails.
    pub fn parse(&self, path: &Path) -> Result<ChatRecord> {
        let content = fs::read_to_string(path)?;
        Ok(self.parse_str(&content))
    }

    /// Reads and parses an export file (convenience method accepting &str path).
    pub fn parse_file(&self, path: &str) -> Result<ChatRecord> {
        self.parse(Path::new(path))
    }

    /// Parses export content already in memory.
    pub fn parse_str(&self, content: &str) -> ChatRecord {
        self.parse_str_with_progress(content, |_| {})
    }

    /// Parses export content, reporting integer percentages to `on_progress`.
    ///
    /// The callback always receives a final `100`.
    pub fn parse_str_with_progress(&self, content: &str, mut on_progress: impl FnMut(u8)) -> ChatRecord {
        let mut scanner = ChatScanner::with_config(self.config.clone());

        for line in Lines::new(content) {
            let progress = line.progress();
            // The final 100 is reported once, after the scan.
            if self.config.is_checkpoint(line.index) && !progress.is_complete() {
                on_progress(progress.percent());
            }
            scanner.feed_line(line.text);
        }

        on_progress(100);
        scanner.finish()
    }
}

/// Parses export content with default configuration.
pub fn parse_str(content: &str) -> ChatRecord {
    ChatParser::new().parse_str(content)
}

/// Parses export content with default configuration, reporting progress.
pub fn parse_with_progress(content: &str, on_progress: impl FnMut(u8)) -> ChatRecord {
    ChatParser::new().parse_str_with_progress(content, on_progress)
}

/// Reads and parses an export file with default configuration.
pub fn parse_file(path: impl AsRef<Path>) -> Result<ChatRecord> {
    ChatParser::new().parse(path.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(lines: &[&str]) -> ChatRecord {
        let mut scanner = ChatScanner::new();
        for line in lines {
            scanner.feed_line(line);
        }
        scanner.finish()
    }

    // =========================================================================
    // Line splitting
    // =========================================================================

    #[test]
    fn test_lines_crlf_and_lf() {
        let lines: Vec<_> = Lines::new("a\r\nb\nc").map(|l| l.text).collect();
        assert_eq!(lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_lines_trailing_newline() {
        let lines: Vec<_> = Lines::new("a\nb\n").collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].consumed, 4);
        assert_eq!(lines[1].progress().percent(), 100);
    }

    #[test]
    fn test_lines_empty() {
        assert_eq!(Lines::new("").count(), 0);
    }

    // =========================================================================
    // State machine
    // =========================================================================

    #[test]
    fn test_message_before_date_header_is_skipped() {
        let mut scanner = ChatScanner::new();
        scanner.feed_line("上午09:46\tUserA\tHello");
        assert!(scanner.messages().is_empty());
        assert_eq!(scanner.skipped_lines(), 1);
    }

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let record = scan(&[
            "2022/03/31（四）",
            "上午09:46\tA\tone",
            "上午09:47\tB\t\"two",
            "still two\"",
            "上午09:48\t\tnotice",
        ]);
        let ids: Vec<u64> = record.messages.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_flush_on_new_message() {
        let record = scan(&[
            "2022/03/31（四）",
            "上午10:38\tUserC\t\"unterminated",
            "more text",
            "上午10:40\tUserD\tnext",
        ]);
        assert_eq!(record.messages.len(), 2);
        assert_eq!(record.messages[0].content, "unterminated\nmore text");
        assert_eq!(record.messages[1].content, "next");
    }

    #[test]
    fn test_flush_at_end_of_input() {
        let record = scan(&["2022/03/31（四）", "上午10:38\tUserC\t\"never closed", "tail"]);
        assert_eq!(record.messages.len(), 1);
        assert_eq!(record.messages[0].content, "never closed\ntail");
        assert!(!record.messages[0].is_system_message);
    }

    #[test]
    fn test_date_header_inside_pending_is_recognized() {
        let record = scan(&[
            "2022/03/31（四）",
            "下午11:59\tA\t\"open",
            "2022/04/01（五）",
            "上午12:01\tB\tnew day",
        ]);
        assert_eq!(record.messages.len(), 2);
        assert_eq!(record.messages[0].content, "open");
        assert_eq!(
            record.messages[1].timestamp.date(),
            NaiveDate::from_ymd_opt(2022, 4, 1).unwrap()
        );
    }

    #[test]
    fn test_blank_line_inside_pending_is_dropped() {
        let record = scan(&["2022/03/31（四）", "上午10:38\tA\t\"first", "", "second\""]);
        assert_eq!(record.messages[0].content, "first\nsecond");
    }

    #[test]
    fn test_quoted_single_line_is_unwrapped() {
        let record = scan(&["2022/03/31（四）", "上午10:38\tA\t\"quoted\""]);
        assert_eq!(record.messages[0].content, "quoted");
        assert!(!scanner_left_pending(&["2022/03/31（四）", "上午10:38\tA\t\"quoted\""]));
    }

    fn scanner_left_pending(lines: &[&str]) -> bool {
        let mut scanner = ChatScanner::new();
        for line in lines {
            scanner.feed_line(line);
        }
        scanner.has_pending()
    }

    #[test]
    fn test_lone_quote_becomes_empty() {
        let record = scan(&["2022/03/31（四）", "上午10:38\tA\t\""]);
        assert_eq!(record.messages[0].content, "");
    }

    #[test]
    fn test_system_message_quotes_untouched() {
        let record = scan(&["2022/03/31（四）", "上午10:38\t\t\"quoted notice"]);
        assert_eq!(record.messages.len(), 1);
        assert!(record.messages[0].is_system_message);
        assert_eq!(record.messages[0].author, "\"quoted notice");
    }

    #[test]
    fn test_metadata_only_in_header_window() {
        let record = scan(&["", "", "", "", "", "[LINE] Late title"]);
        assert_eq!(record.group_name, "未命名聊天室");

        let record = scan(&["", "", "", "", "[LINE] Title"]);
        assert_eq!(record.group_name, "Title");
    }

    #[test]
    fn test_unrecognized_lines_are_counted() {
        let mut scanner = ChatScanner::new();
        scanner.feed_line("garbage");
        scanner.feed_line("2022/03/31（四）");
        scanner.feed_line("more garbage");
        assert_eq!(scanner.skipped_lines(), 2);
        assert_eq!(scanner.lines_read(), 3);
    }

    #[test]
    fn test_lines_strip_exactly_one_carriage_return() {
        let lines: Vec<_> = Lines::new("x\r\r\ny\r\n").map(|l| l.text).collect();
        assert_eq!(lines, vec!["x\r", "y"]);
    }

    #[test]
    fn test_extra_carriage_return_stays_in_quoted_content() {
        let record = parse_str("2022/03/31（四）\n上午10:38\tA\t\"one\r\r\ntwo\"\r\n");
        assert_eq!(record.messages[0].content, "one\r\ntwo");
    }

    #[test]
    fn test_lines_skip_byte_order_mark() {
        let lines: Vec<_> = Lines::new("\u{FEFF}[LINE] G\nx").map(|l| l.text).collect();
        assert_eq!(lines, vec!["[LINE] G", "x"]);
        assert_eq!(Lines::new("\u{FEFF}").count(), 0);
    }

    #[test]
    fn test_byte_order_mark_keeps_group_name() {
        let record = parse_str("\u{FEFF}[LINE] 測試群組\n2022/03/31（四）\n上午09:46\tA\tHi\n");
        assert_eq!(record.group_name, "測試群組");
        assert_eq!(record.len(), 1);
    }

    // =========================================================================
    // Drivers
    // =========================================================================

    #[test]
    fn test_progress_reports_final_hundred() {
        let mut seen = Vec::new();
        let record = parse_with_progress("", |pct| seen.push(pct));
        assert!(record.is_empty());
        assert_eq!(seen, vec![100]);
    }

    #[test]
    fn test_progress_at_checkpoints() {
        let content: String = (0..10).map(|i| format!("line {i}\n")).collect();
        let parser = ChatParser::with_config(ParserConfig::new().with_yield_interval(4));
        let mut seen = Vec::new();
        parser.parse_str_with_progress(&content, |pct| seen.push(pct));

        // lines 0, 4, 8 plus the final report
        assert_eq!(seen.len(), 4);
        assert_eq!(*seen.last().unwrap(), 100);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_progress_reports_hundred_once() {
        let parser = ChatParser::with_config(ParserConfig::new().with_yield_interval(1));
        let mut seen = Vec::new();
        parser.parse_str_with_progress("a\nb\n", |pct| seen.push(pct));
        assert_eq!(seen, vec![50, 100]);
    }

    #[test]
    fn test_parse_missing_file() {
        let result = parse_file("definitely/not/here.txt");
        assert!(result.unwrap_err().is_io());
    }
}
