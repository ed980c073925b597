//! # linechat
//!
//! A Rust library for parsing and searching LINE chat-history text exports.
//!
//! ## Overview
//!
//! LINE writes chat history as plain text in two dialects:
//! - **Mobile** — slash dates with a parenthesised weekday, 12-hour clock
//!   with `上午`/`下午`, tab-separated columns
//! - **Desktop** — dotted dates with `星期X`, 24-hour clock, columns separated
//!   by tabs or by spaces
//!
//! Both are parsed into one [`ChatRecord`]: the group name, the export date,
//! every [`Message`] in file order, the sorted speaker list and the date
//! span. Parsing never fails on content; unrecognized lines are skipped.
//! The [`core::filter`] module then answers keyword / speaker / date
//! queries over the record.
//!
//! ## Quick Start
//!
//! ```rust
//! use linechat::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let record = parse_str(
//!         "[LINE] 測試群組\n\
//!          儲存日期： 2026/01/03 01:14\n\
//!          \n\
//!          2022/03/31（四）\n\
//!          上午09:46\tUserA\tHello\n\
//!          上午11:09\t\tUserB unsent a message\n",
//!     );
//!
//!     assert_eq!(record.group_name, "測試群組");
//!     assert_eq!(record.speakers, vec!["UserA"]);
//!     assert!(record.messages[1].is_system_message);
//!
//!     let spec = FilterSpec::new().with_keyword("hello");
//!     let hits = filter_messages(&record.messages, &spec);
//!     assert_eq!(hits.count, 1);
//!
//!     println!("{}", to_text(hits.matches, &OutputConfig::new()));
//!     Ok(())
//! }
//! ```
//!
//! ## Large Files
//!
//! With the `async` feature a parse can yield to a tokio runtime
//! ([`async_parser::parse_async`]) or run on a background worker that
//! publishes progress ([`async_parser::spawn_parse`]).
//!
//! ## Module Structure
//!
//! - [`parser`] — the line-at-a-time [`ChatScanner`](parser::ChatScanner) and
//!   the [`ChatParser`](parser::ChatParser) drivers
//! - [`parsing`] — stateless line grammars and timestamp resolution
//! - [`message`], [`record`] — the data model
//! - [`config`] — [`ParserConfig`](config::ParserConfig)
//! - [`progress`] — progress snapshots and callbacks
//! - [`core`] — filtering and output rendering
//! - [`format`] — [`OutputFormat`](format::OutputFormat) dispatch
//! - [`async_parser`] — async and background parsing (feature `async`)
//! - [`cli`] — CLI arguments (feature `cli`)
//! - [`error`] — [`LineChatError`], [`Result`]
//! - [`prelude`] — Convenient re-exports

#[cfg(feature = "async")]
pub mod async_parser;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod parser;
pub mod parsing;
pub mod progress;
pub mod record;

// Re-export the main types at the crate root for convenience
pub use error::{LineChatError, Result};
pub use message::Message;
pub use parser::{parse_file, parse_str, parse_with_progress};
pub use record::{ChatRecord, DateRange};

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use linechat::prelude::*;
/// ```
pub mod prelude {
    // Data model
    pub use crate::Message;
    pub use crate::record::{ChatRecord, DateRange};

    // Error types
    pub use crate::error::{LineChatError, Result};

    // Parsing
    pub use crate::config::ParserConfig;
    pub use crate::parser::{ChatParser, ChatScanner, parse_file, parse_str, parse_with_progress};
    pub use crate::progress::{Progress, ProgressCallback};

    // Filtering
    pub use crate::core::filter::{FilterResult, FilterSpec, apply_filters, filter_messages};

    // Output
    pub use crate::core::models::OutputConfig;
    pub use crate::core::output::{to_text, write_text};
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};
    pub use crate::format::OutputFormat;

    // Async
    #[cfg(feature = "async")]
    pub use crate::async_parser::{AsyncChatParser, AsyncParser, ParseHandle, parse_async, spawn_parse};
}
