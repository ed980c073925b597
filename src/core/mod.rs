//! Querying and rendering parsed records.
//!
//! This module contains:
//! - [`filter`] - Message filtering by keyword, speaker and date
//! - [`models`] - Rendering options
//! - [`output`] - Format renderers (text, CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() {
//! use linechat::core::{
//!     FilterSpec, OutputConfig,
//!     filter_messages, apply_filters,
//!     to_text, to_csv, to_json, to_jsonl,
//! };
//! # }
//! ```

pub mod filter;
pub mod models;
pub mod output;

// Re-export main types for convenience
pub use filter::{FilterResult, FilterSpec, apply_filters, filter_messages};
pub use models::OutputConfig;

// Re-export Message from the crate root
pub use crate::Message;

pub use output::{to_text, write_text};
// Conditionally re-export output writers
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
