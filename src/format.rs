//! Output format selection.
//!
//! [`OutputFormat`] names a renderer; [`write_to_format`] and
//! [`to_format_string`] dispatch to it. Output always goes to a writer or a
//! string, never to a file chosen by the library.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> linechat::Result<()> {
//! use linechat::format::{OutputFormat, to_format_string};
//! use linechat::core::models::OutputConfig;
//! use linechat::parse_str;
//!
//! let record = parse_str("2022/03/31（四）\n上午09:46\tUserA\tHello\n");
//!
//! let format: OutputFormat = "jsonl".parse().unwrap();
//! let jsonl = to_format_string(&record.messages, format, &OutputConfig::new())?;
//! assert_eq!(jsonl.lines().count(), 1);
//! # Ok(())
//! # }
//! ```

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::Message;
use crate::core::models::OutputConfig;
use crate::core::output::{to_text, write_text};
use crate::error::LineChatError;

/// Output format for rendered messages.
///
/// - [`Text`](OutputFormat::Text) - One readable line per message
/// - [`Csv`](OutputFormat::Csv) - Semicolon-delimited, spreadsheet friendly
/// - [`Json`](OutputFormat::Json) - Structured array, good for APIs
/// - [`Jsonl`](OutputFormat::Jsonl) - One JSON per line, good for `jq` and pipelines
///
/// # Example
///
/// ```rust
/// use linechat::format::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("ndjson").unwrap();
/// assert_eq!(format, OutputFormat::Jsonl);
/// assert_eq!(format.mime_type(), "application/x-ndjson");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Human-readable lines (default)
    #[default]
    Text,

    /// CSV with semicolon delimiter
    Csv,

    /// JSON array of messages
    Json,

    /// JSON Lines - one JSON object per line
    ///
    /// Also known as NDJSON.
    #[cfg_attr(feature = "cli", value(alias = "ndjson"))]
    Jsonl,
}

impl OutputFormat {
    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["text", "csv", "json", "jsonl", "ndjson"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[
            OutputFormat::Text,
            OutputFormat::Csv,
            OutputFormat::Json,
            OutputFormat::Jsonl,
        ]
    }

    /// Returns the MIME type for this format.
    ///
    /// # Example
    ///
    /// ```rust
    /// use linechat::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::Json.mime_type(), "application/json");
    /// ```
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text/plain",
            OutputFormat::Csv => "text/csv",
            OutputFormat::Json => "application/json",
            OutputFormat::Jsonl => "application/x-ndjson",
        }
    }

    /// Cargo feature needed to render this format, if any.
    pub fn required_feature(&self) -> Option<&'static str> {
        match self {
            OutputFormat::Text => None,
            OutputFormat::Csv => Some("csv-output"),
            OutputFormat::Json | OutputFormat::Jsonl => Some("json-output"),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "Text"),
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

fn missing_feature(format: OutputFormat) -> LineChatError {
    LineChatError::invalid_format(
        "output",
        format!(
            "Output format {:?} requires the '{}' feature to be enabled",
            format,
            format.required_feature().unwrap_or_default()
        ),
    )
}

/// Renders messages into `writer` in the specified format.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The writer fails
#[allow(unused_variables)]
pub fn write_to_format<'a, W: Write>(
    messages: impl IntoIterator<Item = &'a Message>,
    writer: W,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<(), LineChatError> {
    match format {
        OutputFormat::Text => Ok(write_text(messages, writer, config)?),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(messages, writer, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(messages, writer, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(messages, writer, config),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}

/// Converts messages to a string in the specified format.
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "csv-output")]
/// # fn example() -> linechat::Result<()> {
/// use linechat::format::{OutputFormat, to_format_string};
/// use linechat::core::models::OutputConfig;
///
/// let record = linechat::parse_str("2022/03/31（四）\n上午09:46\tUserA\tHello\n");
/// let csv = to_format_string(&record.messages, OutputFormat::Csv, &OutputConfig::new())?;
/// # Ok(())
/// # }
/// ```
#[allow(unused_variables)]
pub fn to_format_string<'a>(
    messages: impl IntoIterator<Item = &'a Message>,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String, LineChatError> {
    match format {
        OutputFormat::Text => Ok(to_text(messages, config)),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(messages, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(messages, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(messages, config),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}
