//! Command-line interface definition using clap.
//!
//! This module defines [`Args`], the argument structure of the `linechat`
//! binary, plus the conversions from raw arguments into the library's
//! [`FilterSpec`] and [`OutputConfig`].
//!
//! ```rust
//! use clap::Parser;
//! use linechat::cli::Args;
//!
//! let args = Args::parse_from(["linechat", "chat.txt", "--speaker", "UserA", "--from", "2022-04-01"]);
//! let spec = args.filter_spec().unwrap();
//! assert!(spec.has_speakers() && spec.has_date_range());
//! ```

use clap::{ArgAction, Parser};

use crate::core::filter::FilterSpec;
use crate::core::models::OutputConfig;
use crate::error::LineChatError;
use crate::format::OutputFormat;

/// Search and print LINE chat-history exports (mobile and desktop).
#[derive(Parser, Debug, Clone)]
#[command(name = "linechat")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    linechat line_chat.txt
    linechat line_chat.txt --summary
    linechat line_chat.txt --keyword 午餐 --speaker UserA
    linechat line_chat.txt --from 2022-04-01 --to 2022-04-02 --format jsonl
    RUST_LOG=linechat=trace linechat line_chat.txt > /dev/null")]
pub struct Args {
    /// Path to the exported .txt file
    pub input: String,

    /// Keep messages whose content contains this text (case-insensitive)
    #[arg(short, long, value_name = "TEXT")]
    pub keyword: Option<String>,

    /// Keep messages by this speaker (repeatable)
    #[arg(short, long = "speaker", value_name = "NAME")]
    pub speakers: Vec<String>,

    /// Keep messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,

    /// Keep messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub to: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print record metadata and counts instead of messages
    #[arg(long)]
    pub summary: bool,

    /// Include message IDs in output
    #[arg(long)]
    pub ids: bool,

    /// Omit timestamps from output
    #[arg(long)]
    pub no_timestamps: bool,

    /// Omit system notices from output
    #[arg(long)]
    pub no_system: bool,

    /// Report parse progress on stderr
    #[arg(long)]
    pub progress: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Builds the message filter from the filter arguments.
    ///
    /// # Errors
    ///
    /// Returns [`LineChatError::InvalidDate`] if `--from` or `--to` is not
    /// a `YYYY-MM-DD` date.
    pub fn filter_spec(&self) -> Result<FilterSpec, LineChatError> {
        let mut spec = FilterSpec::new().with_speakers(self.speakers.iter().cloned());

        if let Some(ref keyword) = self.keyword {
            spec = spec.with_keyword(keyword.clone());
        }
        if let Some(ref from) = self.from {
            spec = spec.with_date_from(from)?;
        }
        if let Some(ref to) = self.to {
            spec = spec.with_date_to(to)?;
        }

        Ok(spec)
    }

    /// Builds the rendering options from the output arguments.
    pub fn output_config(&self) -> OutputConfig {
        let mut config = OutputConfig::new();
        if self.ids {
            config = config.with_ids();
        }
        if self.no_timestamps {
            config = config.without_timestamps();
        }
        if self.no_system {
            config = config.without_system_messages();
        }
        config
    }

    /// Default log filter directive for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}
