//! # linechat CLI
//!
//! Command-line interface for the linechat library. Reads one export,
//! filters it and prints the result to stdout. Diagnostics go to stderr.

use std::fs;
use std::io::{self, Write};
use std::process;

use clap::Parser as ClapParser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use linechat::cli::Args;
use linechat::core::filter_messages;
use linechat::format::write_to_format;
use linechat::parser::ChatParser;
use linechat::progress::stderr_progress;
use linechat::{ChatRecord, LineChatError};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(&args);

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(args: &Args) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), LineChatError> {
    // Validate arguments before touching the file.
    let spec = args.filter_spec()?;
    let output_config = args.output_config();

    let content = fs::read_to_string(&args.input)?;
    debug!(path = %args.input, bytes = content.len(), "read export");

    let parser = ChatParser::new();
    let record = if args.progress {
        let report = stderr_progress();
        parser.parse_str_with_progress(&content, &*report)
    } else {
        parser.parse_str(&content)
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.summary {
        write_summary(&mut out, &record)?;
        return Ok(());
    }

    let result = filter_messages(&record.messages, &spec);
    debug!(matches = result.count, total = record.len(), "applied filters");

    write_to_format(result.matches, &mut out, args.format, &output_config)
}

fn write_summary(out: &mut impl Write, record: &ChatRecord) -> io::Result<()> {
    const TIMESTAMP: &str = "%Y-%m-%d %H:%M";

    writeln!(out, "Group:     {}", record.group_name)?;
    match record.export_date {
        Some(saved) => writeln!(out, "Saved:     {}", saved.format(TIMESTAMP))?,
        None => writeln!(out, "Saved:     unknown")?,
    }
    match (record.date_range.start, record.date_range.end) {
        (Some(start), Some(end)) => writeln!(
            out,
            "Range:     {} .. {}",
            start.format(TIMESTAMP),
            end.format(TIMESTAMP)
        )?,
        _ => writeln!(out, "Range:     empty")?,
    }
    writeln!(out, "Messages:  {}", record.len())?;
    writeln!(out, "System:    {}", record.system_message_count())?;
    writeln!(out, "Speakers:  {}", record.speakers.len())?;

    let counts = record.message_count_by_speaker();
    for speaker in &record.speakers {
        let count = counts.get(speaker.as_str()).copied().unwrap_or_default();
        writeln!(out, "  {speaker}: {count}")?;
    }

    Ok(())
}
