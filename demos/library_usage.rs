//! Example: Using linechat as a library
//!
//! This example demonstrates how to use linechat in your own projects.
//!
//! Run with: cargo run --example library_usage

use linechat::prelude::*;

const EXPORT: &str = "[LINE] 週末爬山
儲存日期： 2026/01/03 01:14

2022/03/31（四）
上午09:46\tAlice\tMorning! Hike on Saturday?
上午09:50\tBob\t\"Sure.
Bring water
and snacks\"
上午11:09\t\tBob unsent a message

2022/04/01（五）
下午01:15\tCarol\tCount me in for the hike
下午01:20\tAlice\tGreat, meet at 7
";

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== linechat Library Usage Examples ===\n");

    // Example 1: Parse an export held in memory
    println!("1. Parsing an export:");
    let record = parse_str(EXPORT);
    println!("   Group:    {}", record.group_name);
    println!("   Messages: {}", record.len());
    println!("   Speakers: {}", record.speakers.join(", "));

    for msg in &record.messages {
        match msg.system_text() {
            Some(text) => println!("   #{} * {text}", msg.id),
            None => println!("   #{} {}: {}", msg.id, msg.author, msg.content.replace('\n', " | ")),
        }
    }

    // Example 2: Keyword search (case-insensitive)
    println!("\n2. Messages mentioning 'hike':");
    let spec = FilterSpec::new().with_keyword("HIKE");
    for msg in filter_messages(&record.messages, &spec).matches {
        println!("   {}: {}", msg.author, msg.content);
    }

    // Example 3: Speaker and date filters combined
    println!("\n3. Alice on 2022-04-01:");
    let spec = FilterSpec::new()
        .with_speaker("Alice")
        .with_date_from("2022-04-01")?
        .with_date_to("2022-04-01")?;
    let result = filter_messages(&record.messages, &spec);
    print!("{}", to_text(result.matches, &OutputConfig::new()));

    // Example 4: Progress reporting
    println!("\n4. Parsing with progress:");
    let parser = ChatParser::with_config(ParserConfig::new().with_yield_interval(4));
    let record = parser.parse_str_with_progress(EXPORT, |pct| println!("   {pct}%"));
    println!("   Done: {} messages", record.len());

    // Example 5: Structured output
    println!("\n5. JSONL without system notices:");
    let config = OutputConfig::new().without_system_messages();
    print!("{}", to_jsonl(&record.messages, &config)?);

    // Example 6: Per-speaker counts
    println!("\n6. Messages per speaker:");
    for (speaker, count) in record.message_count_by_speaker() {
        println!("   {speaker}: {count}");
    }

    println!("\n=== Done ===");
    Ok(())
}
