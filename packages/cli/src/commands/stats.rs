use super::{read_source, OutputFormat, ParseFlags};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use sprig_common::TreeStats;
use sprig_parser::parse_with_options;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Source file to summarize
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub flags: ParseFlags,
}

pub fn stats(args: StatsArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let options = args.flags.apply(config.parse);
    let source = read_source(&args.file, cwd)?;
    let trees = parse_with_options(&source, options)?;
    let stats = TreeStats::collect(&trees);

    if args.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("📊 {}", args.file.display().to_string().bold());
    println!("   Top-level trees: {}", trees.len());
    println!("   Lists: {}", stats.lists);
    println!("   Max depth: {}", stats.max_depth);
    println!("   Tokens: {}", stats.token_count());
    for (kind, count) in &stats.tokens {
        println!("     {:<20} {}", kind, count);
    }

    Ok(())
}
