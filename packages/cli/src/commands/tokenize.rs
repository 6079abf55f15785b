use super::{read_source, OutputFormat};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use sprig_parser::{tokenize as tokenize_source, TokenizationResult};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct TokenizeArgs {
    /// Source file to tokenize
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub fn tokenize(args: TokenizeArgs, cwd: &str) -> Result<()> {
    let source = read_source(&args.file, cwd)?;
    let result = tokenize_source(&source);

    if args.format == OutputFormat::Json {
        let envelope = TokenizationResult::from(result);
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        if !envelope.is_ok() {
            std::process::exit(1);
        }
        return Ok(());
    }

    let tokens = result?;
    for token in &tokens {
        println!(
            "{:>4}:{:<4} {:<20} {:?}",
            token.line + 1,
            token.column + 1,
            token.kind.name().cyan(),
            token.lexeme(&source)
        );
    }
    println!();
    println!("   {} {} tokens", "✓".green(), tokens.len());

    Ok(())
}
