use super::read_source;
use anyhow::Result;
use clap::Args;
use sprig_parser::{parse as parse_source, to_simplified_parse_trees, SimplifyOptions};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SimplifyArgs {
    /// Source file to simplify
    pub file: PathBuf,

    /// Drop comments
    #[arg(long)]
    pub no_comments: bool,

    /// Drop whitespace
    #[arg(long)]
    pub no_whitespace: bool,
}

pub fn simplify(args: SimplifyArgs, cwd: &str) -> Result<()> {
    let source = read_source(&args.file, cwd)?;
    // keep everything at parse time so the simplify flags alone decide
    let trees = parse_source(&source)?;
    let options = SimplifyOptions {
        include_comments: !args.no_comments,
        include_whitespace: !args.no_whitespace,
    };
    let simplified = to_simplified_parse_trees(&source, &trees, options);
    println!("{}", serde_json::to_string_pretty(&simplified)?);

    Ok(())
}
