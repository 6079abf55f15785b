pub mod check;
pub mod parse;
pub mod simplify;
pub mod stats;
pub mod tokenize;

pub use check::{check, CheckArgs};
pub use parse::{parse, ParseArgs};
pub use simplify::{simplify, SimplifyArgs};
pub use stats::{stats, StatsArgs};
pub use tokenize::{tokenize, TokenizeArgs};

use clap::{Args, ValueEnum};
use sprig_common::CommonResult;
use sprig_parser::ParseOptions;
use std::path::Path;

/// Output format shared by the inspection commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Flags that drop token categories from the parse tree
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct ParseFlags {
    /// Drop comments from tree children
    #[arg(long)]
    pub no_comments: bool,

    /// Drop whitespace from tree children
    #[arg(long)]
    pub no_whitespace: bool,

    /// Drop list delimiters from tree children
    #[arg(long)]
    pub no_delimiters: bool,
}

impl ParseFlags {
    /// Apply the flags on top of configured options
    pub fn apply(&self, mut options: ParseOptions) -> ParseOptions {
        if self.no_comments {
            options.include_comments = false;
        }
        if self.no_whitespace {
            options.include_whitespace = false;
        }
        if self.no_delimiters {
            options.include_list_delimiters = false;
        }
        options
    }
}

/// Read a source file relative to the working directory
pub fn read_source(path: &Path, cwd: &str) -> CommonResult<String> {
    let full_path = Path::new(cwd).join(path);
    let source = std::fs::read_to_string(&full_path)?;
    tracing::debug!(path = %full_path.display(), bytes = source.len(), "read source");
    Ok(source)
}
