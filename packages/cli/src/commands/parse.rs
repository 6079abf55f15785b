use super::{read_source, OutputFormat, ParseFlags};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use sprig_parser::{parse_with_options, ParseNode, ParseOutcome};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Source file to parse
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub flags: ParseFlags,
}

pub fn parse(args: ParseArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let options = args.flags.apply(config.parse);
    let source = read_source(&args.file, cwd)?;
    let result = parse_with_options(&source, options);

    if args.format == OutputFormat::Json {
        let outcome = ParseOutcome::from(result);
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        if !outcome.is_ok() {
            std::process::exit(1);
        }
        return Ok(());
    }

    let trees = result?;
    let mut out = String::new();
    for tree in &trees {
        render_tree(&source, tree, 0, &mut out);
    }
    print!("{}", out);

    Ok(())
}

/// Indented outline of a tree: lists show their span, leaves their lexeme
fn render_tree(source: &str, node: &ParseNode, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match node {
        ParseNode::Leaf(token) => {
            out.push_str(&format!(
                "{}{} {:?}\n",
                indent,
                token.kind.name().dimmed(),
                token.lexeme(source)
            ));
        }
        ParseNode::List(list) => {
            out.push_str(&format!(
                "{}{} @{}:{} ({} bytes)\n",
                indent,
                "list".bold(),
                list.line + 1,
                list.column + 1,
                list.length
            ));
            for child in list.children() {
                render_tree(source, child, depth + 1, out);
            }
        }
    }
}
