mod commands;
mod config;

use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use commands::{
    check, parse, simplify, stats, tokenize, CheckArgs, ParseArgs, SimplifyArgs, StatsArgs,
    TokenizeArgs,
};
use tracing::Level;

/// Sprig CLI - lossless tokenizer and parser for bracketed source
#[derive(Parser, Debug)]
#[command(name = "sprig")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the token stream of a file
    Tokenize(TokenizeArgs),

    /// Print the parse trees of a file
    Parse(ParseArgs),

    /// Print the simplified trees of a file as JSON
    Simplify(SimplifyArgs),

    /// Check that files parse without errors
    Check(CheckArgs),

    /// Summarize the structure of a file
    Stats(StatsArgs),
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Tokenize(args) => tokenize(args, &cwd),
        Command::Parse(args) => parse(args, &cwd),
        Command::Simplify(args) => simplify(args, &cwd),
        Command::Check(args) => check(args, &cwd),
        Command::Stats(args) => stats(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
