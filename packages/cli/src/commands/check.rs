use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use sprig_parser::{format_error, parse_with_options, ParseError};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Source file or directory to check
    pub input: PathBuf,

    /// Render errors as annotated source reports
    #[arg(long)]
    pub pretty: bool,
}

pub fn check(args: CheckArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let input = Path::new(cwd).join(&args.input);

    println!("{}", "🔍 Checking sources...".bright_blue().bold());

    let files = if input.is_file() {
        vec![input]
    } else if input.is_dir() {
        let files = find_source_files(&input, &config);
        if files.is_empty() {
            println!("{}", "⚠️  No source files found".yellow());
            return Ok(());
        }
        println!("Found {} files", files.len());
        files
    } else {
        return Err(anyhow::anyhow!(
            "Input path does not exist: {}",
            args.input.display()
        ));
    };

    let mut failed = 0;
    for file in &files {
        let source = fs::read_to_string(file)?;
        match parse_with_options(&source, config.parse) {
            Ok(trees) => {
                tracing::debug!(path = %file.display(), trees = trees.len(), "checked");
                println!("  {} {}", "✓".green(), file.display());
            }
            Err(err) => {
                failed += 1;
                eprintln!("  {} {}", "✗".red(), file.display());
                eprintln!("{}", render_error(&source, file, &err, args.pretty));
            }
        }
    }

    println!();
    if failed > 0 {
        println!(
            "{} {} of {} files failed",
            "✗".red().bold(),
            failed,
            files.len()
        );
        std::process::exit(1);
    }
    println!("{} {} files ok", "✓".green().bold(), files.len());

    Ok(())
}

/// Source files under `dir` in a stable order
fn find_source_files(dir: &Path, config: &Config) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| config.is_source_file(path))
        .collect();
    files.sort();
    files
}

fn render_error(source: &str, file: &Path, err: &ParseError, pretty: bool) -> String {
    if pretty {
        format_error(source, &file.display().to_string(), err)
    } else {
        format!("    [{}] {}", err.code().as_u32(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_source_files_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("a.sprig"), "(a)").unwrap();
        fs::write(dir.path().join("nested/b.scm"), "(b)").unwrap();
        fs::write(dir.path().join("notes.txt"), "(").unwrap();

        let files = find_source_files(dir.path(), &Config::default());
        let names: Vec<_> = files
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.sprig", "b.scm"]);
    }

    #[test]
    fn test_render_error_plain() {
        let err = parse_with_options(")", Default::default()).unwrap_err();
        let rendered = render_error(")", Path::new("x.sprig"), &err, false);
        assert!(rendered.starts_with("    [1] "));
    }
}
