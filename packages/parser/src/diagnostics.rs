//! Source-context rendering for tokenizer and parser errors
//!
//! A rendered excerpt looks like:
//!
//! ```text
//! Unterminated double-quote string at line 3, column 3
//!   |    v start of double-quote string
//! 2 | (a "b c
//! 3 | d e
//!   |   ^ unterminated string: expected closing `"`
//! ```
//!
//! Spans of more than five lines show the first two and last two lines with an
//! elision row in between.

use crate::ast::Position;

/// Spans longer than this are elided in the middle
const MAX_VERBATIM_LINES: usize = 5;
const ELISION: &str = "...";

/// Caret annotation at a source position
#[derive(Debug, Clone)]
pub struct Marker {
    pub line: usize,
    pub column: usize,
    pub label: String,
}

impl Marker {
    pub fn new(position: Position, label: impl Into<String>) -> Self {
        Self {
            line: position.line,
            column: position.column,
            label: label.into(),
        }
    }
}

enum Row {
    Source(usize),
    Elided,
}

/// Error text with an optional start marker and a mandatory end marker
#[derive(Debug, Clone)]
pub struct Diagnostic<'src> {
    source: &'src str,
    headline: String,
    start: Option<Marker>,
    end: Marker,
}

impl<'src> Diagnostic<'src> {
    /// Diagnostic whose headline points at `at`
    pub fn new(source: &'src str, title: &str, at: Position, label: impl Into<String>) -> Self {
        Self {
            source,
            headline: format!("{} at line {}, column {}", title, at.line + 1, at.column + 1),
            start: None,
            end: Marker::new(at, label),
        }
    }

    /// Add a start marker, turning the excerpt into a span from `start` to the end marker
    pub fn with_start(mut self, start: Position, label: impl Into<String>) -> Self {
        self.start = Some(Marker::new(start, label));
        self
    }

    pub fn render(&self) -> String {
        let lines: Vec<&str> = self
            .source
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();

        let last = self.end.line;
        let first = self
            .start
            .as_ref()
            .map_or(last, |start| start.line.min(last));

        let rows: Vec<Row> = if last - first < MAX_VERBATIM_LINES {
            (first..=last).map(Row::Source).collect()
        } else {
            vec![
                Row::Source(first),
                Row::Source(first + 1),
                Row::Elided,
                Row::Source(last - 1),
                Row::Source(last),
            ]
        };

        let elided = rows.iter().any(|row| matches!(row, Row::Elided));
        let mut width = (last + 1).to_string().len();
        if elided {
            width = width.max(ELISION.len());
        }
        let blank = " ".repeat(width);

        let mut out = Vec::with_capacity(rows.len() + 3);
        out.push(self.headline.clone());

        if let Some(start) = &self.start {
            out.push(format!(
                "{} | {}v {}",
                blank,
                " ".repeat(start.column),
                start.label
            ));
        }

        for row in &rows {
            match row {
                Row::Source(index) => out.push(format!(
                    "{:>width$} | {}",
                    index + 1,
                    lines.get(*index).copied().unwrap_or(""),
                    width = width
                )),
                Row::Elided => out.push(format!("{:>width$} |", ELISION, width = width)),
            }
        }

        out.push(format!(
            "{} | {}^ {}",
            blank,
            " ".repeat(self.end.column),
            self.end.label
        ));

        out.join("\n")
    }
}
