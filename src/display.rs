//! Display Module
//!
//! Renders result sets as fixed-width text for the console.
//!
//! ## Table Layout
//! ```text
//! |id  |title                         |author              |year  |status          |
//! ----------------------------------------------------------------------------------
//! |1   |Dune                          |Herbert             |1965  |available       |
//! ```

use std::fmt::Write as _;

use crate::error::{Result, ShelfError};
use crate::record::Book;

const ID_WIDTH: usize = 4;
const TITLE_WIDTH: usize = 30;
const AUTHOR_WIDTH: usize = 20;
const YEAR_WIDTH: usize = 6;
const STATUS_WIDTH: usize = 16;

/// Width of the rule under the header
pub const RULE_WIDTH: usize = 82;

/// Marker appended to truncated text
const ELLIPSIS: &str = "...";

/// Output mode for rendering results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable fixed-width table.
    #[default]
    Pretty,
    /// Machine-parseable JSON array of records.
    Json,
}

/// Shorten `text` to at most `max_len` characters, ending in `...` when cut
///
/// Counts characters, not bytes, so multi-byte titles are never split.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let keep = max_len.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Render records as a table with a header row and a rule
pub fn render_table(books: &[Book]) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "|{:<iw$}|{:<tw$}|{:<aw$}|{:<yw$}|{:<sw$}|",
        "id",
        "title",
        "author",
        "year",
        "status",
        iw = ID_WIDTH,
        tw = TITLE_WIDTH,
        aw = AUTHOR_WIDTH,
        yw = YEAR_WIDTH,
        sw = STATUS_WIDTH,
    );
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');

    for book in books {
        let _ = writeln!(
            out,
            "|{:<iw$}|{:<tw$}|{:<aw$}|{:<yw$}|{:<sw$}|",
            book.id,
            truncate_text(&book.title, TITLE_WIDTH),
            truncate_text(&book.author, AUTHOR_WIDTH),
            book.year,
            book.status.as_str(),
            iw = ID_WIDTH,
            tw = TITLE_WIDTH,
            aw = AUTHOR_WIDTH,
            yw = YEAR_WIDTH,
            sw = STATUS_WIDTH,
        );
    }

    out
}

/// Render search hits as a count line followed by one line per record
pub fn render_summary(books: &[Book]) -> String {
    if books.is_empty() {
        return "No books match the given criteria.\n".to_string();
    }

    let mut out = format!("Found {} book(s):\n", books.len());
    for book in books {
        let _ = writeln!(
            out,
            "ID: {}, Title: {}, Author: {}, Year: {}",
            book.id, book.title, book.author, book.year
        );
    }
    out
}

/// Render records in the given mode
pub fn render(books: &[Book], mode: OutputMode) -> Result<String> {
    match mode {
        OutputMode::Pretty => Ok(render_table(books)),
        OutputMode::Json => serde_json::to_string_pretty(books)
            .map(|mut s| {
                s.push('\n');
                s
            })
            .map_err(|e| ShelfError::Serialization(e.to_string())),
    }
}
