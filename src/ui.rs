//! Terminal table rendering.
//!
//! [`Table`] lays out rows in Unicode box-drawing characters, shrinking the
//! widest columns when the terminal is too narrow.
//!
//! ## Example
//!
//! ```rust
//! use fibseq::ui::Table;
//!
//! let mut table = Table::new(&["#", "Term"]);
//! table.add_row(vec!["0".to_string(), "0".to_string()]);
//! assert!(table.render(80).contains("Term"));
//! ```

use colored::*;
use std::cmp;
use std::fmt::Write;

/// Columns never shrink below this many characters.
const MIN_COLUMN_WIDTH: usize = 8;

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Rows with the wrong number of cells are ignored.
    pub fn add_row(&mut self, row: Vec<String>) {
        if row.len() == self.headers.len() {
            self.rows.push(row);
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders the table to fit within `max_width` columns where possible.
    pub fn render(&self, max_width: usize) -> String {
        let mut out = String::new();
        if self.headers.is_empty() {
            return out;
        }

        let col_widths = self.column_widths(max_width);

        let make_sep = |left: &str, mid: &str, right: &str| -> String {
            let mut s = String::from("  ");
            s.push_str(left);
            for (i, width) in col_widths.iter().enumerate() {
                s.push_str(&"─".repeat(width + 2));
                if i < col_widths.len() - 1 {
                    s.push_str(mid);
                }
            }
            s.push_str(right);
            s
        };

        let _ = writeln!(out, "{}", make_sep("┌", "┬", "┐"));

        out.push_str("  │");
        for (header, &width) in self.headers.iter().zip(&col_widths) {
            let truncated = truncate(header, width);
            let padding = width.saturating_sub(truncated.chars().count());
            let _ = write!(out, " {} {}│", truncated.bold(), " ".repeat(padding));
        }
        out.push('\n');

        let _ = writeln!(out, "{}", make_sep("├", "┼", "┤"));

        for row in &self.rows {
            out.push_str("  │");
            for (cell, &width) in row.iter().zip(&col_widths) {
                let clean = sanitize_content(cell);
                let truncated = console::truncate_str(&clean, width, "...").to_string();
                let visible_len = strip_ansi(&truncated).chars().count();
                let padding = width.saturating_sub(visible_len);
                let _ = write!(out, " {} {}│", truncated, " ".repeat(padding));
            }
            out.push('\n');
        }

        let _ = writeln!(out, "{}", make_sep("└", "┴", "┘"));
        out
    }

    fn column_widths(&self, max_width: usize) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = strip_ansi(&sanitize_content(cell)).chars().count();
                widths[i] = cmp::max(widths[i], len);
            }
        }

        // indent, borders and cell padding
        let overhead = 3 + 3 * self.headers.len();
        let available = max_width.saturating_sub(overhead);
        let mut total: usize = widths.iter().sum();

        while total > available {
            let Some((idx, &widest)) = widths.iter().enumerate().max_by_key(|(_, w)| **w) else {
                break;
            };
            if widest <= MIN_COLUMN_WIDTH {
                break;
            }
            widths[idx] -= 1;
            total -= 1;
        }

        widths
    }
}

/// Width of the attached terminal, or a fallback when stdout is not one.
pub fn terminal_width() -> usize {
    let (_height, width) = console::Term::stdout().size();
    width as usize
}

fn truncate(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let mut result: String = s.chars().take(max_width.saturating_sub(3)).collect();
        result.push_str("...");
        result
    } else {
        s.to_string()
    }
}

fn sanitize_content(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            _ => c,
        })
        .collect()
}

fn strip_ansi(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            if let Some(&'[') = chars.peek() {
                chars.next();
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            }
        } else {
            result.push(c);
        }
    }
    result
}
