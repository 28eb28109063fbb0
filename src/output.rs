//! Output formats for a generated sequence.
//!
//! - `plain`: terms joined by a separator (a single space by default)
//! - `table`: index/term table drawn with [`crate::ui::Table`]
//! - `json`: `{"bound": .., "terms": [..]}`

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::*;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

use crate::config::OutputConfig;
use crate::sequence;
use crate::ui::Table;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Plain,
    Table,
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub separator: String,
    pub newline: bool,
    /// Width available to the table format.
    pub width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from(&OutputConfig::default())
    }
}

impl From<&OutputConfig> for RenderOptions {
    fn from(config: &OutputConfig) -> Self {
        Self {
            format: config.format,
            separator: config.separator.clone(),
            newline: config.newline,
            width: 80,
        }
    }
}

#[derive(Serialize)]
struct JsonSequence<'a> {
    bound: i64,
    terms: &'a [i64],
}

/// Renders the terms below `bound` in the requested format.
pub fn render(bound: i64, opts: &RenderOptions) -> Result<String> {
    match opts.format {
        OutputFormat::Plain => {
            let mut buf = Vec::new();
            sequence::write_terms_with(&mut buf, bound, &opts.separator)?;
            let mut text = String::from_utf8(buf).context("Sequence output was not UTF-8")?;
            if opts.newline {
                text.push('\n');
            }
            Ok(text)
        }
        OutputFormat::Table => Ok(render_table(bound, opts.width)),
        OutputFormat::Json => {
            let terms: Vec<i64> = sequence::terms(bound).collect();
            let mut text = serde_json::to_string(&JsonSequence {
                bound,
                terms: &terms,
            })?;
            text.push('\n');
            Ok(text)
        }
    }
}

fn render_table(bound: i64, width: usize) -> String {
    let mut table = Table::new(&["#", "Term"]);
    for (i, term) in sequence::terms(bound).enumerate() {
        table.add_row(vec![i.to_string().dimmed().to_string(), term.to_string()]);
    }

    if table.is_empty() {
        return format!("{} No terms below {}\n", "ℹ".blue(), bound);
    }
    table.render(width)
}

/// Writes the rendering of the terms below `bound` to `out`.
///
/// The plain format streams straight to the sink; the others are rendered
/// in full first.
pub fn emit<W: Write>(out: &mut W, bound: i64, opts: &RenderOptions) -> Result<()> {
    match opts.format {
        OutputFormat::Plain => {
            sequence::write_terms_with(out, bound, &opts.separator)?;
            if opts.newline {
                out.write_all(b"\n")?;
            }
        }
        _ => out.write_all(render(bound, opts)?.as_bytes())?,
    }
    out.flush()?;
    Ok(())
}

/// True when `err` was caused by the reader closing our stdout.
pub fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe)
    })
}
