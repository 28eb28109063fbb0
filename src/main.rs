//! # fib CLI Entry Point
//!
//! Parses CLI arguments using clap, resolves `fib.toml`, and prints the
//! Fibonacci sequence below the requested bound.
//!
//! ## Commands
//!
//! - `fib` - terms below the configured bound (500 unless configured)
//! - `fib print [BOUND]` - plain, table or JSON output
//! - `fib table [BOUND]` - table output
//! - `fib completion <SHELL>` - shell completion script

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use std::io::{self, Write};
use std::path::PathBuf;

use fibseq::config::{ConfigSource, FibConfig};
use fibseq::logging;
use fibseq::output::{self, OutputFormat, RenderOptions};
use fibseq::ui;

#[cfg(windows)]
#[link(name = "kernel32")]
unsafe extern "system" {
    fn SetConsoleOutputCP(wCodePageID: u32) -> i32;
}

// Table borders are UTF-8.
#[cfg(windows)]
fn enable_windows_utf8_console() {
    unsafe {
        SetConsoleOutputCP(65001);
    }
}

#[cfg(not(windows))]
fn enable_windows_utf8_console() {}

#[derive(Parser)]
#[command(name = "fib")]
#[command(about = "Print the Fibonacci sequence below a bound", version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Read settings from this file instead of fib.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log more to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the terms below BOUND
    Print {
        /// Exclusive upper bound [default: from fib.toml, else 500]
        #[arg(allow_negative_numbers = true)]
        bound: Option<i64>,
        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Separator between terms (plain format)
        #[arg(long)]
        separator: Option<String>,
        /// Do not print a trailing newline (plain format)
        #[arg(long)]
        no_newline: bool,
    },
    /// Print the terms below BOUND as a table
    Table {
        /// Exclusive upper bound [default: from fib.toml, else 500]
        #[arg(allow_negative_numbers = true)]
        bound: Option<i64>,
    },
    /// Generate shell completion scripts
    Completion { shell: Shell },
}

fn main() -> Result<()> {
    enable_windows_utf8_console();

    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Err(e) if output::is_broken_pipe(&e) => {
            tracing::debug!("stdout closed early");
            Ok(())
        }
        other => other,
    }
}

// generate() panics on write errors, so render into memory first.
fn completion_script(shell: Shell) -> Vec<u8> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    generate(shell, &mut cmd, "fib", &mut buf);
    buf
}

fn run(cli: Cli) -> Result<()> {
    if let Some(Commands::Completion { shell }) = cli.command {
        let mut out = io::stdout().lock();
        out.write_all(&completion_script(shell))?;
        out.flush()?;
        return Ok(());
    }

    let (config, source) = FibConfig::discover(cli.config.as_deref())?;
    match &source {
        ConfigSource::File(path) => tracing::info!(path = %path.display(), "loaded config"),
        ConfigSource::Defaults => tracing::info!("no config file, using defaults"),
    }

    let mut opts = RenderOptions::from(&config.output);
    let mut bound = config.sequence.bound;

    match cli.command {
        None | Some(Commands::Completion { .. }) => {}
        Some(Commands::Print {
            bound: cli_bound,
            format,
            separator,
            no_newline,
        }) => {
            bound = cli_bound.unwrap_or(bound);
            if let Some(format) = format {
                opts.format = format;
            }
            if let Some(separator) = separator {
                anyhow::ensure!(!separator.is_empty(), "--separator must not be empty");
                opts.separator = separator;
            }
            if no_newline {
                opts.newline = false;
            }
        }
        Some(Commands::Table { bound: cli_bound }) => {
            bound = cli_bound.unwrap_or(bound);
            opts.format = OutputFormat::Table;
        }
    }

    if opts.format == OutputFormat::Table {
        opts.width = ui::terminal_width();
    }

    tracing::debug!(bound, format = ?opts.format, "generating sequence");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    output::emit(&mut out, bound, &opts)?;
    out.flush()?;
    Ok(())
}
