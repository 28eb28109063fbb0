//! # fibseq - Fibonacci Sequence Printer
//!
//! Prints the Fibonacci sequence below an exclusive bound, as the `fib`
//! command or as a library.
//!
//! ## Quick Start
//!
//! ```bash
//! # Terms below 500 (the default bound)
//! fib
//!
//! # Terms below 10, as a table
//! fib table 10
//! ```
//!
//! ## Module Organization
//!
//! - [`sequence`] - The generator itself
//! - [`config`] - Configuration parsing (`fib.toml`)
//! - [`output`] - Plain, table and JSON renderings

/// Configuration file parsing (`fib.toml`).
pub mod config;

/// Diagnostic logging setup.
pub mod logging;

/// Output formats.
pub mod output;

/// Fibonacci sequence generation.
pub mod sequence;

/// Terminal UI utilities (tables, colors).
pub mod ui;

pub use sequence::{FibonacciState, Terms, print_fib, terms, write_terms};
