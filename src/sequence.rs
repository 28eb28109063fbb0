//! Fibonacci sequence generation.
//!
//! Terms are produced lazily by [`Terms`], an iterator over a two-accumulator
//! [`FibonacciState`]. Generation stops before the first term that reaches the
//! exclusive bound.
//!
//! ## Example
//!
//! ```rust
//! let terms: Vec<i64> = fibseq::sequence::terms(10).collect();
//! assert_eq!(terms, vec![0, 1, 1, 2, 3, 5, 8]);
//! ```

use std::io::{self, Write};

/// Two consecutive terms of the sequence.
///
/// `current` is `None` once the look-ahead term no longer fits in an `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FibonacciState {
    previous: i64,
    current: Option<i64>,
}

impl Default for FibonacciState {
    fn default() -> Self {
        Self::new()
    }
}

impl FibonacciState {
    pub fn new() -> Self {
        Self {
            previous: 0,
            current: Some(1),
        }
    }

    /// The term that will be emitted next.
    pub fn previous(&self) -> i64 {
        self.previous
    }

    /// The term after [`previous`](Self::previous), if representable.
    pub fn current(&self) -> Option<i64> {
        self.current
    }

    /// Shifts the pair forward by one term.
    ///
    /// Returns `false` (leaving the state untouched) when the pair cannot move
    /// because the following term overflowed.
    pub fn advance(&mut self) -> bool {
        let Some(current) = self.current else {
            return false;
        };
        let old_previous = self.previous;
        self.previous = current;
        self.current = old_previous.checked_add(current);
        true
    }
}

/// Lazy iterator over the terms strictly below a bound.
#[derive(Debug, Clone)]
pub struct Terms {
    state: FibonacciState,
    bound: i64,
    done: bool,
}

impl Iterator for Terms {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.done || self.state.previous() >= self.bound {
            self.done = true;
            return None;
        }

        let term = self.state.previous();
        if !self.state.advance() {
            self.done = true;
        }
        Some(term)
    }
}

impl std::iter::FusedIterator for Terms {}

/// Returns the sequence of terms below `bound`.
///
/// Every call starts from a fresh state, so the same bound always yields the
/// same terms.
pub fn terms(bound: i64) -> Terms {
    Terms {
        state: FibonacciState::new(),
        bound,
        done: false,
    }
}

/// Writes the terms below `bound` to `out`, separated by a single space.
///
/// No trailing separator or newline is written.
pub fn write_terms<W: Write>(out: &mut W, bound: i64) -> io::Result<()> {
    write_terms_with(out, bound, " ")
}

/// Same as [`write_terms`] with a custom separator.
pub fn write_terms_with<W: Write>(out: &mut W, bound: i64, separator: &str) -> io::Result<()> {
    let mut count = 0usize;
    for (i, term) in terms(bound).enumerate() {
        if i > 0 {
            out.write_all(separator.as_bytes())?;
        }
        write!(out, "{term}")?;
        tracing::trace!(index = i, term, "emitted term");
        count += 1;
    }
    tracing::debug!(bound, count, "sequence written");
    Ok(())
}

/// Prints the terms below `bound` to standard output.
///
/// The caller is responsible for any trailing newline.
pub fn print_fib(bound: i64) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_terms(&mut lock, bound)?;
    lock.flush()
}
