//! Bounded per-panel message buffer with adjacent-duplicate merging.
//!
//! Noisy producers tend to emit bursts of near-identical lines that
//! differ only in a leading token (a timestamp, an emoji, a counter).
//! Rather than scroll the panel with repeats, a new message replaces
//! the previous one when both share the same 4-character signature
//! computed after stripping a single leading token. The buffer is FIFO
//! bounded: oldest rows drop once `max_lines` is exceeded.

use std::collections::VecDeque;
use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default retained-row capacity per panel.
pub const DEFAULT_MAX_LINES: usize = 100;

/// One leading whitespace-delimited token plus its trailing whitespace.
static LEADING_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\S+\s+").unwrap());

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// Merge signature: the first 4 characters after removing one leading
/// token. Returns `None` when fewer than 4 characters remain: short
/// messages never merge.
///
/// Character-based, not byte-based: leading tokens are often emoji and
/// the remainder may be any script.
fn signature(message: &str) -> Option<String> {
    let stripped = LEADING_TOKEN_RE.replace(message, "");
    let sig: String = stripped.chars().take(4).collect();
    if sig.chars().count() == 4 {
        Some(sig)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// MessageBuffer
// ---------------------------------------------------------------------------

/// Ordered, bounded buffer of rendered message rows.
#[derive(Debug)]
pub struct MessageBuffer {
    lines: VecDeque<String>,
    max_lines: usize,
}

impl Default for MessageBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINES)
    }
}

impl MessageBuffer {
    pub fn new(max_lines: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            max_lines,
        }
    }

    /// Append a rendered message row.
    ///
    /// If the new row's signature equals the last buffered row's
    /// signature, the last row is replaced in place (the newest version
    /// of a repeating event wins). Otherwise the row is pushed and the
    /// buffer truncated to the most recent `max_lines` entries.
    pub fn push(&mut self, message: String) {
        if let Some(last) = self.lines.back_mut() {
            if let (Some(new_sig), Some(last_sig)) = (signature(&message), signature(last)) {
                if new_sig == last_sig {
                    *last = message;
                    return;
                }
            }
        }

        self.lines.push_back(message);
        while self.lines.len() > self.max_lines {
            self.lines.pop_front();
        }
    }

    /// Iterate all rows, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.lines.iter()
    }

    /// Iterate the most recent `count` rows in chronological order
    /// (newest last).
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &String> {
        self.lines
            .iter()
            .skip(self.lines.len().saturating_sub(count))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Configured capacity.
    pub fn max_lines(&self) -> usize {
        self.max_lines
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
