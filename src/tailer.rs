//! Incremental tailing of a growing log file.
//!
//! The tailer polls on a fixed interval (no filesystem events) and
//! reads only bytes appended since the last recorded offset. A missing
//! or deleted file means "no new data", never an error; a file that
//! shrank was truncated/rotated and is re-read from the start. Bytes
//! after the last newline are buffered until the producer completes
//! the line.

use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// How often the tail task polls the file for new bytes.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Maximum bytes consumed in one poll. Prevents OOM when the file grew
/// very large between polls; the remainder is picked up next tick.
const MAX_READ_BYTES: u64 = 64 * 1024 * 1024;

/// Maximum size of the buffered incomplete line. A single line larger
/// than this is discarded rather than held in memory indefinitely.
const MAX_PARTIAL_LINE: usize = 1024 * 1024;

// ---------------------------------------------------------------------------
// TailState
// ---------------------------------------------------------------------------

/// Incremental read position for one tailed file.
#[derive(Debug, Default)]
pub struct TailState {
    /// How far we have committed reads; the next poll starts here.
    pub byte_offset: u64,
    /// Trailing bytes of the last read that did not end with a newline.
    partial_line: String,
    /// Set after a non-missing open error has been reported, so the
    /// failure is surfaced once and retried silently thereafter.
    open_error_reported: bool,
}

impl TailState {
    pub fn new() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// Incremental reading
// ---------------------------------------------------------------------------

/// Read lines appended to `path` since the offset recorded in `state`.
///
/// Returns complete, non-empty lines (trimmed). Already-seen bytes are
/// never re-read: the offset only moves forward, except when the file
/// shrinks below it (truncation), which resets the tail to byte 0.
pub fn read_new_lines(path: &Path, state: &mut TailState, verbose: bool) -> Vec<String> {
    let mut lines = Vec::new();

    let mut file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            // Not yet created, or deleted mid-session: no new data.
            return lines;
        }
        Err(e) => {
            if !state.open_error_reported {
                eprintln!("ptail: warning: could not open {}: {}", path.display(), e);
                state.open_error_reported = true;
            }
            return lines;
        }
    };
    state.open_error_reported = false;

    let file_len = match file.metadata() {
        Ok(m) => m.len(),
        Err(e) => {
            if verbose {
                eprintln!("ptail: warning: could not stat {}: {}", path.display(), e);
            }
            return lines;
        }
    };

    if file_len < state.byte_offset {
        if verbose {
            eprintln!("ptail: file truncated, resetting offset: {}", path.display());
        }
        state.byte_offset = 0;
        state.partial_line.clear();
    }

    if file_len == state.byte_offset {
        return lines;
    }

    if let Err(e) = file.seek(SeekFrom::Start(state.byte_offset)) {
        if verbose {
            eprintln!("ptail: warning: could not seek in {}: {}", path.display(), e);
        }
        return lines;
    }

    let bytes_available = file_len - state.byte_offset;
    let read_limit = bytes_available.min(MAX_READ_BYTES);
    let mut buf = String::new();
    let bytes_read = match file.take(read_limit).read_to_string(&mut buf) {
        Ok(n) => n,
        Err(e) => {
            if verbose {
                eprintln!("ptail: warning: could not read {}: {}", path.display(), e);
            }
            return lines;
        }
    };

    state.byte_offset += bytes_read as u64;

    // Prepend the incomplete line left over from the previous poll.
    let full_text = if state.partial_line.is_empty() {
        buf
    } else {
        let mut combined = std::mem::take(&mut state.partial_line);
        combined.push_str(&buf);
        combined
    };

    let ends_with_newline = full_text.ends_with('\n');
    let mut raw_lines: Vec<&str> = full_text.split('\n').collect();

    // Without a trailing newline the final element is an incomplete
    // line; hold it back for the next poll.
    if !ends_with_newline {
        if let Some(last) = raw_lines.pop() {
            if !last.is_empty() {
                if last.len() > MAX_PARTIAL_LINE {
                    if verbose {
                        eprintln!(
                            "ptail: warning: discarding oversized incomplete line ({} bytes) in {}",
                            last.len(),
                            path.display()
                        );
                    }
                } else {
                    state.partial_line = last.to_string();
                }
            }
        }
    }

    for line in raw_lines {
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines
}

// ---------------------------------------------------------------------------
// TailerHandle
// ---------------------------------------------------------------------------

/// Handle for stopping the tail task.
///
/// Sets the shutdown flag (checked each poll) and aborts the task so
/// teardown never waits out a full poll interval.
#[derive(Debug)]
pub struct TailerHandle {
    shutdown: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl TailerHandle {
    /// Signal the tail task to stop and abort it.
    pub fn shutdown(self) {
        self.shutdown.store(true, Ordering::SeqCst);
        self.handle.abort();
    }
}

// ---------------------------------------------------------------------------
// Tail task
// ---------------------------------------------------------------------------

/// Spawn a tokio task that polls `path` every [`POLL_INTERVAL`] and
/// sends each newly appended line through `tx`.
///
/// The task exits when the receiver is dropped or the handle shuts it
/// down. The file does not need to exist yet; it is picked up whenever
/// it appears.
pub fn tail_file(path: PathBuf, tx: mpsc::Sender<String>, verbose: bool) -> TailerHandle {
    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = shutdown.clone();

    let handle = tokio::spawn(async move {
        let mut state = TailState::new();
        let mut ticker = tokio::time::interval(POLL_INTERVAL);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            if flag.load(Ordering::SeqCst) {
                return;
            }
            for line in read_new_lines(&path, &mut state, verbose) {
                if tx.send(line).await.is_err() {
                    // Receiver gone; the session is over.
                    return;
                }
            }
        }
    });

    TailerHandle { shutdown, handle }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
