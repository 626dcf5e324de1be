//! Event handling for the TUI event loop.
//!
//! Wraps crossterm key/resize events and raw lines from the tailer
//! channel into a single [`AppEvent`] enum that the main loop can
//! `match` on.

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use std::time::Duration;
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// AppEvent
// ---------------------------------------------------------------------------

/// Events consumed by the TUI event loop.
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// A raw log line arrived from the tailer.
    RawLine(String),
    /// A periodic tick (UI refresh).
    Tick,
}

// ---------------------------------------------------------------------------
// Event polling
// ---------------------------------------------------------------------------

/// Poll for the next crossterm event with the given timeout.
///
/// Returns `Some(AppEvent)` if an event was available, `None` on timeout.
/// This is a blocking call intended to be run from the main thread.
pub fn poll_crossterm_event(timeout: Duration) -> Option<AppEvent> {
    if event::poll(timeout).ok()? {
        match event::read().ok()? {
            CrosstermEvent::Key(key) => Some(AppEvent::Key(key)),
            CrosstermEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
            _ => None,
        }
    } else {
        None
    }
}

/// Drain pending raw lines from the tailer channel, up to `max_per_tick`.
///
/// Returns the lines wrapped as [`AppEvent::RawLine`]. Stops as soon as
/// `try_recv()` returns `Err` (empty or disconnected), so this never
/// blocks.
pub fn drain_raw_lines(rx: &mut mpsc::Receiver<String>, max_per_tick: usize) -> Vec<AppEvent> {
    let mut events = Vec::new();
    for _ in 0..max_per_tick {
        match rx.try_recv() {
            Ok(line) => events.push(AppEvent::RawLine(line)),
            Err(_) => break,
        }
    }
    events
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
