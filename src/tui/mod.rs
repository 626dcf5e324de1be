//! TUI shell for ptail.
//!
//! Provides the terminal front end built on `ratatui` and `crossterm`.
//! The entry point is [`run_tui`], which takes over the terminal, wires
//! the tailer into the panel registry, runs the event loop, and
//! restores the terminal on exit (including panics).

pub mod app;
pub mod event;
pub mod ui;

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::tailer::{self, TailerHandle};
use app::App;
use event::{drain_raw_lines, poll_crossterm_event, AppEvent};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// How long to wait for a crossterm event before emitting a Tick.
const TICK_RATE: Duration = Duration::from_millis(100);

/// Maximum number of tailed lines to drain per tick.
const MAX_DRAIN_PER_TICK: usize = 200;

/// Capacity of the tailer -> event loop channel.
const TAILER_CHANNEL_CAPACITY: usize = 256;

// ---------------------------------------------------------------------------
// Terminal setup / teardown
// ---------------------------------------------------------------------------

/// Set up the terminal for TUI mode: raw mode plus alternate screen.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the
/// panic message. Without this, a panic leaves the terminal in raw mode
/// and the alternate screen, making the shell unusable.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restore; ignore errors.
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

// ---------------------------------------------------------------------------
// Signal handling
// ---------------------------------------------------------------------------

/// Set up a shared shutdown flag that is set to `true` when SIGINT or
/// SIGTERM is received from an external source (e.g. `kill -2`, `kill -15`).
///
/// Returns an `Arc<AtomicBool>` that the event loop checks each tick.
///
/// Note: When crossterm raw mode is active, Ctrl+C is intercepted as a
/// key event and does NOT generate SIGINT. This handler catches external
/// signals that bypass the TUI input handling.
pub fn setup_signal_handler() -> Arc<AtomicBool> {
    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();

    std::thread::spawn(move || {
        // Build a minimal tokio runtime just for signal listening.
        let rt = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(_) => return, // Best-effort: if runtime fails, skip signal handling.
        };

        rt.block_on(async {
            tokio::select! {
                _ = async {
                    if let Ok(mut s) = tokio::signal::unix::signal(
                        tokio::signal::unix::SignalKind::interrupt(),
                    ) {
                        s.recv().await;
                    }
                } => {}
                _ = async {
                    if let Ok(mut s) = tokio::signal::unix::signal(
                        tokio::signal::unix::SignalKind::terminate(),
                    ) {
                        s.recv().await;
                    }
                } => {}
            }
            shutdown_clone.store(true, Ordering::SeqCst);
        });
    });

    shutdown
}

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Run the TUI application.
///
/// Takes over the terminal, starts the log tailer (if a log file was
/// configured), enters the event loop, and restores the terminal on
/// exit. Must be called from within a tokio runtime (the tailer is a
/// spawned task).
pub fn run_tui(config: AppConfig) -> io::Result<()> {
    install_panic_hook();

    // Set up signal handler before entering raw mode so that external
    // SIGINT/SIGTERM triggers a clean shutdown.
    let shutdown_flag = setup_signal_handler();

    let mut terminal = setup_terminal()?;
    let mut app = App::new(config);

    // Seed the truncation width from the actual terminal size.
    if let Ok(size) = terminal.size() {
        app.on_resize(size.width);
    }

    // -- Tailer wiring -------------------------------------------------------

    let mut tailer_rx: Option<mpsc::Receiver<String>> = None;
    let mut tailer_handle: Option<TailerHandle> = None;

    match app.config.log_file.clone() {
        Some(path) => {
            let (tx, rx) = mpsc::channel::<String>(TAILER_CHANNEL_CAPACITY);
            tailer_handle = Some(tailer::tail_file(path, tx, app.config.verbose));
            tailer_rx = Some(rx);
        }
        None => {
            app.status_message = Some("no log file (pass --log-file)".to_string());
        }
    }

    let result = run_event_loop(&mut terminal, &mut app, &shutdown_flag, &mut tailer_rx);

    // Stop the tailer before giving the terminal back.
    if let Some(handle) = tailer_handle.take() {
        handle.shutdown();
    }

    // Always restore terminal, even if the event loop returned an error.
    restore_terminal(&mut terminal)?;

    result
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

/// The core event loop: draw, poll, handle, repeat.
///
/// Checks the `shutdown_flag` each tick. When set by the signal handler,
/// the loop exits so the caller can restore the terminal cleanly.
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    shutdown_flag: &Arc<AtomicBool>,
    tailer_rx: &mut Option<mpsc::Receiver<String>>,
) -> io::Result<()> {
    loop {
        // External signal (SIGINT/SIGTERM): force quit.
        if shutdown_flag.load(Ordering::SeqCst) {
            app.should_quit = true;
            return Ok(());
        }

        // Draw only when state has changed.
        if app.needs_redraw {
            terminal.draw(|frame| ui::draw(frame, app))?;
            app.needs_redraw = false;
        }

        // Poll for crossterm events.
        if let Some(event) = poll_crossterm_event(TICK_RATE) {
            match event {
                AppEvent::Key(key) => app.on_key(key),
                AppEvent::Resize(width, _) => {
                    // ratatui re-layouts automatically on the next draw;
                    // the engine only needs the new truncation budget.
                    app.on_resize(width);
                }
                AppEvent::RawLine(_) | AppEvent::Tick => {}
            }
        }

        // Drain tailed lines (non-blocking).
        if let Some(ref mut rx) = tailer_rx {
            for evt in drain_raw_lines(rx, MAX_DRAIN_PER_TICK) {
                if let AppEvent::RawLine(line) = evt {
                    app.on_raw_line(&line);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
