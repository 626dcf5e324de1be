//! Application state for the TUI shell.
//!
//! The [`App`] struct owns all mutable state that drives the display:
//! the panel registry, line counters, quit/redraw flags, and theme.
//! Single-owner, never shared across threads; the event loop owns the
//! `App` and passes `&mut` references to key handlers and the draw
//! function.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::AppConfig;
use crate::panel::{PanelRegistry, RouteOutcome};
use crate::router::Severity;
use crate::symbols::Symbols;
use crate::theme::ThemeColors;
use crate::truncate::TruncateOptions;

// ---------------------------------------------------------------------------
// App struct
// ---------------------------------------------------------------------------

/// Root application state.
pub struct App {
    pub config: AppConfig,
    pub registry: PanelRegistry,
    pub theme_colors: ThemeColors,
    pub should_quit: bool,
    pub needs_redraw: bool,
    /// Session start, for the elapsed clock in the header.
    pub start_time: Instant,
    /// Lines accepted by the router this session.
    pub routed_lines: u64,
    /// Lines without a recognizable tag, discarded.
    pub dropped_lines: u64,
    /// One-line notice shown in the status bar, if any.
    pub status_message: Option<String>,
}

impl App {
    /// Build the app from the effective config: declare the configured
    /// (or default) panels and wire up truncation settings.
    pub fn new(config: AppConfig) -> Self {
        let mut registry = PanelRegistry::new(Symbols::new(config.ascii));
        for decl in config.effective_panels() {
            registry.declare_panel(&decl.name, decl.config);
        }
        registry.set_truncate(TruncateOptions {
            enabled: config.display.truncate,
            max_width: 80,
            max_filename: config.display.max_filename_length,
        });

        let theme_colors = ThemeColors::from_theme(&config.theme);

        Self {
            config,
            registry,
            theme_colors,
            should_quit: false,
            needs_redraw: true,
            start_time: Instant::now(),
            routed_lines: 0,
            dropped_lines: 0,
            status_message: None,
        }
    }

    /// Handle a key press. Only quit keys are bound; everything else is
    /// ignored.
    pub fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    /// Route one raw line from the tailer. Tailed file lines carry no
    /// log level, so they arrive at Info severity.
    pub fn on_raw_line(&mut self, line: &str) {
        match self.registry.route_line(line, Severity::Info) {
            RouteOutcome::Dropped => self.dropped_lines += 1,
            _ => self.routed_lines += 1,
        }
        self.needs_redraw = true;
    }

    /// Update the truncation width budget after a terminal resize.
    pub fn on_resize(&mut self, width: u16) {
        let mut options = self.registry.truncate_options().clone();
        options.max_width = usize::from(width).saturating_sub(2).max(40);
        self.registry.set_truncate(options);
        self.needs_redraw = true;
    }

    /// Elapsed session time as `HH:MM:SS` for the header.
    pub fn elapsed_display(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
