//! Layout and rendering for the TUI shell.
//!
//! One frame is:
//! - **Header** (top, height 1): binary name, tailed file, elapsed time
//! - **Panels** (middle): one bordered block per registry panel, heights
//!   from the ratio-based layout computation
//! - **Status bar** (bottom, height 1): line counters and key hints

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::layout::{compute_heights, DEFAULT_MIN_ROWS, DEFAULT_RESERVED_ROWS};
use crate::theme::style_color;
use crate::tui::app::App;

// ---------------------------------------------------------------------------
// Main draw function
// ---------------------------------------------------------------------------

/// Draw the entire TUI frame.
///
/// The vertical split is `1 + panel heights + 1`; the panel heights sum
/// exactly to `terminal height - 2`, so the frame is always filled with
/// no leftover rows.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    let ratios = app.registry.ratios();
    let heights = compute_heights(&ratios, size.height, DEFAULT_RESERVED_ROWS, DEFAULT_MIN_ROWS);

    let mut constraints = Vec::with_capacity(heights.len() + 2);
    constraints.push(Constraint::Length(1));
    if heights.is_empty() {
        constraints.push(Constraint::Min(0));
    } else {
        for h in &heights {
            constraints.push(Constraint::Length(*h));
        }
    }
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size);

    draw_header(frame, app, chunks[0]);

    if heights.is_empty() {
        let placeholder = Paragraph::new("No panels declared")
            .style(Style::default().fg(app.theme_colors.placeholder));
        frame.render_widget(placeholder, chunks[1]);
    } else {
        let names: Vec<String> = app
            .registry
            .panels()
            .iter()
            .map(|p| p.name.clone())
            .collect();
        for (i, name) in names.iter().enumerate() {
            draw_panel(frame, app, name, chunks[i + 1]);
        }
    }

    draw_status_bar(frame, app, chunks[chunks.len() - 1]);
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// Draw the header row: binary name, tailed file, elapsed session time,
/// and the wall clock.
fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let file_part = app
        .config
        .log_file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(no log file)".to_string());
    let clock = chrono::Local::now().format("%H:%M:%S");
    let text = format!(
        " ptail \u{2014} {}  [{}]  {}",
        file_part,
        app.elapsed_display(),
        clock
    );

    let header = Paragraph::new(text).style(
        Style::default()
            .fg(app.theme_colors.header_fg)
            .bg(app.theme_colors.header_bg),
    );
    frame.render_widget(header, area);
}

// ---------------------------------------------------------------------------
// Panels
// ---------------------------------------------------------------------------

/// Draw one panel: bordered block in the panel's style color, title at
/// the top, panel name at the bottom, engine rows inside.
fn draw_panel(frame: &mut Frame, app: &mut App, name: &str, area: Rect) {
    let (title, color) = match app.registry.get(name) {
        Some(panel) => (
            format!(" {} ", panel.title),
            style_color(&panel.style, app.theme_colors.panel_fallback),
        ),
        None => (format!(" {} ", name), app.theme_colors.panel_fallback),
    };

    let rows = app.registry.render_panel(name, area.width, area.height);

    let block = Block::default()
        .title(title)
        .title_bottom(Line::from(format!(" {} ", name)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let paragraph = if rows.is_empty() {
        Paragraph::new("waiting for log lines...")
            .style(Style::default().fg(app.theme_colors.placeholder))
            .block(block)
    } else {
        Paragraph::new(rows.join("\n"))
            .style(Style::default().fg(color))
            .block(block)
    };
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Status bar
// ---------------------------------------------------------------------------

/// Draw the status bar: routed/dropped counters, any status notice,
/// and the quit hint.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut text = format!(
        " routed {} | dropped {}",
        app.routed_lines, app.dropped_lines
    );
    if let Some(ref notice) = app.status_message {
        text.push_str(" | ");
        text.push_str(notice);
    }
    text.push_str(" | q quit");

    let bar = Paragraph::new(text).style(
        Style::default()
            .fg(app.theme_colors.status_bar_fg)
            .bg(app.theme_colors.status_bar_bg),
    );
    frame.render_widget(bar, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    /// Render one frame into a test backend and return the buffer
    /// contents as a single string.
    fn render_to_string(app: &mut App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();

        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for (i, cell) in buffer.content.iter().enumerate() {
            out.push_str(cell.symbol());
            if (i + 1) % buffer.area.width as usize == 0 {
                out.push('\n');
            }
        }
        out
    }

    #[test]
    fn test_draw_renders_all_default_panels() {
        let mut app = App::new(AppConfig::default());
        let screen = render_to_string(&mut app, 100, 40);

        assert!(screen.contains("ptail"));
        for name in ["stats", "progress", "performance", "process", "update"] {
            assert!(screen.contains(name), "panel {} missing:\n{}", name, screen);
        }
        assert!(screen.contains("q quit"));
    }

    #[test]
    fn test_draw_shows_routed_content() {
        let mut app = App::new(AppConfig::default());
        app.on_raw_line("[#stats]hello from the test");
        app.on_raw_line("[@progress]Copy file (3/10) 30.0%");

        let screen = render_to_string(&mut app, 100, 40);
        assert!(screen.contains("hello from the test"));
        assert!(screen.contains("Copy file"));
        assert!(screen.contains("30.0%"));
    }

    #[test]
    fn test_draw_survives_small_terminal() {
        let mut app = App::new(AppConfig::default());
        // Too small for 5 panels at min height; must not panic.
        let screen = render_to_string(&mut app, 20, 8);
        assert!(screen.contains("ptail"));
    }
}
