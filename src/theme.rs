//! Theme support for the TUI shell.
//!
//! [`ThemeColors`] covers the fixed chrome (header, status bar, default
//! borders) with dark/light variants. Panel borders and text use the
//! panel's declared style string, mapped to a terminal color by
//! [`style_color`]; the palette accepts basic ANSI names, `light*`
//! variants, gray names, and `#rrggbb` hex values.

use ratatui::style::Color;

use crate::cli::Theme;

// ---------------------------------------------------------------------------
// ThemeColors
// ---------------------------------------------------------------------------

/// Color definitions for the fixed chrome.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeColors {
    /// Header row foreground.
    pub header_fg: Color,
    /// Header row background.
    pub header_bg: Color,
    /// Status bar foreground.
    pub status_bar_fg: Color,
    /// Status bar background.
    pub status_bar_bg: Color,
    /// Placeholder text (e.g. "waiting for log lines").
    pub placeholder: Color,
    /// Fallback for unknown panel style strings.
    pub panel_fallback: Color,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            header_fg: Color::White,
            header_bg: Color::DarkGray,
            status_bar_fg: Color::Gray,
            status_bar_bg: Color::DarkGray,
            placeholder: Color::DarkGray,
            panel_fallback: Color::White,
        }
    }

    pub fn light() -> Self {
        Self {
            header_fg: Color::Black,
            header_bg: Color::Gray,
            status_bar_fg: Color::Black,
            status_bar_bg: Color::Gray,
            placeholder: Color::Gray,
            panel_fallback: Color::Black,
        }
    }

    pub fn from_theme(theme: &Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }
}

// ---------------------------------------------------------------------------
// Panel style strings
// ---------------------------------------------------------------------------

/// Map a panel style string to a terminal color.
///
/// Recognized: basic ANSI names, `light*` variants, `light_gray` /
/// `dark_gray` (with and without underscore), and `#rrggbb` hex.
/// Unknown strings return `fallback`.
pub fn style_color(style: &str, fallback: Color) -> Color {
    if let Some(rgb) = parse_hex_color(style) {
        return rgb;
    }
    match style.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        "light_gray" | "lightgray" => Color::Gray,
        "dark_gray" | "darkgray" => Color::DarkGray,
        _ => fallback,
    }
}

/// Parse `#rrggbb` into an RGB color. Returns `None` for anything else.
fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
