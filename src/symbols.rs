//! Symbol set for panel rendering.
//!
//! Unicode mode uses block/shade glyphs for progress bars and emoji
//! for severity; ASCII mode uses basic characters for terminals that
//! lack Unicode support.

// ---------------------------------------------------------------------------
// Symbols struct
// ---------------------------------------------------------------------------

/// Glyph set used when assembling panel rows.
#[derive(Debug, Clone)]
pub struct Symbols {
    /// Filled progress-bar cell (Unicode: `\u{2588}` / ASCII: `#`)
    pub bar_filled: &'static str,
    /// Empty progress-bar cell (Unicode: `\u{2591}` / ASCII: `-`)
    pub bar_empty: &'static str,
    /// Completion marker appended to a 100% bar (Unicode: ✅ / ASCII: `OK`)
    pub completed: &'static str,
    /// Bullet for normal message rows (Unicode: `\u{2022}` / ASCII: `-`)
    pub bullet: &'static str,
    /// Warning-severity prefix (Unicode: ⚠️ / ASCII: `!`)
    pub warning: &'static str,
    /// Error-severity prefix (Unicode: ❌ / ASCII: `x`)
    pub error: &'static str,
}

impl Symbols {
    /// Create a `Symbols` based on the mode flag.
    ///
    /// When `ascii_mode` is `true`, returns ASCII-safe characters.
    pub fn new(ascii_mode: bool) -> Self {
        if ascii_mode {
            Self::ascii()
        } else {
            Self::unicode()
        }
    }

    /// Unicode symbol set.
    pub fn unicode() -> Self {
        Self {
            bar_filled: "\u{2588}", // █
            bar_empty: "\u{2591}",  // ░
            completed: "✅",
            bullet: "\u{2022}", // •
            warning: "⚠️",
            error: "❌",
        }
    }

    /// ASCII-safe symbol set.
    pub fn ascii() -> Self {
        Self {
            bar_filled: "#",
            bar_empty: "-",
            completed: "OK",
            bullet: "-",
            warning: "!",
            error: "x",
        }
    }
}

impl Default for Symbols {
    fn default() -> Self {
        Self::unicode()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
