//! Tag routing: decide which panel a raw log line belongs to.
//!
//! Producers embed a destination tag anywhere in a log line:
//!
//! - `[#name]content` - ordinary message for panel `name`
//! - `[@name]content` - candidate progress update for panel `name`
//!
//! `name` must be at least two word characters. The earliest matching
//! tag in the line wins; anything after the closing bracket is the
//! content (later bracketed text is left in the content verbatim).
//! Lines without a recognizable tag are dropped; routing them to a
//! fallback panel is a caller policy, not something this module does.

use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Compiled patterns
// ---------------------------------------------------------------------------

/// Matches `[#name]` or `[@name]` with a name of >= 2 word characters.
/// `find` returns the leftmost occurrence, so text before the tag
/// (timestamps, emoji, pid prefixes) is tolerated.
static PANEL_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([#@])(\w{2,})\]").unwrap());

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Log level of the originating record.
///
/// Carried alongside the line because severity decoration is derived
/// from the producer's log level, never from the message text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// TaggedLine
// ---------------------------------------------------------------------------

/// How the line asked to be handled, per its tag sigil.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `[@name]` - the content is a candidate progress update.
    Progress,
    /// `[#name]` - ordinary message.
    Normal,
}

/// The immutable result of routing one raw line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedLine {
    /// Destination panel name.
    pub panel: String,
    /// Progress or normal, per the tag sigil. Tag intent is authoritative
    /// for `Normal`; `Progress` content that fails to parse degrades to
    /// normal handling downstream.
    pub kind: LineKind,
    /// Line text strictly after the closing bracket, trimmed.
    pub content: String,
    /// Severity of the originating record.
    pub severity: Severity,
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

/// Parse a raw line into a [`TaggedLine`], or `None` if no tag is found.
pub fn route(raw: &str, severity: Severity) -> Option<TaggedLine> {
    let caps = PANEL_TAG_RE.captures(raw)?;
    let whole = caps.get(0)?;
    let sigil = caps.get(1)?.as_str();
    let panel = caps.get(2)?.as_str().to_string();

    let kind = if sigil == "@" {
        LineKind::Progress
    } else {
        LineKind::Normal
    };
    let content = raw[whole.end()..].trim().to_string();

    Some(TaggedLine {
        panel,
        kind,
        content,
        severity,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- 1. Basic normal tag ------------------------------------------------

    #[test]
    fn test_route_normal_tag() {
        let line = route("[#stats]CPU high", Severity::Info).unwrap();
        assert_eq!(line.panel, "stats");
        assert_eq!(line.kind, LineKind::Normal);
        assert_eq!(line.content, "CPU high");
        assert_eq!(line.severity, Severity::Info);
    }

    // -- 2. Basic progress tag ----------------------------------------------

    #[test]
    fn test_route_progress_tag() {
        let line = route("[@progress]Copy file 30%", Severity::Info).unwrap();
        assert_eq!(line.panel, "progress");
        assert_eq!(line.kind, LineKind::Progress);
        assert_eq!(line.content, "Copy file 30%");
    }

    // -- 3. No tag → dropped ------------------------------------------------

    #[test]
    fn test_route_untagged_line_dropped() {
        assert_eq!(route("no tag here", Severity::Info), None);
        assert_eq!(route("", Severity::Info), None);
        assert_eq!(route("[plain] brackets", Severity::Info), None);
    }

    // -- 4. Tag not at line start -------------------------------------------

    #[test]
    fn test_route_tag_after_prefix_text() {
        let line = route("2025-01-15 10:00:01 INFO [#update]done", Severity::Info).unwrap();
        assert_eq!(line.panel, "update");
        assert_eq!(line.content, "done");
    }

    // -- 5. Only the first matching tag is honored --------------------------

    #[test]
    fn test_route_first_tag_wins_later_tags_kept_in_content() {
        let line = route("[#first]text [#second]more", Severity::Info).unwrap();
        assert_eq!(line.panel, "first");
        assert_eq!(line.content, "text [#second]more");
    }

    // -- 6. Short names are not valid tags ----------------------------------

    #[test]
    fn test_route_single_char_name_rejected() {
        // `[#a]` has a 1-char name; the later valid tag is the first match.
        let line = route("[#a] noise [#real]content", Severity::Warning).unwrap();
        assert_eq!(line.panel, "real");
        assert_eq!(line.content, "content");
        assert_eq!(line.severity, Severity::Warning);
    }

    #[test]
    fn test_route_only_short_name_dropped() {
        assert_eq!(route("[#a]content", Severity::Info), None);
    }

    // -- 7. Content trimming ------------------------------------------------

    #[test]
    fn test_route_content_is_trimmed() {
        let line = route("[#proc]   padded   ", Severity::Info).unwrap();
        assert_eq!(line.content, "padded");
    }

    #[test]
    fn test_route_empty_content() {
        let line = route("[#proc]", Severity::Info).unwrap();
        assert_eq!(line.content, "");
    }

    // -- 8. Name boundaries -------------------------------------------------

    #[test]
    fn test_route_name_with_digits_and_underscore() {
        let line = route("[@task_2]step 1/4 25%", Severity::Info).unwrap();
        assert_eq!(line.panel, "task_2");
        assert_eq!(line.kind, LineKind::Progress);
    }

    #[test]
    fn test_route_name_with_space_rejected() {
        // `\w` does not match spaces, so this is not a tag.
        assert_eq!(route("[#two words]x", Severity::Info), None);
    }
}
