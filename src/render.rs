//! Panel row assembly: progress bars first, recent messages after.
//!
//! This is the engine's only output: an ordered list of display rows
//! for one panel, sized to the panel's viewport. The rendering shell
//! draws the rows verbatim; because some shells interpret square/curly
//! brackets as markup, every emitted row has literal brackets escaped.

use crate::messages::MessageBuffer;
use crate::slots::SlotTable;
use crate::symbols::Symbols;

// ---------------------------------------------------------------------------
// Markup escaping
// ---------------------------------------------------------------------------

/// Escape bracket/brace characters that markup-interpreting render
/// targets would otherwise treat as style directives.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '[' | ']' | '{' | '}' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Progress bar construction
// ---------------------------------------------------------------------------

/// Build the textual bar for one progress entry.
///
/// `avail_width` is the width left after the prefix; the bar itself
/// takes `max(10, avail_width - 20)` cells, leaving room for the
/// percentage and fraction text. A bar at >= 100% renders fully filled
/// with the completion marker instead of an empty-cell run.
pub fn progress_bar(
    avail_width: usize,
    percentage: f64,
    fraction_display: Option<&str>,
    symbols: &Symbols,
) -> String {
    let bar_width = avail_width.saturating_sub(20).max(10);

    let bar = if percentage >= 100.0 {
        format!("{} {}", symbols.bar_filled.repeat(bar_width), symbols.completed)
    } else {
        let filled = ((bar_width as f64) * percentage / 100.0).round() as usize;
        let filled = filled.min(bar_width);
        format!(
            "{}{}",
            symbols.bar_filled.repeat(filled),
            symbols.bar_empty.repeat(bar_width - filled)
        )
    };

    match fraction_display {
        Some(fraction) => format!("{} {} {:.1}%", bar, fraction, percentage),
        None => format!("{} {:.1}%", bar, percentage),
    }
}

// ---------------------------------------------------------------------------
// Row assembly
// ---------------------------------------------------------------------------

/// Produce the ordered display rows for one panel viewport.
///
/// `viewport_height` includes the panel's border/title chrome; two rows
/// are reserved for it (minimum one visible row). Progress bars occupy
/// the top rows in ascending slot order; whatever room remains shows
/// the most recent normal messages, newest last, each bulleted.
pub fn render_rows(
    slots: &SlotTable,
    messages: &MessageBuffer,
    viewport_width: u16,
    viewport_height: u16,
    symbols: &Symbols,
) -> Vec<String> {
    let visible_rows = usize::from(viewport_height.saturating_sub(2)).max(1);

    let mut rows = Vec::new();

    for entry in slots.iter_by_slot() {
        let prefix_width = entry.prefix.chars().count();
        let avail = usize::from(viewport_width).saturating_sub(prefix_width + 4);
        let bar = progress_bar(
            avail,
            entry.percentage,
            entry.fraction_display.as_deref(),
            symbols,
        );
        let row = if entry.prefix.is_empty() {
            bar
        } else {
            format!("{} {}", entry.prefix, bar)
        };
        rows.push(escape_markup(&row));
    }

    let remaining = visible_rows.saturating_sub(slots.len());
    if remaining > 0 {
        for message in messages.recent(remaining) {
            rows.push(format!("{} {}", symbols.bullet, escape_markup(message)));
        }
    }

    rows
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::ProgressInfo;

    fn info(prefix: &str, percentage: f64) -> ProgressInfo {
        ProgressInfo {
            prefix: prefix.to_string(),
            percentage,
            fraction: None,
            fraction_display: None,
        }
    }

    // -- 1. escape_markup ---------------------------------------------------

    #[test]
    fn test_escape_markup_brackets_and_braces() {
        assert_eq!(escape_markup("a[b]c{d}e"), r"a\[b\]c\{d\}e");
        assert_eq!(escape_markup("plain"), "plain");
    }

    // -- 2. progress_bar ----------------------------------------------------

    #[test]
    fn test_bar_half_filled() {
        let symbols = Symbols::ascii();
        // avail 40 -> bar width 20; 50% -> 10 filled, 10 empty.
        let bar = progress_bar(40, 50.0, None, &symbols);
        assert_eq!(bar, format!("{}{} 50.0%", "#".repeat(10), "-".repeat(10)));
    }

    #[test]
    fn test_bar_minimum_width_is_10() {
        let symbols = Symbols::ascii();
        let bar = progress_bar(0, 0.0, None, &symbols);
        assert!(bar.starts_with(&"-".repeat(10)));
    }

    #[test]
    fn test_bar_completed_has_no_empty_cells() {
        let symbols = Symbols::ascii();
        let bar = progress_bar(40, 100.0, None, &symbols);
        assert_eq!(bar, format!("{} OK 100.0%", "#".repeat(20)));
        assert!(!bar.contains('-'));
    }

    #[test]
    fn test_bar_includes_fraction_display() {
        let symbols = Symbols::ascii();
        let bar = progress_bar(40, 30.0, Some("(3/10)"), &symbols);
        assert!(bar.ends_with("(3/10) 30.0%"));
    }

    // -- 3. render_rows ordering --------------------------------------------

    #[test]
    fn test_progress_rows_before_messages() {
        let symbols = Symbols::ascii();
        let mut slots = SlotTable::new();
        slots.upsert(info("copy", 40.0));
        let mut messages = MessageBuffer::default();
        messages.push("aa status row one".to_string());

        let rows = render_rows(&slots, &messages, 80, 10, &symbols);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("copy "));
        assert!(rows[1].starts_with("- "));
        assert!(rows[1].contains("status row one"));
    }

    #[test]
    fn test_progress_rows_in_slot_order() {
        let symbols = Symbols::ascii();
        let mut slots = SlotTable::new();
        slots.upsert(info("first", 10.0));
        slots.upsert(info("second", 20.0));
        let messages = MessageBuffer::default();

        let rows = render_rows(&slots, &messages, 80, 10, &symbols);
        assert!(rows[0].starts_with("first "));
        assert!(rows[1].starts_with("second "));
    }

    // -- 4. Message budget shrinks with slot count ---------------------------

    #[test]
    fn test_messages_fill_rows_left_by_slots() {
        let symbols = Symbols::ascii();
        let mut slots = SlotTable::new();
        slots.upsert(info("job", 10.0));
        let mut messages = MessageBuffer::default();
        for i in 0..10 {
            messages.push(format!("t{} {}-message body", i, i));
        }

        // Viewport height 6 -> 4 visible rows -> 1 bar + 3 newest messages.
        let rows = render_rows(&slots, &messages, 80, 6, &symbols);
        assert_eq!(rows.len(), 4);
        assert!(rows[1].contains("7-message"));
        assert!(rows[3].contains("9-message"));
    }

    #[test]
    fn test_no_message_rows_when_slots_fill_viewport() {
        let symbols = Symbols::ascii();
        let mut slots = SlotTable::new();
        slots.upsert(info("one", 10.0));
        slots.upsert(info("two", 20.0));
        let mut messages = MessageBuffer::default();
        messages.push("aa should not appear".to_string());

        // Height 4 -> 2 visible rows, both taken by bars.
        let rows = render_rows(&slots, &messages, 80, 4, &symbols);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| !r.contains("should not appear")));
    }

    // -- 5. Tiny viewport still renders one row ------------------------------

    #[test]
    fn test_minimum_one_visible_row() {
        let symbols = Symbols::ascii();
        let slots = SlotTable::new();
        let mut messages = MessageBuffer::default();
        messages.push("aa only row stays".to_string());
        messages.push("bb newest row wins".to_string());

        let rows = render_rows(&slots, &messages, 80, 1, &symbols);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].contains("newest row wins"));
    }

    // -- 6. Escaping applied to message rows ---------------------------------

    #[test]
    fn test_message_rows_escaped() {
        let symbols = Symbols::ascii();
        let slots = SlotTable::new();
        let mut messages = MessageBuffer::default();
        messages.push("aa wrote file[0].json".to_string());

        let rows = render_rows(&slots, &messages, 80, 5, &symbols);
        assert!(rows[0].contains(r"file\[0\].json"));
    }
}
