//! Progress update recognition and parsing.
//!
//! A content string qualifies as a progress update only when it ends
//! with a percentage token or a parenthesized fraction, end-anchored:
//!
//! - `Copy file 30%`
//! - `Copy file (3/10) 30.0%` - fraction segment echoed in the bar
//! - `Copy file [3/10] 30.0%` - square-bracket style preserved
//! - `Copy file 3/10 30.0%` - unbracketed segment echoed as-is
//! - `Copy file (3/10)` - fraction-as-percentage, computed as 3/10*100
//!
//! Anything after the percentage/fraction disqualifies the string, as
//! does a missing terminal token; such content falls back to the
//! normal-message path. The prefix (content minus the matched suffix)
//! is the identity key for the panel's slot table.

use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Compiled pattern
// ---------------------------------------------------------------------------

/// End-anchored progress grammar:
/// `<prefix> <optional fraction segment> <percentage | (cur/tot)>`.
///
/// The lazy prefix plus the `$` anchor force the terminal token to be
/// the true end of the string. The regex crate has no lookahead, so the
/// grammar is expressed purely through anchoring and alternation.
static PROGRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^(?P<prefix>.*?)
        \s*
        (?:
            (?P<open>[\[(]) (?P<scur>\d+) / (?P<stot>\d+) [\])]
          | (?P<ucur>\d+) / (?P<utot>\d+)
        )?
        \s*
        (?:
            (?P<pct>\d+(?:\.\d+)?) %
          | \( (?P<fcur>\d+) / (?P<ftot>\d+) \)
        )$",
    )
    .unwrap()
});

// ---------------------------------------------------------------------------
// ProgressInfo
// ---------------------------------------------------------------------------

/// Parsed progress update, ready for slot-table upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressInfo {
    /// Content with the fraction/percentage suffix stripped and trimmed.
    /// Identity key for the progress bar.
    pub prefix: String,
    /// Percentage value. Taken directly from a trailing `NN%`, or
    /// computed as `cur/tot*100` from a trailing `(cur/tot)`.
    pub percentage: f64,
    /// `(current, total)` from the trailing fraction if present, else
    /// from the fraction segment.
    pub fraction: Option<(u64, u64)>,
    /// The fraction segment echoed in its original bracket style
    /// (`(3/10)`, `[3/10]`, or bare `3/10`). `None` when the only
    /// fraction was the terminal `(cur/tot)` token.
    pub fraction_display: Option<String>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse `content` as a progress update, or `None` if it does not
/// match the end-anchored grammar.
///
/// A trailing fraction with `total == 0` does not parse (the caller
/// degrades the line to normal-message handling).
pub fn parse_progress(content: &str) -> Option<ProgressInfo> {
    let caps = PROGRESS_RE.captures(content)?;
    let prefix = caps
        .name("prefix")
        .map_or("", |m| m.as_str())
        .trim()
        .to_string();

    // Terminal token: bare percentage, or fraction-as-percentage.
    let (percentage, terminal_fraction) = if let Some(pct) = caps.name("pct") {
        (pct.as_str().parse::<f64>().ok()?, None)
    } else {
        let cur: u64 = caps.name("fcur")?.as_str().parse().ok()?;
        let tot: u64 = caps.name("ftot")?.as_str().parse().ok()?;
        if tot == 0 {
            return None;
        }
        (cur as f64 * 100.0 / tot as f64, Some((cur, tot)))
    };

    // Optional fraction segment before the terminal token, echoed back
    // in the same bracket style it arrived in.
    let (segment_fraction, fraction_display) = if let Some(open) = caps.name("open") {
        let cur: u64 = caps.name("scur")?.as_str().parse().ok()?;
        let tot: u64 = caps.name("stot")?.as_str().parse().ok()?;
        let close = if open.as_str() == "(" { ")" } else { "]" };
        (
            Some((cur, tot)),
            Some(format!("{}{}/{}{}", open.as_str(), cur, tot, close)),
        )
    } else if let Some(ucur) = caps.name("ucur") {
        let cur: u64 = ucur.as_str().parse().ok()?;
        let tot: u64 = caps.name("utot")?.as_str().parse().ok()?;
        (Some((cur, tot)), Some(format!("{}/{}", cur, tot)))
    } else {
        (None, None)
    };

    Some(ProgressInfo {
        prefix,
        percentage,
        fraction: terminal_fraction.or(segment_fraction),
        fraction_display,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // -- 1. Percentage with bracketed fraction segment -----------------------

    #[test]
    fn test_parse_fraction_segment_and_percentage() {
        let info = parse_progress("Copy file (3/10) 30.0%").unwrap();
        assert_eq!(info.prefix, "Copy file");
        assert_eq!(info.percentage, 30.0);
        assert_eq!(info.fraction, Some((3, 10)));
        assert_eq!(info.fraction_display.as_deref(), Some("(3/10)"));
    }

    // -- 2. Bare percentage --------------------------------------------------

    #[test]
    fn test_parse_bare_percentage() {
        let info = parse_progress("Build: 87%").unwrap();
        assert_eq!(info.prefix, "Build:");
        assert_eq!(info.percentage, 87.0);
        assert_eq!(info.fraction, None);
        assert_eq!(info.fraction_display, None);
    }

    // -- 3. Bracket styles are echoed back -----------------------------------

    #[rstest]
    #[case("scan [2/8] 25%", "[2/8]")]
    #[case("scan (2/8) 25%", "(2/8)")]
    #[case("scan 2/8 25%", "2/8")]
    fn test_fraction_display_preserves_bracket_style(
        #[case] content: &str,
        #[case] expected: &str,
    ) {
        let info = parse_progress(content).unwrap();
        assert_eq!(info.prefix, "scan");
        assert_eq!(info.percentage, 25.0);
        assert_eq!(info.fraction, Some((2, 8)));
        assert_eq!(info.fraction_display.as_deref(), Some(expected));
    }

    // -- 4. Trailing fraction-as-percentage ----------------------------------

    #[test]
    fn test_parse_trailing_fraction_as_percentage() {
        let info = parse_progress("Download (5/10)").unwrap();
        assert_eq!(info.prefix, "Download");
        assert_eq!(info.percentage, 50.0);
        assert_eq!(info.fraction, Some((5, 10)));
        assert_eq!(info.fraction_display, None);
    }

    #[test]
    fn test_parse_trailing_fraction_zero_total_rejected() {
        assert_eq!(parse_progress("Download (5/0)"), None);
    }

    // -- 5. Decimal percentages ----------------------------------------------

    #[test]
    fn test_parse_decimal_percentage() {
        let info = parse_progress("encode 99.5%").unwrap();
        assert_eq!(info.prefix, "encode");
        assert_eq!(info.percentage, 99.5);
    }

    // -- 6. Empty prefix -----------------------------------------------------

    #[test]
    fn test_parse_percentage_only() {
        let info = parse_progress("100%").unwrap();
        assert_eq!(info.prefix, "");
        assert_eq!(info.percentage, 100.0);
    }

    // -- 7. Rejections -------------------------------------------------------

    #[rstest]
    #[case("plain status line")]
    #[case("Task 3/10")] // bare fraction without trailing % or (cur/tot)
    #[case("50% done")] // trailing text after the percentage
    #[case("45.%")] // malformed decimal
    #[case("")]
    fn test_parse_rejects_non_progress(#[case] content: &str) {
        assert_eq!(parse_progress(content), None);
    }

    // -- 8. Prefix containing digits -----------------------------------------

    #[test]
    fn test_parse_prefix_keeps_interior_numbers() {
        let info = parse_progress("Task 12 (3/10) 30%").unwrap();
        assert_eq!(info.prefix, "Task 12");
        assert_eq!(info.fraction, Some((3, 10)));
        assert_eq!(info.percentage, 30.0);
    }

    // -- 9. Values above 100 pass through ------------------------------------

    #[test]
    fn test_parse_percentage_above_100_is_not_clamped_here() {
        // Clamping to the [0, 100] entry invariant happens at upsert.
        let info = parse_progress("overshoot 150%").unwrap();
        assert_eq!(info.percentage, 150.0);
    }
}
