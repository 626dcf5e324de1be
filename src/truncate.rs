//! Opt-in width-aware message truncation.
//!
//! Disabled by default; when enabled, over-long messages are shortened
//! with a bias toward keeping the parts humans scan for: file
//! extensions, bracketed annotations next to a filename, and trailing
//! numeric/percentage tokens. Path-like substrings are truncated
//! independently so one long path does not swallow the whole budget.
//!
//! All length accounting is in characters, not bytes.

use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Compiled patterns
// ---------------------------------------------------------------------------

/// Path-like substrings: Windows drive paths, absolute Unix paths with
/// at least two components, or any token carrying a file extension.
static PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z]:\\[^\s]+|/([^\s/]+/){2,}[^\s/]+|\S+\.[a-zA-Z0-9]+)").unwrap()
});

/// Trailing numeric information worth preserving: a number, percentage,
/// or `(n/m)` fraction followed only by non-digits until the end.
static TRAILING_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.?\d*%?|\(\d+/\d+\))[^\d]*$").unwrap());

/// A bracketed annotation inside a file base name.
static BRACKET_BASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)(\[.*?\])(.*?)$").unwrap());

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Truncation settings, typically sourced from `[display]` config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruncateOptions {
    /// Master switch; when false, `truncate_message` is the identity.
    pub enabled: bool,
    /// Width budget for a whole message (floored at 40).
    pub max_width: usize,
    /// Maximum characters allotted to a single path-like substring.
    pub max_filename: usize,
}

impl Default for TruncateOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            max_width: 80,
            max_filename: 40,
        }
    }
}

// ---------------------------------------------------------------------------
// Char-based slicing helpers
// ---------------------------------------------------------------------------

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// First `n` characters of `s`.
fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Last `n` characters of `s`.
fn last_chars(s: &str, n: usize) -> &str {
    let len = char_len(s);
    match s.char_indices().nth(len.saturating_sub(n)) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}

/// Split `path` into (base, extension), where the extension starts at
/// the last dot of the final path component (never its first char).
fn split_extension(path: &str) -> (&str, &str) {
    let comp_start = path.rfind(['/', '\\']).map(|i| i + 1).unwrap_or(0);
    let component = &path[comp_start..];
    match component.rfind('.') {
        Some(pos) if pos > 0 => {
            let split = comp_start + pos;
            (&path[..split], &path[split..])
        }
        _ => (path, ""),
    }
}

// ---------------------------------------------------------------------------
// Path truncation
// ---------------------------------------------------------------------------

/// Shorten one path-like substring to at most `max_length` characters.
///
/// The extension always survives intact. A bracketed annotation in the
/// base name (e.g. `report[v2].pdf`) survives when it fits. Paths
/// without an extension are cut with a plain trailing ellipsis.
pub fn truncate_path(path: &str, max_length: usize) -> String {
    if char_len(path) <= max_length {
        return path.to_string();
    }

    let (base, ext) = split_extension(path);
    if !ext.is_empty() {
        let ext_len = char_len(ext);
        if ext_len + 4 >= max_length {
            return format!("...{}", last_chars(ext, max_length.saturating_sub(3)));
        }
        let base_length = max_length - ext_len - 3;

        if let Some(caps) = BRACKET_BASE_RE.captures(base) {
            let prefix = caps.get(1).map_or("", |m| m.as_str());
            let brackets = caps.get(2).map_or("", |m| m.as_str());
            let brackets_len = char_len(brackets);
            if brackets_len + ext_len + 6 <= max_length {
                let available = max_length - (brackets_len + ext_len + 6);
                if available > 0 {
                    let prefix_len = char_len(prefix).min(available / 2);
                    return format!("{}...{}...{}", take_chars(prefix, prefix_len), brackets, ext);
                }
            }
        }

        return format!("{}...{}", take_chars(base, base_length), ext);
    }

    format!("{}...", take_chars(path, max_length.saturating_sub(3)))
}

// ---------------------------------------------------------------------------
// Message truncation
// ---------------------------------------------------------------------------

/// Shorten `content` to the configured width budget.
///
/// Returns the input unchanged when truncation is disabled or the
/// message already fits. Otherwise each path-like substring is
/// shortened independently (minimum 5 useful characters, else the last
/// 10 characters behind `...`); if the message is still over budget, a
/// trailing numeric token is preserved across the cut.
pub fn truncate_message(content: &str, opts: &TruncateOptions) -> String {
    if !opts.enabled {
        return content.to_string();
    }

    let max_len = opts.max_width.max(40);
    if char_len(content) <= max_len {
        return content.to_string();
    }

    let matches: Vec<(usize, usize, &str)> = PATH_RE
        .find_iter(content)
        .map(|m| (m.start(), m.end(), m.as_str()))
        .collect();

    let shortened = if matches.is_empty() {
        // No paths: keep the head and tail of the message.
        let available = max_len.saturating_sub(5);
        if available > 20 {
            let front = available * 6 / 10;
            let back = available - front;
            format!("{}...{}", take_chars(content, front), last_chars(content, back))
        } else {
            format!("{}...", take_chars(content, max_len.saturating_sub(3)))
        }
    } else {
        let file_space = (max_len / 2).min(opts.max_filename);
        let mut out = String::new();
        let mut cursor = 0;
        for (start, end, text) in matches {
            out.push_str(&content[cursor..start]);
            let mut shortened_path = truncate_path(text, file_space);
            if char_len(&shortened_path) < 5 {
                shortened_path = format!("...{}", last_chars(text, 10));
            }
            out.push_str(&shortened_path);
            cursor = end;
        }
        out.push_str(&content[cursor..]);
        out
    };

    if char_len(&shortened) <= max_len {
        return shortened;
    }

    // Still over budget: keep trailing numeric info visible if present.
    if let Some(m) = TRAILING_NUMBER_RE.find(&shortened) {
        let end_part = &shortened[m.start()..];
        let end_len = char_len(end_part);
        let available = max_len.saturating_sub(end_len + 3);
        if available > 10 {
            return format!("{}...{}", take_chars(&shortened, available), end_part);
        }
        return format!(
            "{}...{}",
            take_chars(&shortened, max_len.saturating_sub(10)),
            last_chars(end_part, 7)
        );
    }

    format!("{}...", take_chars(&shortened, max_len.saturating_sub(3)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
