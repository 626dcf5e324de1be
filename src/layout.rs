//! Ratio-based vertical layout of panels.
//!
//! Pure arithmetic: no terminal types. Panels declare relative height
//! weights; the terminal height (minus fixed chrome rows) is split
//! proportionally. All panels except the last round down with a floor
//! of `min_rows`; the last panel absorbs the exact remainder so the
//! heights always sum to the available space with no rounding drift.

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Rows consumed by fixed chrome (header + status bar).
pub const DEFAULT_RESERVED_ROWS: u16 = 2;

/// Minimum rows for every panel except the last.
pub const DEFAULT_MIN_ROWS: u16 = 3;

// ---------------------------------------------------------------------------
// Height computation
// ---------------------------------------------------------------------------

/// Compute per-panel heights from declared ratios.
///
/// `available = terminal_height - reserved_rows`. Each panel except the
/// last receives `max(min_rows, floor(available / sum(ratios) * ratio))`;
/// the last receives `available - sum(previous)`, saturating at zero.
///
/// Zero ratios are coerced to 1 (the declared contract is positive
/// integers). An empty ratio list yields an empty vec.
pub fn compute_heights(
    ratios: &[u32],
    terminal_height: u16,
    reserved_rows: u16,
    min_rows: u16,
) -> Vec<u16> {
    if ratios.is_empty() {
        return Vec::new();
    }

    let available = terminal_height.saturating_sub(reserved_rows);
    let total: u32 = ratios.iter().map(|r| (*r).max(1)).sum();
    let unit = f64::from(available) / f64::from(total);

    let mut heights = Vec::with_capacity(ratios.len());
    let mut used: u16 = 0;

    for (i, &ratio) in ratios.iter().enumerate() {
        if i + 1 == ratios.len() {
            heights.push(available.saturating_sub(used));
        } else {
            let ideal = (unit * f64::from(ratio.max(1))).floor() as u16;
            let height = ideal.max(min_rows);
            used = used.saturating_add(height);
            heights.push(height);
        }
    }

    heights
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
