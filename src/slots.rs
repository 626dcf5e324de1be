//! Per-panel progress slot table.
//!
//! Each distinct progress prefix owns one visual slot for as long as it
//! is active, so repeated updates redraw in place instead of scrolling.
//! Slots are a scarce resource (panels have limited vertical room):
//! when a new prefix arrives and slots exist, a completed bar's slot is
//! recycled first; failing that, the oldest slot is displaced so the
//! panel keeps making forward progress under churn.

use std::collections::{BTreeMap, HashMap};

use crate::progress::ProgressInfo;

// ---------------------------------------------------------------------------
// ProgressEntry
// ---------------------------------------------------------------------------

/// Live state of one tracked progress bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEntry {
    /// Identity key: the message text minus its percentage/fraction suffix.
    pub prefix: String,
    /// Latest percentage, clamped to `[0, 100]`.
    pub percentage: f64,
    /// Latest `(current, total)` fraction, if the update carried one.
    pub fraction: Option<(u64, u64)>,
    /// Fraction segment in its original bracket style, for display.
    pub fraction_display: Option<String>,
    /// Stable visual slot index within the panel.
    pub slot: usize,
}

impl ProgressEntry {
    /// A bar at 100% is completed and becomes the preferred eviction
    /// target for the next new prefix.
    pub fn completed(&self) -> bool {
        self.percentage >= 100.0
    }
}

// ---------------------------------------------------------------------------
// SlotTable
// ---------------------------------------------------------------------------

/// Maps progress prefixes to stable display slots.
///
/// Invariants:
/// - at most one live entry per prefix;
/// - updating an existing prefix never changes its slot;
/// - an evicted entry and its slot mapping are removed together, so the
///   two maps never hold orphans of each other.
#[derive(Debug, Default)]
pub struct SlotTable {
    entries: HashMap<String, ProgressEntry>,
    /// slot index -> prefix, ordered so iteration is ascending by slot.
    slots: BTreeMap<usize, String>,
    next_slot: usize,
}

impl SlotTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update the entry for `info.prefix`, returning its slot.
    ///
    /// Existing prefixes update in place and keep their slot. New
    /// prefixes acquire a slot via the recycle-completed / displace-
    /// oldest / allocate-fresh policy. Percentages above 100 are
    /// clamped to 100 on entry.
    pub fn upsert(&mut self, info: ProgressInfo) -> usize {
        let percentage = info.percentage.min(100.0);

        if let Some(entry) = self.entries.get_mut(&info.prefix) {
            entry.percentage = percentage;
            entry.fraction = info.fraction;
            entry.fraction_display = info.fraction_display;
            return entry.slot;
        }

        let slot = self.acquire_slot();
        self.slots.insert(slot, info.prefix.clone());
        self.entries.insert(
            info.prefix.clone(),
            ProgressEntry {
                prefix: info.prefix,
                percentage,
                fraction: info.fraction,
                fraction_display: info.fraction_display,
                slot,
            },
        );
        slot
    }

    /// Pick a slot for a new prefix.
    ///
    /// 1. Recycle the lowest-indexed slot whose entry is completed.
    /// 2. Otherwise displace the oldest (smallest-index) slot.
    /// 3. Otherwise allocate a fresh index from the counter.
    fn acquire_slot(&mut self) -> usize {
        let completed = self
            .slots
            .iter()
            .find(|(_, prefix)| {
                self.entries
                    .get(prefix.as_str())
                    .map_or(false, |e| e.completed())
            })
            .map(|(slot, prefix)| (*slot, prefix.clone()));
        if let Some((slot, prefix)) = completed {
            self.entries.remove(&prefix);
            self.slots.remove(&slot);
            return slot;
        }

        let oldest = self
            .slots
            .iter()
            .next()
            .map(|(slot, prefix)| (*slot, prefix.clone()));
        if let Some((slot, prefix)) = oldest {
            self.entries.remove(&prefix);
            self.slots.remove(&slot);
            return slot;
        }

        let slot = self.next_slot;
        self.next_slot += 1;
        slot
    }

    /// Iterate live entries in ascending slot order.
    pub fn iter_by_slot(&self) -> impl Iterator<Item = &ProgressEntry> {
        self.slots
            .values()
            .filter_map(move |prefix| self.entries.get(prefix))
    }

    /// Number of live progress bars.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Look up the live entry for a prefix.
    pub fn get(&self, prefix: &str) -> Option<&ProgressEntry> {
        self.entries.get(prefix)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- Helpers ----------------------------------------------------------

    fn info(prefix: &str, percentage: f64) -> ProgressInfo {
        ProgressInfo {
            prefix: prefix.to_string(),
            percentage,
            fraction: None,
            fraction_display: None,
        }
    }

    // -- 1. Update preserves slot -----------------------------------------

    #[test]
    fn test_update_preserves_slot_index() {
        let mut table = SlotTable::new();
        let slot_a = table.upsert(info("copy", 40.0));
        let slot_b = table.upsert(info("copy", 75.0));
        assert_eq!(slot_a, slot_b);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("copy").unwrap().percentage, 75.0);
    }

    // -- 2. Distinct prefixes get distinct slots --------------------------

    #[test]
    fn test_distinct_prefixes_distinct_slots() {
        let mut table = SlotTable::new();
        let a = table.upsert(info("copy", 10.0));
        let b = table.upsert(info("verify", 20.0));
        assert_ne!(a, b);
        assert_eq!(table.len(), 2);
    }

    // -- 3. Completed slot is recycled first ------------------------------

    #[test]
    fn test_completed_slot_recycled_before_older_active() {
        let mut table = SlotTable::new();
        let oldest = table.upsert(info("old-active", 10.0));
        let done = table.upsert(info("finished", 100.0));

        // The new prefix must take the completed slot, not the oldest.
        let fresh = table.upsert(info("newcomer", 5.0));
        assert_eq!(fresh, done);
        assert_ne!(fresh, oldest);

        // The completed entry and its slot mapping are gone together.
        assert!(table.get("finished").is_none());
        assert!(table.get("old-active").is_some());
        assert_eq!(table.len(), 2);
    }

    // -- 4. Oldest slot displaced when nothing is completed ---------------

    #[test]
    fn test_oldest_slot_displaced_without_completions() {
        let mut table = SlotTable::new();
        let first = table.upsert(info("one", 10.0));
        table.upsert(info("two", 20.0));
        table.upsert(info("three", 30.0));

        let fresh = table.upsert(info("four", 5.0));
        assert_eq!(fresh, first, "oldest slot should be displaced");
        assert!(table.get("one").is_none());
        assert_eq!(table.len(), 3);
    }

    // -- 5. Fresh allocation on an empty table ----------------------------

    #[test]
    fn test_fresh_allocation_counts_up() {
        let mut table = SlotTable::new();
        assert_eq!(table.upsert(info("a1", 1.0)), 0);
        assert_eq!(table.upsert(info("a2", 1.0)), 1);
        assert_eq!(table.upsert(info("a3", 1.0)), 2);
    }

    // -- 6. Iteration order is ascending by slot --------------------------

    #[test]
    fn test_iter_by_slot_ascending() {
        let mut table = SlotTable::new();
        table.upsert(info("first", 10.0));
        table.upsert(info("second", 20.0));
        table.upsert(info("third", 30.0));

        let order: Vec<_> = table.iter_by_slot().map(|e| e.prefix.as_str()).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    // -- 7. Percentage clamped at 100 -------------------------------------

    #[test]
    fn test_percentage_clamped_to_100() {
        let mut table = SlotTable::new();
        table.upsert(info("burst", 150.0));
        let entry = table.get("burst").unwrap();
        assert_eq!(entry.percentage, 100.0);
        assert!(entry.completed());
    }

    // -- 8. Lowest-indexed completed slot wins ----------------------------

    #[test]
    fn test_lowest_completed_slot_recycled() {
        let mut table = SlotTable::new();
        let s0 = table.upsert(info("done-low", 100.0));
        table.upsert(info("active", 50.0));
        let _s2 = table.upsert(info("done-high", 100.0));

        let fresh = table.upsert(info("new", 1.0));
        assert_eq!(fresh, s0);
        assert!(table.get("done-low").is_none());
        assert!(table.get("done-high").is_some());
    }

    // -- 9. Fraction fields updated in place ------------------------------

    #[test]
    fn test_fraction_fields_follow_latest_update() {
        let mut table = SlotTable::new();
        table.upsert(ProgressInfo {
            prefix: "copy".to_string(),
            percentage: 30.0,
            fraction: Some((3, 10)),
            fraction_display: Some("(3/10)".to_string()),
        });
        table.upsert(ProgressInfo {
            prefix: "copy".to_string(),
            percentage: 40.0,
            fraction: Some((4, 10)),
            fraction_display: Some("(4/10)".to_string()),
        });

        let entry = table.get("copy").unwrap();
        assert_eq!(entry.fraction, Some((4, 10)));
        assert_eq!(entry.fraction_display.as_deref(), Some("(4/10)"));
    }
}
