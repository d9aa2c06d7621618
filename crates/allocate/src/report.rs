use serde::{Deserialize, Serialize};

/// Summary of one allocation run, reported to the output consumer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AllocationReport {
    /// Items processed
    pub items: usize,

    /// Total assets placed across all items
    pub placements: usize,

    /// Items whose ranked candidate list was empty ("no match" cases)
    pub unmatched_items: Vec<String>,

    /// Reserved candidates accepted anyway because no alternative met the
    /// relaxation threshold; these assets stay shared between items
    pub shared_accepts: usize,

    /// Reserved candidates skipped in favor of a close-enough unique
    /// alternative
    pub unique_swaps: usize,

    /// Items topped up by the fallback refill after the uniqueness pass
    pub refilled_items: usize,
}

impl AllocationReport {
    pub(crate) fn add_item(&mut self, placed: usize) {
        self.items += 1;
        self.placements += placed;
    }

    pub(crate) fn add_unmatched(&mut self, item_id: impl Into<String>) {
        self.unmatched_items.push(item_id.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_counts() {
        let mut report = AllocationReport::default();
        report.add_item(3);
        report.add_item(0);
        report.add_unmatched("q-02");

        assert_eq!(report.items, 2);
        assert_eq!(report.placements, 3);
        assert_eq!(report.unmatched_items, vec!["q-02".to_string()]);
    }
}
