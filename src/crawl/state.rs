//! Run statistics.

use std::collections::HashMap;

use crate::fs::{Cleanup, SortOutcome};
use crate::media::MediaKind;

/// Tally of one crawl run.
#[derive(Debug, Default)]
pub struct RunStats {
    pub username: String,

    /// No profile context could be acquired; nothing was downloaded.
    pub profile_unavailable: bool,

    /// Enumeration raised and ended the post loop.
    pub enumeration_failed: bool,

    pub posts_seen: u64,
    pub posts_processed: u64,
    pub posts_failed: u64,

    /// Sorting tallies per media kind.
    pub sorted: HashMap<MediaKind, SortOutcome>,

    pub cleanup: Option<Cleanup>,
}

impl RunStats {
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            ..Default::default()
        }
    }

    /// Add one sorting pass to the tally of its kind.
    pub fn record_sort(&mut self, kind: MediaKind, outcome: SortOutcome) {
        self.sorted.entry(kind).or_default().merge(outcome);
    }

    /// Sorting tally for a kind.
    pub fn sorted_for(&self, kind: MediaKind) -> SortOutcome {
        self.sorted.get(&kind).copied().unwrap_or_default()
    }

    /// Sum of all sorting tallies.
    pub fn total_sorted(&self) -> SortOutcome {
        let mut total = SortOutcome::default();
        for outcome in self.sorted.values() {
            total.merge(*outcome);
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_sort_accumulates() {
        let mut stats = RunStats::new("alice");
        stats.record_sort(
            MediaKind::Picture,
            SortOutcome {
                moved: 2,
                skipped: 1,
                failed: 0,
            },
        );
        stats.record_sort(
            MediaKind::Picture,
            SortOutcome {
                moved: 1,
                skipped: 0,
                failed: 1,
            },
        );
        stats.record_sort(
            MediaKind::Video,
            SortOutcome {
                moved: 4,
                skipped: 0,
                failed: 0,
            },
        );

        let pictures = stats.sorted_for(MediaKind::Picture);
        assert_eq!(pictures.moved, 3);
        assert_eq!(pictures.failed, 1);
        assert_eq!(stats.sorted_for(MediaKind::Caption), SortOutcome::default());
        assert_eq!(stats.total_sorted().moved, 7);
    }
}
