//! Score distribution over the loaded result set.

use super::classify::{score_label, ScoreLabel};
use super::format::title_case;
use crate::models::Listing;
use serde::Serialize;

/// Listing counts per score label, plus the server-reported total
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InsightSummary {
    counts: [usize; 5],
    /// Matches available on the server, loaded or not
    pub total: u64,
}

impl InsightSummary {
    /// Counts are over `listings` only; `total` is passed through
    pub fn summarize(listings: &[Listing], total: u64) -> Self {
        let mut counts = [0usize; 5];
        for listing in listings {
            counts[score_label(listing.opportunity_score).index()] += 1;
        }
        Self { counts, total }
    }

    pub fn count(&self, label: ScoreLabel) -> usize {
        self.counts[label.index()]
    }

    /// Number of listings the counts were taken over
    pub fn loaded(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Non-empty buckets, best first
    pub fn breakdown(&self) -> Vec<(ScoreLabel, usize)> {
        ScoreLabel::ALL
            .iter()
            .map(|label| (*label, self.count(*label)))
            .filter(|(_, n)| *n > 0)
            .collect()
    }

    /// `Found 42 properties in Richmond`
    pub fn headline(&self, suburb: &str) -> String {
        format!("Found {} properties in {}", self.total, title_case(suburb))
    }

    /// `3 excellent, 1 very good, 2 fair opportunities`, or empty when nothing is loaded
    pub fn breakdown_text(&self) -> String {
        let parts: Vec<String> = self
            .breakdown()
            .into_iter()
            .map(|(label, n)| format!("{} {}", n, label.phrase()))
            .collect();
        if parts.is_empty() {
            String::new()
        } else {
            format!("{} opportunities", parts.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixture::demo_listing;

    fn scored(scores: &[f64]) -> Vec<Listing> {
        scores
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let mut listing = demo_listing("Richmond", i);
                listing.opportunity_score = *s;
                listing
            })
            .collect()
    }

    #[test]
    fn test_counts_sum_to_loaded_not_total() {
        let listings = scored(&[82.0, 80.0, 75.0, 61.0, 55.0, 12.0]);
        let summary = InsightSummary::summarize(&listings, 42);

        assert_eq!(summary.loaded(), 6);
        assert_eq!(summary.total, 42);
        assert_eq!(summary.count(ScoreLabel::Excellent), 2);
        assert_eq!(summary.count(ScoreLabel::VeryGood), 1);
        assert_eq!(summary.count(ScoreLabel::Limited), 1);
    }

    #[test]
    fn test_breakdown_text_skips_empty_buckets() {
        let listings = scored(&[91.0, 85.0, 52.0]);
        let summary = InsightSummary::summarize(&listings, 3);
        assert_eq!(summary.breakdown_text(), "2 excellent, 1 fair opportunities");
        assert_eq!(summary.headline("richmond"), "Found 3 properties in Richmond");
    }

    #[test]
    fn test_empty_set() {
        let summary = InsightSummary::summarize(&[], 0);
        assert_eq!(summary.loaded(), 0);
        assert!(summary.breakdown().is_empty());
        assert_eq!(summary.breakdown_text(), "");
    }
}
