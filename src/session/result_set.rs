//! Incrementally loaded results of the active search.

use crate::models::{Listing, ResultPage, SuburbOverview};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::ops::Range;
use thiserror::Error;
use tracing::{debug, warn};

/// Identifies one search. A response carries the ticket it was requested under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchTicket {
    pub generation: u64,
    pub term: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IngestError {
    /// The page belongs to a search that has since been replaced
    #[error("stale page for '{received}' (search #{received_generation}); active search is '{active}' (#{active_generation})")]
    Stale {
        received: String,
        received_generation: u64,
        active: String,
        active_generation: u64,
    },
}

/// Listings of the active search in server order, never reordered or deduplicated
#[derive(Debug, Default, Serialize)]
pub struct ResultSet {
    ticket: Option<SearchTicket>,
    generations: u64,
    listings: Vec<Listing>,
    suburb: Option<SuburbOverview>,
    total: u64,
    next_offset: usize,
    has_more: bool,
    updated_at: Option<DateTime<Utc>>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything and make `term` the active search
    pub fn start_search(&mut self, term: &str) -> SearchTicket {
        self.generations += 1;
        let ticket = SearchTicket {
            generation: self.generations,
            term: term.to_string(),
        };
        debug!("Starting search #{} for '{}'", ticket.generation, term);

        self.ticket = Some(ticket.clone());
        self.listings.clear();
        self.suburb = None;
        self.total = 0;
        self.next_offset = 0;
        self.has_more = false;
        self.updated_at = None;
        ticket
    }

    /// Merge a page into the set. Returns the index range the page's listings now occupy.
    ///
    /// The first page replaces listings and suburb metrics; later pages append.
    /// Pages requested under any ticket other than the active one are rejected
    /// without touching the set.
    pub fn ingest_page(
        &mut self,
        ticket: &SearchTicket,
        page: ResultPage,
        is_first_page: bool,
    ) -> Result<Range<usize>, IngestError> {
        match &self.ticket {
            Some(active) if active == ticket => {}
            active => {
                let (active_term, active_generation) = active
                    .as_ref()
                    .map(|t| (t.term.clone(), t.generation))
                    .unwrap_or_default();
                return Err(IngestError::Stale {
                    received: ticket.term.clone(),
                    received_generation: ticket.generation,
                    active: active_term,
                    active_generation,
                });
            }
        }

        if !is_first_page && page.offset != self.listings.len() {
            warn!(
                "Page offset {} does not follow the {} loaded listings",
                page.offset,
                self.listings.len()
            );
        }

        let received = page.listings.len();
        self.next_offset = page.offset + received;
        self.has_more = page.has_more;
        self.total = page.total;
        self.updated_at = Some(Utc::now());

        let start = if is_first_page {
            self.suburb = Some(SuburbOverview {
                name: page.suburb,
                metrics: page.suburb_metrics,
            });
            self.listings = page.listings;
            0
        } else {
            let start = self.listings.len();
            self.listings.extend(page.listings);
            start
        };

        debug!(
            "Ingested {} listings for '{}' ({} loaded, next offset {}, more: {})",
            received,
            ticket.term,
            self.listings.len(),
            self.next_offset,
            self.has_more
        );
        Ok(start..self.listings.len())
    }

    /// Drop loaded results but keep the active ticket
    pub fn discard(&mut self) {
        self.listings.clear();
        self.suburb = None;
        self.total = 0;
        self.next_offset = 0;
        self.has_more = false;
    }

    /// Offset of the next load-more request
    pub fn next_page_offset(&self) -> usize {
        self.next_offset
    }

    pub fn ticket(&self) -> Option<&SearchTicket> {
        self.ticket.as_ref()
    }

    pub fn term(&self) -> Option<&str> {
        self.ticket.as_ref().map(|t| t.term.as_str())
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn get(&self, index: usize) -> Option<&Listing> {
        self.listings.get(index)
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn suburb(&self) -> Option<&SuburbOverview> {
        self.suburb.as_ref()
    }

    /// Server-reported number of matches
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixture::demo_listing;
    use crate::models::SuburbMetrics;

    fn page(term: &str, offset: usize, count: usize, total: u64) -> ResultPage {
        let listings: Vec<Listing> = (offset..offset + count)
            .map(|i| demo_listing(term, i))
            .collect();
        ResultPage {
            suburb: term.to_string(),
            suburb_metrics: SuburbMetrics::default(),
            count: listings.len(),
            listings,
            total,
            offset,
            limit: count,
            has_more: (offset + count) < total as usize,
        }
    }

    #[test]
    fn test_offsets_track_ingested_pages() {
        let mut set = ResultSet::new();
        let ticket = set.start_search("Richmond");

        let range = set.ingest_page(&ticket, page("Richmond", 0, 15, 42), true).unwrap();
        assert_eq!(range, 0..15);
        assert_eq!(set.next_page_offset(), 15);
        assert!(set.has_more());

        let mut expected = 15;
        for size in [10, 10, 7] {
            let offset = set.next_page_offset();
            let range = set
                .ingest_page(&ticket, page("Richmond", offset, size, 42), false)
                .unwrap();
            expected += size;
            assert_eq!(range, offset..expected);
            assert_eq!(set.len(), expected);
            assert_eq!(set.next_page_offset(), offset + size);
        }
        assert!(!set.has_more());
        assert_eq!(set.len(), 42);
        assert_eq!(set.total(), 42);
    }

    #[test]
    fn test_listing_order_is_preserved() {
        let mut set = ResultSet::new();
        let ticket = set.start_search("Richmond");
        set.ingest_page(&ticket, page("Richmond", 0, 3, 6), true).unwrap();
        set.ingest_page(&ticket, page("Richmond", 3, 3, 6), false).unwrap();

        let addresses: Vec<&str> = set.listings().iter().map(|l| l.address.as_str()).collect();
        let expected: Vec<String> = (0..6).map(|i| demo_listing("Richmond", i).address).collect();
        assert_eq!(addresses, expected);
    }

    #[test]
    fn test_stale_page_does_not_mutate() {
        let mut set = ResultSet::new();
        let old = set.start_search("a");
        let current = set.start_search("b");
        set.ingest_page(&current, page("b", 0, 4, 4), true).unwrap();

        let err = set.ingest_page(&old, page("a", 0, 15, 30), true).unwrap_err();
        assert!(matches!(err, IngestError::Stale { ref received, .. } if received == "a"));
        assert_eq!(set.len(), 4);
        assert_eq!(set.term(), Some("b"));
        assert_eq!(set.suburb().unwrap().name, "b");
    }

    #[test]
    fn test_resubmitting_same_term_invalidates_old_ticket() {
        let mut set = ResultSet::new();
        let first = set.start_search("Richmond");
        let second = set.start_search("Richmond");
        assert_ne!(first, second);
        assert!(set.ingest_page(&first, page("Richmond", 0, 2, 2), true).is_err());
        assert!(set.ingest_page(&second, page("Richmond", 0, 2, 2), true).is_ok());
    }

    #[test]
    fn test_first_page_replaces_metrics() {
        let mut set = ResultSet::new();
        let ticket = set.start_search("Richmond");
        let mut first = page("Richmond", 0, 2, 4);
        first.suburb_metrics.walkability = 70.0;
        set.ingest_page(&ticket, first, true).unwrap();

        let mut second = page("Richmond", 2, 2, 4);
        second.suburb_metrics.walkability = 10.0;
        set.ingest_page(&ticket, second, false).unwrap();
        assert_eq!(set.suburb().unwrap().metrics.walkability, 70.0);

        let ticket = set.start_search("Carlton");
        assert!(set.is_empty());
        assert!(set.suburb().is_none());
        set.ingest_page(&ticket, page("Carlton", 0, 1, 1), true).unwrap();
        assert_eq!(set.suburb().unwrap().metrics.walkability, 0.0);
    }

    #[test]
    fn test_ingest_without_search_is_stale() {
        let mut set = ResultSet::new();
        let ticket = SearchTicket {
            generation: 1,
            term: "Richmond".to_string(),
        };
        assert!(set.ingest_page(&ticket, page("Richmond", 0, 1, 1), true).is_err());
    }
}
