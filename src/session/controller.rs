//! Search session state machine.
//!
//! The session never awaits on its own: [`SearchSession::submit`] and
//! [`SearchSession::load_more`] hand back a [`PendingRequest`], the caller runs
//! it against a transport and feeds the outcome to [`SearchSession::resolve`].
//! That keeps every transition synchronous and lets a late response from a
//! replaced search be recognised and dropped. [`SearchSession::search`] and
//! [`SearchSession::load_more_from`] wrap the round trip for callers that do
//! not need to interleave anything.

use super::result_set::{ResultSet, SearchTicket};
use crate::client::{PagePolicy, SearchQuery, SearchTransport};
use crate::error::SearchError;
use crate::models::{Listing, ResultPage, SuburbOverview};
use crate::presentation::{project_card, CardViewModel, InsightSummary};
use std::collections::HashSet;
use std::ops::Range;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Searching,
    Ready,
    LoadingMore,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    NewSearch,
    LoadMore,
}

/// A request the session expects an answer for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub kind: RequestKind,
    pub ticket: SearchTicket,
    pub query: SearchQuery,
}

/// What resolving a response did to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A new search finished; all cards should be re-rendered
    Replaced { loaded: usize },
    /// A load-more finished; only cards in `range` are new
    Appended { range: Range<usize> },
    /// The request failed; the message is in [`SearchSession::notice`]
    Failed,
    /// The response belonged to a replaced search or an abandoned request
    Ignored,
}

/// State of the load-more control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMoreControl {
    Hidden,
    Enabled,
    Busy,
}

/// One browsing session: current search, loaded listings and per-card UI state
#[derive(Debug)]
pub struct SearchSession {
    state: SessionState,
    policy: PagePolicy,
    results: ResultSet,
    insights: Option<InsightSummary>,
    expanded: HashSet<usize>,
    notice: Option<String>,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(PagePolicy::default())
    }
}

impl SearchSession {
    pub fn new(policy: PagePolicy) -> Self {
        Self {
            state: SessionState::Idle,
            policy,
            results: ResultSet::new(),
            insights: None,
            expanded: HashSet::new(),
            notice: None,
        }
    }

    /// Start a new search. A blank term is rejected locally and changes nothing but the notice.
    pub fn submit(&mut self, raw_term: &str) -> Result<PendingRequest, SearchError> {
        let term = raw_term.trim();
        if term.is_empty() {
            let err = SearchError::empty_term();
            self.notice = Some(err.user_message(false));
            return Err(err);
        }

        let ticket = self.results.start_search(term);
        self.insights = None;
        self.expanded.clear();
        self.notice = None;
        self.transition(SessionState::Searching);

        Ok(PendingRequest {
            kind: RequestKind::NewSearch,
            query: SearchQuery::first_page(term, self.policy.initial_limit),
            ticket,
        })
    }

    /// Request the next page. `None` unless the session is `Ready` with more results available.
    pub fn load_more(&mut self) -> Option<PendingRequest> {
        if self.state != SessionState::Ready || !self.results.has_more() {
            debug!("Load more ignored in state {:?}", self.state);
            return None;
        }
        let ticket = self.results.ticket()?.clone();
        self.transition(SessionState::LoadingMore);

        Some(PendingRequest {
            kind: RequestKind::LoadMore,
            query: SearchQuery {
                term: ticket.term.clone(),
                offset: self.results.next_page_offset(),
                limit: self.policy.page_limit,
            },
            ticket,
        })
    }

    /// Apply the outcome of a request issued by `submit` or `load_more`
    pub fn resolve(
        &mut self,
        request: &PendingRequest,
        outcome: Result<ResultPage, SearchError>,
    ) -> Resolution {
        let expected_state = match request.kind {
            RequestKind::NewSearch => SessionState::Searching,
            RequestKind::LoadMore => SessionState::LoadingMore,
        };
        if self.results.ticket() != Some(&request.ticket) || self.state != expected_state {
            warn!(
                "Dropping {:?} response for '{}' (search #{})",
                request.kind, request.ticket.term, request.ticket.generation
            );
            return Resolution::Ignored;
        }

        let is_first_page = request.kind == RequestKind::NewSearch;
        match outcome {
            Ok(page) => match self.results.ingest_page(&request.ticket, page, is_first_page) {
                Ok(range) => {
                    self.refresh_insights();
                    self.transition(SessionState::Ready);
                    if is_first_page {
                        info!(
                            "Loaded {} of {} properties for '{}'",
                            range.len(),
                            self.results.total(),
                            request.ticket.term
                        );
                        Resolution::Replaced {
                            loaded: range.len(),
                        }
                    } else {
                        info!(
                            "Appended {} properties ({} loaded)",
                            range.len(),
                            self.results.len()
                        );
                        Resolution::Appended { range }
                    }
                }
                Err(err) => {
                    warn!("{}", err);
                    Resolution::Ignored
                }
            },
            Err(err) => {
                warn!("{:?} for '{}' failed: {}", request.kind, request.ticket.term, err);
                self.notice = Some(err.user_message(!is_first_page));
                if is_first_page {
                    self.results.discard();
                    self.insights = None;
                    self.expanded.clear();
                    self.transition(SessionState::Failed);
                } else {
                    self.transition(SessionState::Ready);
                }
                Resolution::Failed
            }
        }
    }

    /// Submit and wait for the first page
    pub async fn search<T>(
        &mut self,
        transport: &T,
        raw_term: &str,
    ) -> Result<Resolution, SearchError>
    where
        T: SearchTransport + ?Sized,
    {
        let request = self.submit(raw_term)?;
        let outcome = transport.fetch_page(&request.query).await;
        Ok(self.resolve(&request, outcome))
    }

    /// Load the next page and wait for it. `None` when load-more is not possible.
    pub async fn load_more_from<T>(&mut self, transport: &T) -> Option<Resolution>
    where
        T: SearchTransport + ?Sized,
    {
        let request = self.load_more()?;
        let outcome = transport.fetch_page(&request.query).await;
        Some(self.resolve(&request, outcome))
    }

    /// Flip a card between collapsed and expanded. Returns the new state.
    pub fn toggle_details(&mut self, index: usize) -> bool {
        if index >= self.results.len() {
            return false;
        }
        if self.expanded.remove(&index) {
            false
        } else {
            self.expanded.insert(index);
            true
        }
    }

    /// Expand each requested card that falls in `range` and is loaded.
    /// Unlike `toggle_details` this never collapses. Returns how many cards matched.
    pub fn expand_within(&mut self, requested: &[usize], range: Range<usize>) -> usize {
        let end = range.end.min(self.results.len());
        let mut matched = 0;
        for &index in requested {
            if (range.start..end).contains(&index) {
                self.expanded.insert(index);
                matched += 1;
            }
        }
        matched
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }

    pub fn card(&self, index: usize) -> Option<CardViewModel> {
        self.results
            .get(index)
            .map(|listing| project_card(listing, index, self.is_expanded(index)))
    }

    /// Cards for `range` of the loaded listings, e.g. only the ones a load-more appended
    pub fn cards_in(&self, range: Range<usize>) -> Vec<CardViewModel> {
        let end = range.end.min(self.results.len());
        (range.start.min(end)..end)
            .filter_map(|index| self.card(index))
            .collect()
    }

    pub fn cards(&self) -> Vec<CardViewModel> {
        self.cards_in(0..self.results.len())
    }

    pub fn load_more_control(&self) -> LoadMoreControl {
        match self.state {
            SessionState::LoadingMore => LoadMoreControl::Busy,
            SessionState::Ready if self.results.has_more() => LoadMoreControl::Enabled,
            _ => LoadMoreControl::Hidden,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn listings(&self) -> &[Listing] {
        self.results.listings()
    }

    pub fn suburb(&self) -> Option<&SuburbOverview> {
        self.results.suburb()
    }

    pub fn insights(&self) -> Option<&InsightSummary> {
        self.insights.as_ref()
    }

    /// Transient error message, if any
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Recomputed over every loaded listing, after first pages and load-mores alike
    fn refresh_insights(&mut self) {
        self.insights = Some(InsightSummary::summarize(
            self.results.listings(),
            self.results.total(),
        ));
    }

    fn transition(&mut self, next: SessionState) {
        debug!("Session {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
