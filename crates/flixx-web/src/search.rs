//! Search page controller.
//!
//! The controller owns the [`SearchState`] of one search page and moves
//! through `Idle -> Searching -> Displaying`. Request bookkeeping is split
//! into a pure half ([`SearchController::enter_query`],
//! [`SearchController::begin_command`], [`SearchController::complete`]) and
//! the async drivers that talk to the API and the [`View`].
#![allow(clippy::future_not_send)]

use std::str::FromStr;

use flixx_api::tmdb::{HttpError, LocalTmdbApi, MediaSummary, MediaType, Paged, SearchParams};
use tracing::{debug, info, instrument, warn};
use url::form_urlencoded;

use crate::pages::report_fetch_error;
use crate::render::{render_card, render_pagination, render_results_heading};
use crate::view::{Alert, ElementId, View};

/// Highest page number TMDB serves for a search.
pub const MAX_PAGE: u32 = 500;

/// Message shown when a search returns nothing.
pub const NO_RESULTS_MESSAGE: &str = "No results found";

/// Errors raised while reading the search query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The `search-term` parameter is absent or blank.
    #[error("Please enter search term")]
    EmptyTerm,
}

/// Pagination command issued by the `#prev` / `#next` buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub enum SearchCommand {
    /// Go to the following page.
    Next,
    /// Go to the preceding page.
    Prev,
}

/// Error returned when parsing an unknown [`SearchCommand`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown search command: {0} (expected next or prev)")]
#[allow(clippy::module_name_repetitions)]
pub struct ParseSearchCommandError(pub String);

impl FromStr for SearchCommand {
    type Err = ParseSearchCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "next" => Ok(Self::Next),
            "prev" => Ok(Self::Prev),
            _ => Err(ParseSearchCommandError(String::from(s))),
        }
    }
}

/// Term, type, and position of the current search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct SearchState {
    /// Search term as entered.
    pub term: String,
    /// Searched media type.
    pub media_type: MediaType,
    /// Current page (1-based).
    pub page: u32,
    /// Number of pages, at least 1.
    pub total_pages: u32,
    /// Number of matching records.
    pub total_results: u32,
}

impl SearchState {
    /// Creates a state positioned before the first response.
    pub fn new(term: impl Into<String>, media_type: MediaType) -> Self {
        Self {
            term: term.into(),
            media_type,
            page: 1,
            total_pages: 1,
            total_results: 0,
        }
    }

    /// Reads `search-term` and `type` from a URL query string.
    ///
    /// An absent or unknown `type` falls back to movies.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyTerm`] when the term is absent or blank.
    pub fn from_query(query: &str) -> Result<Self, ValidationError> {
        let mut term = None;
        let mut media_type = None;
        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match key.as_ref() {
                "search-term" if term.is_none() => term = Some(value.into_owned()),
                "type" if media_type.is_none() => media_type = Some(value.into_owned()),
                _ => {}
            }
        }

        let term = term
            .map(|t| String::from(t.trim()))
            .filter(|t| !t.is_empty())
            .ok_or(ValidationError::EmptyTerm)?;

        let media_type = match media_type.as_deref() {
            None | Some("") => MediaType::default(),
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("{e}, searching movies");
                MediaType::default()
            }),
        };

        Ok(Self::new(term, media_type))
    }

    /// Whether a following page exists.
    #[must_use]
    pub const fn can_go_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether a preceding page exists.
    #[must_use]
    pub const fn can_go_prev(&self) -> bool {
        self.page > 1
    }

    fn params(&self, page: u32) -> SearchParams {
        SearchParams::new(self.media_type, self.term.clone()).page(page)
    }

    /// Stores the position reported by a response.
    fn apply(&mut self, response: &Paged<MediaSummary>) {
        self.total_pages = response.total_pages.clamp(1, MAX_PAGE);
        self.page = response.page.clamp(1, self.total_pages);
        self.total_results = response.total_results;
    }
}

/// Lifecycle of a search page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub enum SearchPhase {
    /// No search issued yet.
    Idle,
    /// A request is in flight.
    Searching,
    /// Results of the given page are on screen.
    Displaying(u32),
    /// The query had no term; nothing will be searched.
    InvalidQuery,
}

/// A request issued by the controller and not yet completed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct PendingSearch {
    seq: u64,
    params: SearchParams,
}

impl PendingSearch {
    /// Sequence number of the request.
    #[must_use]
    pub const fn seq(&self) -> u64 {
        self.seq
    }

    /// Parameters to send.
    #[must_use]
    pub const fn params(&self) -> &SearchParams {
        &self.params
    }
}

/// Result of completing a [`PendingSearch`].
#[derive(Debug)]
pub enum Outcome {
    /// The response was stored; these results should be rendered.
    Applied(Vec<MediaSummary>),
    /// A newer request was issued; the response was dropped.
    Stale,
    /// The request failed; the previous state is kept.
    Failed(HttpError),
}

/// Drives one search page.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct SearchController {
    state: Option<SearchState>,
    phase: SearchPhase,
    settled: SearchPhase,
    issued: u64,
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchController {
    /// Creates an idle controller.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: None,
            phase: SearchPhase::Idle,
            settled: SearchPhase::Idle,
            issued: 0,
        }
    }

    /// Current search state, once a valid query has been entered.
    #[must_use]
    pub const fn state(&self) -> Option<&SearchState> {
        self.state.as_ref()
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Parses the page query and issues the first request.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] and moves to
    /// [`SearchPhase::InvalidQuery`] when the term is empty.
    pub fn enter_query(&mut self, query: &str) -> Result<PendingSearch, ValidationError> {
        match SearchState::from_query(query) {
            Ok(state) => {
                self.state = Some(state);
                self.begin(1).ok_or(ValidationError::EmptyTerm)
            }
            Err(e) => {
                self.state = None;
                self.phase = SearchPhase::InvalidQuery;
                self.settled = SearchPhase::InvalidQuery;
                Err(e)
            }
        }
    }

    /// Issues the request for a pagination command.
    ///
    /// Returns `None`, leaving everything unchanged, when the command is
    /// disabled on the current page or no search is active.
    pub fn begin_command(&mut self, command: SearchCommand) -> Option<PendingSearch> {
        if self.phase == SearchPhase::InvalidQuery {
            return None;
        }
        let state = self.state.as_ref()?;
        let page = match command {
            SearchCommand::Next if state.can_go_next() => state.page.checked_add(1)?,
            SearchCommand::Prev if state.can_go_prev() => state.page.checked_sub(1)?,
            _ => {
                debug!(?command, page = state.page, "pagination command disabled");
                return None;
            }
        };
        self.begin(page)
    }

    fn begin(&mut self, page: u32) -> Option<PendingSearch> {
        let params = self.state.as_ref()?.params(page);
        self.issued = self.issued.wrapping_add(1);
        if self.phase != SearchPhase::Searching {
            self.settled = self.phase;
        }
        self.phase = SearchPhase::Searching;
        Some(PendingSearch {
            seq: self.issued,
            params,
        })
    }

    /// Applies the result of `pending` unless a newer request superseded it.
    pub fn complete(
        &mut self,
        pending: &PendingSearch,
        result: Result<Paged<MediaSummary>, HttpError>,
    ) -> Outcome {
        if pending.seq != self.issued {
            info!(
                seq = pending.seq,
                latest = self.issued,
                "dropping superseded search response"
            );
            return Outcome::Stale;
        }
        let Some(state) = self.state.as_mut() else {
            return Outcome::Stale;
        };
        match result {
            Ok(response) => {
                state.apply(&response);
                self.phase = SearchPhase::Displaying(state.page);
                self.settled = self.phase;
                Outcome::Applied(response.results)
            }
            Err(e) => {
                self.phase = self.settled;
                Outcome::Failed(e)
            }
        }
    }

    /// Renders an outcome into the results containers.
    pub fn present(&self, view: &mut impl View, outcome: Outcome) {
        match outcome {
            Outcome::Applied(results) => {
                let Some(state) = self.state.as_ref() else {
                    return;
                };
                view.clear(ElementId::SearchResults);
                view.clear(ElementId::SearchResultsHeading);
                view.clear(ElementId::Pagination);

                if results.is_empty() {
                    view.show_alert(Alert::error(NO_RESULTS_MESSAGE));
                }
                for record in &results {
                    view.append(
                        ElementId::SearchResults,
                        &render_card(record, state.media_type),
                    );
                }
                view.append(
                    ElementId::SearchResultsHeading,
                    &render_results_heading(results.len(), state),
                );
                view.append(ElementId::Pagination, &render_pagination(state));
            }
            Outcome::Failed(e) => report_fetch_error(view, "search results", &e),
            Outcome::Stale => {}
        }
    }

    /// Handles arrival on the search page.
    ///
    /// An empty term shows a validation alert and issues no request.
    #[instrument(skip_all)]
    pub async fn enter(&mut self, api: &impl LocalTmdbApi, view: &mut impl View, query: &str) {
        let pending = match self.enter_query(query) {
            Ok(pending) => pending,
            Err(e) => {
                warn!("search not started: {e}");
                view.show_alert(Alert::error(e.to_string()));
                return;
            }
        };
        let result = api.search(pending.params()).await;
        let outcome = self.complete(&pending, result);
        let applied = matches!(outcome, Outcome::Applied(_));
        self.present(view, outcome);
        if applied {
            view.set_input_value(ElementId::SearchTerm, "");
        }
    }

    /// Handles a click on `#prev` or `#next`.
    ///
    /// Returns whether a request was issued.
    #[instrument(skip_all, fields(command = ?command))]
    pub async fn handle(
        &mut self,
        api: &impl LocalTmdbApi,
        view: &mut impl View,
        command: SearchCommand,
    ) -> bool {
        let Some(pending) = self.begin_command(command) else {
            return false;
        };
        let result = api.search(pending.params()).await;
        let outcome = self.complete(&pending, result);
        self.present(view, outcome);
        true
    }
}
