//! Page surface abstraction.
//!
//! Renderers never touch a concrete document. They write markup into
//! containers addressed by [`ElementId`] through the [`View`] trait, so the
//! same code drives a browser binding or the in-memory [`StaticPage`].
//!
//! [`StaticPage`]: crate::StaticPage

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use flixx_api::tmdb::LoadingIndicator;

/// How long an alert stays visible.
pub const ALERT_TTL: Duration = Duration::from_secs(3);

/// Stable identifiers of the page containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementId {
    /// Popular movies grid.
    PopularMovies,
    /// Popular TV shows grid.
    PopularShows,
    /// Slider track.
    SliderWrapper,
    /// Movie details container.
    MovieDetails,
    /// TV show details container.
    ShowDetails,
    /// Search result cards.
    SearchResults,
    /// Search result heading.
    SearchResultsHeading,
    /// Pagination control.
    Pagination,
    /// Inline fetch error message.
    FetchError,
    /// Search text input.
    SearchTerm,
}

impl ElementId {
    /// CSS selector of the element.
    #[must_use]
    pub const fn selector(self) -> &'static str {
        match self {
            Self::PopularMovies => "#popular-movies",
            Self::PopularShows => "#popular-shows",
            Self::SliderWrapper => ".swiper-wrapper",
            Self::MovieDetails => "#movie-details",
            Self::ShowDetails => "#show-details",
            Self::SearchResults => "#search-results",
            Self::SearchResultsHeading => "#search-results-heading",
            Self::Pagination => "#pagination",
            Self::FetchError => ".fetch_error",
            Self::SearchTerm => "#search-term",
        }
    }
}

/// A short-lived error message shown in the alert container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Plain text message.
    pub message: String,
}

impl Alert {
    /// Creates an error alert.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Surface that renderers write into.
#[allow(clippy::module_name_repetitions)]
pub trait View {
    /// Appends markup to the end of `target`.
    fn append(&mut self, target: ElementId, markup: &str);

    /// Removes all content of `target`.
    fn clear(&mut self, target: ElementId);

    /// Replaces the content of `target`.
    fn set_html(&mut self, target: ElementId, markup: &str) {
        self.clear(target);
        self.append(target, markup);
    }

    /// Shows an alert that dismisses itself after [`ALERT_TTL`].
    fn show_alert(&mut self, alert: Alert);

    /// Sets the value of an input element.
    fn set_input_value(&mut self, target: ElementId, value: &str);

    /// Marks the navigation link whose `href` equals `href` as active.
    fn set_active_nav(&mut self, href: &str);
}

/// Loading spinner shared between the API client and the page.
///
/// Visible while at least one request is in flight.
#[derive(Debug, Default)]
pub struct Spinner {
    depth: AtomicUsize,
}

impl Spinner {
    /// Whether the spinner is currently shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.depth.load(Ordering::SeqCst) > 0
    }
}

impl LoadingIndicator for Spinner {
    fn show(&self) {
        self.depth.fetch_add(1, Ordering::SeqCst);
    }

    fn hide(&self) {
        // An unmatched hide leaves the counter at zero.
        let _ = self
            .depth
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |depth| {
                depth.checked_sub(1)
            });
    }
}
