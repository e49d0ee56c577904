//! Path-based dispatch of a page load.
#![allow(clippy::future_not_send)]

use flixx_api::tmdb::{FeaturedFeed, LocalTmdbApi, MediaType};
use tracing::{debug, info, instrument};
use url::form_urlencoded;

use crate::pages::{display_details, display_popular, display_slider, report_invalid_id};
use crate::search::SearchController;
use crate::view::View;

/// Page selected by the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/` or `/index.html`.
    Home,
    /// `/shows.html`.
    Shows,
    /// `/movie-details.html`.
    MovieDetails,
    /// `/tv-details.html`.
    TvDetails,
    /// `/search.html`.
    Search,
    /// Anything else; nothing is rendered.
    Unmatched,
}

impl Route {
    /// Maps a request path to its route.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" | "/index.html" => Self::Home,
            "/shows.html" => Self::Shows,
            "/movie-details.html" => Self::MovieDetails,
            "/tv-details.html" => Self::TvDetails,
            "/search.html" => Self::Search,
            _ => Self::Unmatched,
        }
    }

    /// Page title used by the document layout.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Flixx | Popular Movies",
            Self::Shows => "Flixx | Popular TV Shows",
            Self::MovieDetails => "Flixx | Movie Details",
            Self::TvDetails => "Flixx | TV Show Details",
            Self::Search => "Flixx | Search",
            Self::Unmatched => "Flixx",
        }
    }
}

/// Path and query of a page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Path starting with `/`.
    pub path: String,
    /// Query string without the leading `?`.
    pub query: String,
}

impl Location {
    /// Creates a location from its parts.
    pub fn new(path: impl Into<String>, query: impl Into<String>) -> Self {
        let query: String = query.into();
        Self {
            path: path.into(),
            query: String::from(query.trim_start_matches('?')),
        }
    }

    /// Splits `"/search.html?type=tv"` into path and query.
    ///
    /// An empty path becomes `/`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let (path, query) = raw.split_once('?').unwrap_or((raw, ""));
        let path = if path.is_empty() { "/" } else { path };
        Self::new(path, query)
    }

    /// Route of the path.
    #[must_use]
    pub fn route(&self) -> Route {
        Route::from_path(&self.path)
    }

    /// First value of query parameter `name`.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<String> {
        form_urlencoded::parse(self.query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

/// What a page load left behind.
#[derive(Debug)]
pub struct PageLoad {
    /// Route that was rendered.
    pub route: Route,
    /// Controller of the search page, for later pagination commands.
    pub search: Option<SearchController>,
}

/// Renders the page at `location` into `view`.
///
/// Runs once per page load. The navigation link matching the path is
/// highlighted on every route.
#[instrument(skip_all, fields(path = %location.path))]
pub async fn dispatch(
    api: &impl LocalTmdbApi,
    view: &mut impl View,
    location: &Location,
) -> PageLoad {
    let route = location.route();
    debug!(?route, "dispatching page load");

    let mut search = None;
    match route {
        Route::Home => {
            display_slider(api, view, FeaturedFeed::NowPlaying).await;
            display_popular(api, view, MediaType::Movie).await;
        }
        Route::Shows => {
            display_slider(api, view, FeaturedFeed::AiringToday).await;
            display_popular(api, view, MediaType::Tv).await;
        }
        Route::MovieDetails => display_details_at(api, view, location, MediaType::Movie).await,
        Route::TvDetails => display_details_at(api, view, location, MediaType::Tv).await,
        Route::Search => {
            let mut controller = SearchController::new();
            controller.enter(api, view, &location.query).await;
            search = Some(controller);
        }
        Route::Unmatched => info!("no page at {}", location.path),
    }

    view.set_active_nav(&location.path);
    PageLoad { route, search }
}

async fn display_details_at(
    api: &impl LocalTmdbApi,
    view: &mut impl View,
    location: &Location,
    media_type: MediaType,
) {
    let raw = location.query_param("id");
    match raw.as_deref().and_then(|id| id.trim().parse::<u64>().ok()) {
        Some(id) => display_details(api, view, media_type, id).await,
        None => report_invalid_id(view, media_type, raw.as_deref()),
    }
}
