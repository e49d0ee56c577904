//! Test doubles shared by the renderer, controller, and router tests.
#![allow(clippy::unwrap_used)]

use std::cell::{Cell, RefCell};

use flixx_api::tmdb::{
    FeaturedFeed, HttpError, LocalTmdbApi, MediaSummary, MediaType, MovieDetails, Paged,
    SearchParams, TvDetails,
};

/// Builds a list record with a fixed release date.
pub fn summary(id: u64, title: &str, poster: Option<&str>) -> MediaSummary {
    MediaSummary {
        id,
        title: String::from(title),
        poster_path: poster.map(String::from),
        backdrop_path: None,
        release_date: String::from("1999-03-31"),
        vote_average: 7.5,
    }
}

pub fn fixture_movie_details() -> MovieDetails {
    serde_json::from_str(include_str!("../../../fixtures/tmdb/movie_details_603.json")).unwrap()
}

pub fn fixture_tv_details() -> TvDetails {
    serde_json::from_str(include_str!("../../../fixtures/tmdb/tv_details_1399.json")).unwrap()
}

fn fixture_page(json: &str) -> Paged<MediaSummary> {
    serde_json::from_str(json).unwrap()
}

/// Builds a search response page.
pub fn search_page(page: u32, total_pages: u32, total_results: u32, count: u64) -> Paged<MediaSummary> {
    Paged {
        page,
        results: (1..=count)
            .map(|i| summary(i, &format!("Batman {i}"), None))
            .collect(),
        total_pages,
        total_results,
    }
}

fn not_found() -> HttpError {
    HttpError::Status {
        status: 404,
        message: String::from("The resource you requested could not be found."),
    }
}

/// In-memory `LocalTmdbApi` that records every call.
///
/// Searches answer from a 5-page / 87-result "batman" catalogue; any
/// other query yields no results. Only IDs 603 (movie) and 1399 (tv) exist.
#[derive(Debug, Default)]
pub struct MockApi {
    /// Calls in order, formatted like request paths.
    pub calls: RefCell<Vec<String>>,
    /// When set, every call fails with this status.
    pub fail_status: Cell<Option<u16>>,
}

impl MockApi {
    pub fn failing(status: u16) -> Self {
        let api = Self::default();
        api.fail_status.set(Some(status));
        api
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn record(&self, call: String) -> Result<(), HttpError> {
        self.calls.borrow_mut().push(call);
        match self.fail_status.get() {
            Some(status) => Err(HttpError::Status {
                status,
                message: String::from("mock failure"),
            }),
            None => Ok(()),
        }
    }
}

impl LocalTmdbApi for MockApi {
    async fn popular(&self, media_type: MediaType) -> Result<Paged<MediaSummary>, HttpError> {
        self.record(format!("{media_type}/popular"))?;
        Ok(match media_type {
            MediaType::Movie => {
                fixture_page(include_str!("../../../fixtures/tmdb/movie_popular.json"))
            }
            MediaType::Tv => fixture_page(include_str!("../../../fixtures/tmdb/tv_popular.json")),
        })
    }

    async fn featured(&self, feed: FeaturedFeed) -> Result<Paged<MediaSummary>, HttpError> {
        self.record(String::from(feed.path()))?;
        Ok(match feed.media_type() {
            MediaType::Movie => {
                fixture_page(include_str!("../../../fixtures/tmdb/movie_popular.json"))
            }
            MediaType::Tv => fixture_page(include_str!("../../../fixtures/tmdb/tv_popular.json")),
        })
    }

    async fn movie_details(&self, id: u64) -> Result<MovieDetails, HttpError> {
        self.record(format!("movie/{id}"))?;
        if id == 603 {
            Ok(fixture_movie_details())
        } else {
            Err(not_found())
        }
    }

    async fn tv_details(&self, id: u64) -> Result<TvDetails, HttpError> {
        self.record(format!("tv/{id}"))?;
        if id == 1399 {
            Ok(fixture_tv_details())
        } else {
            Err(not_found())
        }
    }

    async fn search(&self, params: &SearchParams) -> Result<Paged<MediaSummary>, HttpError> {
        self.record(format!(
            "{}?query={}&page={}",
            params.path(),
            params.query,
            params.page
        ))?;
        if params.query == "batman" {
            let count = if params.page == 5 { 7 } else { 20 };
            Ok(search_page(params.page, 5, 87, count))
        } else {
            Ok(search_page(1, 1, 0, 0))
        }
    }
}
