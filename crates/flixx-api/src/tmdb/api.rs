//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::HttpError;
use super::types::{FeaturedFeed, MediaSummary, MediaType, MovieDetails, Paged, SearchParams, TvDetails};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Fetches the first page of `movie/popular` or `tv/popular`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn popular(&self, media_type: MediaType) -> Result<Paged<MediaSummary>, HttpError>;

    /// Fetches a slider feed (`movie/now_playing` or `tv/airing_today`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn featured(&self, feed: FeaturedFeed) -> Result<Paged<MediaSummary>, HttpError>;

    /// Fetches `movie/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn movie_details(&self, id: u64) -> Result<MovieDetails, HttpError>;

    /// Fetches `tv/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn tv_details(&self, id: u64) -> Result<TvDetails, HttpError>;

    /// Searches `search/{movie|tv}` for one page of results.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn search(&self, params: &SearchParams) -> Result<Paged<MediaSummary>, HttpError>;
}
