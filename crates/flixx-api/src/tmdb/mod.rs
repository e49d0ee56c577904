//! TMDB API client module.
//!
//! Handles authenticated GET requests to the TMDB API v3 endpoints
//! and decodes list, search, and detail responses into typed records.

mod api;
mod client;
mod error;
mod loading;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
pub use error::HttpError;
pub use loading::{LoadingGuard, LoadingIndicator};
pub use types::{
    Episode, FeaturedFeed, Genre, MediaSummary, MediaType, MovieDetails, Paged,
    ParseMediaTypeError, ProductionCompany, SearchParams, TvDetails,
};
