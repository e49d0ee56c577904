//! TMDB API response types and request parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

// --- Media type ---

/// Kind of media a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MediaType {
    /// Feature film.
    #[default]
    Movie,
    /// TV series ("show").
    Tv,
}

impl MediaType {
    /// Path segment used by the API (`movie` / `tv`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }

    /// Detail page for this media type.
    #[must_use]
    pub const fn details_page(self) -> &'static str {
        match self {
            Self::Movie => "movie-details.html",
            Self::Tv => "tv-details.html",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known media type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown media type: {0}")]
pub struct ParseMediaTypeError(pub String);

impl FromStr for MediaType {
    type Err = ParseMediaTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" => Ok(Self::Movie),
            "tv" | "show" => Ok(Self::Tv),
            _ => Err(ParseMediaTypeError(String::from(s))),
        }
    }
}

/// Featured lists shown in the page sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeaturedFeed {
    /// `movie/now_playing`.
    NowPlaying,
    /// `tv/airing_today`.
    AiringToday,
}

impl FeaturedFeed {
    /// Relative endpoint path.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::NowPlaying => "movie/now_playing",
            Self::AiringToday => "tv/airing_today",
        }
    }

    /// Media type of the records in this feed.
    #[must_use]
    pub const fn media_type(self) -> MediaType {
        match self {
            Self::NowPlaying => MediaType::Movie,
            Self::AiringToday => MediaType::Tv,
        }
    }
}

/// Treats a JSON `null` like a missing string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// --- Lists ---

/// One page of a list or search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Paged<T> {
    /// Current page number (1-based).
    pub page: u32,
    /// Records on this page, in API order.
    pub results: Vec<T>,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of results.
    pub total_results: u32,
}

/// A movie or TV show as it appears in lists and search results.
///
/// Movies carry `title` / `release_date`, shows carry `name` /
/// `first_air_date`; both decode into the same fields.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MediaSummary {
    /// TMDB ID.
    pub id: u64,
    /// Display title.
    #[serde(alias = "name")]
    pub title: String,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Release or first air date (`YYYY-MM-DD`, or empty).
    #[serde(alias = "first_air_date", default, deserialize_with = "null_as_empty")]
    pub release_date: String,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: f64,
}

// --- Details ---

/// Genre entry.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Genre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Production company entry.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ProductionCompany {
    /// Company ID.
    pub id: u64,
    /// Company name.
    pub name: String,
}

/// Response from `movie/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetails {
    /// Fields shared with list records.
    #[serde(flatten)]
    pub summary: MediaSummary,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Genres in API order.
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Production companies in API order.
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    /// Official homepage.
    #[serde(default)]
    pub homepage: Option<String>,
    /// Release status (e.g., "Released").
    #[serde(default)]
    pub status: Option<String>,
    /// Runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Budget in US dollars.
    #[serde(default)]
    pub budget: u64,
    /// Revenue in US dollars.
    #[serde(default)]
    pub revenue: u64,
}

/// An episode reference within TV details.
#[derive(Debug, Clone, Deserialize)]
pub struct Episode {
    /// TMDB episode ID.
    pub id: u64,
    /// Episode name.
    pub name: String,
    /// Episode number within the season.
    #[serde(default)]
    pub episode_number: u32,
    /// Season number.
    #[serde(default)]
    pub season_number: u32,
    /// Air date.
    #[serde(default)]
    pub air_date: Option<String>,
}

/// Response from `tv/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TvDetails {
    /// Fields shared with list records.
    #[serde(flatten)]
    pub summary: MediaSummary,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Genres in API order.
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Production companies in API order.
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    /// Official homepage.
    #[serde(default)]
    pub homepage: Option<String>,
    /// Status (e.g., "Returning Series", "Ended").
    #[serde(default)]
    pub status: Option<String>,
    /// Total number of episodes.
    #[serde(default)]
    pub number_of_episodes: u32,
    /// Most recently aired episode.
    #[serde(default)]
    pub last_episode_to_air: Option<Episode>,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[allow(dead_code)]
    #[serde(default)]
    pub success: bool,
}

// --- Search Parameters ---

/// Parameters for `search/{movie|tv}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Which collection to search.
    pub media_type: MediaType,
    /// Search query (required).
    pub query: String,
    /// Result page (1-based, default: 1).
    pub page: u32,
}

impl SearchParams {
    /// Creates search params for the first page.
    pub fn new(media_type: MediaType, query: impl Into<String>) -> Self {
        Self {
            media_type,
            query: query.into(),
            page: 1,
        }
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Relative endpoint path.
    #[must_use]
    pub fn path(&self) -> String {
        format!("search/{}", self.media_type.as_str())
    }
}
