//! Top-level page renderers.
//!
//! Each renderer fetches what it needs, writes markup into the [`View`], and
//! reports a failed fetch in `.fetch_error` instead of returning it.
#![allow(clippy::future_not_send)]

use flixx_api::tmdb::{FeaturedFeed, HttpError, LocalTmdbApi, MediaType};
use tracing::{error, instrument, warn};

use crate::render::{MediaDetails, render_backdrop, render_card, render_detail, render_slide};
use crate::view::{ElementId, View};

/// Container holding the detail view of `media_type`.
#[must_use]
pub const fn details_container(media_type: MediaType) -> ElementId {
    match media_type {
        MediaType::Movie => ElementId::MovieDetails,
        MediaType::Tv => ElementId::ShowDetails,
    }
}

/// Human readable name of a detail record, used in error messages.
const fn details_label(media_type: MediaType) -> &'static str {
    match media_type {
        MediaType::Movie => "movie details",
        MediaType::Tv => "TV show details",
    }
}

/// Writes the fetch error message for `what` into `.fetch_error`.
pub fn show_fetch_error(view: &mut impl View, what: &str) {
    view.set_html(
        ElementId::FetchError,
        &format!("<h3><em>There was an error fetching {what}, please try again</em></h3>\n"),
    );
}

/// Logs a failed fetch and shows the error message.
pub fn report_fetch_error(view: &mut impl View, what: &str, err: &HttpError) {
    error!("Failed to fetch {what}: {err}");
    show_fetch_error(view, what);
}

/// Renders the featured slider.
#[instrument(skip_all, fields(feed = feed.path()))]
pub async fn display_slider(api: &impl LocalTmdbApi, view: &mut impl View, feed: FeaturedFeed) {
    let what = match feed {
        FeaturedFeed::NowPlaying => "now playing movies",
        FeaturedFeed::AiringToday => "shows airing today",
    };
    match api.featured(feed).await {
        Ok(page) => {
            for record in &page.results {
                view.append(
                    ElementId::SliderWrapper,
                    &render_slide(record, feed.media_type()),
                );
            }
        }
        Err(e) => report_fetch_error(view, what, &e),
    }
}

/// Renders the popular grid of `media_type`.
#[instrument(skip_all, fields(media_type = media_type.as_str()))]
pub async fn display_popular(api: &impl LocalTmdbApi, view: &mut impl View, media_type: MediaType) {
    let (target, what) = match media_type {
        MediaType::Movie => (ElementId::PopularMovies, "popular movies"),
        MediaType::Tv => (ElementId::PopularShows, "popular TV shows"),
    };
    match api.popular(media_type).await {
        Ok(page) => {
            for record in &page.results {
                view.append(target, &render_card(record, media_type));
            }
        }
        Err(e) => report_fetch_error(view, what, &e),
    }
}

/// Renders the detail page of `id`.
///
/// The backdrop, when the record has one, precedes the detail markup.
#[instrument(skip_all, fields(media_type = media_type.as_str(), id = id))]
pub async fn display_details(
    api: &impl LocalTmdbApi,
    view: &mut impl View,
    media_type: MediaType,
    id: u64,
) {
    let result = match media_type {
        MediaType::Movie => api.movie_details(id).await.map(MediaDetails::Movie),
        MediaType::Tv => api.tv_details(id).await.map(MediaDetails::Tv),
    };
    let details = match result {
        Ok(details) => details,
        Err(e) => {
            report_fetch_error(view, details_label(media_type), &e);
            return;
        }
    };

    let target = details_container(media_type);
    if let Some(backdrop) = render_backdrop(details.summary().backdrop_path.as_deref()) {
        view.append(target, &backdrop);
    }
    view.append(target, &render_detail(&details));
}

/// Shows the detail error for a page whose `id` is missing or malformed.
pub fn report_invalid_id(view: &mut impl View, media_type: MediaType, raw: Option<&str>) {
    warn!(id = raw, "invalid {} id, not fetching", media_type.as_str());
    show_fetch_error(view, details_label(media_type));
}
