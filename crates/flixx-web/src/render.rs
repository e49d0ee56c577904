//! Markup for cards, slides, details, and search results.
//!
//! Every function here is a pure mapping from records to HTML text.
#![allow(clippy::module_name_repetitions)]

use std::fmt::Write as _;

use flixx_api::tmdb::{MediaSummary, MediaType, MovieDetails, TvDetails};

use crate::format::{add_commas, escape, format_rating};
use crate::search::SearchState;

/// Poster image base URL (w500).
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Backdrop image base URL (original size).
pub const BACKDROP_BASE_URL: &str = "https://image.tmdb.org/t/p/original";

/// Local image used when a record has no poster.
pub const PLACEHOLDER_IMAGE: &str = "images/no-image.jpg";

/// A detail record of either media type.
#[derive(Debug, Clone)]
pub enum MediaDetails {
    /// Response of `movie/{id}`.
    Movie(MovieDetails),
    /// Response of `tv/{id}`.
    Tv(TvDetails),
}

impl MediaDetails {
    /// Media type of the record.
    #[must_use]
    pub const fn media_type(&self) -> MediaType {
        match self {
            Self::Movie(_) => MediaType::Movie,
            Self::Tv(_) => MediaType::Tv,
        }
    }

    /// Fields shared with list records.
    #[must_use]
    pub const fn summary(&self) -> &MediaSummary {
        match self {
            Self::Movie(movie) => &movie.summary,
            Self::Tv(show) => &show.summary,
        }
    }
}

/// Returns the poster URL, or the placeholder when `path` is absent or empty.
#[must_use]
pub fn poster_src(path: Option<&str>) -> String {
    match path.filter(|p| !p.is_empty()) {
        Some(p) => format!("{POSTER_BASE_URL}{p}"),
        None => String::from(PLACEHOLDER_IMAGE),
    }
}

/// Link to the detail page of a record.
fn details_href(id: u64, media_type: MediaType) -> String {
    format!("{}?id={id}", media_type.details_page())
}

/// Renders a grid card.
#[must_use]
pub fn render_card(record: &MediaSummary, media_type: MediaType) -> String {
    let title = escape(&record.title);
    let date_label = match media_type {
        MediaType::Movie => "Release",
        MediaType::Tv => "Air Date",
    };
    format!(
        r#"<div class="card">
  <a href="{href}">
    <img src="{src}" class="card-img-top" alt="{title}" />
  </a>
  <div class="card-body">
    <h5 class="card-title">{title}</h5>
    <p class="card-text">
      <small class="text-muted">{date_label}: {date}</small>
    </p>
  </div>
</div>
"#,
        href = details_href(record.id, media_type),
        src = escape(&poster_src(record.poster_path.as_deref())),
        date = escape(&record.release_date),
    )
}

/// Renders a slider slide.
#[must_use]
pub fn render_slide(record: &MediaSummary, media_type: MediaType) -> String {
    format!(
        r#"<div class="swiper-slide">
  <a href="{href}">
    <img src="{src}" alt="{title}" />
  </a>
  <h4 class="swiper-rating">
    <i class="fas fa-star text-primary"></i> {rating}
  </h4>
</div>
"#,
        href = details_href(record.id, media_type),
        src = escape(&poster_src(record.poster_path.as_deref())),
        title = escape(&record.title),
        rating = format_rating(record.vote_average),
    )
}

/// Renders the faded full-viewport backdrop behind a detail page.
///
/// Returns `None` when the record has no backdrop.
#[must_use]
pub fn render_backdrop(path: Option<&str>) -> Option<String> {
    let path = path.filter(|p| !p.is_empty())?;
    Some(format!(
        r#"<div class="backdrop" style="background-image: url({BACKDROP_BASE_URL}{path}); background-size: cover; background-position: center; background-repeat: no-repeat; height: 100vh; width: 100vw; position: absolute; top: 0; left: 0; z-index: -1; opacity: 0.1;"></div>
"#,
        path = escape(path),
    ))
}

/// Renders a detail view.
#[must_use]
pub fn render_detail(details: &MediaDetails) -> String {
    let summary = details.summary();
    let (overview, genres, homepage, label) = match details {
        MediaDetails::Movie(m) => (&m.overview, &m.genres, &m.homepage, "Movie"),
        MediaDetails::Tv(t) => (&t.overview, &t.genres, &t.homepage, "Show"),
    };

    let mut out = String::new();
    let _ = write!(
        out,
        r#"<div class="details-top">
  <div>
    <img src="{src}" class="card-img-top" alt="{title}" />
  </div>
  <div>
    <h2>{title}</h2>
    <p>
      <i class="fas fa-star text-primary"></i> {rating}
    </p>
    <p class="text-muted">Release Date: {date}</p>
    <p>{overview}</p>
    <h5>Genres</h5>
    <ul class="list-group">"#,
        src = escape(&poster_src(summary.poster_path.as_deref())),
        title = escape(&summary.title),
        rating = format_rating(summary.vote_average),
        date = escape(&summary.release_date),
        overview = escape(overview.as_deref().unwrap_or_default()),
    );
    for genre in genres {
        let _ = write!(out, "<li>{}</li>", escape(&genre.name));
    }
    out.push_str("</ul>\n");
    if let Some(homepage) = homepage.as_deref().filter(|h| !h.is_empty()) {
        let _ = writeln!(
            out,
            r#"    <a href="{}" target="_blank" class="btn">Visit {label} Homepage</a>"#,
            escape(homepage),
        );
    }
    out.push_str("  </div>\n</div>\n");

    out.push_str(&render_detail_bottom(details));
    out
}

/// Renders the info list and production companies.
fn render_detail_bottom(details: &MediaDetails) -> String {
    let mut out = String::from("<div class=\"details-bottom\">\n");
    let companies = match details {
        MediaDetails::Movie(movie) => {
            let _ = write!(
                out,
                r#"  <h2>Movie Info</h2>
  <ul>
    <li><span class="text-secondary">Budget:</span> ${budget}</li>
    <li><span class="text-secondary">Revenue:</span> ${revenue}</li>
    <li><span class="text-secondary">Runtime:</span> {runtime}</li>
    <li><span class="text-secondary">Status:</span> {status}</li>
  </ul>
"#,
                budget = add_commas(movie.budget),
                revenue = add_commas(movie.revenue),
                runtime = movie
                    .runtime
                    .map_or_else(|| String::from("-"), |r| format!("{r} minutes")),
                status = escape(movie.status.as_deref().unwrap_or("-")),
            );
            &movie.production_companies
        }
        MediaDetails::Tv(show) => {
            let _ = write!(
                out,
                r#"  <h2>Show Info</h2>
  <ul>
    <li><span class="text-secondary">Number Of Episodes:</span> {episodes}</li>
    <li><span class="text-secondary">Last Episode To Air:</span> {last}</li>
    <li><span class="text-secondary">Status:</span> {status}</li>
  </ul>
"#,
                episodes = show.number_of_episodes,
                last = escape(
                    show.last_episode_to_air
                        .as_ref()
                        .map_or("-", |ep| ep.name.as_str())
                ),
                status = escape(show.status.as_deref().unwrap_or("-")),
            );
            &show.production_companies
        }
    };

    let names: Vec<String> = companies
        .iter()
        .map(|c| format!("<span>{}</span>", escape(&c.name)))
        .collect();
    let _ = write!(
        out,
        "  <h4>Production Companies</h4>\n  <div class=\"list-group\">{}</div>\n</div>\n",
        names.join(", "),
    );
    out
}

/// Renders the search results heading, e.g. `3 of 87 results for batman`.
#[must_use]
pub fn render_results_heading(shown: usize, state: &SearchState) -> String {
    format!(
        "<h2>{shown} of {} results for {}</h2>\n",
        state.total_results,
        escape(&state.term),
    )
}

/// Renders the pagination control for the current page.
///
/// `prev` is disabled on the first page and `next` on the last.
#[must_use]
pub fn render_pagination(state: &SearchState) -> String {
    let disabled = |off: bool| if off { " disabled" } else { "" };
    format!(
        r#"<div class="pagination">
  <button class="btn btn-primary" id="prev"{prev}>Prev</button>
  <button class="btn btn-primary" id="next"{next}>Next</button>
  <div class="page-counter">Page {page} of {total}</div>
</div>
"#,
        prev = disabled(!state.can_go_prev()),
        next = disabled(!state.can_go_next()),
        page = state.page,
        total = state.total_pages,
    )
}
