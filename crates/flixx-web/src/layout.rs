//! Full HTML document around the rendered containers.

use std::fmt::Write as _;
use std::time::Instant;

use crate::format::escape;
use crate::router::Route;
use crate::static_page::StaticPage;
use crate::view::ElementId;

/// Navigation links as `(href, label)`.
const NAV_LINKS: [(&str, &str); 2] = [("/", "Movies"), ("/shows.html", "TV Shows")];

/// Serialises `page` as the document of `route`.
///
/// Alerts already expired at `now` are left out.
#[must_use]
pub fn render_document(page: &StaticPage, route: Route, now: Instant) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <link rel="stylesheet" href="css/spinner.css" />
    <link rel="stylesheet" href="css/style.css" />
    <title>{title}</title>
  </head>
  <body>
"#,
        title = route.title(),
    );
    render_header(&mut out, page.active_nav());

    let spinner = if page.spinner().is_visible() {
        " show"
    } else {
        ""
    };
    let _ = writeln!(out, r#"    <div class="spinner{spinner}"></div>"#);

    out.push_str("    <div id=\"alert\">");
    for alert in page.visible_alerts_at(now) {
        let _ = write!(
            out,
            r#"<div class="alert alert-error">{}</div>"#,
            escape(&alert.message),
        );
    }
    out.push_str("</div>\n");

    match route {
        Route::Home => {
            render_slider(&mut out, page, "Now Playing");
            render_search_form(&mut out, page);
            render_grid(&mut out, page, ElementId::PopularMovies, "Popular Movies");
        }
        Route::Shows => {
            render_slider(&mut out, page, "Airing Today");
            render_search_form(&mut out, page);
            render_grid(&mut out, page, ElementId::PopularShows, "Popular TV Shows");
        }
        Route::MovieDetails => render_details(&mut out, page, ElementId::MovieDetails, "/"),
        Route::TvDetails => render_details(&mut out, page, ElementId::ShowDetails, "/shows.html"),
        Route::Search => {
            render_search_form(&mut out, page);
            let _ = write!(
                out,
                r#"    <section class="container">
      <div id="search-results-heading">{heading}</div>
      <div id="search-results" class="grid">{results}</div>
      <div id="pagination">{pagination}</div>
    </section>
"#,
                heading = page.html(ElementId::SearchResultsHeading),
                results = page.html(ElementId::SearchResults),
                pagination = page.html(ElementId::Pagination),
            );
        }
        Route::Unmatched => {}
    }

    let _ = write!(
        out,
        r#"    <div class="fetch_error">{}</div>
  </body>
</html>
"#,
        page.html(ElementId::FetchError),
    );
    out
}

fn render_header(out: &mut String, active: Option<&str>) {
    out.push_str(
        r#"    <header class="main-header">
      <div class="container">
        <div class="logo"><a href="/">FLIXX</a></div>
        <nav>
          <ul>
"#,
    );
    for (href, label) in NAV_LINKS {
        let class = if active == Some(href) {
            "nav-link active"
        } else {
            "nav-link"
        };
        let _ = writeln!(
            out,
            r#"            <li><a class="{class}" href="{href}">{label}</a></li>"#
        );
    }
    out.push_str("          </ul>\n        </nav>\n      </div>\n    </header>\n");
}

fn render_slider(out: &mut String, page: &StaticPage, heading: &str) {
    let _ = write!(
        out,
        r#"    <section class="now-playing">
      <h2>{heading}</h2>
      <div class="swiper">
        <div class="swiper-wrapper">{slides}</div>
      </div>
    </section>
"#,
        slides = page.html(ElementId::SliderWrapper),
    );
}

fn render_search_form(out: &mut String, page: &StaticPage) {
    let _ = write!(
        out,
        r#"    <section class="search">
      <div class="container">
        <form action="/search.html" class="search-form">
          <div class="search-radio">
            <input type="radio" id="movie" name="type" value="movie" checked />
            <label for="movie">Movies</label>
            <input type="radio" id="tv" name="type" value="tv" />
            <label for="tv">TV Shows</label>
          </div>
          <div class="search-flex">
            <input type="text" name="search-term" id="search-term" placeholder="Enter Search Term" value="{value}" />
            <button class="btn" type="submit"><i class="fas fa-search"></i> Search</button>
          </div>
        </form>
      </div>
    </section>
"#,
        value = escape(page.input_value(ElementId::SearchTerm)),
    );
}

fn render_grid(out: &mut String, page: &StaticPage, target: ElementId, heading: &str) {
    let id = target.selector().trim_start_matches('#');
    let _ = write!(
        out,
        r#"    <section class="container">
      <h2>{heading}</h2>
      <div id="{id}" class="grid">{cards}</div>
    </section>
"#,
        cards = page.html(target),
    );
}

fn render_details(out: &mut String, page: &StaticPage, target: ElementId, back: &str) {
    let id = target.selector().trim_start_matches('#');
    let _ = write!(
        out,
        r#"    <section class="container">
      <div class="back">
        <a class="btn" href="{back}">Back</a>
      </div>
      <div id="{id}">{details}</div>
    </section>
"#,
        details = page.html(target),
    );
}
