//! Page rendering for flixx.
//!
//! Maps TMDB records into HTML fragments and writes them into an abstract
//! page surface ([`View`]). [`StaticPage`] is the in-memory surface used to
//! produce static HTML documents.

/// HTML fragment formatting helpers.
pub mod format;
/// Full document layout around a rendered page.
pub mod layout;
/// Top-level page renderers (sliders, grids, details).
pub mod pages;
/// Card, slide, detail, and pagination markup.
pub mod render;
/// Path-based dispatch of a page load.
pub mod router;
/// Search page state machine.
pub mod search;
/// In-memory page surface.
mod static_page;
/// Page surface abstraction.
pub mod view;

#[cfg(test)]
mod testing;

pub use router::{Location, PageLoad, Route, dispatch};
pub use search::{SearchCommand, SearchController, SearchPhase, SearchState, ValidationError};
pub use static_page::StaticPage;
pub use view::{Alert, ElementId, Spinner, View};
