//! Loading indicator seam.

use std::fmt::Debug;

/// A process-wide busy indicator toggled around every request.
pub trait LoadingIndicator: Debug + Send + Sync {
    /// Makes the indicator visible.
    fn show(&self);
    /// Hides the indicator.
    fn hide(&self);
}

/// Shows an indicator on creation and hides it on drop.
///
/// Dropping happens on every exit path of the request, so each `show`
/// is paired with exactly one `hide`.
#[derive(Debug)]
#[must_use = "the indicator is hidden as soon as the guard is dropped"]
pub struct LoadingGuard<'a> {
    indicator: Option<&'a dyn LoadingIndicator>,
}

impl<'a> LoadingGuard<'a> {
    /// Shows `indicator` (if any) and returns the guard that will hide it.
    pub fn start(indicator: Option<&'a dyn LoadingIndicator>) -> Self {
        if let Some(indicator) = indicator {
            indicator.show();
        }
        Self { indicator }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if let Some(indicator) = self.indicator {
            indicator.hide();
        }
    }
}
