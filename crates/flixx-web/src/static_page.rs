use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use crate::layout::render_document;
use crate::router::Route;
use crate::view::{ALERT_TTL, Alert, ElementId, Spinner, View};

/// An alert together with the moment it was shown.
#[derive(Debug, Clone)]
struct ShownAlert {
    alert: Alert,
    shown_at: Instant,
}

/// In-memory [`View`] that can be serialised to an HTML document.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct StaticPage {
    containers: BTreeMap<ElementId, String>,
    inputs: BTreeMap<ElementId, String>,
    alerts: Vec<ShownAlert>,
    active_nav: Option<String>,
    spinner: Arc<Spinner>,
}

impl StaticPage {
    /// Creates an empty page with its own spinner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty page driven by a shared spinner.
    #[must_use]
    pub fn with_spinner(spinner: Arc<Spinner>) -> Self {
        Self {
            spinner,
            ..Self::default()
        }
    }

    /// Markup currently held by `target`.
    #[must_use]
    pub fn html(&self, target: ElementId) -> &str {
        self.containers.get(&target).map_or("", String::as_str)
    }

    /// Value of an input element.
    #[must_use]
    pub fn input_value(&self, target: ElementId) -> &str {
        self.inputs.get(&target).map_or("", String::as_str)
    }

    /// Every alert shown so far, oldest first.
    #[must_use]
    pub fn alerts(&self) -> Vec<&Alert> {
        self.alerts.iter().map(|a| &a.alert).collect()
    }

    /// Alerts that have not yet expired at `now`.
    #[must_use]
    pub fn visible_alerts_at(&self, now: Instant) -> Vec<&Alert> {
        self.alerts
            .iter()
            .filter(|a| now.saturating_duration_since(a.shown_at) < ALERT_TTL)
            .map(|a| &a.alert)
            .collect()
    }

    /// `href` of the highlighted navigation link.
    #[must_use]
    pub fn active_nav(&self) -> Option<&str> {
        self.active_nav.as_deref()
    }

    /// Loading indicator of the page.
    #[must_use]
    pub const fn spinner(&self) -> &Arc<Spinner> {
        &self.spinner
    }

    /// Serialises the page as a full HTML document for `route`.
    #[must_use]
    pub fn to_document(&self, route: Route) -> String {
        render_document(self, route, Instant::now())
    }
}

impl View for StaticPage {
    fn append(&mut self, target: ElementId, markup: &str) {
        self.containers.entry(target).or_default().push_str(markup);
    }

    fn clear(&mut self, target: ElementId) {
        self.containers.remove(&target);
    }

    fn show_alert(&mut self, alert: Alert) {
        self.alerts.push(ShownAlert {
            alert,
            shown_at: Instant::now(),
        });
    }

    fn set_input_value(&mut self, target: ElementId, value: &str) {
        self.inputs.insert(target, String::from(value));
    }

    fn set_active_nav(&mut self, href: &str) {
        self.active_nav = Some(String::from(href));
    }
}
