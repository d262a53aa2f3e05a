//! Popup content of a selected incident.
//!
//! Popup content is derived from the feature properties every time a popup opens: the properties
//! are extended with [`ALERT_LEVEL_COLOR`], [`STATUS_COLOR`], [`CURRENT_AS_OF`] and
//! [`CURRENT_AS_OF_AGO`] and rendered through the popup template.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};

use crate::error::IncidentsError;
use crate::feature::Properties;

mod classes;
mod template;
mod time;

pub use classes::{alert_level_to_class, status_to_class};
pub use template::{render_template, DEFAULT_TEMPLATE};
pub use time::{
    calendar, from_now, parse_timestamp, Clock, FixedClock, SystemClock, DISTANT_DATE_FORMAT,
};

/// Text class of the alert level.
pub const ALERT_LEVEL_COLOR: &str = "alert-level-color";
/// Text class of the status.
pub const STATUS_COLOR: &str = "status-color";
/// Publication time relative to the current day.
pub const CURRENT_AS_OF: &str = "current-as-of";
/// Publication time relative to now.
pub const CURRENT_AS_OF_AGO: &str = "current-as-of-ago";

/// Feature properties extended with the popup display fields.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupViewModel {
    properties: Properties,
}

impl PopupViewModel {
    /// Derives the view model from feature properties.
    ///
    /// A missing or unparsable `pub-date` leaves both time fields empty.
    pub fn new(properties: &Properties, now: &DateTime<FixedOffset>) -> Self {
        let mut extended = properties.clone();
        extended.insert(
            ALERT_LEVEL_COLOR,
            alert_level_to_class(properties.alert_level()),
        );
        extended.insert(STATUS_COLOR, status_to_class(properties.status()));

        let published = properties
            .pub_date()
            .and_then(|value| parse_timestamp(value, now));
        if published.is_none() {
            log::debug!(
                "Incident {:?} has no valid publication date: {:?}",
                properties.guid(),
                properties.pub_date()
            );
        }

        extended.insert(
            CURRENT_AS_OF,
            published
                .map(|ts| calendar(&ts, now))
                .unwrap_or_default(),
        );
        extended.insert(
            CURRENT_AS_OF_AGO,
            published
                .map(|ts| from_now(&ts, now))
                .unwrap_or_default(),
        );

        Self {
            properties: extended,
        }
    }

    /// All properties of the view model.
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// String value of a property.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.properties.get_str(key)
    }
}

/// Builds popup markup for incidents.
#[derive(Clone)]
pub struct PopupRenderer {
    template: String,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl Default for PopupRenderer {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            clock: Arc::new(SystemClock),
        }
    }
}

impl std::fmt::Debug for PopupRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PopupRenderer")
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

impl PopupRenderer {
    /// Creates a renderer with the default template and system clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the template.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Replaces the clock used for relative timestamps.
    pub fn with_clock(mut self, clock: impl Clock + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Derives the view model from the feature properties.
    pub fn view_model(&self, properties: &Properties) -> PopupViewModel {
        PopupViewModel::new(properties, &self.clock.now())
    }

    /// Renders popup markup for the feature properties.
    pub fn render(&self, properties: &Properties) -> Result<String, IncidentsError> {
        render_template(&self.template, self.view_model(properties).properties())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> FixedClock {
        FixedClock(DateTime::parse_from_rfc3339("2017-10-22T15:00:00+11:00").unwrap())
    }

    fn incident() -> Properties {
        Properties::new()
            .with("guid", "incident-1")
            .with("title", "Mount Victoria")
            .with("alert-level", "Emergency Warning")
            .with("status", "Out of Control")
            .with("pub-date", "2017-10-22T08:41:00+11:00")
    }

    #[test]
    fn view_model_extends_properties() {
        let model = PopupViewModel::new(&incident(), &clock().now());

        assert_eq!(model.get_str(ALERT_LEVEL_COLOR), Some("danger"));
        assert_eq!(model.get_str(STATUS_COLOR), Some("danger"));
        assert_eq!(model.get_str(CURRENT_AS_OF), Some("Today at 8:41 AM"));
        assert_eq!(model.get_str(CURRENT_AS_OF_AGO), Some("6 hours ago"));
        assert_eq!(model.get_str("title"), Some("Mount Victoria"));
    }

    #[test]
    fn view_model_soft_defaults() {
        let properties = Properties::new().with("guid", "incident-2");
        let model = PopupViewModel::new(&properties, &clock().now());

        assert_eq!(model.get_str(ALERT_LEVEL_COLOR), Some(""));
        assert_eq!(model.get_str(STATUS_COLOR), Some(""));
        assert_eq!(model.get_str(CURRENT_AS_OF), Some(""));
        assert_eq!(model.get_str(CURRENT_AS_OF_AGO), Some(""));
    }

    #[test]
    fn view_model_does_not_touch_feature() {
        let properties = incident();
        let _ = PopupViewModel::new(&properties, &clock().now());

        assert_eq!(properties.get(ALERT_LEVEL_COLOR), None);
    }

    #[test]
    fn renders_with_custom_template() {
        let renderer = PopupRenderer::new()
            .with_template("{title}: {status} ({status-color}), {current-as-of-ago}")
            .with_clock(clock());

        assert_eq!(
            renderer.render(&incident()).unwrap(),
            "Mount Victoria: Out of Control (danger), 6 hours ago"
        );
    }
}
