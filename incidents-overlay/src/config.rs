//! Overlay options.

use serde::{Deserialize, Serialize};

use crate::error::IncidentsError;
use crate::feed::DEFAULT_FEED_URL;

/// Directory the status icons are loaded from unless configured otherwise.
pub const DEFAULT_ICONS_URL: &str = "icons";

/// Options of the [`MajorIncidentsOverlay`](crate::control::MajorIncidentsOverlay).
///
/// Missing fields take their default values, so an empty JSON object is valid options:
///
/// ```
/// use incidents_overlay::OverlayOptions;
///
/// let options = OverlayOptions::from_json(r#"{"url": "incidents.geojson"}"#).unwrap();
/// assert_eq!(options.url, "incidents.geojson");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayOptions {
    /// Url of the incidents GeoJSON feed.
    pub url: String,
    /// Url of the directory with the status icons (`non-fire.png`, `under-control.png`,
    /// `being-controlled.png`, `out-of-control.png`).
    pub icons_url: String,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            icons_url: DEFAULT_ICONS_URL.to_string(),
        }
    }
}

impl OverlayOptions {
    /// Parses options from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, IncidentsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the feed url.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the url of the icons directory.
    pub fn with_icons_url(mut self, icons_url: impl Into<String>) -> Self {
        self.icons_url = icons_url.into();
        self
    }
}
