//! Incident features as published in the major incidents feed.

use incidents_types::{Geometry, GeometryType};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Property holding the incident identifier. Point and polygon features of the same incident share
/// the value.
pub const GUID_PROPERTY: &str = "guid";
/// Alert level: `Emergency Warning`, `Watch and Act`, `Advice` or `Not Applicable`.
pub const ALERT_LEVEL_PROPERTY: &str = "alert-level";
/// Incident status, e.g. `Out of control`.
pub const STATUS_PROPERTY: &str = "status";
/// Whether the incident is a fire.
pub const FIRE_PROPERTY: &str = "fire";
/// Publication timestamp of the incident report.
pub const PUB_DATE_PROPERTY: &str = "pub-date";

/// Flat set of feature properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(Map<String, Value>);

impl Properties {
    /// Creates an empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of the property.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the value of the property if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Sets the value of the property, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Sets the property and returns self.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Iterates over all properties.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Incident identifier. Empty string if the feed did not provide one.
    pub fn guid(&self) -> &str {
        self.get_str(GUID_PROPERTY).unwrap_or_default()
    }

    /// Alert level of the incident.
    pub fn alert_level(&self) -> Option<&str> {
        self.get_str(ALERT_LEVEL_PROPERTY)
    }

    /// Status of the incident.
    pub fn status(&self) -> Option<&str> {
        self.get_str(STATUS_PROPERTY)
    }

    /// Whether the incident is a fire. Missing value or any value but `true` means it is not.
    pub fn fire(&self) -> bool {
        matches!(self.get(FIRE_PROPERTY), Some(Value::Bool(true)))
    }

    /// Raw publication timestamp.
    pub fn pub_date(&self) -> Option<&str> {
        self.get_str(PUB_DATE_PROPERTY)
    }
}

impl From<Map<String, Value>> for Properties {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

/// A single incident feature: either the incident location or its area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentFeature {
    /// Geometry of the feature.
    pub geometry: Geometry,
    /// Feed properties of the feature.
    pub properties: Properties,
}

impl IncidentFeature {
    /// Creates a new feature.
    pub fn new(geometry: impl Into<Geometry>, properties: Properties) -> Self {
        Self {
            geometry: geometry.into(),
            properties,
        }
    }

    /// Incident identifier.
    pub fn guid(&self) -> &str {
        self.properties.guid()
    }

    /// Type of the feature geometry.
    pub fn geometry_type(&self) -> GeometryType {
        self.geometry.geometry_type()
    }
}

#[cfg(test)]
mod tests {
    use incidents_types::lnglat;
    use serde_json::json;

    use super::*;

    #[test]
    fn typed_accessors() {
        let properties = Properties::new()
            .with("guid", "https://incidents.rfs.nsw.gov.au/api/v1/incidents/1")
            .with("alert-level", "Advice")
            .with("status", "Under control")
            .with("fire", true)
            .with("pub-date", "2017-10-22T08:41:00+11:00");

        assert_eq!(
            properties.guid(),
            "https://incidents.rfs.nsw.gov.au/api/v1/incidents/1"
        );
        assert_eq!(properties.alert_level(), Some("Advice"));
        assert_eq!(properties.status(), Some("Under control"));
        assert!(properties.fire());
        assert_eq!(properties.pub_date(), Some("2017-10-22T08:41:00+11:00"));
    }

    #[test]
    fn missing_values_default() {
        let properties = Properties::new().with("fire", "true");

        assert_eq!(properties.guid(), "");
        assert_eq!(properties.alert_level(), None);
        assert_eq!(properties.status(), None);
        assert!(!properties.fire());
    }

    #[test]
    fn properties_serialize_flat() {
        let properties = Properties::new().with("guid", "a").with("fire", false);
        assert_eq!(
            serde_json::to_value(&properties).unwrap(),
            json!({"guid": "a", "fire": false})
        );

        let feature = IncidentFeature::new(lnglat!(150.0, -33.0), properties);
        assert_eq!(feature.geometry_type(), GeometryType::Point);
        assert_eq!(feature.guid(), "a");
    }
}
