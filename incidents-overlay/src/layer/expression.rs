//! Declarative filter expressions of the overlay layers.

use incidents_types::GeometryType;
use serde_json::{json, Value};

use crate::feature::{IncidentFeature, GUID_PROPERTY};

/// Value the selection filters compare `guid` with when nothing is selected. No incident has an
/// empty identifier, so the filter matches nothing.
pub const NO_SELECTION: &str = "";

/// Predicate deciding which features of the source a layer draws.
///
/// Filters can be evaluated directly against an [`IncidentFeature`] (see
/// [`MemoryMap`](crate::host::MemoryMap)) or serialized with [`Filter::to_json`] into the
/// expression syntax understood by web map libraries.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// All inner filters must pass.
    All(Vec<Filter>),
    /// Geometry of the feature is of the given type.
    GeometryType(GeometryType),
    /// Property of the feature equals the value.
    Eq {
        /// Property name.
        property: String,
        /// Expected value.
        value: Value,
    },
}

impl Filter {
    /// Features with the given geometry type.
    pub fn geometry(geometry_type: GeometryType) -> Self {
        Self::GeometryType(geometry_type)
    }

    /// Features which property has the given value.
    pub fn property_eq(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq {
            property: property.into(),
            value: value.into(),
        }
    }

    /// Features with the given geometry type belonging to the selected incident. With no
    /// selection the filter matches nothing.
    pub fn selected(geometry_type: GeometryType, guid: Option<&str>) -> Self {
        Self::All(vec![
            Self::geometry(geometry_type),
            Self::property_eq(GUID_PROPERTY, guid.unwrap_or(NO_SELECTION)),
        ])
    }

    /// Returns the incident identifier a selection filter targets, if this is a selection filter.
    pub fn selected_guid(&self) -> Option<&str> {
        match self {
            Filter::All(filters) => filters.iter().find_map(Filter::selected_guid),
            Filter::Eq { property, value } if property == GUID_PROPERTY => value.as_str(),
            _ => None,
        }
    }

    /// Checks the feature against the filter.
    pub fn evaluate(&self, feature: &IncidentFeature) -> bool {
        match self {
            Filter::All(filters) => filters.iter().all(|f| f.evaluate(feature)),
            Filter::GeometryType(geometry_type) => feature.geometry_type() == *geometry_type,
            Filter::Eq { property, value } => feature.properties.get(property) == Some(value),
        }
    }

    /// Style expression representation, e.g. `["all", ["==", "$type", "Point"], ["==", "guid", ""]]`.
    pub fn to_json(&self) -> Value {
        match self {
            Filter::All(filters) => {
                let mut expression = vec![json!("all")];
                expression.extend(filters.iter().map(Filter::to_json));
                Value::Array(expression)
            }
            Filter::GeometryType(geometry_type) => json!(["==", "$type", geometry_type.as_str()]),
            Filter::Eq { property, value } => json!(["==", property, value]),
        }
    }
}
