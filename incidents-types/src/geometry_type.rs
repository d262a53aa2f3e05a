//! Geometry kinds ([`GeometryType`]) used by layer filters to tell locations from areas.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Type of a feature geometry as it is seen by layer filters (the `$type` operand of map style
/// expressions).
///
/// Multi-geometries report the type of their parts, so a `MultiPolygon` is a [`GeometryType::Polygon`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum GeometryType {
    /// Point or multipoint.
    Point,
    /// Line string or multi line string.
    LineString,
    /// Polygon or multipolygon.
    Polygon,
}

impl GeometryType {
    /// Name of the type as used in style expressions.
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::LineString => "LineString",
            GeometryType::Polygon => "Polygon",
        }
    }
}

impl Display for GeometryType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
