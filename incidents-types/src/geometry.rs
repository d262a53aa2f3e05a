//! [`Geometry`] of an incident feature: a location point, an area polygon or a collection of both.

use serde::{Deserialize, Serialize};

use crate::geometry_type::GeometryType;
use crate::lnglat::LngLat;
use crate::polygon::Polygon;
use crate::rect::Rect;

/// Geometry of an incident feature.
///
/// Incidents are published either as a location point or as the fire ground area, so only point
/// and (multi)polygon geometries are supported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// Incident location.
    Point(LngLat),
    /// Incident area.
    Polygon(Polygon),
    /// Incident area made of several parts.
    MultiPolygon(Vec<Polygon>),
}

impl Geometry {
    /// Type of the geometry as seen by layer filters.
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => GeometryType::Polygon,
        }
    }

    /// Returns the point if the geometry is a point.
    pub fn as_point(&self) -> Option<LngLat> {
        match self {
            Geometry::Point(point) => Some(*point),
            _ => None,
        }
    }

    /// Bounding box of the geometry. `None` for empty polygons.
    pub fn bounding_rect(&self) -> Option<Rect> {
        match self {
            Geometry::Point(point) => Some(Rect::from_point(point)),
            Geometry::Polygon(polygon) => polygon.bounding_rect(),
            Geometry::MultiPolygon(polygons) => {
                Rect::merge_all(polygons.iter().filter_map(|p| p.bounding_rect()))
            }
        }
    }

    /// Returns true if the point lies inside an areal geometry. Always false for points.
    pub fn contains(&self, point: &LngLat) -> bool {
        match self {
            Geometry::Point(_) => false,
            Geometry::Polygon(polygon) => polygon.contains(point),
            Geometry::MultiPolygon(polygons) => polygons.iter().any(|p| p.contains(point)),
        }
    }
}

impl From<LngLat> for Geometry {
    fn from(value: LngLat) -> Self {
        Self::Point(value)
    }
}

impl From<Polygon> for Geometry {
    fn from(value: Polygon) -> Self {
        Self::Polygon(value)
    }
}
