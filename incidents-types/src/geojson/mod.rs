//! Conversion of GeoJSON geometries into [`Geometry`].

use geojson::{PolygonType, Position, Value};

use crate::error::IncidentsTypesError;
use crate::geometry::Geometry;
use crate::lnglat::LngLat;
use crate::polygon::Polygon;

impl TryFrom<&geojson::Geometry> for Geometry {
    type Error = IncidentsTypesError;

    fn try_from(value: &geojson::Geometry) -> Result<Self, Self::Error> {
        match &value.value {
            Value::Point(p) => Ok(Geometry::Point(convert_position(p)?)),
            Value::Polygon(polygon) => Ok(Geometry::Polygon(convert_polygon(polygon)?)),
            Value::MultiPolygon(mp) => Ok(Geometry::MultiPolygon(
                mp.iter()
                    .map(convert_polygon)
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            Value::MultiPoint(_) => Err(unsupported("MultiPoint")),
            Value::LineString(_) => Err(unsupported("LineString")),
            Value::MultiLineString(_) => Err(unsupported("MultiLineString")),
            Value::GeometryCollection(_) => Err(unsupported("GeometryCollection")),
        }
    }
}

fn unsupported(name: &str) -> IncidentsTypesError {
    IncidentsTypesError::Unsupported(name.to_string())
}

fn convert_position(position: &Position) -> Result<LngLat, IncidentsTypesError> {
    if position.len() < 2 {
        return Err(IncidentsTypesError::Conversion(
            "point must contain at least 2 dimensions".to_string(),
        ));
    }

    Ok(LngLat::new(position[0], position[1]))
}

fn convert_ring(ring: &[Position]) -> Result<Vec<LngLat>, IncidentsTypesError> {
    ring.iter().map(convert_position).collect()
}

fn convert_polygon(polygon: &PolygonType) -> Result<Polygon, IncidentsTypesError> {
    let mut rings = polygon.iter();
    let outer = rings
        .next()
        .ok_or_else(|| IncidentsTypesError::Conversion("polygon has no rings".to_string()))?;

    Ok(Polygon::new(
        convert_ring(outer)?,
        rings
            .map(|ring| convert_ring(ring))
            .collect::<Result<Vec<_>, _>>()?,
    ))
}
