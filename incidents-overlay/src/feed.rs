//! Parsing of the major incidents GeoJSON feed.

use geojson::GeoJson;
use incidents_types::Geometry;
use log::warn;

use crate::error::IncidentsError;
use crate::feature::{IncidentFeature, Properties};

/// Default location of the feed: NSW RFS major incidents as processed by
/// <https://github.com/beyondtracks/nsw-rfs-majorincidents-geojson>.
pub const DEFAULT_FEED_URL: &str =
    "https://www.beyondtracks.com/contrib/nsw-rfs-majorincidents.geojson";

/// Parses the feed into incident features.
///
/// Features without geometry, or with geometry the overlay cannot display, are skipped with a
/// warning. A single feature or a bare geometry document is accepted as well.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<IncidentFeature>, IncidentsError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|err| IncidentsError::Generic(format!("feed is not valid UTF-8: {err}")))?;
    let geojson: GeoJson = text.parse()?;

    let features = match geojson {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(geometry) => vec![geojson::Feature::from(geometry)],
    };

    Ok(features.iter().filter_map(convert_feature).collect())
}

fn convert_feature(feature: &geojson::Feature) -> Option<IncidentFeature> {
    let properties: Properties = feature.properties.clone().unwrap_or_default().into();

    let Some(geometry) = &feature.geometry else {
        warn!("Skipping incident {:?} without geometry", properties.guid());
        return None;
    };

    match Geometry::try_from(geometry) {
        Ok(geometry) => Some(IncidentFeature {
            geometry,
            properties,
        }),
        Err(err) => {
            warn!("Skipping incident {:?}: {err}", properties.guid());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use incidents_types::{lnglat, GeometryType};

    use super::*;

    const FEED: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [150.3, -33.7]},
                "properties": {
                    "guid": "incident-1",
                    "title": "Mount Victoria",
                    "alert-level": "Advice",
                    "status": "Under control",
                    "fire": true,
                    "pub-date": "2017-10-22T08:41:00+11:00"
                }
            },
            {
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[150.2, -33.8], [150.4, -33.8], [150.4, -33.6], [150.2, -33.8]]]
                },
                "properties": {"guid": "incident-1"}
            },
            {
                "type": "Feature",
                "geometry": {"type": "LineString", "coordinates": [[150.0, -33.0], [151.0, -34.0]]},
                "properties": {"guid": "incident-2"}
            },
            {
                "type": "Feature",
                "geometry": null,
                "properties": {"guid": "incident-3"}
            }
        ]
    }"#;

    #[test]
    fn parses_points_and_polygons() {
        let features = parse_feed(FEED.as_bytes()).unwrap();

        assert_eq!(features.len(), 2);
        assert_eq!(features[0].geometry.as_point(), Some(lnglat!(150.3, -33.7)));
        assert_eq!(features[0].properties.get_str("title"), Some("Mount Victoria"));
        assert_eq!(features[1].geometry_type(), GeometryType::Polygon);
        assert_eq!(features[1].guid(), "incident-1");
    }

    #[test]
    fn invalid_feed() {
        assert_matches!(
            parse_feed(b"{\"type\": \"Nothing\"}"),
            Err(IncidentsError::Feed(_))
        );
        assert_matches!(parse_feed(&[0xff, 0xfe]), Err(IncidentsError::Generic(_)));
    }
}
