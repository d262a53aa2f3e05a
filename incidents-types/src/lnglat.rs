//! Geographic position, see [`LngLat`].

use serde::{Deserialize, Serialize};

use crate::point::CartesianPoint2d;

/// Geographic position in degrees, in GeoJSON axis order (longitude first).
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct LngLat {
    lng: f64,
    lat: f64,
}

impl LngLat {
    /// Creates a new position from longitude and latitude in degrees.
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Longitude in degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Converts the position into `[lng, lat]` array as used by GeoJSON and web map libraries.
    pub fn to_array(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

impl From<[f64; 2]> for LngLat {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self { lng, lat }
    }
}

impl CartesianPoint2d for LngLat {
    type Num = f64;

    fn x(&self) -> f64 {
        self.lng
    }

    fn y(&self) -> f64 {
        self.lat
    }
}

/// Creates a new [`LngLat`] from longitude and latitude values (in degrees).
///
/// ```
/// use incidents_types::lnglat;
///
/// let point = lnglat!(147.0, -33.0);
/// assert_eq!(point.lat(), -33.0);
/// ```
#[macro_export]
macro_rules! lnglat {
    ($lng:expr, $lat:expr) => {
        $crate::lnglat::LngLat::new($lng, $lat)
    };
}
