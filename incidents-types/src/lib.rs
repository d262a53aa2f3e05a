//! Geometry primitives used by the major incidents overlay.
//!
//! Coordinates come in two flavours: geographic [`LngLat`] positions of incident features and
//! [`ScreenPoint`] pixel positions of user interactions. Both implement [`CartesianPoint2d`], so
//! the same [`Rect`] type describes viewport bounds, feature bounding boxes and hit areas.

pub mod error;
pub mod geometry;
pub mod geometry_type;
pub mod lnglat;
pub mod point;
pub mod polygon;
pub mod rect;
pub mod size;

#[cfg(feature = "geojson")]
pub mod geojson;

pub use error::IncidentsTypesError;
pub use geometry::Geometry;
pub use geometry_type::GeometryType;
pub use lnglat::LngLat;
pub use point::{CartesianPoint2d, ScreenPoint};
pub use polygon::Polygon;
pub use rect::Rect;
pub use size::Size;
