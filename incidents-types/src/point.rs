//! 2d point abstraction ([`CartesianPoint2d`]) and pixel positions on the map canvas
//! ([`ScreenPoint`]).

use num_traits::{Float, Num};
use serde::{Deserialize, Serialize};

/// A point with two planar coordinates.
///
/// Geographic positions use longitude as `x` and latitude as `y`, which is enough for bounding box
/// arithmetic in the overlay since no projection is ever applied to them here.
pub trait CartesianPoint2d {
    /// Numeric type of the coordinates.
    type Num: Num + Copy + PartialOrd;

    /// X coordinate.
    fn x(&self) -> Self::Num;
    /// Y coordinate.
    fn y(&self) -> Self::Num;

    /// Squared euclidean distance to the other point.
    fn distance_sq(&self, other: &impl CartesianPoint2d<Num = Self::Num>) -> Self::Num {
        let dx = self.x() - other.x();
        let dy = self.y() - other.y();
        dx * dx + dy * dy
    }

    /// Sum of absolute coordinate differences.
    fn taxicab_distance(&self, other: &impl CartesianPoint2d<Num = Self::Num>) -> Self::Num {
        let dx = if self.x() >= other.x() {
            self.x() - other.x()
        } else {
            other.x() - self.x()
        };
        let dy = if self.y() >= other.y() {
            self.y() - other.y()
        } else {
            other.y() - self.y()
        };

        dx + dy
    }
}

/// Extension methods for points with floating point coordinates.
pub trait CartesianPoint2dFloat<N: Float = f64>: CartesianPoint2d<Num = N> {
    /// Euclidean distance to the other point.
    fn distance(&self, other: &impl CartesianPoint2d<Num = N>) -> N {
        self.distance_sq(other).sqrt()
    }
}

impl<N: Float, T: CartesianPoint2d<Num = N>> CartesianPoint2dFloat<N> for T {}

/// Position on the screen in pixels from the top-left corner of the map container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    x: f64,
    y: f64,
}

impl ScreenPoint {
    /// Creates a new screen point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl CartesianPoint2d for ScreenPoint {
    type Num = f64;

    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}
