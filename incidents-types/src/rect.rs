//! Axis aligned bounding box, see [`Rect`].

use num_traits::{FromPrimitive, Num};
use serde::{Deserialize, Serialize};

use crate::point::CartesianPoint2d;

/// Axis aligned rectangle.
///
/// For geographic data `x` is longitude and `y` is latitude, so `Rect<f64>` doubles as the map
/// viewport bounds and as the bounding box of an incident geometry.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect<N = f64> {
    /// Western (left) edge.
    pub x_min: N,
    /// Southern (bottom) edge.
    pub y_min: N,
    /// Eastern (right) edge.
    pub x_max: N,
    /// Northern (top) edge.
    pub y_max: N,
}

impl<N: Num + Copy + PartialOrd + FromPrimitive> Rect<N> {
    /// Creates a new rectangle. Values are not normalized.
    pub fn new(x_min: N, y_min: N, x_max: N, y_max: N) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Minimum x coordinate.
    pub fn x_min(&self) -> N {
        self.x_min
    }

    /// Maximum x coordinate.
    pub fn x_max(&self) -> N {
        self.x_max
    }

    /// Minimum y coordinate.
    pub fn y_min(&self) -> N {
        self.y_min
    }

    /// Maximum y coordinate.
    pub fn y_max(&self) -> N {
        self.y_max
    }

    /// Width of the rectangle.
    pub fn width(&self) -> N {
        self.x_max - self.x_min
    }

    /// Height of the rectangle.
    pub fn height(&self) -> N {
        self.y_max - self.y_min
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn merge(&self, other: Self) -> Self {
        Self {
            x_min: if self.x_min < other.x_min {
                self.x_min
            } else {
                other.x_min
            },
            y_min: if self.y_min < other.y_min {
                self.y_min
            } else {
                other.y_min
            },
            x_max: if self.x_max > other.x_max {
                self.x_max
            } else {
                other.x_max
            },
            y_max: if self.y_max > other.y_max {
                self.y_max
            } else {
                other.y_max
            },
        }
    }

    /// Smallest rectangle containing both `self` and the point.
    pub fn merge_point(&self, point: &impl CartesianPoint2d<Num = N>) -> Self {
        self.merge(Self::from_point(point))
    }

    /// Degenerate rectangle with zero size at the given point.
    pub fn from_point(p: &impl CartesianPoint2d<Num = N>) -> Self {
        Self {
            x_min: p.x(),
            x_max: p.x(),
            y_min: p.y(),
            y_max: p.y(),
        }
    }

    /// Bounding rectangle of the points. Returns `None` if the iterator is empty.
    pub fn from_points<'a, P: CartesianPoint2d<Num = N> + 'a>(
        mut points: impl Iterator<Item = &'a P>,
    ) -> Option<Self> {
        let first = points.next()?;
        let mut x_min = first.x();
        let mut y_min = first.y();
        let mut x_max = first.x();
        let mut y_max = first.y();

        for p in points {
            if x_min > p.x() {
                x_min = p.x();
            }
            if y_min > p.y() {
                y_min = p.y();
            }
            if x_max < p.x() {
                x_max = p.x();
            }
            if y_max < p.y() {
                y_max = p.y();
            }
        }

        Some(Self {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Merges all rectangles of the iterator. Returns `None` if the iterator is empty.
    pub fn merge_all(mut rects: impl Iterator<Item = Self>) -> Option<Self> {
        let first = rects.next()?;
        Some(rects.fold(first, |acc, rect| acc.merge(rect)))
    }

    /// Returns true if the point is inside the rectangle or on its border.
    pub fn contains(&self, point: &impl CartesianPoint2d<Num = N>) -> bool {
        self.x_min <= point.x()
            && self.x_max >= point.x()
            && self.y_min <= point.y()
            && self.y_max >= point.y()
    }

    /// Returns true if the `other` rectangle lies fully inside this one.
    pub fn contains_rect(&self, other: &Self) -> bool {
        self.x_min <= other.x_min
            && self.x_max >= other.x_max
            && self.y_min <= other.y_min
            && self.y_max >= other.y_max
    }

    /// Center of the rectangle as `(x, y)`.
    pub fn center(&self) -> Option<(N, N)> {
        let two = N::from_f64(2.0)?;
        Some((
            (self.x_min + self.x_max) / two,
            (self.y_min + self.y_max) / two,
        ))
    }
}
