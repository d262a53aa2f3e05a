//! See [`Polygon`].

use serde::{Deserialize, Serialize};

use crate::lnglat::LngLat;
use crate::rect::Rect;

/// Polygon with one outer ring and any number of holes.
///
/// Rings are stored as given by the source. Closing point is optional: the first point is assumed to
/// follow the last one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polygon {
    outer_contour: Vec<LngLat>,
    inner_contours: Vec<Vec<LngLat>>,
}

impl Polygon {
    /// Creates a new polygon.
    pub fn new(outer_contour: Vec<LngLat>, inner_contours: Vec<Vec<LngLat>>) -> Self {
        Self {
            outer_contour,
            inner_contours,
        }
    }

    /// Outer ring of the polygon.
    pub fn outer_contour(&self) -> &[LngLat] {
        &self.outer_contour
    }

    /// Holes of the polygon.
    pub fn inner_contours(&self) -> impl Iterator<Item = &[LngLat]> {
        self.inner_contours.iter().map(|c| &c[..])
    }

    /// Bounding box of the outer ring. `None` for an empty polygon.
    pub fn bounding_rect(&self) -> Option<Rect> {
        Rect::from_points(self.outer_contour.iter())
    }

    /// Even-odd point in polygon test. Points inside holes are outside of the polygon.
    pub fn contains(&self, point: &LngLat) -> bool {
        ring_contains(&self.outer_contour, point)
            && !self
                .inner_contours
                .iter()
                .any(|ring| ring_contains(ring, point))
    }
}

fn ring_contains(ring: &[LngLat], point: &LngLat) -> bool {
    if ring.len() < 3 {
        return false;
    }

    let (x, y) = (point.lng(), point.lat());
    let mut inside = false;
    let mut prev = ring[ring.len() - 1];
    for curr in ring {
        if (curr.lat() > y) != (prev.lat() > y) {
            let x_cross = (prev.lng() - curr.lng()) * (y - curr.lat()) / (prev.lat() - curr.lat())
                + curr.lng();
            if x < x_cross {
                inside = !inside;
            }
        }
        prev = *curr;
    }

    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lnglat;

    fn square(x: f64, y: f64, size: f64) -> Vec<LngLat> {
        vec![
            lnglat!(x, y),
            lnglat!(x + size, y),
            lnglat!(x + size, y + size),
            lnglat!(x, y + size),
            lnglat!(x, y),
        ]
    }

    #[test]
    fn contains_point() {
        let polygon = Polygon::new(square(150.0, -34.0, 1.0), vec![]);

        assert!(polygon.contains(&lnglat!(150.5, -33.5)));
        assert!(!polygon.contains(&lnglat!(151.5, -33.5)));
        assert!(!polygon.contains(&lnglat!(150.5, -32.5)));
    }

    #[test]
    fn holes_are_outside() {
        let polygon = Polygon::new(
            square(0.0, 0.0, 10.0),
            vec![square(4.0, 4.0, 2.0)],
        );

        assert!(polygon.contains(&lnglat!(1.0, 1.0)));
        assert!(!polygon.contains(&lnglat!(5.0, 5.0)));
    }

    #[test]
    fn degenerate_polygon() {
        let polygon = Polygon::new(vec![lnglat!(0.0, 0.0), lnglat!(1.0, 1.0)], vec![]);
        assert!(!polygon.contains(&lnglat!(0.5, 0.5)));
        assert!(Polygon::default().bounding_rect().is_none());
    }

    #[test]
    fn bounding_rect() {
        let polygon = Polygon::new(square(150.0, -34.0, 1.0), vec![]);
        assert_eq!(
            polygon.bounding_rect(),
            Some(Rect::new(150.0, -34.0, 151.0, -33.0))
        );
    }
}
