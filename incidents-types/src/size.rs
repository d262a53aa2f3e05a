//! Width and height of the map canvas or an icon, see [`Size`].

use num_traits::{FromPrimitive, Num};
use serde::{Deserialize, Serialize};

/// Size of a screen area in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size<N = f64> {
    width: N,
    height: N,
}

impl<N: Num + FromPrimitive + PartialOrd + Copy> Size<N> {
    /// Creates a new size. Negative values are clamped to zero.
    pub fn new(width: N, height: N) -> Self {
        let clamp = |v: N| if v < N::zero() { N::zero() } else { v };
        Self {
            width: clamp(width),
            height: clamp(height),
        }
    }

    /// Width.
    pub fn width(&self) -> N {
        self.width
    }

    /// Height.
    pub fn height(&self) -> N {
        self.height
    }

    /// Returns true if either dimension is zero.
    pub fn is_zero(&self) -> bool {
        self.width.is_zero() || self.height.is_zero()
    }
}
