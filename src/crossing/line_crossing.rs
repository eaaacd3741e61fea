//! Closest approach of two tracks approximated by straight lines.
//!
//! Each track is extended as the line `x(s) = position + s · momentum`. For two lines the
//! closest points are found in closed form:
//!
//! ```text
//! w0 = p1 - p2,  a = d1·d1,  b = d1·d2,  c = d2·d2,  d = d1·w0,  e = d2·w0
//! D  = a c - b²
//! s  = (b e - c d) / D,   t = (a e - b d) / D
//! ```
//!
//! The returned point is the midpoint of `x1(s)` and `x2(t)`, its weight the distance between
//! them. When `D / (a c) = sin²(angle)` falls below `parallel_eps` the lines are parallel and no
//! point is returned.

use crate::constants::{GlobalPoint, MIN_MOMENTUM_SQUARED, PARALLEL_EPS};
use crate::crossing::{PairGeometry, WeightedPoint};
use crate::trajectory::Trajectory;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineCrossing {
    /// Minimum `sin²` of the opening angle for a pair to be considered crossing.
    pub parallel_eps: f64,
}

impl Default for LineCrossing {
    fn default() -> Self {
        LineCrossing {
            parallel_eps: PARALLEL_EPS,
        }
    }
}

impl LineCrossing {
    pub fn new(parallel_eps: f64) -> Self {
        LineCrossing { parallel_eps }
    }

    /// Closest points on both lines, in the order of the arguments.
    pub fn closest_points(
        &self,
        a: &Trajectory,
        b: &Trajectory,
    ) -> Option<(GlobalPoint, GlobalPoint)> {
        let d1 = a.momentum;
        let d2 = b.momentum;
        let w0 = a.position - b.position;

        let aa = d1.dot(&d1);
        let cc = d2.dot(&d2);
        if aa < MIN_MOMENTUM_SQUARED || cc < MIN_MOMENTUM_SQUARED {
            return None;
        }
        let bb = d1.dot(&d2);
        let dd = d1.dot(&w0);
        let ee = d2.dot(&w0);

        let denom = aa * cc - bb * bb;
        let sin2 = denom / (aa * cc);
        if sin2.is_nan() || sin2 < self.parallel_eps {
            return None;
        }

        let s = (bb * ee - cc * dd) / denom;
        let t = (aa * ee - bb * dd) / denom;

        Some((a.position + d1 * s, b.position + d2 * t))
    }
}

impl PairGeometry for LineCrossing {
    fn crossing_point(&self, a: &Trajectory, b: &Trajectory) -> Option<WeightedPoint> {
        let (p1, p2) = self.closest_points(a, b)?;
        let midpoint = p1 + (p2 - p1) * 0.5;
        let distance = (p2 - p1).norm();
        if !distance.is_finite() {
            return None;
        }
        Some(WeightedPoint::new(midpoint, distance))
    }
}
