//! # Pairwise crossing points
//!
//! Types and traits used to turn a pair of tracks into a single weighted 3D point:
//!
//! - [`PairCandidate`] – canonical `(first, second)` index pair, `first < second`,
//! - [`WeightedPoint`] – crossing point plus a non-negative weight,
//! - [`PairGeometry`] – the closest-approach primitive evaluated on demand,
//! - [`distance_matrix::PairDistanceMatrix`] – the same results precomputed for a fixed collection.
//!
//! ## See also
//! ------------
//! * [`line_crossing::LineCrossing`] – straight-line closest approach.
//! * [`crate::pair_selection::select_track_pairs`] – which pairs get evaluated.

use crate::constants::GlobalPoint;
use crate::linpt_errors::LinPtError;
use crate::trajectory::Trajectory;

pub mod distance_matrix;
pub mod line_crossing;

/// A pair of distinct track indices, stored with `first < second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairCandidate {
    first: usize,
    second: usize,
}

impl PairCandidate {
    /// Build a canonical pair from two indices given in any order.
    ///
    /// Return
    /// ----------
    /// * `Err(LinPtError::InvalidPairCandidate)` if both indices are equal.
    pub fn new(a: usize, b: usize) -> Result<Self, LinPtError> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Ok(PairCandidate {
                first: a,
                second: b,
            }),
            std::cmp::Ordering::Greater => Ok(PairCandidate {
                first: b,
                second: a,
            }),
            std::cmp::Ordering::Equal => Err(LinPtError::InvalidPairCandidate(a)),
        }
    }

    /// Smaller index of the pair.
    #[inline]
    pub fn first(&self) -> usize {
        self.first
    }

    /// Larger index of the pair.
    #[inline]
    pub fn second(&self) -> usize {
        self.second
    }

    /// Whether `index` is one of the two tracks.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.first == index || self.second == index
    }
}

/// A crossing point with its weight.
///
/// For [`line_crossing::LineCrossing`] the weight is the closest-approach distance between
/// the two tracks: the smaller it is, the better the point is constrained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedPoint {
    pub point: GlobalPoint,
    pub weight: f64,
}

impl WeightedPoint {
    pub fn new(point: GlobalPoint, weight: f64) -> Self {
        WeightedPoint { point, weight }
    }
}

/// Closest-approach primitive between two tracks.
///
/// Implementations are stateless strategies shared between threads; `None` means the pair has
/// no well-defined crossing point (parallel tracks, null momentum, ...).
pub trait PairGeometry: Send + Sync {
    fn crossing_point(&self, a: &Trajectory, b: &Trajectory) -> Option<WeightedPoint>;
}
