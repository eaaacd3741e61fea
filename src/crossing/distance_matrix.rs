//! # Precomputed pairwise crossing points
//!
//! [`PairDistanceMatrix`] evaluates a [`PairGeometry`] once for every pair of a fixed track
//! collection and keeps the results in a condensed upper-triangular table:
//!
//! ```text
//! slot(i, j) = i (2n - i - 1) / 2 + (j - i - 1),   i < j
//! ```
//!
//! The matrix is only valid for the collection it was built from. It keeps the size and a
//! fixed-seed fingerprint of that collection so [`PairDistanceMatrix::check_bound`] can reject
//! another one instead of returning crossing points of unrelated tracks.
//!
//! Built once, then read-only: share it between finders and threads behind an `Arc`.

use std::hash::{BuildHasher, Hasher};

use ahash::RandomState;

use crate::constants::FINGERPRINT_SEEDS;
use crate::crossing::{PairCandidate, PairGeometry, WeightedPoint};
use crate::linpt_errors::LinPtError;
use crate::trajectory::Trajectory;

#[derive(Debug, Clone, PartialEq)]
pub struct PairDistanceMatrix {
    n_tracks: usize,
    fingerprint: u64,
    /// Condensed upper triangle; `None` where the geometry had no crossing point.
    cells: Vec<Option<WeightedPoint>>,
}

/// Fingerprint of the exact bit content of a track collection.
fn collection_fingerprint(tracks: &[Trajectory]) -> u64 {
    let [k0, k1, k2, k3] = FINGERPRINT_SEEDS;
    let mut hasher = RandomState::with_seeds(k0, k1, k2, k3).build_hasher();
    hasher.write_usize(tracks.len());
    for t in tracks {
        t.hash_bits(&mut hasher);
    }
    hasher.finish()
}

impl PairDistanceMatrix {
    /// Evaluate `geometry` on all C(n, 2) pairs of `tracks`.
    pub fn build(tracks: &[Trajectory], geometry: &dyn PairGeometry) -> Self {
        let n = tracks.len();
        let mut cells = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for (i, a) in tracks.iter().enumerate() {
            for b in &tracks[i + 1..] {
                cells.push(geometry.crossing_point(a, b));
            }
        }
        PairDistanceMatrix {
            n_tracks: n,
            fingerprint: collection_fingerprint(tracks),
            cells,
        }
    }

    /// Number of tracks of the collection the matrix was built from.
    pub fn len(&self) -> usize {
        self.n_tracks
    }

    pub fn is_empty(&self) -> bool {
        self.n_tracks == 0
    }

    #[inline]
    fn slot(&self, i: usize, j: usize) -> usize {
        i * (2 * self.n_tracks - i - 1) / 2 + (j - i - 1)
    }

    /// Crossing point of tracks `i` and `j`, in either order.
    ///
    /// Return
    /// ----------
    /// * `None` on the diagonal, out of range, or where the geometry had no crossing point.
    pub fn get(&self, i: usize, j: usize) -> Option<&WeightedPoint> {
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        if lo == hi || hi >= self.n_tracks {
            return None;
        }
        self.cells[self.slot(lo, hi)].as_ref()
    }

    /// Crossing point of a selected pair.
    #[inline]
    pub fn get_pair(&self, pair: &PairCandidate) -> Option<&WeightedPoint> {
        self.get(pair.first(), pair.second())
    }

    /// Verify that `tracks` is the collection the matrix was built from.
    ///
    /// Return
    /// ----------
    /// * `Err(LinPtError::MatrixMismatch)` if the size or the fingerprint differ.
    pub fn check_bound(&self, tracks: &[Trajectory]) -> Result<(), LinPtError> {
        if tracks.len() != self.n_tracks {
            return Err(LinPtError::MatrixMismatch(format!(
                "matrix built for {} tracks, got {}",
                self.n_tracks,
                tracks.len()
            )));
        }
        if collection_fingerprint(tracks) != self.fingerprint {
            return Err(LinPtError::MatrixMismatch(
                "track content differs from the collection the matrix was built from".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod distance_matrix_test {
    use super::*;
    use crate::constants::{GlobalPoint, GlobalVector};
    use crate::crossing::line_crossing::LineCrossing;

    fn tracks() -> Vec<Trajectory> {
        vec![
            Trajectory::new(
                GlobalPoint::new(1.0, 0.0, 0.0),
                GlobalVector::new(1.0, 0.0, 0.0),
                1,
            ),
            Trajectory::new(
                GlobalPoint::new(0.0, 1.0, 0.5),
                GlobalVector::new(0.0, 2.0, 0.0),
                -1,
            ),
            Trajectory::new(
                GlobalPoint::new(0.0, 0.0, 1.0),
                GlobalVector::new(0.0, 0.0, 3.0),
                1,
            ),
            // Parallel to the first one
            Trajectory::new(
                GlobalPoint::new(0.0, 1.0, 0.0),
                GlobalVector::new(4.0, 0.0, 0.0),
                -1,
            ),
        ]
    }

    #[test]
    fn test_matches_direct_geometry() {
        let tracks = tracks();
        let line = LineCrossing::default();
        let m = PairDistanceMatrix::build(&tracks, &line);
        assert_eq!(m.len(), 4);

        for i in 0..tracks.len() {
            for j in 0..tracks.len() {
                if i == j {
                    assert!(m.get(i, j).is_none());
                    continue;
                }
                let direct = line.crossing_point(&tracks[i.min(j)], &tracks[i.max(j)]);
                assert_eq!(m.get(i, j).copied(), direct, "pair ({i}, {j})");
            }
        }
        assert!(m.get(0, 3).is_none());
        assert!(m.get(1, 7).is_none());
    }

    #[test]
    fn test_check_bound() {
        let tracks = tracks();
        let m = PairDistanceMatrix::build(&tracks, &LineCrossing::default());
        assert_eq!(m.check_bound(&tracks), Ok(()));

        assert!(matches!(
            m.check_bound(&tracks[..3]),
            Err(LinPtError::MatrixMismatch(_))
        ));

        let mut moved = tracks.clone();
        moved[2].position.z += 1e-9;
        assert!(matches!(
            m.check_bound(&moved),
            Err(LinPtError::MatrixMismatch(_))
        ));

        // Same lines, opposite bending: a helix geometry would give other crossings
        let mut flipped = tracks.clone();
        flipped[0].charge = -flipped[0].charge;
        assert!(matches!(
            m.check_bound(&flipped),
            Err(LinPtError::MatrixMismatch(_))
        ));
    }
}
