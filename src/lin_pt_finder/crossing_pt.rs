//! # Crossing point based linearization point finder
//!
//! [`CrossingPtLinPtFinder`] estimates a linearization point in three steps:
//!
//! 1. **Pair selection** – [`select_track_pairs`] picks at most `n_pairs` track pairs,
//!    favouring many distinct tracks and hard/soft combinations (see
//!    [`crate::pair_selection`]).
//! 2. **Crossing points** – each selected pair is turned into a [`WeightedPoint`], either
//!    computed on demand by a [`PairGeometry`] or read from a [`PairDistanceMatrix`]
//!    precomputed for the same collection. Pairs without a crossing point are dropped.
//! 3. **Mode** – the weighted point cloud is handed to the configured [`ModeFinder3d`], whose
//!    result is returned unchanged.
//!
//! ## Failure modes
//!
//! | Condition                                   | Error                               |
//! |---------------------------------------------|-------------------------------------|
//! | fewer than 2 tracks                         | [`LinPtError::NotEnoughTracks`]     |
//! | matrix built from another collection        | [`LinPtError::MatrixMismatch`]      |
//! | no selected pair has a crossing point       | [`LinPtError::InsufficientEvidence`]|
//! | the mode finder rejects the point cloud     | propagated unchanged                |
//!
//! An attached [`EstimationObserver`] is notified of every call, failed ones included, with
//! all selected pairs and their crossing points.
//!
//! The finder never fabricates a point: falling back to
//! [`FallbackLinPtFinder`](crate::lin_pt_finder::fallback::FallbackLinPtFinder) or
//! [`ZeroLinPtFinder`](crate::lin_pt_finder::zero::ZeroLinPtFinder) is left to the caller.
//!
//! ## Sharing
//!
//! The finder is immutable after construction. Cloning it is cheap: the geometry, matrix,
//! mode finder and observer are shared through `Arc`. Concurrent calls on the same instance
//! are safe.

use std::sync::Arc;

use log::{debug, warn};

use crate::constants::GlobalPoint;
use crate::crossing::distance_matrix::PairDistanceMatrix;
use crate::crossing::line_crossing::LineCrossing;
use crate::crossing::{PairCandidate, PairGeometry, WeightedPoint};
use crate::lin_pt_finder::{CrossingPtParams, LinearizationPointFinder};
use crate::linpt_errors::LinPtError;
use crate::mode_finder::ModeFinder3d;
use crate::observer::{EstimationObserver, EstimationRecord};
use crate::pair_selection::select_track_pairs;
use crate::trajectory::Trajectory;

/// Where crossing points come from.
#[derive(Clone)]
pub enum PairSource {
    /// Evaluate the geometry for every selected pair.
    Direct(Arc<dyn PairGeometry>),
    /// Read the crossing points from a matrix built for the exact input collection.
    Precomputed(Arc<PairDistanceMatrix>),
}

impl PairSource {
    fn crossing_point(
        &self,
        tracks: &[Trajectory],
        pair: &PairCandidate,
    ) -> Option<WeightedPoint> {
        match self {
            PairSource::Direct(geometry) => {
                geometry.crossing_point(&tracks[pair.first()], &tracks[pair.second()])
            }
            PairSource::Precomputed(matrix) => matrix.get_pair(pair).copied(),
        }
    }
}

impl std::fmt::Debug for PairSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PairSource::Direct(_) => write!(f, "Direct"),
            PairSource::Precomputed(m) => write!(f, "Precomputed({} tracks)", m.len()),
        }
    }
}

#[derive(Clone)]
pub struct CrossingPtLinPtFinder {
    params: CrossingPtParams,
    source: PairSource,
    mode_finder: Arc<dyn ModeFinder3d>,
    observer: Option<Arc<dyn EstimationObserver>>,
}

impl std::fmt::Debug for CrossingPtLinPtFinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrossingPtLinPtFinder")
            .field("params", &self.params)
            .field("source", &self.source)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl CrossingPtLinPtFinder {
    /// Finder computing straight-line crossing points on demand.
    ///
    /// Arguments
    /// -----------------
    /// * `mode_finder` – Strategy fusing the crossing points.
    /// * `params` – Pair budget and parallelism threshold of the [`LineCrossing`] geometry.
    pub fn new(mode_finder: Arc<dyn ModeFinder3d>, params: CrossingPtParams) -> Self {
        let geometry = Arc::new(LineCrossing::new(params.parallel_eps));
        Self::with_geometry(geometry, mode_finder, params)
    }

    /// Finder computing crossing points on demand with a caller-supplied geometry.
    pub fn with_geometry(
        geometry: Arc<dyn PairGeometry>,
        mode_finder: Arc<dyn ModeFinder3d>,
        params: CrossingPtParams,
    ) -> Self {
        CrossingPtLinPtFinder {
            params,
            source: PairSource::Direct(geometry),
            mode_finder,
            observer: None,
        }
    }

    /// Finder reading crossing points from a precomputed matrix.
    ///
    /// The finder must only be given the collection the matrix was built from; any other
    /// collection is rejected with [`LinPtError::MatrixMismatch`].
    /// [`CrossingPtParams::full_combinatorics`] is the usual choice of `params` here since
    /// every pair is already computed.
    pub fn with_matrix(
        matrix: Arc<PairDistanceMatrix>,
        mode_finder: Arc<dyn ModeFinder3d>,
        params: CrossingPtParams,
    ) -> Self {
        CrossingPtLinPtFinder {
            params,
            source: PairSource::Precomputed(matrix),
            mode_finder,
            observer: None,
        }
    }

    /// Attach an observer notified after every estimation, successful or not.
    pub fn with_observer(mut self, observer: Arc<dyn EstimationObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn params(&self) -> &CrossingPtParams {
        &self.params
    }

    pub fn source(&self) -> &PairSource {
        &self.source
    }

    /// Selected pairs with their crossing points.
    ///
    /// `points[i]` belongs to `pairs[i]` and is `None` when the pair has no crossing point
    /// (parallel tracks, null momentum, ...). The `Some` points are what the mode finder
    /// receives.
    ///
    /// Return
    /// ----------
    /// * `Err(LinPtError::NotEnoughTracks)` for fewer than 2 tracks.
    /// * `Err(LinPtError::MatrixMismatch)` if the matrix was built from another collection.
    pub fn crossing_points(
        &self,
        tracks: &[Trajectory],
    ) -> Result<(Vec<PairCandidate>, Vec<Option<WeightedPoint>>), LinPtError> {
        if tracks.len() < 2 {
            return Err(LinPtError::NotEnoughTracks {
                found: tracks.len(),
                required: 2,
            });
        }
        if let PairSource::Precomputed(matrix) = &self.source {
            matrix.check_bound(tracks)?;
        }

        let pairs = select_track_pairs(tracks, self.params.n_pairs)?;

        let points: Vec<Option<WeightedPoint>> = pairs
            .iter()
            .map(|pair| {
                let wp = self.source.crossing_point(tracks, pair);
                if wp.is_none() {
                    debug!(
                        "No crossing point for tracks ({}, {})",
                        pair.first(),
                        pair.second()
                    );
                }
                wp
            })
            .collect();

        let dropped = points.iter().filter(|p| p.is_none()).count();
        if dropped > 0 {
            warn!(
                "{dropped} of {} selected track pairs have no crossing point",
                pairs.len()
            );
        }
        Ok((pairs, points))
    }

    /// Fuse the crossing points of the evaluated pairs into one position.
    fn fuse(&self, points: &[Option<WeightedPoint>]) -> Result<GlobalPoint, LinPtError> {
        let cloud: Vec<WeightedPoint> = points.iter().flatten().copied().collect();
        if cloud.is_empty() {
            return Err(LinPtError::InsufficientEvidence {
                evaluated: points.len(),
            });
        }
        self.mode_finder.find_mode(&cloud)
    }

    fn notify(
        &self,
        tracks: &[Trajectory],
        pairs: &[PairCandidate],
        points: &[Option<WeightedPoint>],
        estimate: Result<GlobalPoint, &LinPtError>,
    ) {
        if let Some(observer) = &self.observer {
            observer.on_estimate(&EstimationRecord {
                tracks,
                pairs,
                points,
                estimate,
            });
        }
    }
}

impl LinearizationPointFinder for CrossingPtLinPtFinder {
    fn linearization_point(&self, tracks: &[Trajectory]) -> Result<GlobalPoint, LinPtError> {
        let (pairs, points) = match self.crossing_points(tracks) {
            Ok(evaluated) => evaluated,
            Err(err) => {
                self.notify(tracks, &[], &[], Err(&err));
                return Err(err);
            }
        };

        let estimate = self.fuse(&points);
        self.notify(tracks, &pairs, &points, estimate.as_ref().copied());
        estimate
    }
}
