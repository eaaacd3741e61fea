//! # Linearization point finders
//!
//! A linearization point finder turns a track collection into one 3D position used to seed an
//! iterative vertex fit. Three strategies share the [`LinearizationPointFinder`] trait:
//!
//! - [`crossing_pt::CrossingPtLinPtFinder`] – mode of pairwise crossing points over a budgeted
//!   selection of track pairs (needs ≥ 2 tracks and ≥ 1 usable crossing),
//! - [`fallback::FallbackLinPtFinder`] – mode of the innermost track positions (needs ≥ 1 track),
//! - [`zero::ZeroLinPtFinder`] – always the origin.
//!
//! The crossing point finder is configured with [`CrossingPtParams`], built through
//! [`CrossingPtParamsBuilder`]:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use linpt::lin_pt_finder::{CrossingPtParams, LinearizationPointFinder};
//! use linpt::lin_pt_finder::crossing_pt::CrossingPtLinPtFinder;
//! use linpt::mode_finder::hsm::HsmModeFinder3d;
//! use linpt::pair_selection::PairBudget;
//!
//! let params = CrossingPtParams::builder()
//!     .n_pairs(PairBudget::Bounded(10))
//!     .parallel_eps(1e-10)
//!     .build()
//!     .unwrap();
//! let finder = CrossingPtLinPtFinder::new(Arc::new(HsmModeFinder3d), params);
//!
//! # let tracks = vec![];
//! let seed = finder.linearization_point(&tracks);
//! ```
//!
//! Falling back is the caller's decision; [`first_successful`] chains finders in order.
//!
//! ## See also
//! ------------
//! * [`crate::pair_selection::select_track_pairs`] – Pair selection heuristic.
//! * [`crate::mode_finder::ModeFinder3d`] – Mode finding strategies.
use std::cmp::Ordering::{Equal, Greater};

use log::debug;

use crate::constants::{GlobalPoint, DEFAULT_N_PAIRS, PARALLEL_EPS};
use crate::linpt_errors::LinPtError;
use crate::pair_selection::PairBudget;
use crate::trajectory::{Trajectory, TrajectoryState};

pub mod crossing_pt;
pub mod fallback;
pub mod zero;

/// Strategy producing a linearization point from a set of tracks.
pub trait LinearizationPointFinder: Send + Sync {
    /// Linearization point of `tracks`.
    fn linearization_point(&self, tracks: &[Trajectory]) -> Result<GlobalPoint, LinPtError>;

    /// Linearization point of free trajectory states.
    ///
    /// The states are adapted to [`Trajectory`] values (innermost position = state position)
    /// and go through [`LinearizationPointFinder::linearization_point`].
    fn linearization_point_from_states(
        &self,
        states: &[TrajectoryState],
    ) -> Result<GlobalPoint, LinPtError> {
        let tracks: Vec<Trajectory> = states.iter().map(Trajectory::from).collect();
        self.linearization_point(&tracks)
    }
}

/// Try each finder in order and return the first linearization point found.
///
/// Return
/// ----------
/// * The first successful result.
/// * The error of the last finder if all of them fail, [`LinPtError::NoFinders`] if `finders`
///   is empty.
pub fn first_successful(
    finders: &[&dyn LinearizationPointFinder],
    tracks: &[Trajectory],
) -> Result<GlobalPoint, LinPtError> {
    let mut last_err = LinPtError::NoFinders;
    for (rank, finder) in finders.iter().enumerate() {
        match finder.linearization_point(tracks) {
            Ok(point) => return Ok(point),
            Err(err) => {
                debug!("Linearization point finder #{rank} failed: {err}");
                last_err = err;
            }
        }
    }
    Err(last_err)
}

/// Configuration of [`crossing_pt::CrossingPtLinPtFinder`].
///
/// Fields
/// -----------------
/// * `n_pairs` – maximum number of track pairs whose crossing point is computed.
///   [`PairBudget::Unbounded`] (or any budget ≥ C(N, 2)) evaluates every pair.
/// * `parallel_eps` – threshold on `sin²` of the opening angle below which two tracks are
///   considered parallel by the default straight-line geometry.
///
/// Defaults
/// -----------------
/// * `n_pairs`: `Bounded(5)`
/// * `parallel_eps`: 1e-12
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossingPtParams {
    pub n_pairs: PairBudget,
    pub parallel_eps: f64,
}

impl CrossingPtParams {
    /// Fluent builder starting from the defaults.
    pub fn builder() -> CrossingPtParamsBuilder {
        CrossingPtParamsBuilder::new()
    }

    /// Defaults used with a precomputed distance matrix: full combinatorics.
    pub fn full_combinatorics() -> Self {
        CrossingPtParams {
            n_pairs: PairBudget::Unbounded,
            ..Self::default()
        }
    }
}

impl Default for CrossingPtParams {
    fn default() -> Self {
        CrossingPtParams {
            n_pairs: PairBudget::Bounded(DEFAULT_N_PAIRS),
            parallel_eps: PARALLEL_EPS,
        }
    }
}

/// Builder for [`CrossingPtParams`], with validation.
#[derive(Debug, Clone)]
pub struct CrossingPtParamsBuilder {
    params: CrossingPtParams,
}

impl Default for CrossingPtParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CrossingPtParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: CrossingPtParams::default(),
        }
    }

    pub fn n_pairs(mut self, v: impl Into<PairBudget>) -> Self {
        self.params.n_pairs = v.into();
        self
    }
    pub fn parallel_eps(mut self, v: f64) -> Self {
        self.params.parallel_eps = v;
        self
    }

    /// Return true iff x >= 0.0 and comparable (i.e., not NaN).
    #[inline]
    fn ge0(x: f64) -> bool {
        matches!(x.partial_cmp(&0.0), Some(Greater) | Some(Equal))
    }

    /// Finalize the builder.
    ///
    /// Validation rules
    /// -----------------
    /// * `n_pairs` must not be `Bounded(0)`: no pair would ever be evaluated.
    /// * `parallel_eps >= 0.0` and `parallel_eps < 1.0`.
    pub fn build(self) -> Result<CrossingPtParams, LinPtError> {
        let p = &self.params;

        if p.n_pairs == PairBudget::Bounded(0) {
            return Err(LinPtError::InvalidParameter(
                "n_pairs must be at least 1".into(),
            ));
        }
        if !Self::ge0(p.parallel_eps) || p.parallel_eps >= 1.0 {
            return Err(LinPtError::InvalidParameter(
                "parallel_eps must be in [0, 1)".into(),
            ));
        }

        Ok(self.params)
    }
}
