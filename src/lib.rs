//! # linpt
//!
//! Initial linearization point for vertex fitting, estimated from the crossing points of
//! charged-particle track pairs.
//!
//! ## Pipeline
//!
//! 1. [`pair_selection`] chooses a bounded set of track pairs,
//! 2. [`crossing`] turns each pair into a weighted crossing point, on demand or from a
//!    precomputed [`PairDistanceMatrix`],
//! 3. [`mode_finder`] fuses the point cloud into one position.
//!
//! [`CrossingPtLinPtFinder`] orchestrates the three steps; [`FallbackLinPtFinder`] and
//! [`ZeroLinPtFinder`] are the degenerate alternatives a caller can fall back to.

pub mod constants;
pub mod crossing;
pub mod lin_pt_finder;
pub mod linpt_errors;
pub mod mode_finder;
pub mod observer;
pub mod pair_selection;
pub mod trajectory;

pub use constants::{GlobalPoint, GlobalVector, TrackCollection};
pub use crossing::distance_matrix::PairDistanceMatrix;
pub use crossing::line_crossing::LineCrossing;
pub use crossing::{PairCandidate, PairGeometry, WeightedPoint};
pub use lin_pt_finder::crossing_pt::{CrossingPtLinPtFinder, PairSource};
pub use lin_pt_finder::fallback::FallbackLinPtFinder;
pub use lin_pt_finder::zero::ZeroLinPtFinder;
pub use lin_pt_finder::{
    first_successful, CrossingPtParams, CrossingPtParamsBuilder, LinearizationPointFinder,
};
pub use linpt_errors::LinPtError;
pub use mode_finder::hsm::HsmModeFinder3d;
pub use mode_finder::weighted_mean::WeightedMeanModeFinder3d;
pub use mode_finder::ModeFinder3d;
pub use observer::{CsvObserver, EstimationObserver, EstimationRecord, LogObserver};
pub use pair_selection::{select_track_pairs, InterleavedPairGenerator, PairBudget};
pub use trajectory::{Trajectory, TrajectoryState};
