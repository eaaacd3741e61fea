//! # Constants and type definitions for linpt
//!
//! Numerical tolerances, default configuration values and the type aliases
//! shared by the pair selection, crossing geometry and mode finding modules.

use nalgebra::{Point3, Vector3};

use crate::trajectory::Trajectory;

// -------------------------------------------------------------------------------------------------
// Numerical tolerances
// -------------------------------------------------------------------------------------------------

/// Threshold on `sin²(angle)` below which two trajectories are considered parallel
pub const PARALLEL_EPS: f64 = 1e-12;

/// Squared momentum magnitude below which a trajectory has no usable direction
pub const MIN_MOMENTUM_SQUARED: f64 = 1e-24;

/// Offset added to the crossing distance before inversion in the weighted mean
pub const DEFAULT_WEIGHT_CUTOFF: f64 = 1e-3;

// -------------------------------------------------------------------------------------------------
// Default configuration
// -------------------------------------------------------------------------------------------------

/// Default number of track pairs evaluated by the direct crossing point finder
pub const DEFAULT_N_PAIRS: usize = 5;

/// Seeds of the fixed hasher used to fingerprint a track collection
pub(crate) const FINGERPRINT_SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Cartesian position in the global frame
pub type GlobalPoint = Point3<f64>;

/// Cartesian momentum in the global frame
pub type GlobalVector = Vector3<f64>;

/// Ordered collection of tracks given to a linearization point finder
pub type TrackCollection = Vec<Trajectory>;
