//! # Trajectories
//!
//! Track representations consumed by the linearization point finders.
//!
//! - [`Trajectory`] is the reconstructed track: a state (position and momentum) at its
//!   reference point, plus an optional innermost measured position.
//! - [`TrajectoryState`] is the lower-level free state (no innermost hit). It converts into a
//!   [`Trajectory`] whose innermost position is the state position itself.
//!
//! Both are plain immutable values. The crossing point geometry only uses the position and the
//! momentum direction; the momentum magnitude is used as a ranking key by the pair selection.

use std::hash::Hasher;

use crate::constants::{GlobalPoint, GlobalVector};

/// A reconstructed track, described at its reference point.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    /// Position of the reference state.
    pub position: GlobalPoint,
    /// Momentum of the reference state.
    pub momentum: GlobalVector,
    /// Electric charge in units of the elementary charge.
    ///
    /// The straight-line [`LineCrossing`](crate::crossing::line_crossing::LineCrossing) ignores
    /// it; it is kept for helix [`PairGeometry`](crate::crossing::PairGeometry) implementations,
    /// which need the bending direction, and is part of the matrix fingerprint.
    pub charge: i8,
    /// Innermost measured position, if it differs from the reference state.
    pub innermost: Option<GlobalPoint>,
}

impl Trajectory {
    pub fn new(position: GlobalPoint, momentum: GlobalVector, charge: i8) -> Self {
        Trajectory {
            position,
            momentum,
            charge,
            innermost: None,
        }
    }

    /// Attach an innermost measured position to the track.
    pub fn with_innermost(mut self, innermost: GlobalPoint) -> Self {
        self.innermost = Some(innermost);
        self
    }

    /// Magnitude of the momentum at the reference state.
    #[inline]
    pub fn momentum_mag(&self) -> f64 {
        self.momentum.norm()
    }

    /// Innermost position of the track, falling back to the reference position.
    #[inline]
    pub fn innermost_position(&self) -> GlobalPoint {
        self.innermost.unwrap_or(self.position)
    }

    /// Feed the exact bit patterns of the track into `hasher`.
    pub(crate) fn hash_bits<H: Hasher>(&self, hasher: &mut H) {
        for c in self.position.iter().chain(self.momentum.iter()) {
            hasher.write_u64(c.to_bits());
        }
        hasher.write_i8(self.charge);
        match self.innermost {
            Some(p) => {
                hasher.write_u8(1);
                for c in p.iter() {
                    hasher.write_u64(c.to_bits());
                }
            }
            None => hasher.write_u8(0),
        }
    }
}

/// A free trajectory state: position, momentum and charge, without any hit information.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryState {
    pub position: GlobalPoint,
    pub momentum: GlobalVector,
    pub charge: i8,
}

impl TrajectoryState {
    pub fn new(position: GlobalPoint, momentum: GlobalVector, charge: i8) -> Self {
        TrajectoryState {
            position,
            momentum,
            charge,
        }
    }
}

impl From<&TrajectoryState> for Trajectory {
    fn from(state: &TrajectoryState) -> Self {
        Trajectory::new(state.position, state.momentum, state.charge)
    }
}

impl From<TrajectoryState> for Trajectory {
    fn from(state: TrajectoryState) -> Self {
        Trajectory::from(&state)
    }
}
