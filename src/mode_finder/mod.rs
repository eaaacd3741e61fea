//! # Mode finders
//!
//! A mode finder fuses a cloud of weighted crossing points into one consensus position.
//! Implementations are independent strategies behind the [`ModeFinder3d`] trait, selected when
//! a linearization point finder is constructed:
//!
//! - [`hsm::HsmModeFinder3d`] – half-sample mode on each coordinate (robust, ignores weights),
//! - [`weighted_mean::WeightedMeanModeFinder3d`] – mean weighted by inverse crossing distance.

use crate::constants::GlobalPoint;
use crate::crossing::WeightedPoint;
use crate::linpt_errors::LinPtError;

pub mod hsm;
pub mod weighted_mean;

/// Robust estimator of the most densely supported point of a weighted point cloud.
pub trait ModeFinder3d: Send + Sync {
    /// Return
    /// ----------
    /// * `Err(LinPtError::ModeEstimation)` if no point can be produced from `points`.
    fn find_mode(&self, points: &[WeightedPoint]) -> Result<GlobalPoint, LinPtError>;
}

/// Reject empty clouds and points with non-finite coordinates.
pub(crate) fn check_cloud(points: &[WeightedPoint]) -> Result<(), LinPtError> {
    if points.is_empty() {
        return Err(LinPtError::ModeEstimation("empty point cloud".into()));
    }
    if let Some(bad) = points
        .iter()
        .position(|wp| wp.point.iter().any(|c| !c.is_finite()))
    {
        return Err(LinPtError::ModeEstimation(format!(
            "point {bad} has non-finite coordinates"
        )));
    }
    Ok(())
}
