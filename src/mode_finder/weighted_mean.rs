use crate::constants::{GlobalPoint, GlobalVector, DEFAULT_WEIGHT_CUTOFF};
use crate::crossing::WeightedPoint;
use crate::linpt_errors::LinPtError;
use crate::mode_finder::{check_cloud, ModeFinder3d};

/// Mean of the crossing points, each weighted by `1 / (weight + cutoff)`.
///
/// Well-constrained crossings (small closest-approach distance) dominate; `cutoff` bounds the
/// influence of exact intersections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedMeanModeFinder3d {
    cutoff: f64,
}

impl Default for WeightedMeanModeFinder3d {
    fn default() -> Self {
        WeightedMeanModeFinder3d {
            cutoff: DEFAULT_WEIGHT_CUTOFF,
        }
    }
}

impl WeightedMeanModeFinder3d {
    pub fn new(cutoff: f64) -> Result<Self, LinPtError> {
        if !(cutoff.is_finite() && cutoff > 0.0) {
            return Err(LinPtError::InvalidParameter(
                "weighted mean cutoff must be finite and > 0".into(),
            ));
        }
        Ok(WeightedMeanModeFinder3d { cutoff })
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }
}

impl ModeFinder3d for WeightedMeanModeFinder3d {
    fn find_mode(&self, points: &[WeightedPoint]) -> Result<GlobalPoint, LinPtError> {
        check_cloud(points)?;

        let mut sum = GlobalVector::zeros();
        let mut norm = 0.0;
        for wp in points {
            if wp.weight.is_nan() || wp.weight < 0.0 {
                return Err(LinPtError::ModeEstimation(format!(
                    "invalid point weight {}",
                    wp.weight
                )));
            }
            let w = 1.0 / (wp.weight + self.cutoff);
            sum += wp.point.coords * w;
            norm += w;
        }
        if !(norm.is_finite() && norm > 0.0) {
            return Err(LinPtError::ModeEstimation(
                "weights sum to a degenerate value".into(),
            ));
        }
        Ok(GlobalPoint::from(sum / norm))
    }
}

#[cfg(test)]
mod weighted_mean_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_closer_crossings_dominate() {
        let finder = WeightedMeanModeFinder3d::new(0.5).unwrap();
        assert_eq!(finder.cutoff(), 0.5);
        let points = [
            // w = 1 / (0.5 + 0.5) = 1
            WeightedPoint::new(GlobalPoint::new(0.0, 0.0, 0.0), 0.5),
            // w = 1 / (1.5 + 0.5) = 0.5
            WeightedPoint::new(GlobalPoint::new(3.0, 0.0, -3.0), 1.5),
        ];
        let mode = finder.find_mode(&points).unwrap();
        assert_relative_eq!(mode.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(mode.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(mode.z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_cutoff_and_weight() {
        assert!(WeightedMeanModeFinder3d::new(0.0).is_err());
        assert!(WeightedMeanModeFinder3d::new(f64::NAN).is_err());
        assert_eq!(
            WeightedMeanModeFinder3d::default().cutoff(),
            DEFAULT_WEIGHT_CUTOFF
        );

        let bad = WeightedPoint::new(GlobalPoint::new(1.0, 1.0, 1.0), -2.0);
        assert!(matches!(
            WeightedMeanModeFinder3d::default().find_mode(&[bad]),
            Err(LinPtError::ModeEstimation(_))
        ));
    }
}
