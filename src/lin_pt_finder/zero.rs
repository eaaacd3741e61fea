use crate::constants::GlobalPoint;
use crate::lin_pt_finder::LinearizationPointFinder;
use crate::linpt_errors::LinPtError;
use crate::trajectory::Trajectory;

/// A linearization point finder that always returns (0, 0, 0).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZeroLinPtFinder;

impl LinearizationPointFinder for ZeroLinPtFinder {
    fn linearization_point(&self, _tracks: &[Trajectory]) -> Result<GlobalPoint, LinPtError> {
        Ok(GlobalPoint::origin())
    }
}

#[cfg(test)]
mod zero_test {
    use super::*;

    #[test]
    fn test_always_origin() {
        assert_eq!(
            ZeroLinPtFinder.linearization_point(&[]),
            Ok(GlobalPoint::origin())
        );
        assert_eq!(
            ZeroLinPtFinder.linearization_point_from_states(&[]),
            Ok(GlobalPoint::origin())
        );
    }
}
