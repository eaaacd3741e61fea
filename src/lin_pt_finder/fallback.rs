use std::sync::Arc;

use crate::constants::GlobalPoint;
use crate::crossing::WeightedPoint;
use crate::lin_pt_finder::LinearizationPointFinder;
use crate::linpt_errors::LinPtError;
use crate::mode_finder::hsm::HsmModeFinder3d;
use crate::mode_finder::ModeFinder3d;
use crate::trajectory::Trajectory;

/// Linearization point finder used when the crossing point finder is not applicable.
///
/// Takes the mode of the innermost track positions: no pairing, works from a single track.
#[derive(Clone)]
pub struct FallbackLinPtFinder {
    mode_finder: Arc<dyn ModeFinder3d>,
}

impl Default for FallbackLinPtFinder {
    fn default() -> Self {
        FallbackLinPtFinder {
            mode_finder: Arc::new(HsmModeFinder3d),
        }
    }
}

impl FallbackLinPtFinder {
    pub fn new(mode_finder: Arc<dyn ModeFinder3d>) -> Self {
        FallbackLinPtFinder { mode_finder }
    }
}

impl std::fmt::Debug for FallbackLinPtFinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FallbackLinPtFinder")
    }
}

impl LinearizationPointFinder for FallbackLinPtFinder {
    fn linearization_point(&self, tracks: &[Trajectory]) -> Result<GlobalPoint, LinPtError> {
        if tracks.is_empty() {
            return Err(LinPtError::NotEnoughTracks {
                found: 0,
                required: 1,
            });
        }
        let points: Vec<WeightedPoint> = tracks
            .iter()
            .map(|t| WeightedPoint::new(t.innermost_position(), 0.0))
            .collect();
        self.mode_finder.find_mode(&points)
    }
}
