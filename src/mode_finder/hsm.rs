//! Half-sample mode (Bickel & Frühwirth) applied independently to x, y and z.
//!
//! For sorted values `x[0..n]`, the shortest window holding `h = ⌈n/2⌉` values is kept and the
//! search recurses on it until at most three values remain:
//!
//! ```text
//! n = 1 : x0
//! n = 2 : (x0 + x1) / 2
//! n = 3 : mean of the closer pair, x1 on a tie
//! ```

use crate::constants::GlobalPoint;
use crate::crossing::WeightedPoint;
use crate::linpt_errors::LinPtError;
use crate::mode_finder::{check_cloud, ModeFinder3d};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HsmModeFinder3d;

/// Half-sample mode of a non-empty slice of finite values (sorted in place).
pub(crate) fn half_sample_mode(values: &mut [f64]) -> f64 {
    values.sort_unstable_by(|a, b| a.total_cmp(b));

    let mut window = &values[..];
    while window.len() > 3 {
        let h = window.len().div_ceil(2);
        let mut best_start = 0;
        let mut best_width = f64::INFINITY;
        for start in 0..=(window.len() - h) {
            let width = window[start + h - 1] - window[start];
            if width < best_width {
                best_width = width;
                best_start = start;
            }
        }
        window = &window[best_start..best_start + h];
    }

    match window {
        [x0] => *x0,
        [x0, x1] => 0.5 * (x0 + x1),
        [x0, x1, x2] => {
            let lower = x1 - x0;
            let upper = x2 - x1;
            if lower < upper {
                0.5 * (x0 + x1)
            } else if upper < lower {
                0.5 * (x1 + x2)
            } else {
                *x1
            }
        }
        _ => unreachable!("half-sample window always holds 1 to 3 values"),
    }
}

impl ModeFinder3d for HsmModeFinder3d {
    fn find_mode(&self, points: &[WeightedPoint]) -> Result<GlobalPoint, LinPtError> {
        check_cloud(points)?;

        let mut coords: Vec<f64> = Vec::with_capacity(points.len());
        let mut mode = [0.0; 3];
        for (axis, m) in mode.iter_mut().enumerate() {
            coords.clear();
            coords.extend(points.iter().map(|wp| wp.point[axis]));
            *m = half_sample_mode(&mut coords);
        }
        Ok(GlobalPoint::new(mode[0], mode[1], mode[2]))
    }
}
