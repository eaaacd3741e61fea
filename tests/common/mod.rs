#![allow(dead_code)]

use linpt::{GlobalPoint, GlobalVector, TrackCollection, Trajectory};
use rand::rngs::StdRng;
use rand::Rng;

/// Tracks whose straight-line extensions all go through `vertex`.
///
/// Track `i` has momentum magnitude `momenta[i]` and a direction spread in azimuth and dip,
/// so no two tracks are parallel.
pub fn tracks_through(vertex: GlobalPoint, momenta: &[f64]) -> TrackCollection {
    momenta
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            let phi = 0.9 * i as f64;
            let dir = GlobalVector::new(phi.cos(), phi.sin(), 0.15 * i as f64 - 0.4).normalize();
            Trajectory::new(vertex + dir * (2.0 + 0.5 * i as f64), dir * p, 1)
        })
        .collect()
}

/// Random tracks around the origin with strictly distinct momentum magnitudes.
pub fn random_tracks(rng: &mut StdRng, n: usize) -> TrackCollection {
    (0..n)
        .map(|i| {
            let position = GlobalPoint::new(
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-5.0..5.0),
            );
            let dir = GlobalVector::new(
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
            )
            .normalize();
            // Distinct by construction, shuffled relative to the index order
            let p = 0.5 + ((i * 7919) % 1009) as f64 + 0.001 * i as f64;
            Trajectory::new(position, dir * p, if i % 2 == 0 { 1 } else { -1 })
        })
        .collect()
}

/// Tracks all parallel to the x axis.
pub fn parallel_tracks(n: usize) -> TrackCollection {
    (0..n)
        .map(|i| {
            Trajectory::new(
                GlobalPoint::new(0.0, i as f64, 0.5 * i as f64),
                GlobalVector::new(1.0 + i as f64, 0.0, 0.0),
                1,
            )
        })
        .collect()
}
