mod common;

use std::collections::{HashMap, HashSet};

use linpt::pair_selection::n_combinations;
use linpt::{
    select_track_pairs, GlobalPoint, GlobalVector, LinPtError, PairBudget, PairCandidate,
    Trajectory,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use common::{random_tracks, tracks_through};

fn assert_valid(pairs: &[PairCandidate], n: usize) {
    let unique: HashSet<PairCandidate> = pairs.iter().copied().collect();
    assert_eq!(unique.len(), pairs.len(), "duplicated pair in {pairs:?}");
    for p in pairs {
        assert!(p.first() < p.second(), "non canonical pair {p:?}");
        assert!(p.second() < n, "pair {p:?} out of range for {n} tracks");
    }
}

fn usage(pairs: &[PairCandidate]) -> HashMap<usize, usize> {
    let mut counts = HashMap::new();
    for p in pairs {
        *counts.entry(p.first()).or_insert(0) += 1;
        *counts.entry(p.second()).or_insert(0) += 1;
    }
    counts
}

/// Index of the hardest and second hardest tracks.
fn two_hardest(tracks: &[Trajectory]) -> (usize, usize) {
    let mut idx: Vec<usize> = (0..tracks.len()).collect();
    idx.sort_by(|a, b| {
        tracks[*b]
            .momentum_mag()
            .total_cmp(&tracks[*a].momentum_mag())
    });
    (idx[0], idx[1])
}

#[test]
fn test_unbounded_is_full_combinatorics() {
    let mut rng = StdRng::seed_from_u64(42);
    for n in 2..15 {
        let tracks = random_tracks(&mut rng, n);
        let pairs = select_track_pairs(&tracks, PairBudget::Unbounded).unwrap();
        assert_eq!(pairs.len(), n_combinations(n));
        assert_valid(&pairs, n);

        // Lexicographic order on original indices
        let mut sorted = pairs.clone();
        sorted.sort();
        assert_eq!(sorted, pairs);
    }
}

#[test]
fn test_bounded_returns_exactly_the_budget() {
    let mut rng = StdRng::seed_from_u64(7);
    for n in 2..12 {
        let tracks = random_tracks(&mut rng, n);
        for k in 0..=n_combinations(n) {
            let pairs = select_track_pairs(&tracks, PairBudget::Bounded(k)).unwrap();
            assert_eq!(pairs.len(), k, "n = {n}, k = {k}");
            assert_valid(&pairs, n);
        }
    }
}

#[test]
fn test_large_budget_equals_unbounded() {
    let mut rng = StdRng::seed_from_u64(3);
    for n in 2..10 {
        let tracks = random_tracks(&mut rng, n);
        let full = select_track_pairs(&tracks, PairBudget::Unbounded).unwrap();
        for k in [n_combinations(n), n_combinations(n) + 1, 1000] {
            assert_eq!(
                select_track_pairs(&tracks, PairBudget::Bounded(k)).unwrap(),
                full
            );
        }
    }
}

#[test]
fn test_deterministic() {
    let mut rng = StdRng::seed_from_u64(11);
    let tracks = random_tracks(&mut rng, 40);
    for k in [1, 3, 17, 200] {
        let a = select_track_pairs(&tracks, PairBudget::Bounded(k)).unwrap();
        let b = select_track_pairs(&tracks, PairBudget::Bounded(k)).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_coverage_before_reuse() {
    let mut rng = StdRng::seed_from_u64(2024);
    for n in 3..30 {
        let tracks = random_tracks(&mut rng, n);
        // k < n / 2
        for k in 1..n.div_ceil(2) {
            let pairs = select_track_pairs(&tracks, PairBudget::Bounded(k)).unwrap();
            let counts = usage(&pairs);
            assert!(
                counts.values().all(|&c| c == 1),
                "n = {n}, k = {k}: track reused in {pairs:?}"
            );
        }
    }
}

#[test]
fn test_single_pair_interleaves_energies() {
    let mut rng = StdRng::seed_from_u64(99);
    for n in 4..25 {
        let tracks = random_tracks(&mut rng, n);
        let (h0, h1) = two_hardest(&tracks);
        let pairs = select_track_pairs(&tracks, PairBudget::Bounded(1)).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_ne!(pairs[0], PairCandidate::new(h0, h1).unwrap(), "n = {n}");
        // The hardest track is always part of the first pair
        assert!(pairs[0].contains(h0));
    }
}

#[test]
fn test_three_tracks_scenario() {
    let tracks = tracks_through(GlobalPoint::origin(), &[10.0, 5.0, 1.0]);

    let one = select_track_pairs(&tracks, PairBudget::Bounded(1)).unwrap();
    assert_eq!(one.len(), 1);
    assert!(
        one[0] == PairCandidate::new(0, 2).unwrap() || one[0] == PairCandidate::new(1, 2).unwrap()
    );
    assert_ne!(one[0], PairCandidate::new(0, 1).unwrap());

    let all = select_track_pairs(&tracks, PairBudget::from(-1i32)).unwrap();
    assert_eq!(
        all,
        vec![
            PairCandidate::new(0, 1).unwrap(),
            PairCandidate::new(0, 2).unwrap(),
            PairCandidate::new(1, 2).unwrap()
        ]
    );
}

#[test]
fn test_ties_keep_input_order() {
    // Same momentum vector, so the magnitudes are bit-identical
    let tracks: Vec<Trajectory> = (0..6)
        .map(|i| {
            Trajectory::new(
                GlobalPoint::new(0.0, i as f64, 0.0),
                GlobalVector::new(2.0, 0.0, 0.0),
                1,
            )
        })
        .collect();
    // Ranked 0..5 by index, interleaved as 0, 4, 1, 3, 2
    let pairs = select_track_pairs(&tracks, PairBudget::Bounded(2)).unwrap();
    assert_eq!(
        pairs,
        vec![
            PairCandidate::new(0, 4).unwrap(),
            PairCandidate::new(1, 3).unwrap()
        ]
    );

    // Six ranked tracks, interleaved as 0, 5, 1, 4, 2, 3
    let three = select_track_pairs(&tracks, PairBudget::Bounded(3)).unwrap();
    assert_eq!(
        three,
        vec![
            PairCandidate::new(0, 5).unwrap(),
            PairCandidate::new(1, 4).unwrap(),
            PairCandidate::new(2, 3).unwrap()
        ]
    );
}

#[test]
fn test_precondition() {
    let tracks = tracks_through(GlobalPoint::origin(), &[3.0]);
    for budget in [PairBudget::Unbounded, PairBudget::Bounded(4)] {
        assert_eq!(
            select_track_pairs(&tracks, budget),
            Err(LinPtError::NotEnoughTracks {
                found: 1,
                required: 2
            })
        );
    }
    assert!(select_track_pairs(&[], PairBudget::Unbounded).is_err());
}
