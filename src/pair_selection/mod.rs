//! # Track pair selection
//!
//! Chooses which track pairs a crossing point finder evaluates, within a budget of at most
//! `n_pairs` pairs.
//!
//! ## Full combinatorics
//! If the budget is [`PairBudget::Unbounded`] or not smaller than C(N, 2), every pair is
//! returned, lexicographically ordered on the original indices `(i, j)`, `i < j`.
//!
//! ## Bounded selection
//! With a budget `k < C(N, 2)` the selection follows a heuristic:
//!
//! 1. **Rank only what is needed** – the `m = min(N, 2k + 1)` hardest tracks (by momentum
//!    magnitude) are extracted with a partial selection, and only those `m` are sorted.
//!    Ties keep the original order.
//! 2. **Interleave soft and hard tracks** – the ranked tracks are laid out as
//!    `r0, r(m-1), r1, r(m-2), …`. Vertex-forming bundles are collimated, so two hard tracks
//!    are nearly collinear and cross badly; pairing a hard with a soft track is preferred.
//! 3. **Spread over many tracks** – [`InterleavedPairGenerator`] first yields disjoint
//!    neighbours `(0,1), (2,3), …` of that layout, so every track is used once before any is
//!    reused. An odd left-over track is paired with the softest one. Remaining pairs follow by
//!    increasing distance in the layout.
//!
//! Since C(m, 2) ≥ k the selection always returns exactly `k` pairs.
//!
//! ```text
//! momenta  : [10, 5, 1]      k = 1
//! ranked   : t0 t1 t2
//! layout   : t0 t2 t1        -> first pair {t0, t2}, i.e. {10, 1}
//! ```
//!
//! ## Notes
//! - Coverage and completeness are targets of the heuristic, not optimality guarantees: once
//!   the disjoint round is exhausted tracks are reused by layout distance only.
//! - The selection is a pure function of its inputs; identical inputs give identical outputs.

use itertools::Itertools;

use crate::crossing::PairCandidate;
use crate::linpt_errors::LinPtError;
use crate::trajectory::Trajectory;

/// Maximum number of pairs a finder evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairBudget {
    /// At most this many pairs.
    Bounded(usize),
    /// Full combinatorics.
    Unbounded,
}

impl PairBudget {
    /// Number of pairs actually evaluated for `n_tracks` tracks.
    pub fn effective_pairs(&self, n_tracks: usize) -> usize {
        let all = n_combinations(n_tracks);
        match *self {
            PairBudget::Bounded(k) => k.min(all),
            PairBudget::Unbounded => all,
        }
    }

    /// Whether this budget covers all pairs of `n_tracks` tracks.
    pub fn is_full_for(&self, n_tracks: usize) -> bool {
        match *self {
            PairBudget::Bounded(k) => k >= n_combinations(n_tracks),
            PairBudget::Unbounded => true,
        }
    }
}

/// Negative values mean full combinatorics.
impl From<i32> for PairBudget {
    fn from(n_pairs: i32) -> Self {
        match usize::try_from(n_pairs) {
            Ok(k) => PairBudget::Bounded(k),
            Err(_) => PairBudget::Unbounded,
        }
    }
}

impl From<usize> for PairBudget {
    fn from(n_pairs: usize) -> Self {
        PairBudget::Bounded(n_pairs)
    }
}

/// Number of unordered pairs of `n` elements, C(n, 2).
#[inline]
pub fn n_combinations(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Select the track pairs to evaluate.
///
/// Arguments
/// -----------------
/// * `tracks` – The track collection; indices in the result refer to this slice.
/// * `budget` – Maximum number of pairs.
///
/// Return
/// ----------
/// * `min(budget, C(N, 2))` distinct canonical pairs, ordered by priority.
/// * `Err(LinPtError::NotEnoughTracks)` if fewer than 2 tracks are given.
///
/// See also
/// ------------
/// * [`InterleavedPairGenerator`] – Layout-position order used under a bounded budget.
pub fn select_track_pairs(
    tracks: &[Trajectory],
    budget: PairBudget,
) -> Result<Vec<PairCandidate>, LinPtError> {
    let n = tracks.len();
    if n < 2 {
        return Err(LinPtError::NotEnoughTracks {
            found: n,
            required: 2,
        });
    }

    match budget {
        PairBudget::Bounded(k) if !budget.is_full_for(n) => bounded_selection(tracks, k),
        _ => full_combinatorics(n),
    }
}

/// All C(n, 2) pairs in lexicographic order.
fn full_combinatorics(n: usize) -> Result<Vec<PairCandidate>, LinPtError> {
    (0..n)
        .tuple_combinations()
        .map(|(i, j)| PairCandidate::new(i, j))
        .collect()
}

fn bounded_selection(tracks: &[Trajectory], k: usize) -> Result<Vec<PairCandidate>, LinPtError> {
    if k == 0 {
        return Ok(Vec::new());
    }
    let m = tracks.len().min(2 * k + 1);
    let layout = interleave(&rank_by_momentum(tracks, m));

    InterleavedPairGenerator::new(layout.len())
        .take(k)
        .map(|(a, b)| PairCandidate::new(layout[a], layout[b]))
        .collect()
}

/// Indices of the `m` hardest tracks, by decreasing momentum magnitude.
///
/// Only the `m` kept tracks are sorted; the others are discarded by a linear partial selection.
/// Equal magnitudes keep their original relative order.
fn rank_by_momentum(tracks: &[Trajectory], m: usize) -> Vec<usize> {
    let magnitudes: Vec<f64> = tracks.iter().map(Trajectory::momentum_mag).collect();
    let harder_first =
        |a: &usize, b: &usize| magnitudes[*b].total_cmp(&magnitudes[*a]).then(a.cmp(b));

    if m == 0 {
        return Vec::new();
    }
    let mut ranked: Vec<usize> = (0..tracks.len()).collect();
    if m < ranked.len() {
        ranked.select_nth_unstable_by(m - 1, harder_first);
        ranked.truncate(m);
    }
    ranked.sort_unstable_by(harder_first);
    ranked
}

/// `r0, r(m-1), r1, r(m-2), …`
fn interleave(ranked: &[usize]) -> Vec<usize> {
    let mut layout = Vec::with_capacity(ranked.len());
    let (mut hard, mut soft) = (0, ranked.len());
    while hard < soft {
        layout.push(ranked[hard]);
        hard += 1;
        if hard < soft {
            soft -= 1;
            layout.push(ranked[soft]);
        }
    }
    layout
}

/// Enumeration stage of [`InterleavedPairGenerator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// `(2t, 2t + 1)`
    Disjoint { t: usize },
    /// `(1, m - 1)`, only for odd `m ≥ 3`
    LeftOver,
    /// `(a, a + stride)`, skipping pairs already yielded
    Strided { stride: usize, a: usize },
    Done,
}

/// Stream of all C(m, 2) position pairs `(a, b)`, `a < b`, of an interleaved layout of `m`
/// tracks, in selection priority order.
///
/// Order
/// -----------------
/// 1. Disjoint neighbours `(0,1), (2,3), …` – each position used at most once.
/// 2. For odd `m ≥ 3`, the left-over last position paired with position 1.
/// 3. Every other pair by increasing stride `b - a`, then increasing `a`.
///
/// Each pair is yielded exactly once.
#[derive(Debug, Clone)]
pub struct InterleavedPairGenerator {
    m: usize,
    stage: Stage,
}

impl InterleavedPairGenerator {
    pub fn new(m: usize) -> Self {
        let stage = if m < 2 {
            Stage::Done
        } else {
            Stage::Disjoint { t: 0 }
        };
        InterleavedPairGenerator { m, stage }
    }

    /// Whether `(a, a + stride)` was already yielded by the first two stages.
    #[inline]
    fn already_yielded(&self, stride: usize, a: usize) -> bool {
        let disjoint = stride == 1 && a % 2 == 0;
        let left_over = self.m % 2 == 1 && self.m >= 3 && a == 1 && a + stride == self.m - 1;
        disjoint || left_over
    }
}

impl Iterator for InterleavedPairGenerator {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.stage {
                Stage::Disjoint { t } => {
                    if 2 * t + 1 < self.m {
                        self.stage = Stage::Disjoint { t: t + 1 };
                        return Some((2 * t, 2 * t + 1));
                    }
                    self.stage = if self.m % 2 == 1 && self.m >= 3 {
                        Stage::LeftOver
                    } else {
                        Stage::Strided { stride: 1, a: 0 }
                    };
                }
                Stage::LeftOver => {
                    self.stage = Stage::Strided { stride: 1, a: 0 };
                    return Some((1, self.m - 1));
                }
                Stage::Strided { stride, a } => {
                    if stride >= self.m {
                        self.stage = Stage::Done;
                        continue;
                    }
                    if a + stride >= self.m {
                        self.stage = Stage::Strided {
                            stride: stride + 1,
                            a: 0,
                        };
                        continue;
                    }
                    self.stage = Stage::Strided { stride, a: a + 1 };
                    if !self.already_yielded(stride, a) {
                        return Some((a, a + stride));
                    }
                }
                Stage::Done => return None,
            }
        }
    }
}
