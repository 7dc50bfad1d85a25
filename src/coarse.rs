//! Coarse pre-filter rejecting probes with no plausible reference nearby.
//!
//! The exact geofence test costs a full scan of the chunk's reference window per probe.
//! Before paying for it, two cheap necessary conditions prune the probe list: nearest
//! reference in **time**, then nearest reference in **latitude**, both answered by 1-D
//! nearest-neighbour trees in `O(log m)` per query. Cutting the survivor count here is the
//! main lever against the all-pairs blowup on large records.
//!
//! Stages never shrink the coordinate arrays; each stage returns the surviving index set and
//! the originals stay untouched.

use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::Manhattan;
use log::trace;

use crate::constants::{Degree, Seconds};

/// 1-D nearest-neighbour index under the L1 metric.
struct NearestL1 {
    tree: ImmutableKdTree<f64, u32, 1, 32>,
}

impl NearestL1 {
    /// Build over the finite entries of `values`; `None` when no finite entry exists.
    ///
    /// Non-finite values can never satisfy a distance bound, so leaving them out of the
    /// tree changes no answer.
    fn new(values: &[f64]) -> Option<Self> {
        let finite: Vec<[f64; 1]> = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .map(|v| [v])
            .collect();
        if finite.is_empty() {
            return None;
        }
        Some(Self {
            tree: ImmutableKdTree::new_from_slice(&finite),
        })
    }

    /// L1 distance from `x` to its nearest indexed value. A `NaN` query compares false
    /// against every candidate, so the reported distance never lies within a finite bound.
    fn nearest_distance(&self, x: f64) -> f64 {
        self.tree.nearest_one::<Manhattan>(&[x]).distance
    }
}

/// Chunk-local indices of probes that could still match something.
///
/// A probe survives when its nearest reference time lies within `max_time` **and** its
/// nearest reference latitude lies within `max_lat`. Both are necessary conditions of every
/// geofence rule, never sufficient ones; the exact stage makes the final call.
///
/// Arguments
/// ---------
/// * `probe_lat`, `probe_time`: the chunk's probe coordinates
/// * `ref_lat`, `ref_time`: the chunk's reference window coordinates
/// * `max_time`: resolved coincidence time bound (seconds)
/// * `max_lat`: pre-filter latitude bound (degrees)
///
/// Return
/// ------
/// * Indices into the chunk's probe arrays, in ascending order.
pub(crate) fn surviving_probes(
    probe_lat: &[Degree],
    probe_time: &[Seconds],
    ref_lat: &[Degree],
    ref_time: &[Seconds],
    max_time: Seconds,
    max_lat: Degree,
) -> Vec<usize> {
    let Some(time_index) = NearestL1::new(ref_time) else {
        return Vec::new();
    };
    let survivors: Vec<usize> = (0..probe_time.len())
        .filter(|&i| time_index.nearest_distance(probe_time[i]) <= max_time)
        .collect();
    if survivors.is_empty() {
        return survivors;
    }

    let Some(lat_index) = NearestL1::new(ref_lat) else {
        return Vec::new();
    };
    let survivors: Vec<usize> = survivors
        .into_iter()
        .filter(|&i| lat_index.nearest_distance(probe_lat[i]) <= max_lat)
        .collect();

    trace!(
        "coarse filter kept {} of {} probes",
        survivors.len(),
        probe_time.len()
    );
    survivors
}
