//! Splitting a time-sorted probe record into independently matchable chunks.
//!
//! Consecutive probe times separated by more than [`CHUNK_GAP_SECONDS`] cannot share any
//! reference within the coincidence window, so the record is cut at those gaps and each
//! piece is matched against only the references near it in time. On dense records this is
//! worth two orders of magnitude over matching the whole record at once.

use std::ops::Range;

use crate::constants::{Seconds, CHUNK_GAP_SECONDS};

/// Cut a time-sorted probe record at gaps larger than [`CHUNK_GAP_SECONDS`].
///
/// The returned half-open ranges partition `[0, sorted_times.len())` exactly and are ordered
/// by time. With `single_chunk` the whole record becomes one range, which trades memory for
/// simplicity on small inputs and doubles as the reference path for equivalence tests.
///
/// Arguments
/// ---------
/// * `sorted_times`: probe times in ascending order
/// * `single_chunk`: skip gap detection and emit one `[0, n)` range
///
/// Return
/// ------
/// * Chunk ranges covering the full record; empty for an empty record.
pub fn chunk_ranges(sorted_times: &[Seconds], single_chunk: bool) -> Vec<Range<usize>> {
    let n = sorted_times.len();
    if n == 0 {
        return Vec::new();
    }
    if single_chunk {
        return vec![0..n];
    }

    let mut ranges = Vec::new();
    let mut start = 0;
    for i in 1..n {
        // NaN differences never exceed the gap, so undated probes stay in the last chunk.
        if sorted_times[i] - sorted_times[i - 1] > CHUNK_GAP_SECONDS {
            ranges.push(start..i);
            start = i;
        }
    }
    ranges.push(start..n);
    ranges
}

/// Contiguous range of time-sorted references visible to a chunk spanning
/// `[chunk_first, chunk_last]`.
///
/// The window is widened by `slack` on each side so a reference close in time to a boundary
/// probe is still visible to that probe's chunk. Callers pass at least the coincidence time
/// bound, which is what makes chunked and unchunked matching agree exactly; the window is a
/// superset of what can match, never a filter of its own.
///
/// If either bound is NaN (a chunk that absorbed undated probes), the whole reference record
/// is returned; the exact time bound in the geofence stage still governs every match.
pub(crate) fn reference_window(
    sorted_ref_times: &[Seconds],
    chunk_first: Seconds,
    chunk_last: Seconds,
    slack: Seconds,
) -> Range<usize> {
    let lo = chunk_first - slack;
    let hi = chunk_last + slack;
    if lo.is_nan() || hi.is_nan() {
        return 0..sorted_ref_times.len();
    }
    let start = sorted_ref_times.partition_point(|&t| t < lo);
    let end = sorted_ref_times.partition_point(|&t| t <= hi);
    start..end
}
