//! Reduction of per-probe match sets to summary statistics.
//!
//! Matching answers "which references coincide with this probe"; downstream consumers want
//! one correction value per probe. This module collapses each match set onto the probe
//! record: the median of the matched reference values, mean coordinates and time, the match
//! count, and a comma-joined label of the contributing sites. Probes with no match get
//! sentinel values rather than being dropped, since well over 90% of a global record is
//! typically unmatched.

use itertools::Itertools;

use crate::colocate_errors::ColocateError;
use crate::constants::{Degree, MatchSet, Seconds, NO_MATCH_SITE_LABEL};
use crate::matcher::ReferenceBatch;

/// Per-probe reduction of the matched references.
#[derive(Debug, Clone, PartialEq)]
pub struct ColocationSummary {
    /// Median of the matched reference values; `NaN` when nothing matched.
    pub median_xco2: f64,
    /// Mean longitude of the matched references; `NaN` when nothing matched.
    pub mean_lon: Degree,
    /// Mean latitude of the matched references; `NaN` when nothing matched.
    pub mean_lat: Degree,
    /// Mean time of the matched references; `NaN` when nothing matched.
    pub mean_time: Seconds,
    /// Number of matched references.
    pub match_count: usize,
    /// Sorted, deduplicated site names joined with `","`; `"-"` when nothing matched.
    pub site_label: String,
}

impl ColocationSummary {
    fn no_match() -> Self {
        Self {
            median_xco2: f64::NAN,
            mean_lon: f64::NAN,
            mean_lat: f64::NAN,
            mean_time: f64::NAN,
            match_count: 0,
            site_label: NO_MATCH_SITE_LABEL.to_string(),
        }
    }
}

/// Reduce every probe's match set against the reference record.
///
/// Arguments
/// ---------
/// * `match_sets`: per-probe reference indices, as returned by
///   [`match_colocated`](crate::matcher::match_colocated) for the same `references`.
/// * `values`: the measured value of each reference (e.g. retrieved XCO₂), parallel to the
///   reference arrays.
/// * `references`: the reference record the match sets index into.
///
/// Return
/// ------
/// * One [`ColocationSummary`] per probe, in the order of `match_sets`, or
///   `Err(ColocateError::ValueLengthMismatch)` when `values` is not parallel to the
///   reference arrays.
pub fn aggregate(
    match_sets: &[MatchSet],
    values: &[f64],
    references: &ReferenceBatch<'_>,
) -> Result<Vec<ColocationSummary>, ColocateError> {
    if values.len() != references.len() {
        return Err(ColocateError::ValueLengthMismatch {
            values: values.len(),
            references: references.len(),
        });
    }

    let summaries = match_sets
        .iter()
        .map(|set| {
            if set.is_empty() {
                return ColocationSummary::no_match();
            }
            let count = set.len() as f64;
            ColocationSummary {
                median_xco2: median(set.iter().map(|&j| values[j]).collect()),
                mean_lon: set.iter().map(|&j| references.lon[j]).sum::<f64>() / count,
                mean_lat: set.iter().map(|&j| references.lat[j]).sum::<f64>() / count,
                mean_time: set.iter().map(|&j| references.time[j]).sum::<f64>() / count,
                match_count: set.len(),
                site_label: set
                    .iter()
                    .map(|&j| references.site[j].as_str())
                    .sorted()
                    .dedup()
                    .join(","),
            }
        })
        .collect();
    Ok(summaries)
}

/// Median with the even-count convention of averaging the two middle elements.
fn median(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    let n = values.len();
    if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    }
}
