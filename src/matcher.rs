//! # Space-time colocation of probe and reference records
//!
//! Entry point of the crate: [`match_colocated`] takes a large set of geolocated, timestamped
//! probe points and a smaller set of reference-station observations and returns, for every
//! probe, the indices of the references inside its coincidence envelope.
//!
//! ## Pipeline
//!
//! 1. Both records are argsorted by time through an [`IndexMap`], leaving the caller's
//!    arrays untouched.
//! 2. The sorted probe record is cut into chunks at time gaps larger than
//!    [`CHUNK_GAP_SECONDS`](crate::constants::CHUNK_GAP_SECONDS) (see [`crate::chunking`]).
//! 3. Each chunk sees only the contiguous reference window around its time span (widened so
//!    no boundary probe loses a match), is pre-filtered by [`crate::coarse`], and finishes
//!    with the exact per-probe geofence rules of [`crate::geofence`].
//! 4. Chunk results are translated back through both index maps into the caller's original
//!    probe and reference numbering.
//!
//! Chunks share nothing but read-only slices, so they are processed in parallel with rayon;
//! results are merged after the parallel stage, one disjoint output range per chunk.
//!
//! Naive all-pairs comparison is `O(n·m)` and impractical above ~10⁴ probes; chunking plus
//! the coarse pre-filter is what makes million-probe records tractable.
//!
//! ## Contract
//!
//! - Matching is symmetric in neither direction: the result is "all references inside the
//!   envelope", not "the nearest reference".
//! - `chunked` is a performance switch, never a semantic one — both settings return
//!   bit-identical results.
//! - `NaN` coordinates never match anything; empty records produce empty results, not
//!   errors.

use log::debug;
use rayon::prelude::*;

#[cfg(feature = "progress")]
use indicatif::ParallelProgressIterator;

use crate::chunking::{chunk_ranges, reference_window};
use crate::coarse;
use crate::colocate_errors::ColocateError;
use crate::constants::{
    Degree, MatchSet, Seconds, CHUNK_GAP_SECONDS, DEFAULT_MAX_TIME_SECONDS,
    PRELIM_MAX_LAT_DEGREES,
};
use crate::geofence::{self, SiteCategory};
use crate::index_map::IndexMap;

/// Zero-copy view over the three parallel probe arrays.
///
/// Index `i` is a probe's identity for the lifetime of one matching call.
#[derive(Debug, Clone)]
pub struct ProbeBatch<'a> {
    /// Longitudes in degrees, `-180..180`.
    pub lon: &'a [Degree],
    /// Latitudes in degrees, `-90..90`.
    pub lat: &'a [Degree],
    /// Times in seconds, on the same epoch as the reference times.
    pub time: &'a [Seconds],
}

impl<'a> ProbeBatch<'a> {
    /// Borrow the probe arrays, checking that they are parallel.
    ///
    /// Return
    /// ------
    /// * `Err(ColocateError::ProbeLengthMismatch)` when the three slices disagree in length.
    pub fn new(
        lon: &'a [Degree],
        lat: &'a [Degree],
        time: &'a [Seconds],
    ) -> Result<Self, ColocateError> {
        if lon.len() != lat.len() || lon.len() != time.len() {
            return Err(ColocateError::ProbeLengthMismatch {
                lon: lon.len(),
                lat: lat.len(),
                time: time.len(),
            });
        }
        Ok(Self { lon, lat, time })
    }

    pub fn len(&self) -> usize {
        self.lon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lon.is_empty()
    }
}

/// Zero-copy view over the four parallel reference arrays.
#[derive(Debug, Clone)]
pub struct ReferenceBatch<'a> {
    /// Longitudes in degrees.
    pub lon: &'a [Degree],
    /// Latitudes in degrees.
    pub lat: &'a [Degree],
    /// Times in seconds, on the same epoch as the probe times.
    pub time: &'a [Seconds],
    /// Site name of each observation, used to resolve its matching rule.
    pub site: &'a [String],
}

impl<'a> ReferenceBatch<'a> {
    /// Borrow the reference arrays, checking that they are parallel.
    ///
    /// Return
    /// ------
    /// * `Err(ColocateError::ReferenceLengthMismatch)` when the four slices disagree in
    ///   length.
    pub fn new(
        lon: &'a [Degree],
        lat: &'a [Degree],
        time: &'a [Seconds],
        site: &'a [String],
    ) -> Result<Self, ColocateError> {
        if lon.len() != lat.len() || lon.len() != time.len() || lon.len() != site.len() {
            return Err(ColocateError::ReferenceLengthMismatch {
                lon: lon.len(),
                lat: lat.len(),
                time: time.len(),
                site: site.len(),
            });
        }
        Ok(Self {
            lon,
            lat,
            time,
            site,
        })
    }

    pub fn len(&self) -> usize {
        self.lon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lon.is_empty()
    }
}

/// Coincidence criteria and processing switches for one matching call.
///
/// Leaving `max_lat`/`max_lon` unset selects the hemisphere-dependent default envelope;
/// setting **both** replaces it. `max_time` falls back to one hour. `chunked` only affects
/// speed and memory, never results.
#[derive(Debug, Clone, Copy)]
pub struct MatchConfig {
    /// Half-width (degrees) of the matching box around each probe.
    pub max_lon: Option<Degree>,
    /// Half-height (degrees) of the matching box around each probe.
    pub max_lat: Option<Degree>,
    /// Coincidence time window in seconds.
    pub max_time: Option<Seconds>,
    /// Process the record in time-gap chunks (recommended above ~10⁴ probes).
    pub chunked: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_lon: None,
            max_lat: None,
            max_time: None,
            chunked: true,
        }
    }
}

/// For every probe, the indices of all references inside its coincidence envelope.
///
/// Arguments
/// ---------
/// * `probes`: the probe record; results are indexed in its original order.
/// * `references`: the reference record; returned indices point into its original order.
/// * `config`: coincidence criteria and the chunking switch.
///
/// Return
/// ------
/// * One [`MatchSet`] per probe, in probe input order. Probes with no coincident reference
///   get an empty set.
///
/// See also
/// ------------
/// * [`crate::aggregate::aggregate`] – Reduce the match sets to per-probe summaries.
pub fn match_colocated(
    probes: &ProbeBatch<'_>,
    references: &ReferenceBatch<'_>,
    config: &MatchConfig,
) -> Vec<MatchSet> {
    let num_probes = probes.len();
    if num_probes == 0 {
        return Vec::new();
    }

    debug!(
        "sorting {} probes and {} references by time",
        num_probes,
        references.len()
    );
    let probe_map = IndexMap::from_times(probes.time);
    let ref_map = IndexMap::from_times(references.time);

    let probe_lon = probe_map.permuted(probes.lon);
    let probe_lat = probe_map.permuted(probes.lat);
    let probe_time = probe_map.permuted(probes.time);

    let ref_lon = ref_map.permuted(references.lon);
    let ref_lat = ref_map.permuted(references.lat);
    let ref_time = ref_map.permuted(references.time);

    // Site categories are resolved once per reference, then carried through the sort.
    let categories: Vec<SiteCategory> = references
        .site
        .iter()
        .map(|site| SiteCategory::of(site))
        .collect();
    let ref_category = ref_map.permuted(&categories);

    let chunks = chunk_ranges(&probe_time, !config.chunked);
    debug!("matching {} chunks", chunks.len());

    // Widening each window by the coincidence time bound (or half the chunk gap when that is
    // larger) keeps every reference a boundary probe could match inside its chunk's window,
    // so chunked and unchunked runs return identical results.
    let max_time = config.max_time.unwrap_or(DEFAULT_MAX_TIME_SECONDS);
    let window_slack = (CHUNK_GAP_SECONDS / 2.0).max(max_time);

    let chunk_iter = chunks.clone().into_par_iter();
    #[cfg(feature = "progress")]
    let chunk_iter = chunk_iter.progress_count(chunks.len() as u64);

    let per_chunk: Vec<Vec<MatchSet>> = chunk_iter
        .map(|chunk| {
            let window = reference_window(
                &ref_time,
                probe_time[chunk.start],
                probe_time[chunk.end - 1],
                window_slack,
            );
            let local = colocate_chunk(
                &probe_lon[chunk.clone()],
                &probe_lat[chunk.clone()],
                &probe_time[chunk.clone()],
                &ref_lon[window.clone()],
                &ref_lat[window.clone()],
                &ref_time[window.clone()],
                &ref_category[window.clone()],
                config,
            );
            // Translate window-local reference indices back to the caller's numbering.
            local
                .into_iter()
                .map(|set| {
                    set.iter()
                        .map(|&j| ref_map.original(window.start + j))
                        .collect()
                })
                .collect()
        })
        .collect();

    // Scatter each chunk's results into the original probe order; the chunk ranges are
    // disjoint, so every output slot is written exactly once.
    let mut matches = vec![MatchSet::new(); num_probes];
    for (chunk, sets) in chunks.iter().zip(per_chunk) {
        for (offset, set) in sets.into_iter().enumerate() {
            matches[probe_map.original(chunk.start + offset)] = set;
        }
    }
    matches
}

/// Coarse filter plus exact geofence evaluation for one chunk.
///
/// All slices are in time-sorted order; returned sets hold window-local reference indices.
#[allow(clippy::too_many_arguments)]
fn colocate_chunk(
    probe_lon: &[Degree],
    probe_lat: &[Degree],
    probe_time: &[Seconds],
    ref_lon: &[Degree],
    ref_lat: &[Degree],
    ref_time: &[Seconds],
    ref_category: &[SiteCategory],
    config: &MatchConfig,
) -> Vec<MatchSet> {
    let mut matches = vec![MatchSet::new(); probe_lon.len()];
    if probe_lon.is_empty() || ref_lon.is_empty() {
        return matches;
    }

    let max_time = config.max_time.unwrap_or(DEFAULT_MAX_TIME_SECONDS);
    let prelim_max_lat = config.max_lat.unwrap_or(PRELIM_MAX_LAT_DEGREES);

    let survivors = coarse::surviving_probes(
        probe_lat,
        probe_time,
        ref_lat,
        ref_time,
        max_time,
        prelim_max_lat,
    );

    // The caller's envelope replaces the hemisphere rule only when fully specified.
    let user_box = match (config.max_lat, config.max_lon) {
        (Some(half_lat), Some(half_lon)) => Some((half_lat, half_lon)),
        _ => None,
    };

    for i in survivors {
        matches[i] = geofence::matching_references(
            probe_lon[i],
            probe_lat[i],
            probe_time[i],
            ref_lon,
            ref_lat,
            ref_time,
            ref_category,
            max_time,
            user_box,
        );
    }
    matches
}
