//! # Constants and type definitions for colocate
//!
//! This module centralizes the **matching thresholds**, **site-specific regions**, and **common
//! type definitions** used throughout the `colocate` library.
//!
//! ## Overview
//!
//! - Chunking and pre-filter thresholds
//! - Default coincidence envelopes (hemisphere-dependent)
//! - Fixed matching regions for site-specific rules
//! - Core type aliases used across the crate
//!
//! These definitions are used by all main modules, including chunk planning, coarse filtering,
//! and geofence evaluation.

use smallvec::SmallVec;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Time in seconds (any monotonic epoch shared by probes and references)
pub type Seconds = f64;

/// A small, inline-optimized container for the reference indices matched to a single probe.
///
/// Most probes match zero or a handful of references, so the inline capacity avoids one heap
/// allocation per probe on large runs.
pub type MatchSet = SmallVec<[usize; 4]>;

// -------------------------------------------------------------------------------------------------
// Chunking and pre-filter thresholds
// -------------------------------------------------------------------------------------------------

/// Probe time gaps larger than this split the record into independently processed chunks.
///
/// One hour is much larger than any viable reference traversal, so no legitimate match can
/// span a chunk boundary once each chunk's reference window is widened by half this value on
/// both sides.
pub const CHUNK_GAP_SECONDS: Seconds = 60.0 * 60.0;

/// Default coincidence time window (seconds) when the caller does not supply one.
pub const DEFAULT_MAX_TIME_SECONDS: Seconds = 60.0 * 60.0;

/// Latitude threshold (degrees) of the coarse pre-filter when the caller does not supply
/// `max_lat`. Deliberately generous: the pre-filter must never reject a probe the exact
/// geofence rules would accept.
pub const PRELIM_MAX_LAT_DEGREES: Degree = 10.0;

// -------------------------------------------------------------------------------------------------
// Default coincidence envelopes
// -------------------------------------------------------------------------------------------------

/// Probes at or south of this latitude use the wide southern-hemisphere envelope.
pub const SOUTHERN_LAT_THRESHOLD: Degree = -25.0;

/// Half-height (degrees latitude) of the southern-hemisphere matching box.
pub const SOUTHERN_HALF_LAT: Degree = 10.0;

/// Half-width (degrees longitude) of the southern-hemisphere matching box.
pub const SOUTHERN_HALF_LON: Degree = 30.0;

/// Half-height (degrees latitude) of the standard matching box.
pub const NORMAL_HALF_LAT: Degree = 2.5;

/// Half-width (degrees longitude) of the standard matching box.
pub const NORMAL_HALF_LON: Degree = 5.0;

// -------------------------------------------------------------------------------------------------
// Fixed site-specific regions
// -------------------------------------------------------------------------------------------------

/// Probe latitude range admitting matches to Caltech/Pasadena references.
///
/// The LA basin has a pollution concentration on such a small scale that matching observations
/// from afar is perilous; the hand-tuned box replaces the distance rule entirely.
pub const CALTECH_LAT_RANGE: (Degree, Degree) = (33.38, 34.27);

/// Probe longitude range admitting matches to Caltech/Pasadena references.
pub const CALTECH_LON_RANGE: (Degree, Degree) = (-118.49, -117.55);

/// Probe latitude range admitting matches to Edwards references. The southern half of the
/// station's surroundings is corrupted by the LA basin, hence the asymmetric box.
pub const EDWARDS_LAT_RANGE: (Degree, Degree) = (34.68, 37.46);

/// Probe longitude range admitting matches to Edwards references.
pub const EDWARDS_LON_RANGE: (Degree, Degree) = (-122.88, -112.88);

// -------------------------------------------------------------------------------------------------
// Aggregation sentinels
// -------------------------------------------------------------------------------------------------

/// Site label reported for probes with no matched reference.
pub const NO_MATCH_SITE_LABEL: &str = "-";
