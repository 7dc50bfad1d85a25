//! # Exact coincidence test between one probe and a window of references
//!
//! The coarse filter only rules probes out; this module decides the actual matches. Every
//! reference carries one [`SiteCategory`] resolved once from its site name, and each category
//! is a data value carrying its own matching rule, so the per-probe loop is a uniform "apply
//! this reference's rule" pass instead of three parallel mask computations.
//!
//! ## Category rules
//!
//! All three categories share the inclusive time bound `|Δt| ≤ max_time`; they differ in the
//! spatial test:
//!
//! - **Normal**: the reference must lie in a box centered on the probe. The box is the
//!   caller's `max_lat`/`max_lon` when both were supplied, otherwise it depends on the
//!   probe's hemisphere — probes at or south of −25° latitude get a 10°×30° half-envelope
//!   (sparse southern-hemisphere coverage admits wide matching regions), everything else
//!   2.5°×5°.
//! - **Caltech** (site name contains `caltech` or `pasadena`): the **probe** must lie inside
//!   a fixed box around the LA basin. The station's urban pollution footprint requires a
//!   hand-tuned region; no distance rule applies, regardless of caller overrides.
//! - **Edwards** (site name contains `edwards`): same shape of rule with its own fixed box,
//!   cut off to the south where the LA basin corrupts the record.
//!
//! The final match set is the union of the three rules. A reference in an override category
//! is only ever reachable through its fixed box — the generic envelope never applies to it,
//! even when it would geometrically include the reference.

use crate::constants::{
    Degree, MatchSet, Seconds, CALTECH_LAT_RANGE, CALTECH_LON_RANGE, EDWARDS_LAT_RANGE,
    EDWARDS_LON_RANGE, NORMAL_HALF_LAT, NORMAL_HALF_LON, SOUTHERN_HALF_LAT, SOUTHERN_HALF_LON,
    SOUTHERN_LAT_THRESHOLD,
};
use crate::geo::{in_box, in_range};

/// Matching-rule category of a reference site, resolved once per reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteCategory {
    /// Default hemisphere-scaled box centered on the probe.
    Normal,
    /// Fixed probe-position box around the LA basin.
    Caltech,
    /// Fixed probe-position box around the Edwards dry lake bed.
    Edwards,
}

impl SiteCategory {
    /// Classify a site name. Matching is case-insensitive on the trimmed name.
    pub fn of(site: &str) -> Self {
        let name = site.trim().to_lowercase();
        if name.contains("caltech") || name.contains("pasadena") {
            SiteCategory::Caltech
        } else if name.contains("edwards") {
            SiteCategory::Edwards
        } else {
            SiteCategory::Normal
        }
    }
}

/// References matching one probe, as indices into the given window arrays.
///
/// Arguments
/// ---------
/// * `probe_lon`, `probe_lat`, `probe_time`: the probe under test
/// * `ref_lon`, `ref_lat`, `ref_time`: the chunk's reference window
/// * `categories`: per-reference [`SiteCategory`], aligned with the window arrays
/// * `max_time`: resolved coincidence time bound (seconds)
/// * `user_box`: `Some((half_lat, half_lon))` when the caller supplied both spatial bounds,
///   which replaces the hemisphere rule for Normal references
///
/// Return
/// ------
/// * Window-local indices of every reference satisfying its category's rule. `NaN`
///   coordinates on either side never match.
#[allow(clippy::too_many_arguments)]
pub(crate) fn matching_references(
    probe_lon: Degree,
    probe_lat: Degree,
    probe_time: Seconds,
    ref_lon: &[Degree],
    ref_lat: &[Degree],
    ref_time: &[Seconds],
    categories: &[SiteCategory],
    max_time: Seconds,
    user_box: Option<(Degree, Degree)>,
) -> MatchSet {
    let (half_lat, half_lon) = user_box.unwrap_or_else(|| {
        if probe_lat <= SOUTHERN_LAT_THRESHOLD {
            (SOUTHERN_HALF_LAT, SOUTHERN_HALF_LON)
        } else {
            (NORMAL_HALF_LAT, NORMAL_HALF_LON)
        }
    });

    // The fixed boxes test the probe position only, so they are constant across the window.
    let in_caltech_box = in_range(probe_lat, CALTECH_LAT_RANGE.0, CALTECH_LAT_RANGE.1)
        && in_range(probe_lon, CALTECH_LON_RANGE.0, CALTECH_LON_RANGE.1);
    let in_edwards_box = in_range(probe_lat, EDWARDS_LAT_RANGE.0, EDWARDS_LAT_RANGE.1)
        && in_range(probe_lon, EDWARDS_LON_RANGE.0, EDWARDS_LON_RANGE.1);

    let mut matches = MatchSet::new();
    for (j, &category) in categories.iter().enumerate() {
        if !((probe_time - ref_time[j]).abs() <= max_time) {
            continue;
        }
        let hit = match category {
            SiteCategory::Normal => in_box(
                probe_lat, probe_lon, half_lat, half_lon, ref_lat[j], ref_lon[j],
            ),
            SiteCategory::Caltech => in_caltech_box,
            SiteCategory::Edwards => in_edwards_box,
        };
        if hit {
            matches.push(j);
        }
    }
    matches
}

#[cfg(test)]
mod geofence_test {
    use super::*;

    fn categories(sites: &[&str]) -> Vec<SiteCategory> {
        sites.iter().map(|s| SiteCategory::of(s)).collect()
    }

    #[test]
    fn test_site_category_resolution() {
        assert_eq!(SiteCategory::of("lamont01"), SiteCategory::Normal);
        assert_eq!(SiteCategory::of("Caltech"), SiteCategory::Caltech);
        assert_eq!(SiteCategory::of("  pasadena02 "), SiteCategory::Caltech);
        assert_eq!(SiteCategory::of("EDWARDS01"), SiteCategory::Edwards);
        assert_eq!(SiteCategory::of("edw"), SiteCategory::Normal);
    }

    #[test]
    fn test_normal_rule_hemisphere_switch() {
        // One reference 8 degrees west of each probe, same latitude band.
        let cats = categories(&["station"]);

        // Southern probe: 30 degree half-width admits the reference.
        let south = matching_references(
            0.0, -30.0, 0.0, &[-8.0], &[-30.0], &[0.0], &cats, 3600.0, None,
        );
        assert_eq!(south.as_slice(), &[0]);

        // Northern probe: 5 degree half-width does not.
        let north = matching_references(
            0.0, 10.0, 0.0, &[-8.0], &[10.0], &[0.0], &cats, 3600.0, None,
        );
        assert!(north.is_empty());
    }

    #[test]
    fn test_user_box_overrides_hemisphere_rule() {
        let cats = categories(&["station"]);
        let got = matching_references(
            0.0,
            10.0,
            0.0,
            &[-8.0],
            &[10.0],
            &[0.0],
            &cats,
            3600.0,
            Some((10.0, 10.0)),
        );
        assert_eq!(got.as_slice(), &[0]);
    }

    #[test]
    fn test_time_bound_inclusive() {
        let cats = categories(&["station"]);
        let hit = matching_references(
            0.0, 0.0, 3600.0, &[0.0], &[0.0], &[0.0], &cats, 3600.0, None,
        );
        assert_eq!(hit.as_slice(), &[0]);

        let miss = matching_references(
            0.0,
            0.0,
            3600.0 + 1e-3,
            &[0.0],
            &[0.0],
            &[0.0],
            &cats,
            3600.0,
            None,
        );
        assert!(miss.is_empty());
    }

    #[test]
    fn test_edwards_reachable_only_through_fixed_box() {
        let cats = categories(&["edwards01"]);
        let (ref_lon, ref_lat) = (-117.88, 34.96);

        // Probe inside the Edwards box.
        let inside = matching_references(
            -117.5,
            35.5,
            0.0,
            &[ref_lon],
            &[ref_lat],
            &[0.0],
            &cats,
            3600.0,
            None,
        );
        assert_eq!(inside.as_slice(), &[0]);

        // Probe south of the box but within the generic 2.5/5 degree envelope of the
        // reference: the generic rule never applies to an override site.
        let outside = matching_references(
            -117.88,
            34.0,
            0.0,
            &[ref_lon],
            &[ref_lat],
            &[0.0],
            &cats,
            3600.0,
            None,
        );
        assert!(outside.is_empty());
    }

    #[test]
    fn test_caltech_fixed_box() {
        let cats = categories(&["pasadena"]);
        let inside = matching_references(
            -118.1,
            34.1,
            0.0,
            &[-118.13],
            &[34.14],
            &[0.0],
            &cats,
            3600.0,
            None,
        );
        assert_eq!(inside.as_slice(), &[0]);

        // North of the box.
        let outside = matching_references(
            -118.1,
            35.0,
            0.0,
            &[-118.13],
            &[34.14],
            &[0.0],
            &cats,
            3600.0,
            None,
        );
        assert!(outside.is_empty());
    }

    #[test]
    fn test_fixed_box_ignores_user_envelope() {
        // A huge user envelope still cannot reach an Edwards reference from outside the box.
        let cats = categories(&["edwards01"]);
        let got = matching_references(
            -100.0,
            20.0,
            0.0,
            &[-117.88],
            &[34.96],
            &[0.0],
            &cats,
            3600.0,
            Some((90.0, 180.0)),
        );
        assert!(got.is_empty());
    }

    #[test]
    fn test_union_of_categories() {
        let cats = categories(&["station", "edwards01"]);
        let got = matching_references(
            -117.9,
            35.0,
            0.0,
            &[-117.95, -117.88],
            &[35.01, 34.96],
            &[0.0, 0.0],
            &cats,
            3600.0,
            None,
        );
        assert_eq!(got.as_slice(), &[0, 1]);
    }
}
