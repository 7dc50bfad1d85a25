//! Angular arithmetic and box membership tests.
//!
//! Longitudes live on a circle, so naive subtraction misreports the separation of points on
//! opposite sides of the antimeridian. Everything in this module measures separations the
//! short way around and keeps every comparison inclusive, so a point exactly on a box edge
//! is inside the box.

use crate::constants::Degree;

/// Smallest angular separation between two longitudes or bearings, in degrees.
///
/// Handles the 360° wraparound: `angular_delta(179.0, -179.0)` is `2.0`, not `358.0`.
/// A `NaN` input propagates to a `NaN` result rather than being silently masked.
///
/// Arguments
/// ---------
/// * `a`: first angle (degrees)
/// * `b`: second angle (degrees)
///
/// Return
/// ------
/// * The separation in `[0, 180]` degrees, or `NaN` if either input is `NaN`.
pub fn angular_delta(a: Degree, b: Degree) -> Degree {
    let d = a - b;
    f64::min(d.rem_euclid(360.0), (-d).rem_euclid(360.0))
}

/// Inclusive interval test: `lo <= x <= hi`.
///
/// `NaN` never lies in any interval.
#[inline]
pub fn in_range(x: f64, lo: f64, hi: f64) -> bool {
    x >= lo && x <= hi
}

/// Membership test for a latitude/longitude box centered on a point, with longitude
/// wraparound handled correctly.
///
/// Bounds are inclusive on all four edges. `NaN` coordinates never belong to any box.
///
/// Arguments
/// ---------
/// * `center_lat`, `center_lon`: box center (degrees)
/// * `half_lat`, `half_lon`: half-height and half-width of the box (degrees)
/// * `lat`, `lon`: the point to test (degrees)
///
/// Return
/// ------
/// * `true` when the point lies inside or on the edge of the box.
pub fn in_box(
    center_lat: Degree,
    center_lon: Degree,
    half_lat: Degree,
    half_lon: Degree,
    lat: Degree,
    lon: Degree,
) -> bool {
    (lat - center_lat).abs() <= half_lat && angular_delta(lon, center_lon) <= half_lon
}

#[cfg(test)]
mod geo_test {
    use super::*;

    #[test]
    fn test_angular_delta_wraparound() {
        assert_eq!(angular_delta(179.0, -179.0), 2.0);
        assert_eq!(angular_delta(-179.0, 179.0), 2.0);
        assert_eq!(angular_delta(0.0, 360.0), 0.0);
        assert_eq!(angular_delta(0.0, 180.0), 180.0);
        assert_eq!(angular_delta(10.0, 4.0), 6.0);
    }

    #[test]
    fn test_angular_delta_nan_propagates() {
        assert!(angular_delta(f64::NAN, 0.0).is_nan());
        assert!(angular_delta(0.0, f64::NAN).is_nan());
    }

    #[test]
    fn test_in_range_inclusive() {
        assert!(in_range(0.0, 0.0, 1.0));
        assert!(in_range(1.0, 0.0, 1.0));
        assert!(!in_range(1.0 + 1e-12, 0.0, 1.0));
        assert!(!in_range(f64::NAN, 0.0, 1.0));
    }

    #[test]
    fn test_in_box_inclusive_edges() {
        // Points exactly on the edge are inside.
        assert!(in_box(0.0, 0.0, 2.5, 5.0, 2.5, 0.0));
        assert!(in_box(0.0, 0.0, 2.5, 5.0, 0.0, 5.0));
        assert!(!in_box(0.0, 0.0, 2.5, 5.0, 2.5 + 1e-9, 0.0));
    }

    #[test]
    fn test_in_box_across_antimeridian() {
        // Box centered on the dateline reaches into both hemispheres.
        assert!(in_box(-75.0, -180.0, 10.0, 30.0, -75.0, 175.0));
        assert!(in_box(-75.0, -180.0, 10.0, 30.0, -75.0, -155.0));
        assert!(!in_box(-75.0, -180.0, 10.0, 30.0, -75.0, 140.0));
    }

    #[test]
    fn test_in_box_nan_never_matches() {
        assert!(!in_box(0.0, 0.0, 2.5, 5.0, f64::NAN, 0.0));
        assert!(!in_box(0.0, 0.0, 2.5, 5.0, 0.0, f64::NAN));
        assert!(!in_box(f64::NAN, f64::NAN, 2.5, 5.0, 0.0, 0.0));
    }
}
