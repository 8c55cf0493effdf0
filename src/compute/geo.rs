//! Spherical-Earth geometry: great-circle distance, radius-to-box
//! approximation, and box containment.
//!
//! Coordinates are decimal degrees. Where a `geo::Point` is taken, `x` is the
//! longitude and `y` the latitude.

use crate::compute::validation::{validate_latitude, validate_longitude};
use crate::error::{OrgSearchError, Result};
use geo::Point;
use orgsearch_types::GeoBox;
use std::f64::consts::{FRAC_PI_2, PI};

/// Mean Earth radius in meters used by every calculation in this crate.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Longest possible great-circle distance on the sphere.
pub const HALF_CIRCUMFERENCE_M: f64 = PI * EARTH_RADIUS_M;

/// Great-circle (haversine) distance in meters between two points.
///
/// `haversine_distance(p, p)` is exactly `0.0`, and swapping the two points
/// does not change the result.
///
/// # Examples
///
/// ```
/// use orgsearch::compute::geo::haversine_distance;
///
/// // Moscow to Saint Petersburg, roughly 634 km
/// let d = haversine_distance(55.7558, 37.6173, 59.9343, 30.3351);
/// assert!((630_000.0..640_000.0).contains(&d));
/// ```
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Great-circle distance in meters between two `geo::Point`s.
#[inline]
pub fn distance_between(a: &Point, b: &Point) -> f64 {
    haversine_distance(a.y(), a.x(), b.y(), b.x())
}

/// True when `point` is no farther than `radius_m` meters from `center`.
#[inline]
pub fn within_radius(center: &Point, point: &Point, radius_m: f64) -> bool {
    distance_between(center, point) <= radius_m
}

/// Approximate the disk of `radius_m` meters around a center with an
/// axis-aligned box.
///
/// The latitude half-extent does not depend on latitude. The longitude
/// half-extent is `asin(sin(r) / cos(lat))` and widens toward the poles. When
/// that ratio reaches 1 (high latitude, large radius) or the radius spans a
/// quarter of the globe, the box covers the full `[-180, 180]` longitude span.
///
/// The result is always a valid search box. Latitude bounds are clamped to
/// `[-90, 90]`, and a box that reaches a pole spans every longitude. Boxes do
/// not wrap: one that would cross the antimeridian widens to the full
/// longitude span instead.
///
/// # Errors
///
/// `InvalidGeoParameter` for a negative or non-finite radius, or a center
/// outside the valid coordinate ranges.
///
/// # Examples
///
/// ```
/// use orgsearch::compute::geo::bounding_box;
///
/// let b = bounding_box(55.7558, 37.6173, 1_000.0).unwrap();
/// assert!(b.lat_min < 55.7558 && 55.7558 < b.lat_max);
/// assert!(b.lon_min < 37.6173 && 37.6173 < b.lon_max);
///
/// let polar = bounding_box(89.9, 0.0, 500_000.0).unwrap();
/// assert_eq!((polar.lon_min, polar.lon_max), (-180.0, 180.0));
/// ```
pub fn bounding_box(lat: f64, lon: f64, radius_m: f64) -> Result<GeoBox> {
    validate_latitude("lat", lat)?;
    validate_longitude("lon", lon)?;
    if !radius_m.is_finite() || radius_m < 0.0 {
        return Err(OrgSearchError::InvalidGeoParameter(format!(
            "radius must be a finite, non-negative number of meters, got: {}",
            radius_m
        )));
    }

    let radius_rad = radius_m / EARTH_RADIUS_M;
    let delta_lat = radius_rad.to_degrees();

    let lat_min = lat - delta_lat;
    let lat_max = lat + delta_lat;
    let reaches_pole = lat_min <= -90.0 || lat_max >= 90.0;

    let ratio = radius_rad.sin() / lat.to_radians().cos();
    let (lon_min, lon_max) =
        if reaches_pole || radius_rad >= FRAC_PI_2 || !ratio.is_finite() || ratio >= 1.0 {
            (-180.0, 180.0)
        } else {
            let delta_lon = ratio.asin().to_degrees();
            let (min, max) = (lon - delta_lon, lon + delta_lon);
            if min < -180.0 || max > 180.0 {
                (-180.0, 180.0)
            } else {
                (min, max)
            }
        };

    Ok(GeoBox::new(
        lat_min.max(-90.0),
        lat_max.min(90.0),
        lon_min,
        lon_max,
    ))
}

/// Inclusive point-in-box test. An inverted box contains nothing.
#[inline]
pub fn contains(lat: f64, lon: f64, bbox: &GeoBox) -> bool {
    bbox.contains(lat, lon)
}
