//! Validation for geographic query parameters.

use crate::config::{Config, NegativeRadiusPolicy};
use crate::error::{OrgSearchError, Result};
use geo::Point;
use orgsearch_types::GeoBox;

/// Validates a latitude is finite and within [-90.0, 90.0].
///
/// `name` labels the parameter in the error message.
pub fn validate_latitude(name: &str, lat: f64) -> Result<()> {
    if !lat.is_finite() {
        return Err(OrgSearchError::InvalidGeoParameter(format!(
            "{} must be finite, got: {}",
            name, lat
        )));
    }

    if !(-90.0..=90.0).contains(&lat) {
        return Err(OrgSearchError::InvalidGeoParameter(format!(
            "{} out of range [-90.0, 90.0]: {}",
            name, lat
        )));
    }

    Ok(())
}

/// Validates a longitude is finite and within [-180.0, 180.0].
pub fn validate_longitude(name: &str, lon: f64) -> Result<()> {
    if !lon.is_finite() {
        return Err(OrgSearchError::InvalidGeoParameter(format!(
            "{} must be finite, got: {}",
            name, lon
        )));
    }

    if !(-180.0..=180.0).contains(&lon) {
        return Err(OrgSearchError::InvalidGeoParameter(format!(
            "{} out of range [-180.0, 180.0]: {}",
            name, lon
        )));
    }

    Ok(())
}

/// Validates a point has valid longitude (x) and latitude (y).
///
/// # Examples
///
/// ```
/// use orgsearch::compute::validation::validate_geographic_point;
/// use geo::Point;
///
/// assert!(validate_geographic_point(&Point::new(37.6173, 55.7558)).is_ok());
/// assert!(validate_geographic_point(&Point::new(200.0, 55.0)).is_err());
/// ```
pub fn validate_geographic_point(point: &Point) -> Result<()> {
    validate_longitude("lon", point.x())?;
    validate_latitude("lat", point.y())
}

/// Validates a search radius against the configured policy.
///
/// Returns `Ok(false)` when the radius is negative and the policy is
/// [`NegativeRadiusPolicy::Empty`]: the request is accepted but can match
/// nothing. Zero is a valid radius.
///
/// # Examples
///
/// ```
/// use orgsearch::Config;
/// use orgsearch::compute::validation::validate_radius;
///
/// let config = Config::default();
/// assert_eq!(validate_radius(0.0, &config).unwrap(), true);
/// assert!(validate_radius(-5.0, &config).is_err());
/// ```
pub fn validate_radius(radius: f64, config: &Config) -> Result<bool> {
    if radius.is_nan() || radius.is_infinite() {
        return Err(OrgSearchError::InvalidGeoParameter(format!(
            "radius must be finite, got: {}",
            radius
        )));
    }

    if radius < 0.0 {
        return match config.negative_radius {
            NegativeRadiusPolicy::Reject => Err(OrgSearchError::InvalidGeoParameter(format!(
                "radius must be >= 0 meters, got: {}",
                radius
            ))),
            NegativeRadiusPolicy::Empty => Ok(false),
        };
    }

    if let Some(max) = config.max_radius_m
        && radius > max
    {
        return Err(OrgSearchError::InvalidGeoParameter(format!(
            "radius {} exceeds the configured maximum of {} meters",
            radius, max
        )));
    }

    Ok(true)
}

/// Validates every bound of a box. Inverted boxes are accepted.
pub fn validate_box(bbox: &GeoBox) -> Result<()> {
    validate_latitude("lat_min", bbox.lat_min)?;
    validate_latitude("lat_max", bbox.lat_max)?;
    validate_longitude("lon_min", bbox.lon_min)?;
    validate_longitude("lon_max", bbox.lon_max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_geographic_point() {
        let moscow = Point::new(37.6173, 55.7558);
        assert!(validate_geographic_point(&moscow).is_ok());

        // Edge cases
        assert!(validate_geographic_point(&Point::new(180.0, 0.0)).is_ok());
        assert!(validate_geographic_point(&Point::new(-180.0, 0.0)).is_ok());
        assert!(validate_geographic_point(&Point::new(0.0, 90.0)).is_ok());
        assert!(validate_geographic_point(&Point::new(0.0, -90.0)).is_ok());
    }

    #[test]
    fn test_invalid_coordinates() {
        assert!(validate_longitude("lon", 180.1).is_err());
        assert!(validate_longitude("lon", -200.0).is_err());
        assert!(validate_latitude("lat", 90.1).is_err());
        assert!(validate_latitude("lat", -95.0).is_err());
    }

    #[test]
    fn test_non_finite_coordinates() {
        assert!(validate_latitude("lat", f64::NAN).is_err());
        assert!(validate_longitude("lon", f64::INFINITY).is_err());
        assert!(validate_geographic_point(&Point::new(f64::NEG_INFINITY, 0.0)).is_err());
    }

    #[test]
    fn test_error_names_parameter() {
        let err = validate_latitude("lat_max", 120.0).unwrap_err();
        assert!(err.to_string().contains("lat_max"));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_radius_policies() {
        let reject = Config::default();
        assert!(validate_radius(0.0, &reject).unwrap());
        assert!(validate_radius(1_000.0, &reject).unwrap());
        assert!(matches!(
            validate_radius(-1.0, &reject),
            Err(OrgSearchError::InvalidGeoParameter(_))
        ));

        let empty = Config::default().with_negative_radius(NegativeRadiusPolicy::Empty);
        assert!(!validate_radius(-1.0, &empty).unwrap());

        // NaN is never covered by the negative-radius policy
        assert!(validate_radius(f64::NAN, &empty).is_err());
        assert!(validate_radius(f64::INFINITY, &reject).is_err());
    }

    #[test]
    fn test_radius_upper_bound() {
        let config = Config::default().with_max_radius(10_000.0);
        assert!(validate_radius(10_000.0, &config).unwrap());
        assert!(validate_radius(10_000.5, &config).is_err());
    }

    #[test]
    fn test_validate_box_accepts_inverted() {
        assert!(validate_box(&GeoBox::new(60.0, 55.0, 40.0, 30.0)).is_ok());
        assert!(validate_box(&GeoBox::new(-91.0, 55.0, 30.0, 40.0)).is_err());
        assert!(validate_box(&GeoBox::new(50.0, 55.0, 30.0, f64::NAN)).is_err());
    }
}
