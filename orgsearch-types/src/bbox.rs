use serde::{Deserialize, Serialize};

/// Axis-aligned latitude/longitude rectangle in decimal degrees.
///
/// Stored as four scalars rather than a `geo::Rect`: `Rect::new` reorders its
/// corners, and an inverted box (`min > max` on either axis) must stay
/// inverted so that it matches nothing.
///
/// # Examples
///
/// ```
/// use orgsearch_types::bbox::GeoBox;
///
/// let moscow = GeoBox::new(55.70, 55.80, 37.50, 37.70);
/// assert!(moscow.contains(55.7558, 37.6173));
///
/// let inverted = GeoBox::new(60.0, 55.0, 40.0, 30.0);
/// assert!(!inverted.contains(57.0, 35.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl GeoBox {
    pub fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Self {
        Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        }
    }

    /// Inclusive containment on both axes, checked independently.
    #[inline]
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        self.lat_min <= lat && lat <= self.lat_max && self.lon_min <= lon && lon <= self.lon_max
    }

    /// Check if a `geo::Point` (x = longitude, y = latitude) is inside.
    #[inline]
    pub fn contains_point(&self, point: &geo::Point) -> bool {
        self.contains(point.y(), point.x())
    }

    /// True when `other` lies entirely within this box.
    pub fn contains_box(&self, other: &GeoBox) -> bool {
        self.lat_min <= other.lat_min
            && other.lat_max <= self.lat_max
            && self.lon_min <= other.lon_min
            && other.lon_max <= self.lon_max
    }

    /// True when either axis has `min > max`.
    pub fn is_inverted(&self) -> bool {
        self.lat_min > self.lat_max || self.lon_min > self.lon_max
    }

    /// Latitude extent in degrees (negative for an inverted box).
    pub fn height(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    /// Longitude extent in degrees (negative for an inverted box).
    pub fn width(&self) -> f64 {
        self.lon_max - self.lon_min
    }
}
