//! Search filters and their compiled predicates.
//!
//! A [`SearchFilter`] carries one optional field per query parameter. Absent
//! fields switch the matching predicate off. The two geo modes activate only
//! when every parameter they need is present; a partial set (say `lat` and
//! `lon` without `radius`) is not an error and simply leaves that filter off.
//!
//! Compilation validates the active geo parameters and resolves the activity
//! closure once, producing a fixed-order conjunction of predicates.

use crate::compute::ActivityHierarchyIndex;
use crate::compute::geo::within_radius;
use crate::compute::validation::{validate_box, validate_geographic_point, validate_radius};
use crate::config::Config;
use crate::error::{OrgSearchError, Result};
use crate::source::ResolvedOrganization;
use geo::Point;
use orgsearch_types::{ActivityId, BuildingId, GeoBox};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Optional search parameters, all combined with AND.
///
/// # Examples
///
/// ```
/// use orgsearch::SearchFilter;
///
/// let filter = SearchFilter::new()
///     .with_name("meat")
///     .with_radius(55.7558, 37.6173, 1_000.0);
/// assert!(filter.radius_params().is_some());
/// assert!(filter.box_params().is_none());
///
/// // lat/lon without radius leaves the radius filter off
/// let partial: SearchFilter =
///     serde_json::from_str(r#"{ "lat": 55.75, "lon": 37.61 }"#).unwrap();
/// assert!(partial.radius_params().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchFilter {
    pub building_id: Option<BuildingId>,
    /// Matches the activity and every descendant
    pub activity_id: Option<ActivityId>,
    /// Case-insensitive substring of the organization name
    pub name: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Meters
    pub radius: Option<f64>,
    pub lat_min: Option<f64>,
    pub lat_max: Option<f64>,
    pub lon_min: Option<f64>,
    pub lon_max: Option<f64>,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a filter from request JSON.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for malformed JSON, unknown parameters, or values of
    /// the wrong type.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| OrgSearchError::InvalidInput(format!("malformed search filter: {}", e)))
    }

    pub fn with_building(mut self, building_id: BuildingId) -> Self {
        self.building_id = Some(building_id);
        self
    }

    pub fn with_activity(mut self, activity_id: ActivityId) -> Self {
        self.activity_id = Some(activity_id);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_radius(mut self, lat: f64, lon: f64, radius: f64) -> Self {
        self.lat = Some(lat);
        self.lon = Some(lon);
        self.radius = Some(radius);
        self
    }

    pub fn with_box(mut self, bbox: GeoBox) -> Self {
        self.lat_min = Some(bbox.lat_min);
        self.lat_max = Some(bbox.lat_max);
        self.lon_min = Some(bbox.lon_min);
        self.lon_max = Some(bbox.lon_max);
        self
    }

    /// Non-empty name needle, if any.
    pub fn name_query(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// `(lat, lon, radius)` when all three are present.
    pub fn radius_params(&self) -> Option<(f64, f64, f64)> {
        Some((self.lat?, self.lon?, self.radius?))
    }

    /// The box when all four bounds are present.
    pub fn box_params(&self) -> Option<GeoBox> {
        Some(GeoBox::new(
            self.lat_min?,
            self.lat_max?,
            self.lon_min?,
            self.lon_max?,
        ))
    }

    /// True when no predicate would be active.
    pub fn is_unfiltered(&self) -> bool {
        self.building_id.is_none()
            && self.activity_id.is_none()
            && self.name_query().is_none()
            && self.radius_params().is_none()
            && self.box_params().is_none()
    }

    /// Validated geo predicates, radius first.
    pub(crate) fn geo_predicates(&self, config: &Config) -> Result<Vec<GeoPredicate>> {
        let mut predicates = Vec::with_capacity(2);
        if let Some((lat, lon, radius)) = self.radius_params() {
            predicates.push(GeoPredicate::radius(lat, lon, radius, config)?);
        }
        if let Some(bbox) = self.box_params() {
            predicates.push(GeoPredicate::bounding_box(bbox)?);
        }
        Ok(predicates)
    }
}

/// A validated geographic condition on a point.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoPredicate {
    /// Great-circle distance from `center` at most `radius` meters
    Radius { center: Point, radius: f64 },
    /// Inclusive containment in the box
    BoundingBox(GeoBox),
    /// Accepted request that cannot match (negative radius under the
    /// `empty` policy)
    Never,
}

impl GeoPredicate {
    /// Validate and build a radius predicate. A zero radius matches only the
    /// exact center coordinates.
    pub fn radius(lat: f64, lon: f64, radius: f64, config: &Config) -> Result<Self> {
        let center = Point::new(lon, lat);
        validate_geographic_point(&center)?;
        if !validate_radius(radius, config)? {
            return Ok(Self::Never);
        }
        Ok(Self::Radius { center, radius })
    }

    /// Validate and build a box predicate. Inverted boxes are kept as-is and
    /// match nothing.
    pub fn bounding_box(bbox: GeoBox) -> Result<Self> {
        validate_box(&bbox)?;
        Ok(Self::BoundingBox(bbox))
    }

    pub fn matches(&self, point: &Point) -> bool {
        match self {
            Self::Radius { center, radius } => within_radius(center, point, *radius),
            Self::BoundingBox(bbox) => bbox.contains_point(point),
            Self::Never => false,
        }
    }
}

/// One active condition on an organization.
#[derive(Debug, Clone)]
pub(crate) enum Predicate {
    Building(BuildingId),
    /// Lowercased needle
    Name(String),
    /// Descendant closure of the requested activity
    Activity(FxHashSet<ActivityId>),
    Geo(GeoPredicate),
}

impl Predicate {
    fn matches(&self, org: &ResolvedOrganization) -> bool {
        match self {
            Self::Building(id) => org.building_id() == *id,
            Self::Name(needle) => org.name().to_lowercase().contains(needle.as_str()),
            // An empty closure (unknown activity) matches nothing.
            Self::Activity(ids) => org.has_any_activity(ids),
            Self::Geo(geo) => geo.matches(&org.location()),
        }
    }
}

/// Fixed-order conjunction of the active predicates.
#[derive(Debug, Clone, Default)]
pub(crate) struct CompiledFilter {
    predicates: Vec<Predicate>,
}

impl CompiledFilter {
    /// Validate `filter` and resolve its activity closure.
    ///
    /// `hierarchy` is only called when an activity predicate is active.
    pub(crate) fn compile<F>(filter: &SearchFilter, config: &Config, hierarchy: F) -> Result<Self>
    where
        F: FnOnce() -> Result<std::sync::Arc<ActivityHierarchyIndex>>,
    {
        // Validate geo parameters before any other work.
        let geo = filter.geo_predicates(config)?;

        let mut predicates = Vec::with_capacity(3 + geo.len());
        if let Some(building_id) = filter.building_id {
            predicates.push(Predicate::Building(building_id));
        }
        if let Some(name) = filter.name_query() {
            predicates.push(Predicate::Name(name.to_lowercase()));
        }
        if let Some(activity_id) = filter.activity_id {
            let closure = hierarchy()?.descendants(activity_id)?;
            if closure.is_empty() {
                log::debug!("Activity {} is not in the taxonomy; nothing can match", activity_id);
            }
            predicates.push(Predicate::Activity(closure));
        }
        predicates.extend(geo.into_iter().map(Predicate::Geo));

        Ok(Self { predicates })
    }

    pub(crate) fn len(&self) -> usize {
        self.predicates.len()
    }

    pub(crate) fn matches(&self, org: &ResolvedOrganization) -> bool {
        self.predicates.iter().all(|p| p.matches(org))
    }
}
