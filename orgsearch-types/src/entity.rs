//! Directory entities as supplied by the storage layer.

use geo::Point;
use serde::{Deserialize, Serialize};

pub type BuildingId = i64;
pub type ActivityId = i64;
pub type OrganizationId = i64;

/// A physical location that hosts organizations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub address: String,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub cadastral_number: Option<String>,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Building {
    /// Create a building without postcode or cadastral number.
    pub fn new(id: BuildingId, address: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            address: address.into(),
            postcode: None,
            cadastral_number: None,
            latitude,
            longitude,
        }
    }

    pub fn with_postcode(mut self, postcode: impl Into<String>) -> Self {
        self.postcode = Some(postcode.into());
        self
    }

    pub fn with_cadastral_number(mut self, number: impl Into<String>) -> Self {
        self.cadastral_number = Some(number.into());
        self
    }

    /// Location as a `geo::Point` (x = longitude, y = latitude).
    #[inline]
    pub fn location(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}

/// A node of the business activity taxonomy.
///
/// `parent_id == None` marks a root. `level` is the depth, starting at 1 for
/// roots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<ActivityId>,
    #[serde(default = "Activity::default_level")]
    pub level: u32,
}

impl Activity {
    const fn default_level() -> u32 {
        1
    }

    /// Create a root activity (level 1).
    pub fn root(id: ActivityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id: None,
            level: Self::default_level(),
        }
    }

    /// Create a child of `parent`, one level below it.
    pub fn child_of(parent: &Activity, id: ActivityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id: Some(parent.id),
            level: parent.level + 1,
        }
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// An organization located in exactly one building.
///
/// `activity_ids` references the activities the organization performs; it may
/// be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    pub building_id: BuildingId,
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default, alias = "activities")]
    pub activity_ids: Vec<ActivityId>,
}

impl Organization {
    pub fn new(id: OrganizationId, name: impl Into<String>, building_id: BuildingId) -> Self {
        Self {
            id,
            name: name.into(),
            building_id,
            phones: Vec::new(),
            activity_ids: Vec::new(),
        }
    }

    pub fn with_phones<I, S>(mut self, phones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.phones = phones.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_activities(mut self, ids: impl IntoIterator<Item = ActivityId>) -> Self {
        self.activity_ids = ids.into_iter().collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_building_location_axis_order() {
        let b = Building::new(1, "Red Square 1", 55.7539, 37.6208);
        let p = b.location();
        assert_eq!(p.x(), 37.6208);
        assert_eq!(p.y(), 55.7539);
    }

    #[test]
    fn test_activity_child_level() {
        let food = Activity::root(1, "Food");
        let meat = Activity::child_of(&food, 2, "Meat Products");
        assert!(food.is_root());
        assert_eq!(meat.parent_id, Some(1));
        assert_eq!(meat.level, 2);
    }

    #[test]
    fn test_organization_deserialize_defaults() {
        let json = r#"{"id": 7, "name": "Fresh Dairy", "building_id": 2}"#;
        let org: Organization = serde_json::from_str(json).unwrap();
        assert!(org.phones.is_empty());
        assert!(org.activity_ids.is_empty());
    }

    #[test]
    fn test_activity_deserialize_default_level() {
        let json = r#"{"id": 1, "name": "Food"}"#;
        let activity: Activity = serde_json::from_str(json).unwrap();
        assert_eq!(activity.level, 1);
        assert!(activity.is_root());
    }
}
