//! Snapshot sources: the storage side of the engine.
//!
//! The engine never fetches anything on its own. A [`SnapshotSource`] hands
//! over complete, already-materialized collections of buildings, activities,
//! and organizations; [`Snapshot::resolve`] then joins every organization
//! with its building and activity set before any filter runs.

use crate::error::Result;
use geo::Point;
use orgsearch_types::{
    Activity, ActivityId, Building, BuildingId, Organization, OrganizationId,
};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::path::Path;

mod json;
mod memory;

pub use json::JsonFileSource;
pub use memory::MemorySource;

/// Trait for snapshot providers
///
/// Each call returns the full collection. Implementations backed by a live
/// store should return a consistent view across the three calls made by
/// [`SnapshotSource::snapshot`].
pub trait SnapshotSource: Send + Sync + Debug {
    fn buildings(&self) -> Result<Vec<Building>>;

    fn activities(&self) -> Result<Vec<Activity>>;

    fn organizations(&self) -> Result<Vec<Organization>>;

    /// Fetch all three collections.
    fn snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            buildings: self.buildings()?,
            activities: self.activities()?,
            organizations: self.organizations()?,
        })
    }
}

/// Flat, serializable copy of the directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snapshot {
    #[serde(default)]
    pub buildings: Vec<Building>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub organizations: Vec<Organization>,
}

impl Snapshot {
    pub fn new(
        buildings: Vec<Building>,
        activities: Vec<Activity>,
        organizations: Vec<Organization>,
    ) -> Self {
        Self {
            buildings,
            activities,
            organizations,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a snapshot from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let snapshot = Self::from_json(&text)?;
        log::debug!(
            "Loaded snapshot from {}: {} buildings, {} activities, {} organizations",
            path.as_ref().display(),
            snapshot.buildings.len(),
            snapshot.activities.len(),
            snapshot.organizations.len()
        );
        Ok(snapshot)
    }

    /// Join every organization with its building and activities.
    ///
    /// Organizations whose building is absent are skipped. Activity references
    /// absent from the snapshot are dropped, and repeated references are
    /// collapsed. Input order is preserved.
    pub fn resolve(&self) -> Vec<ResolvedOrganization> {
        let buildings: FxHashMap<BuildingId, &Building> =
            self.buildings.iter().map(|b| (b.id, b)).collect();

        let mut activities: FxHashMap<ActivityId, &Activity> = FxHashMap::default();
        for activity in &self.activities {
            activities.entry(activity.id).or_insert(activity);
        }

        self.organizations
            .iter()
            .filter_map(|org| {
                let Some(building) = buildings.get(&org.building_id) else {
                    log::warn!(
                        "Organization {} references missing building {}; skipping it",
                        org.id,
                        org.building_id
                    );
                    return None;
                };

                let mut seen = FxHashSet::default();
                let resolved: Vec<Activity> = org
                    .activity_ids
                    .iter()
                    .filter(|id| seen.insert(**id))
                    .filter_map(|id| match activities.get(id) {
                        Some(activity) => Some((*activity).clone()),
                        None => {
                            log::warn!(
                                "Organization {} references missing activity {}; dropping it",
                                org.id,
                                id
                            );
                            None
                        }
                    })
                    .collect();

                let mut organization = org.clone();
                organization.activity_ids = resolved.iter().map(|a| a.id).collect();

                Some(ResolvedOrganization {
                    organization,
                    building: (*building).clone(),
                    activities: resolved,
                })
            })
            .collect()
    }
}

/// An organization joined with its building and activities.
///
/// This is both the unit the search filters over and the detail view returned
/// by a lookup by id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedOrganization {
    #[serde(flatten)]
    pub organization: Organization,
    pub building: Building,
    pub activities: Vec<Activity>,
}

impl ResolvedOrganization {
    #[inline]
    pub fn id(&self) -> OrganizationId {
        self.organization.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.organization.name
    }

    #[inline]
    pub fn building_id(&self) -> BuildingId {
        self.organization.building_id
    }

    pub fn phones(&self) -> &[String] {
        &self.organization.phones
    }

    /// Building location (x = longitude, y = latitude).
    #[inline]
    pub fn location(&self) -> Point {
        self.building.location()
    }

    /// True if any of the organization's activities is in `ids`.
    pub fn has_any_activity(&self, ids: &FxHashSet<ActivityId>) -> bool {
        self.activities.iter().any(|a| ids.contains(&a.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Snapshot {
        let food = Activity::root(1, "Food");
        let meat = Activity::child_of(&food, 2, "Meat");
        Snapshot::new(
            vec![Building::new(10, "Lenin St. 1", 55.7558, 37.6173)],
            vec![food, meat],
            vec![
                Organization::new(100, "Meat Trading Co", 10)
                    .with_phones(["1-111-111"])
                    .with_activities([2, 2, 999]),
                Organization::new(101, "Nowhere LLC", 11),
            ],
        )
    }

    #[test]
    fn test_resolve_joins_building_and_activities() {
        let resolved = snapshot().resolve();
        assert_eq!(resolved.len(), 1);

        let org = &resolved[0];
        assert_eq!(org.id(), 100);
        assert_eq!(org.building.address, "Lenin St. 1");
        assert_eq!(org.phones(), &["1-111-111".to_string()]);
        // duplicate collapsed, dangling reference dropped
        assert_eq!(org.activities.len(), 1);
        assert_eq!(org.organization.activity_ids, vec![2]);
    }

    #[test]
    fn test_resolve_preserves_order() {
        let mut snap = snapshot();
        snap.organizations = vec![
            Organization::new(3, "C", 10),
            Organization::new(1, "A", 10),
            Organization::new(2, "B", 10),
        ];
        let ids: Vec<_> = snap.resolve().iter().map(|o| o.id()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_json_roundtrip() {
        let snap = snapshot();
        let json = snap.to_json().unwrap();
        assert_eq!(Snapshot::from_json(&json).unwrap(), snap);
    }

    #[test]
    fn test_from_json_defaults_missing_collections() {
        let snap = Snapshot::from_json(r#"{ "activities": [{ "id": 1, "name": "Food" }] }"#)
            .unwrap();
        assert!(snap.buildings.is_empty());
        assert_eq!(snap.activities.len(), 1);
        assert!(snap.resolve().is_empty());
    }

    #[test]
    fn test_detail_serializes_flat() {
        let resolved = snapshot().resolve();
        let value = serde_json::to_value(&resolved[0]).unwrap();
        assert_eq!(value["id"], 100);
        assert_eq!(value["building"]["id"], 10);
        assert_eq!(value["activities"][0]["name"], "Meat");
    }
}
