//! The directory: a resolved snapshot plus the query engine.
//!
//! This is the read-only surface a transport layer calls into: flat and
//! nested activity listings, building listings and geo lookups, organization
//! search, and organization detail by id.

use crate::builder::DirectoryBuilder;
use crate::config::Config;
use crate::engine::{EngineStats, OrganizationQueryEngine};
use crate::error::{EntityKind, OrgSearchError, Result};
use crate::query::{GeoPredicate, SearchFilter};
use crate::source::{ResolvedOrganization, Snapshot, SnapshotSource};
use orgsearch_types::{
    Activity, ActivityId, ActivityTreeNode, Building, BuildingId, GeoBox, OrganizationId,
};

/// Read-only directory over one consistent snapshot.
///
/// ```rust
/// use orgsearch::{Directory, SearchFilter, seed};
///
/// let directory = Directory::new(seed::demo_snapshot());
///
/// // "Food" matches organizations tagged with any food sub-category
/// let food = directory.search_organizations(&SearchFilter::new().with_activity(1))?;
/// assert_eq!(food.len(), 3);
///
/// let detail = directory.organization(1)?;
/// assert_eq!(detail.building.id, 2);
/// # Ok::<(), orgsearch::OrgSearchError>(())
/// ```
#[derive(Debug)]
pub struct Directory {
    snapshot: Snapshot,
    organizations: Vec<ResolvedOrganization>,
    engine: OrganizationQueryEngine,
    source: Option<Box<dyn SnapshotSource>>,
}

impl Directory {
    pub fn builder() -> DirectoryBuilder {
        DirectoryBuilder::new()
    }

    /// Directory over `snapshot` with default configuration.
    pub fn new(snapshot: Snapshot) -> Self {
        Self::with_config(snapshot, Config::default())
    }

    pub fn with_config(snapshot: Snapshot, config: Config) -> Self {
        let organizations = snapshot.resolve();
        Self {
            snapshot,
            organizations,
            engine: OrganizationQueryEngine::new(config),
            source: None,
        }
    }

    /// Pull the initial snapshot from `source` and keep it for [`refresh`].
    ///
    /// [`refresh`]: Directory::refresh
    pub fn from_source(source: Box<dyn SnapshotSource>, config: Config) -> Result<Self> {
        let snapshot = source.snapshot()?;
        let mut directory = Self::with_config(snapshot, config);
        directory.source = Some(source);
        Ok(directory)
    }

    pub fn config(&self) -> &Config {
        self.engine.config()
    }

    pub fn engine(&self) -> &OrganizationQueryEngine {
        &self.engine
    }

    pub fn stats(&self) -> EngineStats {
        self.engine.stats()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn buildings(&self) -> &[Building] {
        &self.snapshot.buildings
    }

    pub fn building(&self, id: BuildingId) -> Result<&Building> {
        self.snapshot
            .buildings
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| OrgSearchError::not_found(EntityKind::Building, id))
    }

    /// Flat activity list in snapshot order.
    pub fn activities(&self) -> &[Activity] {
        &self.snapshot.activities
    }

    pub fn activity(&self, id: ActivityId) -> Result<&Activity> {
        self.snapshot
            .activities
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| OrgSearchError::not_found(EntityKind::Activity, id))
    }

    /// Nested activity forest.
    pub fn activity_tree(&self) -> Result<Vec<ActivityTreeNode>> {
        self.engine.assemble_tree(&self.snapshot.activities)
    }

    /// All organizations that resolved against the snapshot, in order.
    pub fn organizations(&self) -> &[ResolvedOrganization] {
        &self.organizations
    }

    pub fn search_organizations(&self, filter: &SearchFilter) -> Result<Vec<&ResolvedOrganization>> {
        self.engine
            .search(&self.snapshot.activities, &self.organizations, filter)
    }

    /// Organization detail: its fields, building, and activities.
    pub fn organization(&self, id: OrganizationId) -> Result<&ResolvedOrganization> {
        self.engine.get_by_id(&self.organizations, id)
    }

    /// Buildings within `radius` meters of a center, in snapshot order.
    pub fn buildings_within_radius(&self, lat: f64, lon: f64, radius: f64) -> Result<Vec<&Building>> {
        let predicate = GeoPredicate::radius(lat, lon, radius, self.config())?;
        Ok(OrganizationQueryEngine::filter_by_location(
            &self.snapshot.buildings,
            &[predicate],
            Building::location,
        ))
    }

    /// Buildings inside `bbox`, in snapshot order. An inverted box matches
    /// nothing.
    pub fn buildings_in_box(&self, bbox: GeoBox) -> Result<Vec<&Building>> {
        let predicate = GeoPredicate::bounding_box(bbox)?;
        Ok(OrganizationQueryEngine::filter_by_location(
            &self.snapshot.buildings,
            &[predicate],
            Building::location,
        ))
    }

    /// Replace the snapshot. The cached hierarchy is dropped before the next
    /// query can observe it.
    pub fn reload(&mut self, snapshot: Snapshot) {
        self.engine.invalidate();
        self.organizations = snapshot.resolve();
        self.snapshot = snapshot;
        log::debug!(
            "Directory reloaded: {} buildings, {} activities, {} organizations",
            self.snapshot.buildings.len(),
            self.snapshot.activities.len(),
            self.organizations.len()
        );
    }

    /// Pull a fresh snapshot from the configured source.
    ///
    /// Returns `Ok(false)` when the directory has no source or the snapshot is
    /// unchanged.
    pub fn refresh(&mut self) -> Result<bool> {
        let Some(source) = self.source.as_ref() else {
            return Ok(false);
        };
        let snapshot = source.snapshot()?;
        if snapshot == self.snapshot {
            return Ok(false);
        }
        self.reload(snapshot);
        Ok(true)
    }
}
