//! Organization query engine.
//!
//! Combines the activity hierarchy, the geo predicates, and plain attribute
//! matches over a resolved organization snapshot. Every call is a pure
//! function of its inputs; the only state is an optional cached hierarchy
//! index, rebuilt whenever the activity snapshot it was built from changes.

use crate::compute::ActivityHierarchyIndex;
use crate::config::Config;
use crate::error::{EntityKind, OrgSearchError, Result};
use crate::query::{CompiledFilter, GeoPredicate, SearchFilter};
use crate::source::ResolvedOrganization;
use geo::Point;
use orgsearch_types::{Activity, ActivityTreeNode, OrganizationId};
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters exposed by [`OrganizationQueryEngine::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub searches: u64,
    pub hierarchy_builds: u64,
    pub hierarchy_cache_hits: u64,
}

/// Filters organization snapshots and assembles activity trees.
///
/// Thread-safe: the engine can be shared across threads and queried
/// concurrently against shared, read-only snapshots.
#[derive(Debug)]
pub struct OrganizationQueryEngine {
    config: Config,
    cached: RwLock<Option<Arc<ActivityHierarchyIndex>>>,
    searches: AtomicU64,
    builds: AtomicU64,
    cache_hits: AtomicU64,
}

impl OrganizationQueryEngine {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            cached: RwLock::new(None),
            searches: AtomicU64::new(0),
            builds: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Hierarchy index for `activities`, reused from the cache when the
    /// snapshot is unchanged and caching is enabled.
    pub fn hierarchy(&self, activities: &[Activity]) -> Arc<ActivityHierarchyIndex> {
        if !self.config.cache_hierarchy {
            self.builds.fetch_add(1, Ordering::Relaxed);
            return Arc::new(ActivityHierarchyIndex::build(activities));
        }

        if let Some(index) = self.cached.read().as_ref()
            && index.matches_snapshot(activities)
        {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
            return Arc::clone(index);
        }

        let mut slot = self.cached.write();
        // Another thread may have rebuilt it while we waited for the lock.
        if let Some(index) = slot.as_ref()
            && index.matches_snapshot(activities)
        {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
            return Arc::clone(index);
        }

        log::debug!(
            "Activity snapshot changed; rebuilding hierarchy index ({} activities)",
            activities.len()
        );
        let index = Arc::new(ActivityHierarchyIndex::build(activities));
        self.builds.fetch_add(1, Ordering::Relaxed);
        *slot = Some(Arc::clone(&index));
        index
    }

    /// Drop the cached hierarchy index.
    pub fn invalidate(&self) {
        if self.cached.write().take().is_some() {
            log::debug!("Hierarchy cache invalidated");
        }
    }

    /// Organizations satisfying every active predicate of `filter`, in input
    /// order.
    ///
    /// An empty result is a normal outcome, never `NotFound`.
    ///
    /// # Errors
    ///
    /// - `InvalidGeoParameter` for out-of-range coordinates, a non-finite
    ///   radius, or a negative radius under the `reject` policy
    /// - `MalformedHierarchy` if the activity closure runs into a cycle
    pub fn search<'a>(
        &self,
        activities: &[Activity],
        organizations: &'a [ResolvedOrganization],
        filter: &SearchFilter,
    ) -> Result<Vec<&'a ResolvedOrganization>> {
        self.searches.fetch_add(1, Ordering::Relaxed);

        let compiled =
            CompiledFilter::compile(filter, &self.config, || Ok(self.hierarchy(activities)))?;
        let matched: Vec<&ResolvedOrganization> = organizations
            .iter()
            .filter(|org| compiled.matches(org))
            .collect();

        log::debug!(
            "Search with {} active predicates matched {}/{} organizations",
            compiled.len(),
            matched.len(),
            organizations.len()
        );
        Ok(matched)
    }

    /// Look up one organization by id.
    pub fn get_by_id<'a>(
        &self,
        organizations: &'a [ResolvedOrganization],
        id: OrganizationId,
    ) -> Result<&'a ResolvedOrganization> {
        organizations
            .iter()
            .find(|org| org.id() == id)
            .ok_or_else(|| OrgSearchError::not_found(EntityKind::Organization, id))
    }

    /// Nested forest of the whole taxonomy.
    pub fn assemble_tree(&self, activities: &[Activity]) -> Result<Vec<ActivityTreeNode>> {
        self.hierarchy(activities).tree()
    }

    /// Items whose location satisfies every geo predicate, in input order.
    ///
    /// Depends only on its inputs; predicates already carry the validated
    /// parameters.
    pub fn filter_by_location<'a, T, F>(
        items: &'a [T],
        predicates: &[GeoPredicate],
        location: F,
    ) -> Vec<&'a T>
    where
        F: Fn(&T) -> Point,
    {
        items
            .iter()
            .filter(|item| {
                let point = location(*item);
                predicates.iter().all(|p| p.matches(&point))
            })
            .collect()
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            searches: self.searches.load(Ordering::Relaxed),
            hierarchy_builds: self.builds.load(Ordering::Relaxed),
            hierarchy_cache_hits: self.cache_hits.load(Ordering::Relaxed),
        }
    }
}

impl Default for OrganizationQueryEngine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Snapshot;
    use orgsearch_types::{Building, Organization};

    fn snapshot() -> Snapshot {
        let food = Activity::root(1, "Food");
        let meat = Activity::child_of(&food, 2, "Meat");
        let beef = Activity::child_of(&meat, 3, "Beef");
        let pork = Activity::child_of(&meat, 4, "Pork");
        Snapshot::new(
            vec![
                Building::new(1, "Lenin St. 1", 55.7558, 37.6173),
                Building::new(2, "Nevsky Ave. 1", 59.9343, 30.3351),
            ],
            vec![food, meat, beef, pork],
            vec![
                Organization::new(10, "Beef House", 1).with_activities([3]),
                Organization::new(11, "Pork & Co", 2).with_activities([4]),
                Organization::new(12, "Empty Shell", 1),
            ],
        )
    }

    fn ids(orgs: &[&ResolvedOrganization]) -> Vec<OrganizationId> {
        orgs.iter().map(|o| o.id()).collect()
    }

    #[test]
    fn test_unfiltered_search_returns_all_in_order() {
        let snap = snapshot();
        let orgs = snap.resolve();
        let engine = OrganizationQueryEngine::default();
        let found = engine
            .search(&snap.activities, &orgs, &SearchFilter::new())
            .unwrap();
        assert_eq!(ids(&found), vec![10, 11, 12]);
    }

    #[test]
    fn test_activity_search_uses_closure() {
        let snap = snapshot();
        let orgs = snap.resolve();
        let engine = OrganizationQueryEngine::default();

        let by_meat = engine
            .search(&snap.activities, &orgs, &SearchFilter::new().with_activity(2))
            .unwrap();
        assert_eq!(ids(&by_meat), vec![10, 11]);

        let by_pork = engine
            .search(&snap.activities, &orgs, &SearchFilter::new().with_activity(4))
            .unwrap();
        assert_eq!(ids(&by_pork), vec![11]);

        let unknown = engine
            .search(&snap.activities, &orgs, &SearchFilter::new().with_activity(99))
            .unwrap();
        assert!(unknown.is_empty());
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let snap = snapshot();
        let orgs = snap.resolve();
        let engine = OrganizationQueryEngine::default();
        let filter = SearchFilter::new().with_activity(1).with_building(1);
        let found = engine.search(&snap.activities, &orgs, &filter).unwrap();
        assert_eq!(ids(&found), vec![10]);
    }

    #[test]
    fn test_name_is_case_insensitive_substring() {
        let snap = snapshot();
        let orgs = snap.resolve();
        let engine = OrganizationQueryEngine::default();
        let found = engine
            .search(&snap.activities, &orgs, &SearchFilter::new().with_name("HOUSE"))
            .unwrap();
        assert_eq!(ids(&found), vec![10]);
    }

    #[test]
    fn test_get_by_id() {
        let orgs = snapshot().resolve();
        let engine = OrganizationQueryEngine::default();
        assert_eq!(engine.get_by_id(&orgs, 11).unwrap().name(), "Pork & Co");

        let err = engine.get_by_id(&orgs, 404).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_hierarchy_cache_reuse_and_invalidation() {
        let mut snap = snapshot();
        let engine = OrganizationQueryEngine::default();

        let first = engine.hierarchy(&snap.activities);
        let second = engine.hierarchy(&snap.activities);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(engine.stats().hierarchy_builds, 1);
        assert_eq!(engine.stats().hierarchy_cache_hits, 1);

        // Structural change: a new child under Beef
        let beef = snap.activities[2].clone();
        snap.activities.push(Activity::child_of(&beef, 5, "Marbled Beef"));
        let third = engine.hierarchy(&snap.activities);
        assert!(!Arc::ptr_eq(&first, &third));
        assert!(third.descendants(2).unwrap().contains(&5));

        engine.invalidate();
        let fourth = engine.hierarchy(&snap.activities);
        assert!(!Arc::ptr_eq(&third, &fourth));
        assert_eq!(engine.stats().hierarchy_builds, 3);
    }

    #[test]
    fn test_cache_disabled_always_rebuilds() {
        let snap = snapshot();
        let engine = OrganizationQueryEngine::new(Config::default().with_cache_hierarchy(false));
        let a = engine.hierarchy(&snap.activities);
        let b = engine.hierarchy(&snap.activities);
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(engine.stats().hierarchy_cache_hits, 0);
    }

    #[test]
    fn test_assemble_tree() {
        let snap = snapshot();
        let engine = OrganizationQueryEngine::default();
        let forest = engine.assemble_tree(&snap.activities).unwrap();
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].size(), 4);
    }

    #[test]
    fn test_filter_by_location() {
        let snap = snapshot();
        let config = Config::default();
        let predicates = vec![GeoPredicate::radius(55.7558, 37.6173, 0.0, &config).unwrap()];
        let found = OrganizationQueryEngine::filter_by_location(
            &snap.buildings,
            &predicates,
            Building::location,
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);

        // No predicates keeps every item in order
        let all = OrganizationQueryEngine::filter_by_location(&snap.buildings, &[], Building::location);
        assert_eq!(all.iter().map(|b| b.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OrganizationQueryEngine>();
    }
}
