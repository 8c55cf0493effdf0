//! In-memory index over the activity taxonomy.
//!
//! The taxonomy arrives as a flat list of activities linked by `parent_id`.
//! The index stores, per activity id, its resolved parent and its ordered
//! child ids. Nodes never point at each other directly, and every traversal
//! is iterative with an explicit visited set, so a corrupt snapshot that
//! contains a cycle is reported instead of looping forever.
//!
//! Lenient policies:
//! - An activity whose `parent_id` is not in the snapshot (an orphan) is
//!   treated as a root. It is logged, never dropped.
//! - A repeated activity id keeps its first occurrence; later copies are
//!   logged and ignored.

use crate::error::{OrgSearchError, Result};
use orgsearch_types::{Activity, ActivityId, ActivityTreeNode};
use rustc_hash::{FxHashMap, FxHashSet, FxHasher};
use smallvec::SmallVec;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone)]
struct Slot {
    /// Position in `ActivityHierarchyIndex::activities`
    position: usize,
    /// Resolved parent: `None` for roots and orphans
    parent: Option<ActivityId>,
    children: SmallVec<[ActivityId; 4]>,
}

/// Parent/children table built from one activity snapshot.
///
/// # Examples
///
/// ```
/// use orgsearch::compute::ActivityHierarchyIndex;
/// use orgsearch::Activity;
///
/// let food = Activity::root(1, "Food");
/// let meat = Activity::child_of(&food, 2, "Meat");
/// let beef = Activity::child_of(&meat, 3, "Beef");
///
/// let index = ActivityHierarchyIndex::build(&[food, meat, beef]);
/// let closure = index.descendants(2).unwrap();
/// assert!(closure.contains(&2) && closure.contains(&3));
/// assert!(!closure.contains(&1));
/// ```
#[derive(Debug, Clone)]
pub struct ActivityHierarchyIndex {
    activities: Vec<Activity>,
    slots: FxHashMap<ActivityId, Slot>,
    roots: Vec<ActivityId>,
    orphans: Vec<ActivityId>,
    fingerprint: u64,
}

impl ActivityHierarchyIndex {
    /// Build the index. Children keep the order they appear in `activities`.
    pub fn build(activities: &[Activity]) -> Self {
        let mut kept: Vec<Activity> = Vec::with_capacity(activities.len());
        let mut slots: FxHashMap<ActivityId, Slot> = FxHashMap::default();

        for activity in activities {
            if slots.contains_key(&activity.id) {
                log::warn!(
                    "Duplicate activity id {} ({:?}) ignored; keeping first occurrence",
                    activity.id,
                    activity.name
                );
                continue;
            }
            slots.insert(
                activity.id,
                Slot {
                    position: kept.len(),
                    parent: None,
                    children: SmallVec::new(),
                },
            );
            kept.push(activity.clone());
        }

        let mut roots = Vec::new();
        let mut orphans = Vec::new();
        for activity in &kept {
            match activity.parent_id {
                None => roots.push(activity.id),
                Some(parent_id) if slots.contains_key(&parent_id) => {
                    if let Some(parent) = slots.get_mut(&parent_id) {
                        parent.children.push(activity.id);
                    }
                    if let Some(slot) = slots.get_mut(&activity.id) {
                        slot.parent = Some(parent_id);
                    }
                }
                Some(parent_id) => {
                    log::warn!(
                        "Activity {} references missing parent {}; treating it as a root",
                        activity.id,
                        parent_id
                    );
                    roots.push(activity.id);
                    orphans.push(activity.id);
                }
            }
        }

        log::debug!(
            "Built activity hierarchy: {} activities, {} roots, {} orphans",
            kept.len(),
            roots.len(),
            orphans.len()
        );

        Self {
            activities: kept,
            slots,
            roots,
            orphans,
            fingerprint: Self::fingerprint(activities),
        }
    }

    /// Assemble the nested forest for a snapshot in one step.
    pub fn build_tree(activities: &[Activity]) -> Result<Vec<ActivityTreeNode>> {
        Self::build(activities).tree()
    }

    /// Hash of the full snapshot (ids, names, parents, levels, order).
    pub fn fingerprint(activities: &[Activity]) -> u64 {
        let mut hasher = FxHasher::default();
        activities.hash(&mut hasher);
        hasher.finish()
    }

    /// True when this index was built from exactly `activities`.
    pub fn matches_snapshot(&self, activities: &[Activity]) -> bool {
        self.fingerprint == Self::fingerprint(activities) && self.kept_matches(activities)
    }

    fn kept_matches(&self, activities: &[Activity]) -> bool {
        // Duplicates are dropped on build, so compare against the first
        // occurrence of each id in order.
        let mut seen = FxHashSet::default();
        let mut kept = activities.iter().filter(|a| seen.insert(a.id));
        self.activities.iter().all(|a| kept.next() == Some(a)) && kept.next().is_none()
    }

    /// Number of distinct activities indexed.
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn contains(&self, id: ActivityId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn get(&self, id: ActivityId) -> Option<&Activity> {
        self.slots
            .get(&id)
            .map(|slot| &self.activities[slot.position])
    }

    /// Activities in snapshot order, duplicates removed.
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Resolved parent id. `None` for roots, orphans, and unknown ids.
    pub fn parent(&self, id: ActivityId) -> Option<ActivityId> {
        self.slots.get(&id).and_then(|slot| slot.parent)
    }

    /// Ordered child ids. Empty for leaves and unknown ids.
    pub fn children(&self, id: ActivityId) -> &[ActivityId] {
        self.slots
            .get(&id)
            .map(|slot| slot.children.as_slice())
            .unwrap_or(&[])
    }

    /// Root ids in snapshot order, orphans included.
    pub fn roots(&self) -> &[ActivityId] {
        &self.roots
    }

    /// Activities whose stated parent is missing from the snapshot.
    pub fn orphans(&self) -> &[ActivityId] {
        &self.orphans
    }

    /// Descendant closure of `id`, including `id` itself.
    ///
    /// An unknown id yields an empty set.
    ///
    /// # Errors
    ///
    /// `MalformedHierarchy` if the traversal reaches an activity twice, which
    /// only happens when the parent links form a cycle.
    pub fn descendants(&self, id: ActivityId) -> Result<FxHashSet<ActivityId>> {
        let mut visited = FxHashSet::default();
        if !self.slots.contains_key(&id) {
            return Ok(visited);
        }

        visited.insert(id);
        let mut stack: Vec<ActivityId> = vec![id];
        while let Some(current) = stack.pop() {
            for &child in self.children(current) {
                if !visited.insert(child) {
                    return Err(OrgSearchError::MalformedHierarchy(format!(
                        "cycle detected: activity {} reached twice while expanding activity {}",
                        child, id
                    )));
                }
                stack.push(child);
            }
        }

        Ok(visited)
    }

    /// Nested forest of the whole snapshot.
    ///
    /// Roots (orphans included) appear in snapshot order and every activity
    /// appears exactly once.
    ///
    /// # Errors
    ///
    /// `MalformedHierarchy` if some activity is not reachable from any root,
    /// which means it sits on a cycle.
    pub fn tree(&self) -> Result<Vec<ActivityTreeNode>> {
        let mut built: FxHashMap<ActivityId, ActivityTreeNode> = FxHashMap::default();
        let mut forest = Vec::with_capacity(self.roots.len());
        let mut placed = 0usize;

        for &root in &self.roots {
            // Post-order: a node is assembled once all its children are.
            let mut stack: Vec<(ActivityId, bool)> = vec![(root, false)];
            while let Some((id, expanded)) = stack.pop() {
                let Some(slot) = self.slots.get(&id) else {
                    continue;
                };
                if expanded {
                    let mut node = ActivityTreeNode::from_activity(&self.activities[slot.position]);
                    node.children = slot
                        .children
                        .iter()
                        .filter_map(|child| built.remove(child))
                        .collect();
                    built.insert(id, node);
                    placed += 1;
                } else {
                    stack.push((id, true));
                    stack.extend(slot.children.iter().rev().map(|&child| (child, false)));
                }
            }
            if let Some(node) = built.remove(&root) {
                forest.push(node);
            }
        }

        if placed != self.activities.len() {
            let unreachable: Vec<ActivityId> = self
                .activities
                .iter()
                .map(|a| a.id)
                .filter(|id| !self.reaches_root(*id))
                .take(8)
                .collect();
            return Err(OrgSearchError::MalformedHierarchy(format!(
                "{} activities are not reachable from any root (cycle through {:?})",
                self.activities.len() - placed,
                unreachable
            )));
        }

        Ok(forest)
    }

    /// Check the level invariant: roots have level 1 and every child is one
    /// level below its parent. Orphans are exempt since their parent is
    /// unknown.
    pub fn verify_levels(&self) -> Result<()> {
        for activity in &self.activities {
            match self.parent(activity.id) {
                None if activity.is_root() && activity.level != 1 => {
                    return Err(OrgSearchError::MalformedHierarchy(format!(
                        "root activity {} has level {}, expected 1",
                        activity.id, activity.level
                    )));
                }
                None => {}
                Some(parent_id) => {
                    let expected = self.get(parent_id).and_then(|p| p.level.checked_add(1));
                    if expected != Some(activity.level) {
                        return Err(OrgSearchError::MalformedHierarchy(format!(
                            "activity {} has level {}, expected {:?} (one below parent {})",
                            activity.id, activity.level, expected, parent_id
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Walk parent links up from `id`; true if a root is reached.
    fn reaches_root(&self, id: ActivityId) -> bool {
        let mut seen = FxHashSet::default();
        let mut current = id;
        while seen.insert(current) {
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return true,
            }
        }
        false
    }
}
