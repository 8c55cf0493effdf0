//! In-memory snapshot source.

use super::{Snapshot, SnapshotSource};
use crate::error::Result;
use orgsearch_types::{Activity, Building, Organization};

/// Snapshot source holding the collections in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    snapshot: Snapshot,
}

impl MemorySource {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// Replace the held snapshot.
    pub fn replace(&mut self, snapshot: Snapshot) {
        self.snapshot = snapshot;
    }
}

impl From<Snapshot> for MemorySource {
    fn from(snapshot: Snapshot) -> Self {
        Self::new(snapshot)
    }
}

impl SnapshotSource for MemorySource {
    fn buildings(&self) -> Result<Vec<Building>> {
        Ok(self.snapshot.buildings.clone())
    }

    fn activities(&self) -> Result<Vec<Activity>> {
        Ok(self.snapshot.activities.clone())
    }

    fn organizations(&self) -> Result<Vec<Organization>> {
        Ok(self.snapshot.organizations.clone())
    }

    fn snapshot(&self) -> Result<Snapshot> {
        Ok(self.snapshot.clone())
    }
}
