//! In-memory multi-criteria search over a directory of buildings, a
//! hierarchical activity taxonomy, and the organizations that occupy the
//! buildings.
//!
//! ## Features
//! - **Hierarchical activity search**: filtering by a category also matches
//!   every sub-category
//! - **Geo search**: great-circle radius and latitude/longitude box filters
//! - **Deterministic results**: predicates combine with AND and keep the input
//!   order of the snapshot
//! - **Storage-agnostic**: snapshots come from any [`SnapshotSource`]
//!
//! ```rust
//! use orgsearch::{Directory, SearchFilter, seed};
//!
//! let directory = Directory::new(seed::demo_snapshot());
//!
//! // Organizations within 500 m of Lenin St. 1 that deal in anything under "Automobiles"
//! let filter = SearchFilter::new()
//!     .with_activity(2)
//!     .with_radius(55.7558, 37.6173, 500.0);
//! let found = directory.search_organizations(&filter)?;
//! assert_eq!(found[0].name(), "Auto Parts Store");
//! # Ok::<(), orgsearch::OrgSearchError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod directory;
pub mod engine;
pub mod error;
pub mod query;
pub mod seed;
pub mod source;

pub use builder::DirectoryBuilder;
pub use directory::Directory;
pub use error::{EntityKind, OrgSearchError, Result};

pub use compute::ActivityHierarchyIndex;
pub use compute::geo::{EARTH_RADIUS_M, bounding_box, contains, haversine_distance};
pub use config::{Config, NegativeRadiusPolicy};
pub use engine::{EngineStats, OrganizationQueryEngine};
pub use query::{GeoPredicate, SearchFilter};
pub use source::{JsonFileSource, MemorySource, ResolvedOrganization, Snapshot, SnapshotSource};

pub use geo::Point;
pub use orgsearch_types::{
    Activity, ActivityId, ActivityTreeNode, Building, BuildingId, GeoBox, Organization,
    OrganizationId,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Directory, DirectoryBuilder, OrgSearchError, Result};

    pub use crate::{Config, NegativeRadiusPolicy};

    pub use crate::{GeoPredicate, OrganizationQueryEngine, SearchFilter};

    pub use crate::{MemorySource, ResolvedOrganization, Snapshot, SnapshotSource};

    pub use crate::{Activity, ActivityTreeNode, Building, GeoBox, Organization};
}
