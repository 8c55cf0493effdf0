//! # orgsearch-types
//!
//! Entity types for the orgsearch directory engine.
//!
//! - **Entities**: `Building`, `Activity`, `Organization`
//! - **Taxonomy output**: `ActivityTreeNode`
//! - **Geometry**: `GeoBox`, an axis-aligned latitude/longitude rectangle
//!
//! All types are serializable with Serde. Coordinates are decimal degrees and
//! convert to `geo::Point` with longitude as `x` and latitude as `y`.
//!
//! ## Examples
//!
//! ```rust
//! use orgsearch_types::entity::Building;
//!
//! let building = Building::new(1, "Moscow, Lenin St. 1, office 3", 55.7558, 37.6173);
//! assert_eq!(building.location().y(), 55.7558);
//! ```

pub mod bbox;
pub mod entity;
pub mod tree;

pub use bbox::GeoBox;
pub use entity::{Activity, ActivityId, Building, BuildingId, Organization, OrganizationId};
pub use tree::ActivityTreeNode;
