//! Compute layer: pure geometry, parameter validation, and the activity
//! hierarchy index.
//!
//! Nothing here touches storage; every function works on values or
//! already-materialized snapshots handed in by the caller.

pub mod geo;
pub mod hierarchy;
pub mod validation;

pub use self::geo::{
    EARTH_RADIUS_M, bounding_box, contains, distance_between, haversine_distance, within_radius,
};
pub use hierarchy::ActivityHierarchyIndex;
