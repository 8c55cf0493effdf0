//! Demo dataset: three Moscow buildings, a three-level activity taxonomy,
//! and five organizations.
//!
//! ```text
//! Food (1)
//! ├── Meat Products (3)
//! └── Dairy Products (4)
//! Automobiles (2)
//! ├── Trucks (5)
//! └── Cars (6)
//!     ├── Parts (7)
//!     └── Accessories (8)
//! ```

use crate::source::Snapshot;
use once_cell::sync::Lazy;
use orgsearch_types::{Activity, Building, Organization};

static DEMO: Lazy<Snapshot> = Lazy::new(|| {
    let buildings = vec![
        Building::new(1, "Moscow, Lenin St. 1, office 3", 55.7558, 37.6173),
        Building::new(2, "Moscow, Blukhera St. 32/1", 55.7500, 37.6000),
        Building::new(3, "Moscow, Red Square 1", 55.7539, 37.6208),
    ];

    let food = Activity::root(1, "Food");
    let automobiles = Activity::root(2, "Automobiles");
    let meat = Activity::child_of(&food, 3, "Meat Products");
    let dairy = Activity::child_of(&food, 4, "Dairy Products");
    let trucks = Activity::child_of(&automobiles, 5, "Trucks");
    let cars = Activity::child_of(&automobiles, 6, "Cars");
    let parts = Activity::child_of(&cars, 7, "Parts");
    let accessories = Activity::child_of(&cars, 8, "Accessories");

    let organizations = vec![
        Organization::new(1, "LLC Horns and Hooves", 2)
            .with_phones(["2-222-222", "3-333-333", "8-923-666-13-13"])
            .with_activities([dairy.id, meat.id]),
        Organization::new(2, "Meat Trading Co", 1)
            .with_phones(["1-111-111"])
            .with_activities([meat.id]),
        Organization::new(3, "Auto Parts Store", 3)
            .with_phones(["5-555-555", "6-666-666"])
            .with_activities([parts.id, accessories.id]),
        Organization::new(4, "Universal Motors", 1)
            .with_phones(["7-777-777"])
            .with_activities([trucks.id, cars.id]),
        Organization::new(5, "Fresh Dairy", 2)
            .with_phones(["4-444-444"])
            .with_activities([dairy.id]),
    ];

    let activities = vec![
        food,
        automobiles,
        meat,
        dairy,
        trucks,
        cars,
        parts,
        accessories,
    ];

    Snapshot::new(buildings, activities, organizations)
});

/// A fresh copy of the demo snapshot.
pub fn demo_snapshot() -> Snapshot {
    DEMO.clone()
}
