pub mod config;
pub mod error;
pub mod planner;
pub mod route;
pub mod spatial;
pub mod store;
pub mod sweep;

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

pub use config::{GalaxyBounds, PlannerConfig, ShipProfile};
pub use error::{Error, Result};
pub use planner::metrics::{FuelEstimate, TravelTime};
pub use planner::planner::{RoutePlanner, WaypointInput};
pub use route::route::{Route, RouteSegment, Waypoint};
pub use store::location_store::{BoundsCheck, LocationEdit, LocationStore};

/// Shared handle to a stored location. Routes hold clones of the handle, so
/// edits made through the store are visible to every route built from it.
pub type LocationRef = Rc<RefCell<Location>>;

/// Coordinates in light-years: `[x, y, z]`, with `y` the galactic height axis.
pub type Point = [f64; 3];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub name: String,
    /// Free-form label such as "Star System" or "Space Station".
    pub category: String,
    pub position: Point,
}

impl Location {
    pub fn new(name: impl Into<String>, category: impl Into<String>, position: Point) -> Self {
        Location {
            name: name.into(),
            category: category.into(),
            position,
        }
    }
}
