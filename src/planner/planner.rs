use log::debug;
use serde_json::Value;

use crate::config::PlannerConfig;
use crate::error::{Error, Result};
use crate::route::route::{Route, Waypoint};
use crate::spatial::geometry::{format_distance_with_threshold, in_bounds};
use crate::store::location_store::LocationStore;
use crate::sweep::insertion::best_insertion_index;
use crate::sweep::nearest_neighbor::nearest_neighbor_order;
use crate::Point;

/// What a caller may ask to route through: a stored location's name or a raw
/// coordinate.
#[derive(Clone, Debug, PartialEq)]
pub enum WaypointInput {
    Named(String),
    Coordinates(Point),
}

impl WaypointInput {
    pub fn named(name: impl Into<String>) -> Self {
        WaypointInput::Named(name.into())
    }

    /// Accepts a JSON string (location name) or a 3-element numeric array.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::String(name) => Ok(WaypointInput::Named(name.clone())),
            Value::Array(items) if items.len() == 3 => {
                let mut position = [0.0; 3];
                for (slot, item) in position.iter_mut().zip(items) {
                    *slot = item.as_f64().ok_or_else(|| {
                        Error::invalid_input(format!("coordinate {item} is not a number"))
                    })?;
                }
                Ok(WaypointInput::Coordinates(position))
            }
            other => Err(Error::invalid_input(format!(
                "expected a location name or (x, y, z) coordinates, got {other}"
            ))),
        }
    }
}

impl From<&str> for WaypointInput {
    fn from(name: &str) -> Self {
        WaypointInput::Named(name.to_string())
    }
}

impl From<String> for WaypointInput {
    fn from(name: String) -> Self {
        WaypointInput::Named(name)
    }
}

impl From<Point> for WaypointInput {
    fn from(position: Point) -> Self {
        WaypointInput::Coordinates(position)
    }
}

/// Builds and extends routes over the locations of a [`LocationStore`].
#[derive(Clone, Debug)]
pub struct RoutePlanner<'a> {
    store: &'a LocationStore,
    config: PlannerConfig,
}

impl<'a> RoutePlanner<'a> {
    pub fn new(store: &'a LocationStore) -> Self {
        Self::with_config(store, PlannerConfig::default())
    }

    pub fn with_config(store: &'a LocationStore, config: PlannerConfig) -> Self {
        RoutePlanner { store, config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn store(&self) -> &'a LocationStore {
        self.store
    }

    /// Turns a name into a snapshot of the stored location, or passes a
    /// coordinate through unchecked against the galaxy bounds.
    pub fn resolve(&self, input: &WaypointInput) -> Result<Waypoint> {
        match input {
            WaypointInput::Named(name) => self
                .store
                .handle(name)
                .map(Waypoint::Location)
                .ok_or_else(|| Error::UnknownLocation { name: name.clone() }),
            WaypointInput::Coordinates(position) => {
                if position.iter().all(|c| c.is_finite()) {
                    Ok(Waypoint::coordinates(*position))
                } else {
                    Err(Error::invalid_input(format!(
                        "coordinates {position:?} must be finite"
                    )))
                }
            }
        }
    }

    /// Same as [`RoutePlanner::resolve`]; kept for callers that only want to
    /// inspect a location.
    pub fn location_information(&self, input: &WaypointInput) -> Result<Waypoint> {
        self.resolve(input)
    }

    fn resolve_all(&self, inputs: &[WaypointInput]) -> Result<Vec<Waypoint>> {
        if inputs.len() < 2 {
            return Err(Error::InsufficientWaypoints {
                count: inputs.len(),
            });
        }
        inputs.iter().map(|input| self.resolve(input)).collect()
    }

    /// Route through `inputs` in the order given.
    pub fn create_route(&self, inputs: &[WaypointInput]) -> Result<Route> {
        let waypoints = self.resolve_all(inputs)?;
        let mut route = Route::new(waypoints);
        let total = route.compute_total_distance();
        debug!(
            "created route of {} waypoints, {}",
            route.len(),
            self.format_distance(total)
        );
        Ok(route)
    }

    /// Route through `inputs` starting at the first one and greedily visiting
    /// the nearest remaining waypoint. Not an optimal tour.
    pub fn optimize_route(&self, inputs: &[WaypointInput]) -> Result<Route> {
        let waypoints = self.resolve_all(inputs)?;
        if waypoints.len() == 2 {
            let mut route = Route::new(waypoints);
            route.compute_total_distance();
            return Ok(route);
        }

        let positions: Vec<Point> = waypoints.iter().map(Waypoint::position).collect();
        let order = nearest_neighbor_order(&positions);

        let mut slots: Vec<Option<Waypoint>> = waypoints.into_iter().map(Some).collect();
        let ordered: Vec<Waypoint> = order
            .into_iter()
            .filter_map(|idx| slots[idx].take())
            .collect();

        let mut route = Route::new(ordered);
        let total = route.compute_total_distance();
        debug!(
            "optimized route of {} waypoints, {}",
            route.len(),
            self.format_distance(total)
        );
        Ok(route)
    }

    /// Inserts `input` where it lengthens `route` least, never ahead of the
    /// current start. Routes with fewer than two waypoints just get it appended.
    ///
    /// Returns the index the stop landed at. `route` is untouched on error.
    pub fn add_stop(&self, route: &mut Route, input: &WaypointInput) -> Result<usize> {
        let waypoint = self.resolve(input)?;

        if route.len() < 2 {
            route.push(waypoint);
            route.compute_total_distance();
            return Ok(route.len() - 1);
        }

        let positions = route.positions();
        let index = best_insertion_index(&positions, waypoint.position())
            .map(|(index, _)| index)
            .unwrap_or(route.len());

        debug!("inserting '{}' at position {}", waypoint.label(), index);
        route.insert(index, waypoint)?;
        route.compute_total_distance();
        Ok(index)
    }

    /// Authoritative bounds check for coordinates not yet stored anywhere.
    pub fn validate_coordinates(&self, point: Point) -> bool {
        in_bounds(point, &self.config.galaxy)
    }

    pub fn format_distance(&self, light_years: f64) -> String {
        format_distance_with_threshold(light_years, self.config.light_minutes_threshold_ly)
    }

    pub fn max_range_ly(&self) -> f64 {
        self.config.ship.max_range_ly()
    }
}
