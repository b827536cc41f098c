use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::spatial::geometry::{distance, path_length};
use crate::{Location, LocationRef, Point};

/// A single stop: a stored location or a bare coordinate.
///
/// Locations are held by shared handle, so store edits show up here while a
/// store removal leaves the route intact. A cached route length does not
/// notice such edits; recompute it before trusting it.
#[derive(Clone, Debug, PartialEq)]
pub enum Waypoint {
    Location(LocationRef),
    Coordinates { position: Point },
}

impl Waypoint {
    pub fn coordinates(position: Point) -> Self {
        Waypoint::Coordinates { position }
    }

    pub fn position(&self) -> Point {
        match self {
            Waypoint::Location(location) => location.borrow().position,
            Waypoint::Coordinates { position } => *position,
        }
    }

    pub fn name(&self) -> Option<String> {
        match self {
            Waypoint::Location(location) => Some(location.borrow().name.clone()),
            Waypoint::Coordinates { .. } => None,
        }
    }

    /// Location name, or `Coordinates (x, y, z)` for an unnamed point.
    pub fn label(&self) -> String {
        match self {
            Waypoint::Location(location) => location.borrow().name.clone(),
            Waypoint::Coordinates { position: [x, y, z] } => {
                format!("Coordinates ({x}, {y}, {z})")
            }
        }
    }
}

impl From<LocationRef> for Waypoint {
    fn from(location: LocationRef) -> Self {
        Waypoint::Location(location)
    }
}

/// Wraps a location that no store knows about.
impl From<Location> for Waypoint {
    fn from(location: Location) -> Self {
        Waypoint::Location(Rc::new(RefCell::new(location)))
    }
}

impl From<Point> for Waypoint {
    fn from(position: Point) -> Self {
        Waypoint::coordinates(position)
    }
}

/// One leg of a route.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct RouteSegment {
    pub from: String,
    pub to: String,
    pub distance_ly: f64,
}

/// Ordered waypoints with a cached total length.
///
/// The cache is `None` until [`Route::compute_total_distance`] runs and is
/// cleared by every mutation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Route {
    waypoints: Vec<Waypoint>,
    total_distance: Option<f64>,
}

impl Route {
    pub fn new(waypoints: Vec<Waypoint>) -> Self {
        Route {
            waypoints,
            total_distance: None,
        }
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn start(&self) -> Option<&Waypoint> {
        self.waypoints.first()
    }

    pub fn end(&self) -> Option<&Waypoint> {
        self.waypoints.last()
    }

    pub fn positions(&self) -> Vec<Point> {
        self.waypoints.iter().map(Waypoint::position).collect()
    }

    pub fn labels(&self) -> Vec<String> {
        self.waypoints.iter().map(Waypoint::label).collect()
    }

    /// Cached length, if it is current.
    pub fn total_distance(&self) -> Option<f64> {
        self.total_distance
    }

    pub fn is_distance_current(&self) -> bool {
        self.total_distance.is_some()
    }

    /// Recomputes the total length and caches it.
    pub fn compute_total_distance(&mut self) -> f64 {
        let total = path_length(&self.positions());
        self.total_distance = Some(total);
        total
    }

    /// Cached length, computing it first when stale.
    pub fn ensure_total_distance(&mut self) -> f64 {
        match self.total_distance {
            Some(total) => total,
            None => self.compute_total_distance(),
        }
    }

    pub fn push(&mut self, waypoint: Waypoint) {
        self.waypoints.push(waypoint);
        self.total_distance = None;
    }

    /// Inserts at `index`; `index == len()` appends.
    pub fn insert(&mut self, index: usize, waypoint: Waypoint) -> Result<()> {
        if index > self.waypoints.len() {
            return Err(Error::invalid_input(format!(
                "insert index {} out of range for route of {} waypoints",
                index,
                self.waypoints.len()
            )));
        }
        self.waypoints.insert(index, waypoint);
        self.total_distance = None;
        Ok(())
    }

    /// Removes and returns the waypoint at `index`, or `None` when out of range.
    pub fn remove(&mut self, index: usize) -> Option<Waypoint> {
        if index >= self.waypoints.len() {
            return None;
        }
        self.total_distance = None;
        Some(self.waypoints.remove(index))
    }

    /// Replaces the first waypoint, or pushes onto an empty route.
    pub fn set_start(&mut self, waypoint: Waypoint) {
        match self.waypoints.first_mut() {
            Some(first) => *first = waypoint,
            None => self.waypoints.push(waypoint),
        }
        self.total_distance = None;
    }

    /// Replaces the last waypoint, or pushes onto an empty route.
    pub fn set_end(&mut self, waypoint: Waypoint) {
        match self.waypoints.last_mut() {
            Some(last) => *last = waypoint,
            None => self.waypoints.push(waypoint),
        }
        self.total_distance = None;
    }

    pub fn segments(&self) -> Vec<RouteSegment> {
        self.waypoints
            .windows(2)
            .map(|pair| RouteSegment {
                from: pair[0].label(),
                to: pair[1].label(),
                distance_ly: distance(pair[0].position(), pair[1].position()),
            })
            .collect()
    }
}
