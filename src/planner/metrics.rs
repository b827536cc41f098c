use std::fmt;

use log::warn;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::planner::planner::RoutePlanner;
use crate::route::route::Route;

#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct FuelEstimate {
    pub distance_ly: f64,
    pub gallons: f64,
    /// True when a single tank does not cover the route.
    pub exceeds_tank: bool,
    /// `floor(gallons / tank capacity)` when the tank is exceeded, otherwise 0.
    pub refuel_stops: u64,
}

/// Travel time in hours, plus a days/hours/minutes breakdown for display.
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct TravelTime {
    pub speed_ly_per_hour: f64,
    pub hours: f64,
    pub days: u64,
    pub hours_part: u64,
    pub minutes: u64,
}

impl TravelTime {
    pub fn from_hours(hours: f64, speed_ly_per_hour: f64) -> Self {
        TravelTime {
            speed_ly_per_hour,
            hours,
            days: (hours / 24.0).floor() as u64,
            hours_part: (hours % 24.0).floor() as u64,
            minutes: ((hours % 1.0) * 60.0).floor() as u64,
        }
    }
}

impl fmt::Display for TravelTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.days > 0 {
            write!(
                f,
                "{} days, {} hours, {} minutes",
                self.days, self.hours_part, self.minutes
            )
        } else if self.hours_part > 0 {
            write!(f, "{} hours, {} minutes", self.hours_part, self.minutes)
        } else {
            write!(f, "{} minutes", self.minutes)
        }
    }
}

impl RoutePlanner<'_> {
    /// Gallons needed for `route`, computing its length first if stale.
    pub fn fuel_required(&self, route: &mut Route) -> FuelEstimate {
        let ship = &self.config().ship;
        let distance_ly = route.ensure_total_distance();
        let gallons = distance_ly / ship.fuel_efficiency_ly_per_gallon;
        let exceeds_tank = gallons > ship.tank_capacity_gallons;
        let refuel_stops = if exceeds_tank {
            warn!(
                "route of {} exceeds single tank capacity ({} gallons needed)",
                self.format_distance(distance_ly),
                gallons
            );
            (gallons / ship.tank_capacity_gallons).floor() as u64
        } else {
            0
        };

        FuelEstimate {
            distance_ly,
            gallons,
            exceeds_tank,
            refuel_stops,
        }
    }

    /// Hours to fly `route` at `speed` (default: the configured average).
    pub fn travel_time(&self, route: &mut Route, speed: Option<f64>) -> Result<TravelTime> {
        let ship = &self.config().ship;
        let speed = speed.unwrap_or(ship.average_speed_ly_per_hour);
        if !speed.is_finite() || speed <= 0.0 {
            return Err(Error::invalid_input(format!(
                "speed must be a finite positive number, got {speed}"
            )));
        }
        if !ship.speed_in_envelope(speed) {
            warn!(
                "speed {} LY/hr is outside the {}-{} LY/hr operating envelope",
                speed, ship.min_speed_ly_per_hour, ship.max_speed_ly_per_hour
            );
        }

        let hours = route.ensure_total_distance() / speed;
        Ok(TravelTime::from_hours(hours, speed))
    }
}
