use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::Point;

pub const DEFAULT_GALAXY_RADIUS_LY: f64 = 50_000.0;
pub const DEFAULT_GALAXY_HALF_HEIGHT_LY: f64 = 500.0;

pub const DEFAULT_FUEL_EFFICIENCY_LY_PER_GALLON: f64 = 250.0;
pub const DEFAULT_TANK_CAPACITY_GALLONS: f64 = 15.0;
pub const DEFAULT_MIN_SPEED_LY_PER_HOUR: f64 = 50.0;
pub const DEFAULT_MAX_SPEED_LY_PER_HOUR: f64 = 100.0;
/// Midpoint of the operating envelope.
pub const DEFAULT_AVERAGE_SPEED_LY_PER_HOUR: f64 = 75.0;

/// Distances below this are rendered in light-minutes.
pub const DEFAULT_LIGHT_MINUTES_THRESHOLD_LY: f64 = 0.01;

/// The galaxy modelled as a cylinder around the `y` axis.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GalaxyBounds {
    pub radius_ly: f64,
    /// Allowed `|y|`.
    pub half_height_ly: f64,
}

impl Default for GalaxyBounds {
    fn default() -> Self {
        GalaxyBounds {
            radius_ly: DEFAULT_GALAXY_RADIUS_LY,
            half_height_ly: DEFAULT_GALAXY_HALF_HEIGHT_LY,
        }
    }
}

impl GalaxyBounds {
    pub fn contains(&self, point: Point) -> bool {
        let [x, y, z] = point;
        let radial = (x * x + z * z).sqrt();
        radial <= self.radius_ly && y.abs() <= self.half_height_ly
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShipProfile {
    pub fuel_efficiency_ly_per_gallon: f64,
    pub tank_capacity_gallons: f64,
    pub average_speed_ly_per_hour: f64,
    pub min_speed_ly_per_hour: f64,
    pub max_speed_ly_per_hour: f64,
}

impl Default for ShipProfile {
    fn default() -> Self {
        ShipProfile {
            fuel_efficiency_ly_per_gallon: DEFAULT_FUEL_EFFICIENCY_LY_PER_GALLON,
            tank_capacity_gallons: DEFAULT_TANK_CAPACITY_GALLONS,
            average_speed_ly_per_hour: DEFAULT_AVERAGE_SPEED_LY_PER_HOUR,
            min_speed_ly_per_hour: DEFAULT_MIN_SPEED_LY_PER_HOUR,
            max_speed_ly_per_hour: DEFAULT_MAX_SPEED_LY_PER_HOUR,
        }
    }
}

impl ShipProfile {
    /// Distance coverable on a single full tank.
    pub fn max_range_ly(&self) -> f64 {
        self.fuel_efficiency_ly_per_gallon * self.tank_capacity_gallons
    }

    pub fn speed_in_envelope(&self, speed: f64) -> bool {
        speed >= self.min_speed_ly_per_hour && speed <= self.max_speed_ly_per_hour
    }
}

/// Tunables for the route planner. Every field falls back to its default when
/// missing from a JSON document.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlannerConfig {
    pub galaxy: GalaxyBounds,
    pub ship: ShipProfile,
    pub light_minutes_threshold_ly: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            galaxy: GalaxyBounds::default(),
            ship: ShipProfile::default(),
            light_minutes_threshold_ly: DEFAULT_LIGHT_MINUTES_THRESHOLD_LY,
        }
    }
}

impl PlannerConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: PlannerConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            (self.galaxy.radius_ly, "galaxy.radius_ly"),
            (self.galaxy.half_height_ly, "galaxy.half_height_ly"),
            (
                self.ship.fuel_efficiency_ly_per_gallon,
                "ship.fuel_efficiency_ly_per_gallon",
            ),
            (self.ship.tank_capacity_gallons, "ship.tank_capacity_gallons"),
            (
                self.ship.average_speed_ly_per_hour,
                "ship.average_speed_ly_per_hour",
            ),
            (self.ship.min_speed_ly_per_hour, "ship.min_speed_ly_per_hour"),
            (self.ship.max_speed_ly_per_hour, "ship.max_speed_ly_per_hour"),
            (self.light_minutes_threshold_ly, "light_minutes_threshold_ly"),
        ];

        for (value, field) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig {
                    message: format!("{field} must be a finite positive number"),
                });
            }
        }

        let ship = &self.ship;
        if !(ship.min_speed_ly_per_hour <= ship.average_speed_ly_per_hour
            && ship.average_speed_ly_per_hour <= ship.max_speed_ly_per_hour)
        {
            return Err(Error::InvalidConfig {
                message: format!(
                    "average speed {} must lie within [{}, {}]",
                    ship.average_speed_ly_per_hour,
                    ship.min_speed_ly_per_hour,
                    ship.max_speed_ly_per_hour
                ),
            });
        }

        Ok(())
    }
}
