use std::env;
use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};
use log::{info, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use igps_engine::spatial::geometry::distance;
use igps_engine::{
    BoundsCheck, FuelEstimate, GalaxyBounds, Location, LocationStore, PlannerConfig, Point, Route,
    RoutePlanner, RouteSegment, TravelTime, Waypoint, WaypointInput,
};

const CONFIG_ENV: &str = "IGPS_CONFIG";

static DEMO_LOCATIONS: Lazy<Vec<Location>> = Lazy::new(|| {
    vec![
        Location::new("Solar System", "Star System", [23_000.0, 250.0, 1_000.0]),
        Location::new("Sagittarius A*", "Black Hole", [0.0, 0.0, 0.0]),
        Location::new("Alpha Centauri", "Star System", [23_004.0, 250.0, 1_001.0]),
        Location::new("Andromeda Station", "Space Station", [45_000.0, 300.0, 2_000.0]),
        Location::new("Orion Nebula", "Nebula", [24_000.0, 100.0, -1_500.0]),
        Location::new("Kepler Colony", "Mining Station", [15_000.0, -200.0, 500.0]),
    ]
});

fn demo_store(bounds: GalaxyBounds) -> LocationStore {
    let mut store = LocationStore::with_bounds(bounds);
    for location in DEMO_LOCATIONS.iter().cloned() {
        match store.add(location) {
            Ok(BoundsCheck::Within) => {}
            Ok(BoundsCheck::OutOfBounds) => warn!("demo location outside configured galaxy"),
            Err(err) => warn!("skipping demo location: {err}"),
        }
    }
    store
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum PlannerRequest {
    CreateRoute {
        waypoints: Vec<Value>,
    },
    OptimizeRoute {
        waypoints: Vec<Value>,
    },
    AddStop {
        waypoints: Vec<Value>,
        stop: Value,
    },
    ValidateCoordinates {
        position: Point,
    },
    Distance {
        from: Value,
        to: Value,
    },
    Location {
        location: Value,
    },
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum PlannerResponse {
    Route(RouteSummary),
    ValidateCoordinates {
        valid: bool,
    },
    Distance {
        distance_ly: f64,
        formatted: String,
    },
    Location {
        name: Option<String>,
        category: Option<String>,
        position: Point,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Serialize)]
struct RouteSummary {
    order: Vec<String>,
    segments: Vec<RouteSegment>,
    total_distance_ly: f64,
    formatted_distance: String,
    /// Index the new stop landed at, for `add_stop`.
    inserted_at: Option<usize>,
    fuel: FuelEstimate,
    travel_time: TravelTime,
    travel_time_display: String,
}

fn parse_inputs(values: &[Value]) -> igps_engine::Result<Vec<WaypointInput>> {
    values.iter().map(WaypointInput::from_json).collect()
}

fn summarize(
    planner: &RoutePlanner<'_>,
    mut route: Route,
    inserted_at: Option<usize>,
) -> igps_engine::Result<PlannerResponse> {
    let total_distance_ly = route.ensure_total_distance();
    let fuel = planner.fuel_required(&mut route);
    let travel_time = planner.travel_time(&mut route, None)?;
    Ok(PlannerResponse::Route(RouteSummary {
        order: route.labels(),
        segments: route.segments(),
        total_distance_ly,
        formatted_distance: planner.format_distance(total_distance_ly),
        inserted_at,
        fuel,
        travel_time_display: travel_time.to_string(),
        travel_time,
    }))
}

fn evaluate(
    planner: &RoutePlanner<'_>,
    request: PlannerRequest,
) -> igps_engine::Result<PlannerResponse> {
    match request {
        PlannerRequest::CreateRoute { waypoints } => {
            let route = planner.create_route(&parse_inputs(&waypoints)?)?;
            summarize(planner, route, None)
        }
        PlannerRequest::OptimizeRoute { waypoints } => {
            let route = planner.optimize_route(&parse_inputs(&waypoints)?)?;
            summarize(planner, route, None)
        }
        PlannerRequest::AddStop { waypoints, stop } => {
            let mut route = planner.create_route(&parse_inputs(&waypoints)?)?;
            let index = planner.add_stop(&mut route, &WaypointInput::from_json(&stop)?)?;
            summarize(planner, route, Some(index))
        }
        PlannerRequest::ValidateCoordinates { position } => {
            Ok(PlannerResponse::ValidateCoordinates {
                valid: planner.validate_coordinates(position),
            })
        }
        PlannerRequest::Distance { from, to } => {
            let from = planner.resolve(&WaypointInput::from_json(&from)?)?;
            let to = planner.resolve(&WaypointInput::from_json(&to)?)?;
            let distance_ly = distance(from.position(), to.position());
            Ok(PlannerResponse::Distance {
                distance_ly,
                formatted: planner.format_distance(distance_ly),
            })
        }
        PlannerRequest::Location { location } => {
            let waypoint = planner.location_information(&WaypointInput::from_json(&location)?)?;
            Ok(match waypoint {
                Waypoint::Location(location) => {
                    let location = location.borrow();
                    PlannerResponse::Location {
                        name: Some(location.name.clone()),
                        category: Some(location.category.clone()),
                        position: location.position,
                    }
                }
                Waypoint::Coordinates { position } => PlannerResponse::Location {
                    name: None,
                    category: None,
                    position,
                },
            })
        }
    }
}

fn load_config() -> Result<PlannerConfig> {
    match env::var(CONFIG_ENV) {
        Ok(path) => {
            info!("loading planner config from {path}");
            PlannerConfig::from_path(&path)
                .with_context(|| format!("failed to load config from {path}"))
        }
        Err(_) => Ok(PlannerConfig::default()),
    }
}

fn read_request() -> Result<String> {
    match env::args().nth(1) {
        Some(path) => {
            fs::read_to_string(&path).with_context(|| format!("failed to read request {path}"))
        }
        None => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read request from stdin")?;
            Ok(raw)
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let config = load_config()?;
    let store = demo_store(config.galaxy);
    let planner = RoutePlanner::with_config(&store, config);

    let raw = read_request()?;
    let request: PlannerRequest =
        serde_json::from_str(&raw).context("request is not a valid planner request")?;

    let response = evaluate(&planner, request).unwrap_or_else(|err| PlannerResponse::Error {
        message: err.to_string(),
    });
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_store_shares_planner_bounds() {
        let config = PlannerConfig::from_json_str(r#"{ "galaxy": { "radius_ly": 20000 } }"#)
            .expect("config");
        let store = demo_store(config.galaxy);
        let planner = RoutePlanner::with_config(&store, config);

        assert_eq!(store.bounds(), &planner.config().galaxy);
        assert_eq!(store.len(), DEMO_LOCATIONS.len());
        assert!(!planner.validate_coordinates([23_000.0, 250.0, 1_000.0]));
    }

    #[test]
    fn location_request_reads_store() {
        let store = demo_store(GalaxyBounds::default());
        let planner = RoutePlanner::new(&store);
        let request: PlannerRequest =
            serde_json::from_str(r#"{ "kind": "location", "location": "Orion Nebula" }"#)
                .expect("request");
        match evaluate(&planner, request).expect("response") {
            PlannerResponse::Location { name, category, .. } => {
                assert_eq!(name.as_deref(), Some("Orion Nebula"));
                assert_eq!(category.as_deref(), Some("Nebula"));
            }
            other => panic!("unexpected response {other:?}"),
        }
    }
}
