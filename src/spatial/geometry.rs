use crate::config::{GalaxyBounds, DEFAULT_LIGHT_MINUTES_THRESHOLD_LY};
use crate::Point;

/// 60 min/hr * 24 hr/day * 365 days/year.
pub const LIGHT_MINUTES_PER_LIGHT_YEAR: f64 = 525_600.0;

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    let dz = b[2] - a[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Sum of consecutive distances along `points`; zero for fewer than two.
pub fn path_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| distance(w[0], w[1])).sum()
}

pub fn in_bounds(point: Point, bounds: &GalaxyBounds) -> bool {
    bounds.contains(point)
}

pub fn light_years_to_light_minutes(light_years: f64) -> f64 {
    light_years * LIGHT_MINUTES_PER_LIGHT_YEAR
}

pub fn light_minutes_to_light_years(light_minutes: f64) -> f64 {
    light_minutes / LIGHT_MINUTES_PER_LIGHT_YEAR
}

/// Renders a distance in light-minutes below the default threshold, otherwise
/// in light-years.
pub fn format_distance(light_years: f64) -> String {
    format_distance_with_threshold(light_years, DEFAULT_LIGHT_MINUTES_THRESHOLD_LY)
}

pub fn format_distance_with_threshold(light_years: f64, threshold_ly: f64) -> String {
    if light_years < threshold_ly {
        format!(
            "{:.2} light minutes",
            light_years_to_light_minutes(light_years)
        )
    } else {
        format!("{:.2} light years", light_years)
    }
}
