use crate::spatial::geometry::distance;
use crate::Point;

/// Greedy nearest-neighbour ordering: starting from `points[0]`, repeatedly
/// visit the closest unvisited point.
///
/// Ties go to the candidate that appears first in `points`. Returns indices
/// into `points` in visiting order.
pub fn nearest_neighbor_order(points: &[Point]) -> Vec<usize> {
    if points.is_empty() {
        return Vec::new();
    }

    let mut remaining: Vec<usize> = (1..points.len()).collect();
    let mut order = Vec::with_capacity(points.len());
    let mut current = 0;
    order.push(current);

    while !remaining.is_empty() {
        // min_by keeps the first of equal minima; `remaining` stays in input order
        let Some((slot, _)) = remaining
            .iter()
            .enumerate()
            .map(|(slot, &idx)| (slot, distance(points[current], points[idx])))
            .min_by(|a, b| a.1.total_cmp(&b.1))
        else {
            break;
        };

        current = remaining.remove(slot);
        order.push(current);
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visits_closest_first() {
        let points = [[0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [5.0, 0.0, 0.0]];
        assert_eq!(nearest_neighbor_order(&points), vec![0, 2, 1]);
    }

    #[test]
    fn anchor_stays_first_even_when_far() {
        let points = [
            [100.0, 0.0, 0.0],
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [99.0, 0.0, 0.0],
        ];
        assert_eq!(nearest_neighbor_order(&points), vec![0, 3, 2, 1]);
    }

    #[test]
    fn ties_resolve_to_input_order() {
        let points = [[0.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [1.0, 0.0, 0.0]];
        assert_eq!(nearest_neighbor_order(&points), vec![0, 1, 2]);

        let points = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [-1.0, 0.0, 0.0]];
        assert_eq!(nearest_neighbor_order(&points), vec![0, 1, 2]);
    }

    #[test]
    fn duplicates_are_all_visited() {
        let points = [[2.0, 2.0, 2.0], [2.0, 2.0, 2.0], [0.0, 0.0, 0.0]];
        assert_eq!(nearest_neighbor_order(&points), vec![0, 1, 2]);
    }

    #[test]
    fn trivial_inputs() {
        assert!(nearest_neighbor_order(&[]).is_empty());
        assert_eq!(nearest_neighbor_order(&[[1.0, 1.0, 1.0]]), vec![0]);
    }
}
