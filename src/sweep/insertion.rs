use crate::spatial::geometry::path_length;
use crate::Point;

/// Finds the index in `1..=points.len()` at which inserting `candidate` gives
/// the shortest path, never index 0, so the start of the path is kept.
///
/// Returns the index and the resulting path length. Ties go to the smallest
/// index. `None` when `points` is empty.
pub fn best_insertion_index(points: &[Point], candidate: Point) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    let mut trial: Vec<Point> = Vec::with_capacity(points.len() + 1);

    for index in 1..=points.len() {
        trial.clear();
        trial.extend_from_slice(&points[..index]);
        trial.push(candidate);
        trial.extend_from_slice(&points[index..]);

        let length = path_length(&trial);
        match best {
            Some((_, best_length)) if length >= best_length => {}
            _ => best = Some((index, length)),
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn inserts_between_when_on_the_way() {
        let points = [[0.0, 0.0, 0.0], [10.0, 0.0, 0.0]];
        let (index, length) = best_insertion_index(&points, [5.0, 0.0, 0.0]).expect("index");
        assert_eq!(index, 1);
        assert_approx_eq!(length, 10.0);
    }

    #[test]
    fn appends_when_beyond_the_end() {
        let points = [[0.0, 0.0, 0.0], [10.0, 0.0, 0.0]];
        let (index, length) = best_insertion_index(&points, [15.0, 0.0, 0.0]).expect("index");
        assert_eq!(index, 2);
        assert_approx_eq!(length, 15.0);
    }

    #[test]
    fn never_picks_zero_even_if_shorter() {
        // Prepending would cost 5, but index 0 is never considered.
        let points = [[5.0, 0.0, 0.0], [10.0, 0.0, 0.0]];
        let (index, length) = best_insertion_index(&points, [0.0, 0.0, 0.0]).expect("index");
        assert_eq!(index, 1);
        assert_approx_eq!(length, 15.0);
    }

    #[test]
    fn ties_take_the_smallest_index() {
        let points = [[0.0, 0.0, 0.0], [0.0, 0.0, 0.0]];
        let (index, _) = best_insertion_index(&points, [0.0, 0.0, 0.0]).expect("index");
        assert_eq!(index, 1);
    }

    #[test]
    fn single_point_appends() {
        let (index, length) =
            best_insertion_index(&[[0.0, 0.0, 0.0]], [3.0, 4.0, 0.0]).expect("index");
        assert_eq!(index, 1);
        assert_approx_eq!(length, 5.0);
        assert!(best_insertion_index(&[], [1.0, 1.0, 1.0]).is_none());
    }
}
