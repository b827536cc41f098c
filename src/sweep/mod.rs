pub mod insertion;
pub mod nearest_neighbor;
