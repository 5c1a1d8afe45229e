mod distances;

pub use distances::{clear_distances, compute_distances, label_distances, max_distance};
