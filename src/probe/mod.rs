//! Probe domain: "is there solid geometry along this ray" queries against
//! the static environment.

mod block_grid;
mod spatial;


pub use block_grid::BlockGrid;
pub use spatial::SpatialProbe;

use bevy::prelude::*;

/// Ray queries restricted to level geometry.
///
/// Implementations must be pure: no side effects, and degenerate queries
/// (zero direction, NaN, non-positive distance) answer "no hit". Only entry
/// points count, so a box the ray starts inside is not reported.
pub trait CollisionProbe {
    /// Distance to the nearest surface hit within `max_distance`.
    fn probe(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32>;

    /// Distances to every surface entered within `max_distance`, nearest first.
    fn probe_all(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Vec<f32>;

    fn hits(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> bool {
        self.probe(origin, direction, max_distance).is_some()
    }
}

/// Normalized direction, or `None` when the query cannot be answered.
pub(crate) fn query_direction(direction: Vec3, max_distance: f32) -> Option<Vec3> {
    if !max_distance.is_finite() || max_distance <= 0.0 {
        return None;
    }
    direction.try_normalize()
}

/// Entry distances nearest first, without the zero-distance hits a solid
/// raycast reports for shapes containing the origin.
pub(crate) fn entry_hits(distances: impl IntoIterator<Item = f32>) -> Vec<f32> {
    let mut hits: Vec<f32> = distances
        .into_iter()
        .filter(|distance| *distance > INSIDE_EPSILON)
        .collect();
    hits.sort_by(|a, b| a.total_cmp(b));
    hits
}

/// Hits closer than this started inside the shape.
const INSIDE_EPSILON: f32 = 1e-5;

/// True when every hit lies within `limit` of the origin.
///
/// Only entry points are reported, so a hit further than one box means the
/// second cell along the ray is solid.
pub fn all_hits_within(hits: &[f32], limit: f32) -> bool {
    hits.iter().all(|distance| *distance <= limit)
}
