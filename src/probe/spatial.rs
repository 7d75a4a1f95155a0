//! Probe domain: avian spatial queries filtered to the environment layer.

use avian3d::prelude::*;
use bevy::prelude::*;

use super::{CollisionProbe, entry_hits, query_direction};
use crate::movement::GameLayer;

/// Upper bound on hits collected by [`CollisionProbe::probe_all`].
const MAX_RAY_HITS: u32 = 16;

/// Borrowed view over the physics world for one tick of probing.
pub struct SpatialProbe<'a, 'w, 's> {
    query: &'a SpatialQuery<'w, 's>,
    filter: SpatialQueryFilter,
}

impl<'a, 'w, 's> SpatialProbe<'a, 'w, 's> {
    pub fn environment(query: &'a SpatialQuery<'w, 's>) -> Self {
        Self {
            query,
            filter: SpatialQueryFilter::from_mask(GameLayer::Environment),
        }
    }
}

impl CollisionProbe for SpatialProbe<'_, '_, '_> {
    fn probe(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32> {
        self.probe_all(origin, direction, max_distance)
            .first()
            .copied()
    }

    fn probe_all(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Vec<f32> {
        let Some(direction) = query_direction(direction, max_distance) else {
            return Vec::new();
        };
        let Ok(direction) = Dir3::new(direction) else {
            return Vec::new();
        };

        // Solid casts report colliders around the origin at distance zero
        let hits = self.query.ray_hits(
            origin,
            direction,
            max_distance,
            MAX_RAY_HITS,
            true,
            &self.filter,
        );
        entry_hits(hits.iter().map(|hit| hit.distance))
    }
}
