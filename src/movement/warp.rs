//! Movement domain: picking the new gravity face after a warp.

use bevy::prelude::*;

use crate::grid::Orientation;
use crate::movement::state::WarpResult;
use crate::probe::CollisionProbe;

/// Candidate faces relative to the pre-warp basis, highest priority first:
/// `-up, forward, forward x up, up x forward, -forward, up`.
pub fn warp_probe_order(orientation: &Orientation) -> [Vec3; 6] {
    let up = orientation.up();
    let forward = orientation.forward();
    [
        -up,
        forward,
        forward.cross(up),
        up.cross(forward),
        -forward,
        up,
    ]
}

/// Probes the six candidates from `origin` in priority order and returns
/// the first solid face with the basis the player should adopt on it.
pub fn select_warp_face(
    probe: &dyn CollisionProbe,
    origin: Vec3,
    orientation: &Orientation,
    reach: f32,
) -> WarpResult {
    let face = warp_probe_order(orientation)
        .into_iter()
        .find(|direction| probe.hits(origin, *direction, reach));

    match face {
        Some(face) => WarpResult {
            face: Some(face),
            orientation: orientation.settle_on_face(face),
        },
        None => WarpResult {
            face: None,
            orientation: *orientation,
        },
    }
}
