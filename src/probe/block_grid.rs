//! Probe domain: lattice of solid boxes answering ray queries directly.

use bevy::prelude::*;
use std::collections::HashSet;

use super::{CollisionProbe, entry_hits, query_direction};

/// A set of occupied lattice cells, each a solid cube of `box_size`.
///
/// Used as the synthetic world in tests and for headless level checks.
#[derive(Debug, Clone, Default)]
pub struct BlockGrid {
    box_size: f32,
    cells: HashSet<IVec3>,
}

impl BlockGrid {
    pub fn new(box_size: f32) -> Self {
        Self {
            box_size,
            cells: HashSet::new(),
        }
    }

    pub fn from_cells(box_size: f32, cells: impl IntoIterator<Item = IVec3>) -> Self {
        let mut grid = Self::new(box_size);
        for cell in cells {
            grid.insert(cell);
        }
        grid
    }

    /// Returns false if the cell was already solid.
    pub fn insert(&mut self, cell: IVec3) -> bool {
        self.cells.insert(cell)
    }

    fn entry_distances(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Vec<f32> {
        if !origin.is_finite() || self.box_size <= 0.0 {
            return Vec::new();
        }

        let half = Vec3::splat(self.box_size * 0.5);
        entry_hits(
            self.cells
                .iter()
                .filter_map(|cell| {
                    let center = cell.as_vec3() * self.box_size;
                    ray_box_entry(origin, direction, center - half, center + half)
                })
                .filter(|distance| *distance <= max_distance),
        )
    }
}

impl CollisionProbe for BlockGrid {
    fn probe(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32> {
        let direction = query_direction(direction, max_distance)?;
        self.entry_distances(origin, direction, max_distance)
            .first()
            .copied()
    }

    fn probe_all(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Vec<f32> {
        match query_direction(direction, max_distance) {
            Some(direction) => self.entry_distances(origin, direction, max_distance),
            None => Vec::new(),
        }
    }
}

/// Slab test. Rays starting inside the box report nothing.
fn ray_box_entry(origin: Vec3, direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];

        if d.abs() < 1e-8 {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t1 = (min[axis] - o) * inv;
        let mut t2 = (max[axis] - o) * inv;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }

        t_enter = t_enter.max(t1);
        t_exit = t_exit.min(t2);
        if t_enter > t_exit {
            return None;
        }
    }

    (t_enter >= 0.0).then_some(t_enter)
}
