//! Grid domain: lattice metrics and snapping.

use bevy::prelude::*;

/// Size of a level box and radius of the rolling sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    pub box_size: f32,
    pub sphere_radius: f32,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self {
            box_size: 1.0,
            sphere_radius: 0.25,
        }
    }
}

impl GridMetrics {
    pub fn new(box_size: f32, sphere_radius: f32) -> Self {
        Self {
            box_size,
            sphere_radius,
        }
    }

    /// Distance between the center of the cell the sphere occupies and the
    /// sphere's resting center.
    pub fn rest_offset(&self) -> f32 {
        self.box_size * 0.5 - self.sphere_radius
    }

    /// Snaps only the component(s) along `up` to the resting height.
    ///
    /// Idle animations introduce small drift on the up axis; this keeps the
    /// sphere glued to its face.
    pub fn snap_up(&self, position: Vec3, up: Vec3) -> Vec3 {
        let mask = up.round().abs();
        let rounded = self.round_to_lattice(position);
        let snapped = Vec3::select(mask.cmpgt(Vec3::ZERO), rounded, position);
        snapped - self.rest_offset() * up
    }

    /// Snaps every component to the lattice, then drops to resting height.
    pub fn snap_all(&self, position: Vec3, up: Vec3) -> Vec3 {
        self.round_to_lattice(position) - self.rest_offset() * up
    }

    /// Lattice cell containing `position`.
    pub fn cell_of(&self, position: Vec3) -> IVec3 {
        (position / self.box_size).round().as_ivec3()
    }

    pub fn cell_center(&self, cell: IVec3) -> Vec3 {
        cell.as_vec3() * self.box_size
    }

    /// Resting center of a sphere standing on top of `cell` with gravity
    /// opposite to `up`.
    pub fn rest_position_on(&self, cell: IVec3, up: Vec3) -> Vec3 {
        self.cell_center(cell) + (self.box_size * 0.5 + self.sphere_radius) * up
    }

    fn round_to_lattice(&self, position: Vec3) -> Vec3 {
        (position / self.box_size).round() * self.box_size
    }
}
