//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::grid::GridMetrics;

#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct MovementTuning {
    /// Top rolling speed in units per second.
    pub speed: f32,
    /// Duration of the quadratic ease-in; the ramp itself lasts half of it.
    pub ease_in_time: f32,
    pub sphere_radius: f32,
    /// Length of the forward/side probes, in boxes.
    pub probe_length: f32,
    /// Ground probe while falling, in sphere radii.
    pub landing_probe_factor: f32,
    /// Ground probe while idle, in sphere radii.
    pub idle_probe_factor: f32,
    /// Reach of the warp face probes, in boxes.
    pub warp_face_probe: f32,
    /// Time between the warp trigger and the sphere reappearing.
    pub warp_dissolve_time: f32,
    /// Time the sphere hovers at the warp target before gravity is resolved.
    pub hover_time: f32,
    /// Distance below which a falling player still counts as over ground.
    pub fall_death_probe: f32,
    /// Seconds of falling over nothing before the player dies.
    pub fall_death_time: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            speed: 3.5,
            ease_in_time: 0.3,
            sphere_radius: 0.25,
            probe_length: 1.6,
            landing_probe_factor: 1.25,
            idle_probe_factor: 1.15,
            warp_face_probe: 1.0,
            warp_dissolve_time: 0.25,
            hover_time: 0.3,
            fall_death_probe: 50.0,
            fall_death_time: 1.5,
        }
    }
}

impl MovementTuning {
    /// Degrees per second while rolling over an edge. A quarter turn takes
    /// as long as rolling half a box at full speed.
    pub fn edge_angular_speed(&self, box_size: f32) -> f32 {
        90.0 * self.speed / (box_size * 0.5)
    }

    pub fn metrics(&self, box_size: f32) -> GridMetrics {
        GridMetrics::new(box_size, self.sphere_radius)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tilt {
    #[default]
    Level,
    Up,
    Down,
}

/// Input sampled once per frame. `warp_pressed` is latched until a fixed
/// tick consumes it so a press between ticks is never lost.
#[derive(Resource, Debug, Clone, Default)]
pub struct MovementInput {
    pub forward_held: bool,
    pub back_held: bool,
    /// -1 left, 0 none, 1 right
    pub horizontal: i8,
    pub warp_pressed: bool,
    pub tilt: Tilt,
}
