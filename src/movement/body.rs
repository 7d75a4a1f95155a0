//! Movement domain: the kinematic body the locomotion machine drives.

use bevy::prelude::*;

/// Position and physics flags of the player.
///
/// The body is kinematic: rolling writes the position directly, and
/// gravity is only integrated while falling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vec3,
    pub velocity: Vec3,
    pub gravity_enabled: bool,
    pub collision_enabled: bool,
}

impl Body {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            gravity_enabled: true,
            collision_enabled: true,
        }
    }

    pub fn stop(&mut self) {
        self.velocity = Vec3::ZERO;
    }

    /// Restores the flags any state may have switched off.
    pub fn restore_flags(&mut self) {
        self.gravity_enabled = true;
        self.collision_enabled = true;
    }
}
