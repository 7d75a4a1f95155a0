//! Movement domain: components and physics layers for the rolling player.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::movement::motor::AnimEvent;

/// Length of the landing squash.
const IMPACT_TIME: f32 = 0.18;
/// Height lost at the start of the landing squash, as a fraction of the sphere.
const IMPACT_SQUASH: f32 = 0.3;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Level boxes. The only layer locomotion probes look at.
    Environment,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for the visible sphere mesh that spins while rolling.
#[derive(Component, Debug)]
pub struct PlayerSphere;

/// Scale cues played on the player's visuals, fed by `PlayerAnimEvent`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct SphereAnimation {
    impact_left: f32,
    warp_left: f32,
    warp_time: f32,
}

impl SphereAnimation {
    pub fn play(&mut self, cue: AnimEvent, warp_time: f32) {
        match cue {
            AnimEvent::Moving(true) => self.impact_left = 0.0,
            // Also sent on reset, which must not leave the sphere shrunk
            AnimEvent::Moving(false) => self.warp_left = 0.0,
            AnimEvent::Impact => self.impact_left = IMPACT_TIME,
            AnimEvent::Warp => {
                self.impact_left = 0.0;
                self.warp_time = warp_time;
                self.warp_left = warp_time;
            }
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.impact_left = (self.impact_left - dt).max(0.0);
        self.warp_left = (self.warp_left - dt).max(0.0);
    }

    /// Scale in the body frame, where `Y` is the player's up. Shrinks to
    /// nothing over the warp dissolve, flattens briefly after a landing.
    pub fn scale(&self) -> Vec3 {
        if self.warp_left > 0.0 && self.warp_time > 0.0 {
            return Vec3::splat(self.warp_left / self.warp_time);
        }
        if self.impact_left > 0.0 {
            let squash = IMPACT_SQUASH * self.impact_left / IMPACT_TIME;
            return Vec3::new(1.0 + squash * 0.5, 1.0 - squash, 1.0 + squash * 0.5);
        }
        Vec3::ONE
    }
}
