//! Camera domain: tuning resource.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Camera offset at full tilt, along the follow direction and along up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
pub struct TiltOffset {
    pub dir: f32,
    pub up: f32,
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct CameraTuning {
    /// Offset along the player's forward. Negative puts the camera behind.
    pub dir_offset: f32,
    pub up_offset: f32,
    /// Height of the look-at point above the player.
    pub look_at_up_offset: f32,
    /// Progress per second of turns and gravity blends (1.0 = one second).
    pub rot_speed: f32,
    pub tilt_speed: f32,
    pub follow_speed: f32,
    pub tilt_down: TiltOffset,
    pub tilt_up: TiltOffset,
    /// Fraction of `follow_speed` used while tracking a warp.
    pub warp_follow_factor: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            dir_offset: -1.6,
            up_offset: 1.3,
            look_at_up_offset: 0.71762,
            rot_speed: 0.5,
            tilt_speed: 0.5,
            follow_speed: 1.0,
            tilt_down: TiltOffset {
                dir: -0.01,
                up: 1.3,
            },
            tilt_up: TiltOffset { dir: -0.7, up: 0.2 },
            warp_follow_factor: 0.75,
        }
    }
}
