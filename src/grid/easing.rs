//! Grid domain: retargetable ease-in interpolation and step helpers.

use bevy::prelude::*;

/// Result of one evaluation of [`quad_ease_in`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EaseStep {
    pub position: Vec3,
    pub arrived: bool,
}

/// Position on the segment `start -> target` after `t` seconds.
///
/// Accelerates quadratically for `ease_in / 2` seconds, then moves at
/// `speed`. There is no ease-out and the result never passes `target`, so
/// the target may be moved while an interpolation is running.
pub fn quad_ease_in(start: Vec3, target: Vec3, t: f32, ease_in: f32, speed: f32) -> EaseStep {
    let delta = target - start;
    let length = delta.length();
    if length <= f32::EPSILON {
        return EaseStep {
            position: target,
            arrived: true,
        };
    }

    let travelled = if ease_in > 0.0 && t <= ease_in * 0.5 {
        speed * t * t / ease_in
    } else {
        speed * (t - ease_in * 0.25)
    };
    let travelled = travelled.clamp(0.0, length);
    let arrived = travelled >= length;

    EaseStep {
        position: if arrived {
            target
        } else {
            start + delta / length * travelled
        },
        arrived,
    }
}

pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

pub fn move_towards_vec(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let delta = target - current;
    let distance = delta.length();
    if distance <= max_delta || distance <= f32::EPSILON {
        target
    } else {
        current + delta / distance * max_delta
    }
}
