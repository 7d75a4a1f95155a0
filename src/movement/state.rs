//! Movement domain: locomotion states and their per-state bookkeeping.

use bevy::prelude::*;

use crate::grid::Orientation;

/// Data-less view of [`LocomotionState`], shared with the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LocomotionKind {
    #[default]
    Idle,
    Moving,
    GravityChange,
    Warping,
    Falling,
}

/// Height of the next block relative to the one the player stands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockLevel {
    /// Nothing ahead: roll over the edge onto the front face.
    Down,
    /// Solid ground ahead on the same level.
    Level,
    /// A block one level up directly ahead: climb onto its face.
    Up,
}

impl BlockLevel {
    pub fn as_i8(self) -> i8 {
        match self {
            BlockLevel::Down => -1,
            BlockLevel::Level => 0,
            BlockLevel::Up => 1,
        }
    }

    /// Fraction of a box travelled before the leg ends.
    pub fn reach(self, radius_in_boxes: f32) -> f32 {
        match self {
            BlockLevel::Level => 1.0,
            BlockLevel::Down => 0.5,
            BlockLevel::Up => 0.5 - radius_in_boxes,
        }
    }
}

/// One leg of rolling, created on entering Moving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveIntent {
    pub level: BlockLevel,
    pub start: Vec3,
    pub target: Vec3,
    pub elapsed: f32,
    pub ease_in: f32,
}

/// Continuous quarter roll about the edge under the sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRoll {
    pub contact_point: Vec3,
    pub axis: Vec3,
    pub degrees_done: f32,
}

/// Why the gravity axis is changing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShiftOrigin {
    EdgeRoll,
    Climb,
    Warp(WarpResult),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityShift {
    pub origin: ShiftOrigin,
    /// `Some` while a gradual roll is still in progress.
    pub roll: Option<EdgeRoll>,
}

/// Supporting face chosen after a warp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WarpResult {
    /// Direction from the player to the new floor, `None` when nothing
    /// was found and the player simply falls.
    pub face: Option<Vec3>,
    pub orientation: Orientation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarpPhase {
    /// Fading out at the old position.
    Dissolving,
    /// Shown again at the target, waiting for the hover to end.
    Hovering,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WarpJump {
    pub target: Vec3,
    pub forward: bool,
    pub phase: WarpPhase,
    pub elapsed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FallTracker {
    /// Time spent with nothing under the player within the long probe.
    pub unsupported: f32,
    pub grounded: bool,
    pub death_reported: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LocomotionState {
    #[default]
    Idle,
    Moving(MoveIntent),
    GravityChange(GravityShift),
    Warping(WarpJump),
    Falling(FallTracker),
}

impl LocomotionState {
    pub fn kind(&self) -> LocomotionKind {
        match self {
            LocomotionState::Idle => LocomotionKind::Idle,
            LocomotionState::Moving(_) => LocomotionKind::Moving,
            LocomotionState::GravityChange(_) => LocomotionKind::GravityChange,
            LocomotionState::Warping(_) => LocomotionKind::Warping,
            LocomotionState::Falling(_) => LocomotionKind::Falling,
        }
    }
}
