//! Movement domain: messages emitted by the locomotion machine.

use bevy::ecs::message::Message;

use crate::grid::Orientation;
use crate::movement::motor::AnimEvent;

/// The player fell for too long over nothing, or touched a hazard.
#[derive(Debug, Clone, Copy)]
pub struct PlayerDiedEvent;

impl Message for PlayerDiedEvent {}

/// The gravity axis changed. Triggers the camera's gravity-change blend.
#[derive(Debug, Clone, Copy)]
pub struct GravityChangedEvent {
    pub orientation: Orientation,
}

impl Message for GravityChangedEvent {}

/// Presentation cue for the sphere's visuals.
#[derive(Debug, Clone, Copy)]
pub struct PlayerAnimEvent(pub AnimEvent);

impl Message for PlayerAnimEvent {}
