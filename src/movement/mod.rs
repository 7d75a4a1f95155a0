//! Movement domain: grid locomotion plugin wiring and public exports.

mod body;
mod components;
mod events;
mod motor;
mod resources;
mod state;
mod systems;
mod warp;

#[cfg(test)]
mod tests;

pub use body::Body;
pub use components::{GameLayer, Player, PlayerSphere, SphereAnimation};
pub use events::{GravityChangedEvent, PlayerAnimEvent, PlayerDiedEvent};
pub use motor::{AnimEvent, MotorContext, MotorEvent, PlayerMotor, SpawnPoint};
pub use resources::{MovementInput, MovementTuning, Tilt};
pub use state::{
    BlockLevel, EdgeRoll, FallTracker, GravityShift, LocomotionKind, LocomotionState, MoveIntent,
    ShiftOrigin, WarpJump, WarpPhase, WarpResult,
};
pub use warp::{select_warp_face, warp_probe_order};

use bevy::prelude::*;

use crate::core::GameState;
use crate::movement::systems::{
    apply_tuning_changes, halt_player_on_death, play_sphere_animations, publish_motor_events,
    read_input, reset_player_on_restart, sync_player_transform, tick_player_motor,
};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .add_message::<PlayerDiedEvent>()
            .add_message::<GravityChangedEvent>()
            .add_message::<PlayerAnimEvent>()
            .add_systems(
                FixedUpdate,
                (tick_player_motor, publish_motor_events)
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                Update,
                (
                    read_input,
                    apply_tuning_changes,
                    halt_player_on_death,
                    reset_player_on_restart,
                    play_sphere_animations,
                    sync_player_transform,
                )
                    .chain(),
            );
    }
}
