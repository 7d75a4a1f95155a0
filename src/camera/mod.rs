//! Camera domain: follow camera plugin wiring and public exports.

mod resources;
mod rig;
mod systems;


pub use resources::{CameraTuning, TiltOffset};
pub use rig::{CameraMode, CameraPose, CameraRig, CameraState, PausePose, RigCommand, RigInput};

use bevy::prelude::*;

use crate::camera::systems::{
    apply_camera_pose, apply_camera_tuning, drive_camera_rig, reset_camera_on_restart,
    spawn_camera, trigger_grav_change,
};
use crate::core::GameState;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraTuning>()
            .add_systems(Startup, spawn_camera)
            .add_systems(
                Update,
                (
                    apply_camera_tuning,
                    reset_camera_on_restart,
                    trigger_grav_change,
                    drive_camera_rig,
                    apply_camera_pose,
                )
                    .chain()
                    .run_if(not(in_state(GameState::Boot))),
            );
    }
}
