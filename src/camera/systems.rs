//! Camera domain: spawning, driving and mirroring the rig into the scene.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::camera::resources::CameraTuning;
use crate::camera::rig::{CameraRig, PausePose, RigCommand, RigInput};
use crate::core::GameState;
use crate::grid::Orientation;
use crate::level::{LevelRestartEvent, Resettable};
use crate::movement::{
    GravityChangedEvent, LocomotionState, MovementInput, MovementTuning, Player, PlayerMotor,
};

/// Intro length used until a level configures its own.
const DEFAULT_INTRO_SECONDS: f32 = 2.0;

pub(crate) fn spawn_camera(
    mut commands: Commands,
    tuning: Res<CameraTuning>,
    movement: Res<MovementTuning>,
) {
    let rig = CameraRig::new(
        *tuning,
        movement.metrics(1.0),
        Orientation::default(),
        PausePose::default(),
        DEFAULT_INTRO_SECONDS,
    );
    let pose = rig.pose();

    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(pose.position).looking_at(pose.look_at, pose.up),
        rig,
        Resettable,
    ));
}

pub(crate) fn drive_camera_rig(
    time: Res<Time>,
    input: Res<MovementInput>,
    game_state: Res<State<GameState>>,
    mut rigs: Query<&mut CameraRig>,
    mut players: Query<&mut PlayerMotor, With<Player>>,
) {
    let Ok(mut motor) = players.single_mut() else {
        return;
    };

    let warp_target = match motor.state() {
        LocomotionState::Warping(jump) => Some(jump.target),
        _ => None,
    };
    let rig_input = RigInput {
        horizontal: input.horizontal,
        back_held: input.back_held,
        tilt: input.tilt,
        player_kind: motor.kind(),
        player_position: motor.body().position,
        player_orientation: motor.orientation(),
        warp_target,
        game_default: *game_state.get() == GameState::Playing,
    };

    for mut rig in &mut rigs {
        for command in rig.update(&rig_input, time.delta_secs()) {
            match command {
                RigCommand::SetPlayerForward(forward) => {
                    if let Err(err) = motor.set_forward(forward) {
                        warn!("Camera handed back an unusable direction: {}", err);
                    }
                }
            }
        }
    }
}

pub(crate) fn trigger_grav_change(
    mut events: MessageReader<GravityChangedEvent>,
    mut rigs: Query<&mut CameraRig>,
) {
    if events.read().last().is_none() {
        return;
    }

    for mut rig in &mut rigs {
        rig.trigger_grav_change();
    }
}

pub(crate) fn reset_camera_on_restart(
    mut events: MessageReader<LevelRestartEvent>,
    players: Query<&PlayerMotor, With<Player>>,
    mut rigs: Query<&mut CameraRig, With<Resettable>>,
) {
    if events.read().last().is_none() {
        return;
    }

    let start = players
        .single()
        .map(|motor| motor.spawn().orientation)
        .unwrap_or_default();
    for mut rig in &mut rigs {
        rig.reset(start);
    }
}

pub(crate) fn apply_camera_tuning(tuning: Res<CameraTuning>, mut rigs: Query<&mut CameraRig>) {
    if !tuning.is_changed() {
        return;
    }

    for mut rig in &mut rigs {
        rig.set_tuning(*tuning);
    }
}

pub(crate) fn apply_camera_pose(mut cameras: Query<(&CameraRig, &mut Transform)>) {
    for (rig, mut transform) in &mut cameras {
        let pose = rig.pose();
        *transform = Transform::from_translation(pose.position).looking_at(pose.look_at, pose.up);
    }
}
