//! Movement domain: fixed-step locomotion systems and their message fan-out.

use avian3d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::camera::CameraRig;
use crate::core::GameplayPaused;
use crate::level::{LevelRestartEvent, Resettable};
use crate::movement::{
    AnimEvent, GravityChangedEvent, MotorContext, MotorEvent, MovementInput, MovementTuning,
    Player, PlayerAnimEvent, PlayerDiedEvent, PlayerMotor, PlayerSphere, SphereAnimation,
};
use crate::probe::SpatialProbe;

pub(crate) fn tick_player_motor(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    paused: Res<GameplayPaused>,
    mut input: ResMut<MovementInput>,
    rigs: Query<&CameraRig>,
    mut players: Query<&mut PlayerMotor, With<Player>>,
) {
    let dt = time.delta_secs();
    let probe = SpatialProbe::environment(&spatial_query);

    // No camera yet (first frame of a level) counts as default
    let camera_default = rigs.iter().all(|rig| rig.is_default());
    let ctx = MotorContext {
        camera_default,
        paused: paused.is_paused(),
    };

    for mut motor in &mut players {
        motor.tick(&input, ctx, &probe, dt);
    }

    input.warp_pressed = false;
}

pub(crate) fn publish_motor_events(
    mut players: Query<&mut PlayerMotor, With<Player>>,
    mut died: MessageWriter<PlayerDiedEvent>,
    mut gravity_changed: MessageWriter<GravityChangedEvent>,
    mut anim: MessageWriter<PlayerAnimEvent>,
) {
    for mut motor in &mut players {
        for event in motor.drain_events() {
            match event {
                MotorEvent::Died => {
                    died.write(PlayerDiedEvent);
                }
                MotorEvent::GravityChanged(orientation) => {
                    debug!(
                        "Gravity now {:?} (forward {:?})",
                        -orientation.up(),
                        orientation.forward()
                    );
                    gravity_changed.write(GravityChangedEvent { orientation });
                }
                MotorEvent::StateChanged { from, to } => {
                    debug!("Locomotion {:?} -> {:?}", from, to);
                }
                MotorEvent::Anim(cue) => {
                    anim.write(PlayerAnimEvent(cue));
                }
            }
        }
    }
}

/// Death is a forced exit: whatever the player was doing stops in place.
pub(crate) fn halt_player_on_death(
    mut events: MessageReader<PlayerDiedEvent>,
    mut players: Query<&mut PlayerMotor, With<Player>>,
) {
    if events.read().last().is_none() {
        return;
    }

    for mut motor in &mut players {
        motor.halt();
    }
}

pub(crate) fn reset_player_on_restart(
    mut events: MessageReader<LevelRestartEvent>,
    mut input: ResMut<MovementInput>,
    mut players: Query<&mut PlayerMotor, (With<Player>, With<Resettable>)>,
) {
    if events.read().last().is_none() {
        return;
    }

    *input = MovementInput::default();
    for mut motor in &mut players {
        motor.reset();
        info!("Player reset to spawn {:?}", motor.spawn().position);
    }
}

/// Applies tuning edits (dev overlay, reloaded defaults) to the live player.
pub(crate) fn apply_tuning_changes(
    tuning: Res<MovementTuning>,
    mut players: Query<&mut PlayerMotor, With<Player>>,
) {
    if !tuning.is_changed() {
        return;
    }

    for mut motor in &mut players {
        motor.set_tuning(*tuning);
    }
}

pub(crate) fn play_sphere_animations(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut events: MessageReader<PlayerAnimEvent>,
    mut players: Query<&mut SphereAnimation, With<Player>>,
) {
    let cues: Vec<AnimEvent> = events.read().map(|event| event.0).collect();

    for mut animation in &mut players {
        for cue in &cues {
            animation.play(*cue, tuning.warp_dissolve_time);
        }
        animation.advance(time.delta_secs());
    }
}

pub(crate) fn sync_player_transform(
    mut players: Query<(&PlayerMotor, &SphereAnimation, &mut Transform), With<Player>>,
    mut spheres: Query<&mut Transform, (With<PlayerSphere>, Without<Player>)>,
) {
    for (motor, animation, mut transform) in &mut players {
        let up = motor.orientation().up();
        let scale = animation.scale();

        // Scaled about the center, so drop it to keep the sphere on the floor
        let sink = motor.metrics().sphere_radius * (1.0 - scale.y);
        transform.translation = motor.body().position - up * sink;
        transform.rotation = motor.orientation().body_rotation();
        transform.scale = scale;

        // The sphere is a child; its spin is stored in world space
        let local_spin = transform.rotation.inverse() * motor.sphere_rotation();
        for mut sphere in &mut spheres {
            sphere.rotation = local_spin;
        }
    }
}
