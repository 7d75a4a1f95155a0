//! Debug domain: overlay text and spawning.

use bevy::prelude::*;

use crate::camera::CameraRig;
use crate::movement::PlayerMotor;

/// Marker for debug info overlay
#[derive(Component, Debug)]
pub struct DebugInfoOverlay;

pub(crate) fn spawn_debug_info_overlay(commands: &mut Commands) {
    commands.spawn((
        DebugInfoOverlay,
        Text::new("Loading..."),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.9, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            bottom: Val::Px(20.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ZIndex(500),
    ));
}

pub fn describe_player(motor: &PlayerMotor) -> String {
    let body = motor.body();
    let orientation = motor.orientation();
    format!(
        "Locomotion: {:?}\nPos: ({:.2}, {:.2}, {:.2})\nUp: {:?}  Fwd: {:?}\nGravity: {:?} ({})\nCollision: {}",
        motor.kind(),
        body.position.x,
        body.position.y,
        body.position.z,
        orientation.up().round(),
        orientation.forward().round(),
        motor.gravity().round(),
        if body.gravity_enabled { "on" } else { "off" },
        if body.collision_enabled { "on" } else { "off" },
    )
}

pub fn describe_camera(rig: &CameraRig) -> String {
    let (dir_offset, up_offset) = rig.offsets();
    format!(
        "Camera: {:?}\nOffsets: {:.2} / {:.2}",
        rig.mode(),
        dir_offset,
        up_offset
    )
}
