//! Movement domain: input sampling for locomotion and the camera.

use bevy::prelude::*;

use crate::movement::{MovementInput, Tilt};

pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<MovementInput>) {
    input.forward_held = keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp);
    input.back_held = keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown);

    let mut horizontal = 0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        horizontal -= 1;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        horizontal += 1;
    }
    input.horizontal = horizontal;

    // Latched: cleared by the fixed tick that consumes it
    if keyboard.just_pressed(KeyCode::Space) {
        input.warp_pressed = true;
    }

    input.tilt = match (
        keyboard.pressed(KeyCode::KeyQ),
        keyboard.pressed(KeyCode::KeyE),
    ) {
        (true, false) => Tilt::Up,
        (false, true) => Tilt::Down,
        _ => Tilt::Level,
    };
}
