//! Debug domain: hotkeys and overlay refresh.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::camera::CameraRig;
use crate::content::ContentRegistry;
use crate::core::{GameState, GameplayPaused, next_level_index};
use crate::debug::state::{DebugAction, DebugState, FREEZE_SOURCE};
use crate::debug::ui::{
    DebugInfoOverlay, describe_camera, describe_player, spawn_debug_info_overlay,
};
use crate::level::{LevelRestartEvent, LevelSession, LoadLevelEvent};
use crate::movement::{Player, PlayerMotor};

/// Handle keyboard shortcuts for debug actions
#[allow(clippy::too_many_arguments)]
pub(crate) fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    mut paused: ResMut<GameplayPaused>,
    session: Res<LevelSession>,
    registry: Res<ContentRegistry>,
    mut rigs: Query<&mut CameraRig>,
    mut restart: MessageWriter<LevelRestartEvent>,
    mut load: MessageWriter<LoadLevelEvent>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    for action in DebugAction::ALL {
        if !keyboard.just_pressed(action.key()) {
            continue;
        }

        let msg = match action {
            DebugAction::ToggleInfo => {
                debug_state.show_info = !debug_state.show_info;
                continue;
            }
            DebugAction::RestartLevel => {
                restart.write(LevelRestartEvent);
                game_state.set(GameState::Playing);
                "Level restarted".to_string()
            }
            DebugAction::NextLevel => {
                let next = next_level_index(session.level_index, registry.level_count());
                load.write(LoadLevelEvent { index: next });
                game_state.set(GameState::Playing);
                format!("Skipped to level {}", next)
            }
            DebugAction::ReplayIntro => {
                for mut rig in &mut rigs {
                    rig.request_intro();
                }
                "Intro replay requested".to_string()
            }
            DebugAction::ToggleFreeze => {
                debug_state.frozen = !debug_state.frozen;
                if debug_state.frozen {
                    paused.pause(FREEZE_SOURCE);
                    "Gameplay frozen".to_string()
                } else {
                    paused.unpause(FREEZE_SOURCE);
                    "Gameplay resumed".to_string()
                }
            }
        };

        info!("[DEBUG] {}", msg);
        debug_state.set_message(msg, 2.0);
    }
}

pub(crate) fn update_status_message(time: Res<Time>, mut debug_state: ResMut<DebugState>) {
    if let Some((_, ref mut duration)) = debug_state.status_message {
        *duration -= time.delta_secs();
        if *duration <= 0.0 {
            debug_state.status_message = None;
        }
    }
}

/// Update the debug info overlay with current player and camera state
pub(crate) fn update_debug_info_overlay(
    mut commands: Commands,
    debug_state: Res<DebugState>,
    game_state: Res<State<GameState>>,
    players: Query<&PlayerMotor, With<Player>>,
    rigs: Query<&CameraRig>,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    if !debug_state.show_info {
        // Cleanup overlay if it exists
        for entity in &existing_overlay {
            commands.entity(entity).despawn();
        }
        return;
    }

    if existing_overlay.is_empty() {
        spawn_debug_info_overlay(&mut commands);
        return;
    }

    let Ok(mut text) = overlay_query.single_mut() else {
        return;
    };

    let mut lines = vec![format!("Game: {:?}", game_state.get())];
    if let Ok(motor) = players.single() {
        lines.push(describe_player(motor));
    }
    if let Some(rig) = rigs.iter().next() {
        lines.push(describe_camera(rig));
    }
    if debug_state.frozen {
        lines.push("FROZEN".to_string());
    }
    if let Some((message, _)) = &debug_state.status_message {
        lines.push(message.clone());
    }

    **text = lines.join("\n");
}
