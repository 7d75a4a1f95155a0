//! Core domain: level flow systems.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::camera::CameraRig;
use crate::content::ContentRegistry;
use crate::core::flow::{PAUSE_SOURCE, can_pause, next_level_index, state_after_death};
use crate::core::resources::{FlowKeys, GameplayPaused};
use crate::core::state::GameState;
use crate::level::{LevelRestartEvent, LevelSession, LevelWonEvent, LoadLevelEvent};
use crate::movement::{Player, PlayerDiedEvent, PlayerMotor};
use crate::save::{SaveData, SavePath, bank_level, persist};

/// Content and save are in place once Startup has run; spawn the saved level.
pub(crate) fn finish_boot(
    save: Res<SaveData>,
    registry: Res<ContentRegistry>,
    mut load: MessageWriter<LoadLevelEvent>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    let index = if save.current_level < registry.level_count() {
        save.current_level
    } else {
        0
    };

    info!("Boot complete, starting at level {}", index);
    load.write(LoadLevelEvent { index });
    game_state.set(GameState::Playing);
}

pub(crate) fn toggle_pause(
    keyboard: Res<ButtonInput<KeyCode>>,
    keys: Res<FlowKeys>,
    state: Res<State<GameState>>,
    rigs: Query<&CameraRig>,
    players: Query<&PlayerMotor, With<Player>>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    if !keyboard.any_just_pressed(keys.pause.iter().copied()) {
        return;
    }

    match state.get() {
        GameState::Playing => {
            let camera_default = rigs.iter().all(|rig| rig.is_default());
            let Ok(motor) = players.single() else {
                return;
            };
            if can_pause(camera_default, motor.kind()) {
                game_state.set(GameState::Paused);
            } else {
                debug!("Pause ignored while {:?}", motor.kind());
            }
        }
        GameState::Paused => game_state.set(GameState::Playing),
        _ => {}
    }
}

pub(crate) fn pause_gameplay(mut paused: ResMut<GameplayPaused>) {
    paused.pause(PAUSE_SOURCE);
    info!("Paused");
}

pub(crate) fn resume_gameplay(mut paused: ResMut<GameplayPaused>) {
    paused.unpause(PAUSE_SOURCE);
    info!("Resumed");
}

/// A death costs the attempt's points; below zero the game is over.
pub(crate) fn handle_player_death(
    mut events: MessageReader<PlayerDiedEvent>,
    session: Res<LevelSession>,
    mut save: ResMut<SaveData>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    if events.read().last().is_none() {
        return;
    }

    save.apply_death_penalty(session.points);
    let next = state_after_death(&save);
    info!(
        "Player died on '{}', lost {} points (total {}), entering {:?}",
        session.level_name, session.points, save.total_points, next
    );
    game_state.set(next);
}

/// Points are banked and saved on the win itself, before the player confirms.
pub(crate) fn handle_level_won(
    mut events: MessageReader<LevelWonEvent>,
    registry: Res<ContentRegistry>,
    save_path: Res<SavePath>,
    mut save: ResMut<SaveData>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    let Some(event) = events.read().last().copied() else {
        return;
    };

    let next = next_level_index(event.level_index, registry.level_count());
    if next == 0 {
        info!("All {} levels complete", registry.level_count());
    }
    bank_level(&save_path, &mut save, event.points, next);

    info!(
        "Level {} won with {} points (total {})",
        event.level_index, event.points, save.total_points
    );
    game_state.set(GameState::Won);
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn handle_submit(
    keyboard: Res<ButtonInput<KeyCode>>,
    keys: Res<FlowKeys>,
    state: Res<State<GameState>>,
    save_path: Res<SavePath>,
    mut save: ResMut<SaveData>,
    mut restart: MessageWriter<LevelRestartEvent>,
    mut load: MessageWriter<LoadLevelEvent>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    if !keyboard.any_just_pressed(keys.submit.iter().copied()) {
        return;
    }

    match state.get() {
        GameState::Lost => {
            restart.write(LevelRestartEvent);
            game_state.set(GameState::Playing);
        }
        GameState::Won => {
            load.write(LoadLevelEvent {
                index: save.current_level,
            });
            game_state.set(GameState::Playing);
        }
        GameState::GameOver => {
            info!("Game over, starting again from the first level");
            save.reset();
            persist(&save_path, &save);
            load.write(LoadLevelEvent { index: 0 });
            game_state.set(GameState::Playing);
        }
        _ => {}
    }
}
