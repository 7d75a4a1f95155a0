//! Core domain: game state, pause bookkeeping and the level flow.

mod flow;
mod resources;
mod state;
mod systems;


pub use flow::{PAUSE_SOURCE, can_pause, next_level_index, state_after_death};
pub use resources::{FlowKeys, GameplayPaused, gameplay_active};
pub use state::GameState;

use bevy::prelude::*;

use crate::core::systems::{
    finish_boot, handle_level_won, handle_player_death, handle_submit, pause_gameplay,
    resume_gameplay, toggle_pause,
};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<GameplayPaused>()
            .init_resource::<FlowKeys>()
            .add_systems(Update, finish_boot.run_if(in_state(GameState::Boot)))
            .add_systems(OnEnter(GameState::Paused), pause_gameplay)
            .add_systems(OnExit(GameState::Paused), resume_gameplay)
            .add_systems(
                Update,
                (
                    toggle_pause,
                    (handle_player_death, handle_level_won).run_if(in_state(GameState::Playing)),
                    handle_submit,
                )
                    .chain()
                    .run_if(not(in_state(GameState::Boot))),
            );
    }
}
