//! Level domain: level spawning, session bookkeeping and the restart broadcast.

mod components;
mod events;
mod session;
mod spawn;
mod systems;


pub use components::{Block, Collected, Exit, Hazard, LevelEntity, Pickup, Resettable};
pub use events::{LevelRestartEvent, LevelWonEvent, LoadLevelEvent, ScoredEvent};
pub use session::LevelSession;
pub use spawn::{LevelLayout, LevelMaterials};
pub use systems::within_reach;

use bevy::prelude::*;

use crate::core::{GameState, gameplay_active};
use crate::level::spawn::spawn_level;
use crate::level::systems::{
    collect_pickups, reach_exit, reset_pickups_on_restart, reset_session_on_restart,
    tick_level_timer, touch_hazards, update_exit_material,
};

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelSession>()
            .add_message::<ScoredEvent>()
            .add_message::<LevelWonEvent>()
            .add_message::<LevelRestartEvent>()
            .add_message::<LoadLevelEvent>()
            .add_systems(
                Update,
                (
                    spawn_level,
                    (tick_level_timer, collect_pickups, touch_hazards, reach_exit)
                        .chain()
                        .run_if(in_state(GameState::Playing).and(gameplay_active)),
                    reset_session_on_restart,
                    reset_pickups_on_restart,
                    update_exit_material,
                )
                    .chain(),
            );
    }
}
