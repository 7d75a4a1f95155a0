//! Debug tooling for fast iteration on levels and tuning.
//!
//! Hotkeys:
//! - F1 toggles the locomotion/camera overlay
//! - F2 restarts the level, F3 skips to the next one
//! - F4 replays the camera intro
//! - F5 freezes new moves and the level timer

mod state;
mod systems;
mod ui;


pub use state::{DebugAction, DebugState, FREEZE_SOURCE};
pub use ui::{DebugInfoOverlay, describe_camera, describe_player};

use bevy::prelude::*;

use crate::core::GameState;
use crate::debug::systems::{
    handle_debug_hotkeys, update_debug_info_overlay, update_status_message,
};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>().add_systems(
            Update,
            (
                handle_debug_hotkeys,
                update_status_message,
                update_debug_info_overlay,
            )
                .chain()
                .run_if(not(in_state(GameState::Boot))),
        );
    }
}
