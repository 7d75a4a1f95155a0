//! Core domain: decisions of the level flow, free of ECS access.

use crate::core::state::GameState;
use crate::movement::LocomotionKind;
use crate::save::SaveData;

/// Source name used in `GameplayPaused` by the pause menu.
pub const PAUSE_SOURCE: &str = "pause_menu";

/// Pause needs the player at rest and the camera following.
pub fn can_pause(camera_default: bool, player: LocomotionKind) -> bool {
    camera_default && player == LocomotionKind::Idle
}

/// Level after `current`, wrapping to the first once the last is won.
pub fn next_level_index(current: usize, level_count: usize) -> usize {
    if current + 1 < level_count {
        current + 1
    } else {
        0
    }
}

/// State entered after a death, once the penalty has been applied.
pub fn state_after_death(save: &SaveData) -> GameState {
    if save.is_game_over() {
        GameState::GameOver
    } else {
        GameState::Lost
    }
}
