//! Core domain: game state definitions for the level flow.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Copy, Default)]
pub enum GameState {
    /// Content and save are loading; nothing is spawned yet.
    #[default]
    Boot,
    Playing,
    Paused,
    /// Reached the exit; submit moves on to the next level.
    Won,
    /// Died; submit restarts the level.
    Lost,
    /// Total points dropped below zero; submit starts over from level 0.
    GameOver,
}
