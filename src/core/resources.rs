//! Core domain: shared resources for the level flow.

use bevy::prelude::*;
use std::collections::HashSet;

/// Resource tracking if gameplay should be paused.
/// Gameplay is paused if any source is active.
#[derive(Resource, Debug, Default)]
pub struct GameplayPaused {
    pub sources: HashSet<String>,
}

impl GameplayPaused {
    pub fn is_paused(&self) -> bool {
        !self.sources.is_empty()
    }

    pub fn pause(&mut self, source: impl Into<String>) {
        self.sources.insert(source.into());
    }

    pub fn unpause(&mut self, source: impl Into<String>) {
        self.sources.remove(&source.into());
    }
}

/// Run condition: returns true only when gameplay is not paused
pub fn gameplay_active(paused: Res<GameplayPaused>) -> bool {
    !paused.is_paused()
}

/// Keys driving the level flow.
#[derive(Resource, Debug, Clone)]
pub struct FlowKeys {
    pub pause: Vec<KeyCode>,
    pub submit: Vec<KeyCode>,
}

impl Default for FlowKeys {
    fn default() -> Self {
        Self {
            pause: vec![KeyCode::Escape, KeyCode::KeyP],
            submit: vec![KeyCode::Enter, KeyCode::NumpadEnter],
        }
    }
}
