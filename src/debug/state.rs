//! Debug domain: state and action definitions for debug tooling.

use bevy::prelude::*;

/// Source name used in `GameplayPaused` while gameplay is frozen.
pub const FREEZE_SOURCE: &str = "debug_freeze";

/// Resource tracking debug mode state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Whether to show the locomotion/camera overlay
    pub show_info: bool,
    /// Whether new moves and the level timer are held
    pub frozen: bool,
    /// Message to display temporarily in the overlay
    pub status_message: Option<(String, f32)>,
}

impl DebugState {
    /// Set a status message that will fade after a duration
    pub fn set_message(&mut self, message: impl Into<String>, duration: f32) {
        self.status_message = Some((message.into(), duration));
    }
}

/// Actions that can be triggered from debug hotkeys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugAction {
    ToggleInfo,
    RestartLevel,
    NextLevel,
    ReplayIntro,
    ToggleFreeze,
}

impl DebugAction {
    pub const ALL: [DebugAction; 5] = [
        DebugAction::ToggleInfo,
        DebugAction::RestartLevel,
        DebugAction::NextLevel,
        DebugAction::ReplayIntro,
        DebugAction::ToggleFreeze,
    ];

    pub fn key(self) -> KeyCode {
        match self {
            DebugAction::ToggleInfo => KeyCode::F1,
            DebugAction::RestartLevel => KeyCode::F2,
            DebugAction::NextLevel => KeyCode::F3,
            DebugAction::ReplayIntro => KeyCode::F4,
            DebugAction::ToggleFreeze => KeyCode::F5,
        }
    }
}
