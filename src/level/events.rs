//! Level domain: messages for scoring, winning and restarting.

use bevy::ecs::message::Message;

use crate::content::Currency;

#[derive(Debug, Clone, Copy)]
pub struct ScoredEvent {
    pub currency: Currency,
    pub value: i32,
}

impl Message for ScoredEvent {}

/// The player reached an open exit.
#[derive(Debug, Clone, Copy)]
pub struct LevelWonEvent {
    pub level_index: usize,
    pub points: i32,
}

impl Message for LevelWonEvent {}

/// Every `Resettable` returns to its initial state.
#[derive(Debug, Clone, Copy)]
pub struct LevelRestartEvent;

impl Message for LevelRestartEvent {}

/// Replace the current level with the one at `index` in the registry.
#[derive(Debug, Clone, Copy)]
pub struct LoadLevelEvent {
    pub index: usize,
}

impl Message for LoadLevelEvent {}
