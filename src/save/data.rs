//! Save domain: progress carried between levels and sessions.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Run-wide totals. Level points are banked into the total only when the
/// level is won; deaths take the attempt's points back out.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveData {
    pub total_points: i32,
    pub current_level: usize,
    /// Points banked for each completed level, in completion order.
    pub points_per_level: Vec<i32>,
}

impl SaveData {
    pub fn complete_level(&mut self, points: i32, next_level: usize) {
        self.points_per_level.push(points);
        self.total_points += points;
        self.current_level = next_level;
    }

    pub fn apply_death_penalty(&mut self, points: i32) {
        self.total_points -= points;
    }

    pub fn is_game_over(&self) -> bool {
        self.total_points < 0
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
