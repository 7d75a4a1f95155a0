//! Level domain: per-attempt bookkeeping of points, energy and time.

use bevy::prelude::*;

use crate::content::Currency;

/// Totals of the attempt in progress. Cleared on every restart.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct LevelSession {
    pub level_index: usize,
    pub level_name: String,
    pub points: i32,
    pub energy: u32,
    pub elapsed: f32,
    pub time_limit: f32,
    pub target_energy: u32,
}

impl Default for LevelSession {
    fn default() -> Self {
        Self::new(0, String::new(), 120.0, 0)
    }
}

impl LevelSession {
    pub fn new(level_index: usize, level_name: String, time_limit: f32, target_energy: u32) -> Self {
        Self {
            level_index,
            level_name,
            points: 0,
            energy: 0,
            elapsed: 0.0,
            time_limit,
            target_energy,
        }
    }

    /// Energy always counts one, whatever value the pickup carries.
    pub fn score(&mut self, value: i32, currency: Currency) {
        match currency {
            Currency::Points => self.points += value,
            Currency::Energy => self.energy += 1,
            Currency::Secret => {}
        }
    }

    pub fn exit_open(&self) -> bool {
        self.energy >= self.target_energy
    }

    /// Advances the clock. True once the time limit is exceeded.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.elapsed > self.time_limit
    }

    pub fn remaining(&self) -> f32 {
        (self.time_limit - self.elapsed).max(0.0)
    }

    pub fn restart(&mut self) {
        self.points = 0;
        self.energy = 0;
        self.elapsed = 0.0;
    }
}
