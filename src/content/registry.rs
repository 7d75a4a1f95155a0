//! ContentRegistry resource holding the loaded levels in play order.

use bevy::prelude::*;

use super::data::*;

/// Central registry for all loaded game content.
/// Levels keep the order of levels.ron; the index is the level number.
#[derive(Resource, Default, Debug, Clone)]
pub struct ContentRegistry {
    pub levels: Vec<LevelDef>,
}

impl ContentRegistry {
    /// Registry used when levels.ron is missing or invalid.
    pub fn builtin() -> Self {
        Self {
            levels: vec![builtin_level()],
        }
    }

    pub fn level(&self, index: usize) -> Option<&LevelDef> {
        self.levels.get(index)
    }

    pub fn level_index(&self, id: &str) -> Option<usize> {
        self.levels.iter().position(|level| level.id == id)
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Returns a summary of loaded content counts for logging.
    pub fn summary(&self) -> String {
        let pickups: usize = self.levels.iter().map(|level| level.pickups.len()).sum();
        let hazards: usize = self.levels.iter().map(|level| level.hazards.len()).sum();
        format!(
            "ContentRegistry loaded:\n\
             - Levels: {}\n\
             - Pickups: {}\n\
             - Hazards: {}",
            self.levels.len(),
            pickups,
            hazards,
        )
    }

    /// Returns total count of all loaded items.
    pub fn total_count(&self) -> usize {
        self.levels.len()
    }
}

/// A small slab with one energy cell and the exit at the far end.
fn builtin_level() -> LevelDef {
    LevelDef {
        id: "builtin".to_string(),
        name: "Proving Slab".to_string(),
        box_size: 1.0,
        gravity: 9.81,
        time_limit: 120.0,
        start: StartDef {
            cell: (0, 0, 0),
            up: (0.0, 1.0, 0.0),
            forward: (1.0, 0.0, 0.0),
        },
        target_energy: 1,
        blocks: Vec::new(),
        fills: vec![FillDef {
            from: (0, 0, -1),
            to: (4, 0, 1),
        }],
        pickups: vec![
            PickupDef {
                cell: (2, 1, 0),
                currency: Currency::Energy,
                value: 1,
            },
            PickupDef {
                cell: (4, 1, 1),
                currency: Currency::Points,
                value: 10,
            },
        ],
        hazards: Vec::new(),
        exit: ExitDef { cell: (4, 1, 0) },
        pause_camera: None,
        intro_seconds: 2.0,
    }
}
