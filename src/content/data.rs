//! Data definitions for the RON content files.
//!
//! These structs mirror the structure in assets/data/*.ron and are used
//! for deserialization. The ContentRegistry keeps levels in play order.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::camera::CameraTuning;
use crate::movement::MovementTuning;

// ============================================================================
// Common wrapper for RON files with schema_version and items
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

/// Lattice cell as written in RON: `(x, y, z)`.
pub type CellDef = (i32, i32, i32);

/// Vector as written in RON: `(x, y, z)`.
pub type VecDef = (f32, f32, f32);

pub fn cell(def: CellDef) -> IVec3 {
    IVec3::new(def.0, def.1, def.2)
}

pub fn vec3(def: VecDef) -> Vec3 {
    Vec3::new(def.0, def.1, def.2)
}

// ============================================================================
// Levels (levels.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct LevelDef {
    pub id: String,
    pub name: String,
    #[serde(default = "default_box_size")]
    pub box_size: f32,
    /// Gravity magnitude; the direction always follows the player's face.
    #[serde(default = "default_gravity")]
    pub gravity: f32,
    /// Seconds before the level restarts on its own.
    #[serde(default = "default_time_limit")]
    pub time_limit: f32,
    pub start: StartDef,
    #[serde(default)]
    pub target_energy: u32,
    #[serde(default)]
    pub blocks: Vec<CellDef>,
    #[serde(default)]
    pub fills: Vec<FillDef>,
    #[serde(default)]
    pub pickups: Vec<PickupDef>,
    #[serde(default)]
    pub hazards: Vec<HazardDef>,
    pub exit: ExitDef,
    pub pause_camera: Option<PauseCameraDef>,
    #[serde(default = "default_intro_seconds")]
    pub intro_seconds: f32,
}

impl LevelDef {
    /// Every solid cell: explicit blocks first, then the expanded fills.
    pub fn solid_cells(&self) -> Vec<IVec3> {
        let mut cells: Vec<IVec3> = self.blocks.iter().copied().map(cell).collect();
        for fill in &self.fills {
            cells.extend(fill.cells());
        }
        cells
    }

    /// Total energy the level's pickups can yield.
    pub fn available_energy(&self) -> u32 {
        self.pickups
            .iter()
            .filter(|pickup| pickup.currency == Currency::Energy)
            .count() as u32
    }
}

/// The player starts resting on top of `cell`, with gravity opposite `up`.
#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct StartDef {
    pub cell: CellDef,
    #[serde(default = "default_up")]
    pub up: VecDef,
    #[serde(default = "default_forward")]
    pub forward: VecDef,
}

/// Inclusive box of blocks between two corners.
#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct FillDef {
    pub from: CellDef,
    pub to: CellDef,
}

impl FillDef {
    pub fn cells(&self) -> Vec<IVec3> {
        let a = cell(self.from);
        let b = cell(self.to);
        let (min, max) = (a.min(b), a.max(b));

        let mut cells = Vec::new();
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    cells.push(IVec3::new(x, y, z));
                }
            }
        }
        cells
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Reflect, Default)]
pub enum Currency {
    #[default]
    Points,
    /// Counts toward opening the exit. Always worth one.
    Energy,
    /// Collected but never scored.
    Secret,
}

/// A collectible floating in an empty cell.
#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct PickupDef {
    pub cell: CellDef,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default = "default_pickup_value")]
    pub value: i32,
}

/// Kills the player on contact unless they are warping through it.
#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct HazardDef {
    pub cell: CellDef,
}

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct ExitDef {
    pub cell: CellDef,
}

/// Overview pose the camera parks at while paused and starts the intro from.
#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct PauseCameraDef {
    pub position: VecDef,
    pub look_at: VecDef,
}

fn default_box_size() -> f32 {
    1.0
}

fn default_gravity() -> f32 {
    9.81
}

fn default_time_limit() -> f32 {
    120.0
}

fn default_intro_seconds() -> f32 {
    2.0
}

fn default_up() -> VecDef {
    (0.0, 1.0, 0.0)
}

fn default_forward() -> VecDef {
    (1.0, 0.0, 0.0)
}

fn default_pickup_value() -> i32 {
    1
}

// ============================================================================
// Gameplay Defaults (gameplay_defaults.ron)
// ============================================================================

#[derive(Resource, Debug, Clone, Default, Deserialize, Serialize, Reflect)]
pub struct GameplayDefaults {
    pub schema_version: u32,
    #[serde(default)]
    pub movement: MovementTuning,
    #[serde(default)]
    pub camera: CameraTuning,
}
