//! Content domain: level and tuning data loaded from assets/data at startup.

mod data;
mod loader;
mod registry;
mod systems;
mod validation;

#[cfg(test)]
mod tests;

pub use data::{
    CellDef, Currency, DataFile, ExitDef, FillDef, GameplayDefaults, HazardDef, LevelDef,
    PauseCameraDef, PickupDef, StartDef, VecDef, cell, vec3,
};
pub use loader::{ContentLoadError, load_all_content, parse_data_file, parse_single_file};
pub use registry::ContentRegistry;
pub use validation::{ValidationError, validate_content, validate_defaults};

use bevy::prelude::*;

use crate::content::systems::load_content;

/// Directory the content files are read from, relative to the working directory.
pub const CONTENT_DIR: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<LevelDef>()
            .register_type::<StartDef>()
            .register_type::<FillDef>()
            .register_type::<PickupDef>()
            .register_type::<HazardDef>()
            .register_type::<ExitDef>()
            .register_type::<PauseCameraDef>()
            .register_type::<Currency>()
            .register_type::<GameplayDefaults>()
            .init_resource::<ContentRegistry>()
            .init_resource::<GameplayDefaults>()
            .add_systems(Startup, load_content);
    }
}
