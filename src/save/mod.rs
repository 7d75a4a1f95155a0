//! Save domain: the progress record persisted between sessions.

mod data;
mod io;
mod systems;

#[cfg(test)]
mod tests;

pub use data::SaveData;
pub use io::{SaveError, load_save_file, write_save_file};
pub use systems::{bank_level, persist};

use bevy::prelude::*;
use std::path::PathBuf;

use crate::save::systems::load_save;

/// Location of the save file.
#[derive(Resource, Debug, Clone)]
pub struct SavePath(pub PathBuf);

impl Default for SavePath {
    fn default() -> Self {
        Self(PathBuf::from("save/progress.json"))
    }
}

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SavePath>()
            .init_resource::<SaveData>()
            .add_systems(Startup, load_save);
    }
}
