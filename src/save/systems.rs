//! Save domain: startup load and persisting progress.

use bevy::prelude::*;

use crate::save::data::SaveData;
use crate::save::io::{load_save_file, write_save_file};
use crate::save::SavePath;

pub(crate) fn load_save(mut commands: Commands, path: Res<SavePath>) {
    let data = match load_save_file(&path.0) {
        Ok(data) => data,
        Err(e) => {
            error!("Failed to read save {:?}: {}", path.0, e);
            warn!("Starting from a fresh save");
            SaveData::default()
        }
    };

    info!(
        "Save loaded: level {}, {} total points",
        data.current_level, data.total_points
    );
    commands.insert_resource(data);
}

/// Banks a won level's points and writes the save straight away.
pub fn bank_level(path: &SavePath, data: &mut SaveData, points: i32, next_level: usize) {
    data.complete_level(points, next_level);
    persist(path, data);
}

/// Writes the save, logging instead of failing the frame.
pub fn persist(path: &SavePath, data: &SaveData) {
    match write_save_file(&path.0, data) {
        Ok(()) => debug!("Saved progress to {:?}", path.0),
        Err(e) => error!("Failed to write save {:?}: {}", path.0, e),
    }
}
