//! Content domain: startup loading with a built-in fallback.

use bevy::prelude::*;
use std::path::Path;

use crate::camera::CameraTuning;
use crate::content::{CONTENT_DIR, ContentRegistry, GameplayDefaults};
use crate::content::{load_all_content, validate_content, validate_defaults};
use crate::movement::MovementTuning;

pub(crate) fn load_content(
    mut commands: Commands,
    mut movement: ResMut<MovementTuning>,
    mut camera: ResMut<CameraTuning>,
) {
    let (registry, defaults) = match load_all_content(Path::new(CONTENT_DIR)) {
        Ok(loaded) => loaded,
        Err(errors) => {
            for e in &errors {
                error!("{}", e);
            }
            warn!("Falling back to the built-in level and default tuning");
            (ContentRegistry::builtin(), GameplayDefaults::default())
        }
    };

    let errors = validate_content(&registry);
    let registry = if errors.is_empty() {
        registry
    } else {
        for e in &errors {
            error!("{}", e);
        }
        warn!("Content failed validation, using the built-in level");
        ContentRegistry::builtin()
    };

    let errors = validate_defaults(&defaults, &registry);
    let defaults = if errors.is_empty() {
        defaults
    } else {
        for e in &errors {
            error!("{}", e);
        }
        warn!("Gameplay tuning failed validation, using default tuning");
        GameplayDefaults::default()
    };

    info!("{}", registry.summary());

    *movement = defaults.movement;
    *camera = defaults.camera;
    commands.insert_resource(registry);
    commands.insert_resource(defaults);
}
